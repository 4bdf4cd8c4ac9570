mod gate;
mod rows;
mod symmetry;
