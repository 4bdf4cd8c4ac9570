//! Checklists built from imported normative requirements

pub mod convert;
pub mod model;

pub use convert::{ConversionError, build_checklist_preview, commit_checklist};
pub use model::{Checklist, ChecklistCategory, ChecklistItem, ChecklistMeta};
