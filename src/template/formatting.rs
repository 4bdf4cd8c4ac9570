//! Cell formats shared by the generated workbooks

use rust_xlsxwriter::*;

pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
}

/// Header of a column that must be filled
pub fn create_required_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x2F5597))
        .set_font_color(Color::White)
}

pub fn create_title_format() -> Format {
    Format::new().set_bold().set_font_size(14)
}

pub fn create_error_format() -> Format {
    Format::new().set_background_color(Color::RGB(0xFFB6C1)) // Light Pink
}
