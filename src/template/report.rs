use rust_xlsxwriter::*;

use super::TemplateError;
use super::formatting::{create_error_format, create_header_format};
use crate::import::ImportError;

pub const ERRORS_SHEET: &str = "Erros";

/// Write row errors to a workbook so they can be fixed in place
pub fn write_error_report(errors: &[ImportError]) -> Result<Vec<u8>, TemplateError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(ERRORS_SHEET)?;

    let header_format = create_header_format();
    let error_format = create_error_format();

    let headers = ["Linha", "Campo", "Valor", "Mensagem"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, error) in errors.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_number(row, 0, error.row as f64)?;
        sheet.write_string(row, 1, &error.field)?;
        if !error.value.is_blank() {
            sheet.write_string(row, 2, error.value.as_text())?;
        }
        sheet.write_string_with_format(row, 3, &error.message, &error_format)?;
    }

    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();

    log::debug!("Error report with {} entries", errors.len());
    Ok(workbook.save_to_buffer()?)
}
