//! Import templates: a data sheet with the exact headers and example rows,
//! plus an instructions sheet describing every column.

use log::{debug, info};
use rust_xlsxwriter::*;
use std::path::Path;

use super::TemplateError;
use super::formatting::*;
use crate::import::{ColumnType, ImportColumnSpec, ImportConfig, ImportKind, ImportRegistry, RuleKind};

pub const INSTRUCTIONS_SHEET: &str = "Instruções";

/// Generate the template workbook for `kind`
///
/// # Arguments
/// * `kind` - Import kind the template is for
/// * `registry` - Column contracts; the importer must use the same registry
///
/// # Returns
/// * `Ok(Vec<u8>)` - `.xlsx` bytes
pub fn generate_template(kind: ImportKind, registry: &ImportRegistry) -> Result<Vec<u8>, TemplateError> {
    let config = registry.get(kind).ok_or(TemplateError::Unconfigured(kind))?;

    let mut workbook = Workbook::new();
    create_data_sheet(&mut workbook, config)?;
    create_instructions_sheet(&mut workbook, config)?;

    let bytes = workbook.save_to_buffer()?;
    debug!("Generated {} template ({} bytes)", kind, bytes.len());
    Ok(bytes)
}

/// Generate the template for `kind` and write it to `path`
pub fn save_template(
    kind: ImportKind,
    registry: &ImportRegistry,
    path: impl AsRef<Path>,
) -> Result<(), TemplateError> {
    let path = path.as_ref();
    let bytes = generate_template(kind, registry)?;
    std::fs::write(path, bytes).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Template for {} saved to {:?}", kind, path);
    Ok(())
}

/// Default file name for a template, e.g. `modelo-setores.xlsx`
pub fn template_file_name(kind: ImportKind) -> String {
    let name = kind.display_name().to_lowercase().replace(' ', "-");
    format!("modelo-{}.xlsx", name)
}

fn create_data_sheet(workbook: &mut Workbook, config: &ImportConfig) -> Result<(), TemplateError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(&config.sheet_name)?;

    let header_format = create_header_format();
    let required_format = create_required_header_format();

    for (col, column) in config.columns.iter().enumerate() {
        let format = if column.required { &required_format } else { &header_format };
        sheet.write_string_with_format(0, col as u16, &column.label, format)?;
    }

    for (idx, example) in config.example_rows.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, (column, value)) in config.columns.iter().zip(example).enumerate() {
            if value.is_empty() {
                continue;
            }
            match (column.column_type, value.parse::<f64>()) {
                (ColumnType::Number, Ok(number)) => {
                    sheet.write_number(row, col as u16, number)?;
                }
                _ => {
                    sheet.write_string(row, col as u16, value)?;
                }
            }
        }
    }

    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();
    Ok(())
}

fn create_instructions_sheet(workbook: &mut Workbook, config: &ImportConfig) -> Result<(), TemplateError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(INSTRUCTIONS_SHEET)?;

    let title_format = create_title_format();

    sheet.write_string_with_format(
        0,
        0,
        &format!("Importação de {}", config.kind.display_name()),
        &title_format,
    )?;
    sheet.write_string(
        1,
        0,
        &format!(
            "Preencha a aba \"{}\" a partir da linha 2, sem alterar os cabeçalhos. Linhas em branco são ignoradas.",
            config.sheet_name
        ),
    )?;

    for (idx, column) in config.columns.iter().enumerate() {
        sheet.write_string(idx as u32 + 3, 0, column_instruction(config, column))?;
    }

    sheet.autofit();
    Ok(())
}

/// One sentence per column, e.g. "Peso (obrigatório): número, entre 1 e 100. Exemplo: 10"
fn column_instruction(config: &ImportConfig, column: &ImportColumnSpec) -> String {
    let mut parts = vec![match column.column_type {
        ColumnType::Text => "texto".to_string(),
        ColumnType::Email => "endereço de email válido".to_string(),
        ColumnType::Number => "número".to_string(),
        ColumnType::Select => format!("um dos valores {}", column.options.join(", ")),
    }];
    if let Some(max) = column.max_length {
        parts.push(format!("até {} caracteres", max));
    }
    for rule in config.rules_for(&column.key) {
        match &rule.kind {
            RuleKind::Range { min, max } => parts.push(format!("entre {} e {}", min, max)),
            RuleKind::Unique => parts.push("não pode se repetir".to_string()),
            RuleKind::Exists { collection, .. } => {
                parts.push(format!("deve existir em {}", collection.display_name()))
            }
            RuleKind::Required
            | RuleKind::MaxLength { .. }
            | RuleKind::Email
            | RuleKind::Select { .. } => {}
        }
    }

    let requirement = if column.required { "obrigatório" } else { "opcional" };
    let mut sentence = format!("{} ({}): {}.", column.label, requirement, parts.join(", "));
    if !column.example.is_empty() {
        sentence.push_str(&format!(" Exemplo: {}", column.example));
    }
    sentence
}
