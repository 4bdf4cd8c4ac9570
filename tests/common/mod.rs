//! Spreadsheet fixtures built in memory

use audit_import::import::{ImportFile, ImportLimits, ImportRegistry, Importer};
use rust_xlsxwriter::Workbook;

/// `.xlsx` bytes with one sheet holding `rows`; empty strings are left blank
pub fn workbook(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Dados").unwrap();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

pub fn xlsx(rows: &[&[&str]]) -> ImportFile {
    ImportFile::from_bytes("planilha.xlsx", workbook(rows))
}

pub fn importer(registry: &ImportRegistry) -> Importer<'_> {
    Importer::new(registry, ImportLimits::default())
}

pub const AUDITOR_HEADERS: &[&str] = &["Nome", "Email", "Telefone", "Especialidade", "Ativo"];
pub const SUBPROCESS_HEADERS: &[&str] = &["Nome", "Setor", "Descrição", "Ativo"];
pub const REQUIREMENT_HEADERS: &[&str] = &[
    "Norma",
    "Versão",
    "Capítulo",
    "Código do Requisito",
    "Descrição",
    "Critério de Avaliação",
    "Tipo de Verificação",
    "Peso",
    "Observações",
];
