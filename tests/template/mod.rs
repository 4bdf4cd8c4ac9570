use std::io::Cursor;

use audit_import::import::{Auditor, ExistingRecords, ImportKind, ImportRegistry};
use audit_import::template::{generate_template, save_template, template_file_name, write_error_report};
use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::common::{AUDITOR_HEADERS, importer, xlsx};

#[test]
fn test_template_headers_match_registry_labels() {
    let registry = ImportRegistry::standard();
    for kind in ImportKind::ALL {
        let bytes = generate_template(kind, &registry).unwrap();
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.as_slice())).unwrap();
        let range = workbook.worksheet_range("Dados").unwrap();

        let headers: Vec<String> = range
            .rows()
            .next()
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(headers, registry.get(kind).unwrap().labels(), "{}", kind);
    }
}

#[test]
fn test_error_report_lists_every_error() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[
        AUDITOR_HEADERS,
        &["", "sem-arroba", "", "", "talvez"],
        &["Ana Souza", "ana@empresa.com", "", "", "Sim"],
        &["Ana Souza", "ana@empresa.com", "", "", "Sim"],
    ]);
    let result = importer(&registry)
        .import::<Auditor>(&file, &ExistingRecords::new())
        .unwrap();
    assert_eq!(result.errors.len(), 4);

    let bytes = write_error_report(&result.errors).unwrap();
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.as_slice())).unwrap();
    let range = workbook.worksheet_range("Erros").unwrap();
    let rows: Vec<_> = range.rows().collect();

    assert_eq!(rows.len(), result.errors.len() + 1);
    for (row, error) in rows.iter().skip(1).zip(&result.errors) {
        assert_eq!(row[0], Data::Float(error.row as f64));
        assert_eq!(row[1], Data::String(error.field.clone()));
        assert_eq!(row[3], Data::String(error.message.clone()));
    }
}

#[test]
fn test_save_template_to_disk() {
    let dir = std::env::temp_dir().join(format!("audit-import-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(template_file_name(ImportKind::AuditTypes));

    save_template(ImportKind::AuditTypes, &ImportRegistry::standard(), &path).unwrap();
    assert!(path.exists());
    assert!(path.ends_with("modelo-tipos-de-auditoria.xlsx"));

    let _ = std::fs::remove_dir_all(&dir);
}
