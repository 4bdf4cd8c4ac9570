use audit_import::import::{
    ExistingRecords, ImportFailure, ImportFile, ImportLimits, ImportRegistry, Importer, Sector,
};

use crate::common::{AUDITOR_HEADERS, workbook, xlsx};

#[test]
fn test_wrong_extension_rejected_before_parsing() {
    let registry = ImportRegistry::standard();
    let importer = Importer::new(&registry, ImportLimits::default());
    // valid workbook, rows that would fail validation, but a csv name
    let bytes = workbook(&[&["Nome", "Ativo"], &["", "talvez"]]);
    let file = ImportFile::from_bytes("setores.csv", bytes);

    let err = importer
        .import::<Sector>(&file, &ExistingRecords::new())
        .unwrap_err();
    assert!(matches!(err, ImportFailure::FileType { .. }));
    assert!(err.is_gate_rejection());
}

#[test]
fn test_oversized_file_rejected_before_parsing() {
    let registry = ImportRegistry::standard();
    let importer = Importer::new(&registry, ImportLimits::new(1));
    let file = ImportFile::from_bytes("setores.xlsx", vec![0u8; 1024 * 1024 + 1]);

    let err = importer
        .import::<Sector>(&file, &ExistingRecords::new())
        .unwrap_err();
    assert!(matches!(err, ImportFailure::FileSize { limit_mb: 1, .. }));
}

#[test]
fn test_unreadable_bytes_are_a_format_error() {
    let registry = ImportRegistry::standard();
    let importer = Importer::new(&registry, ImportLimits::default());
    let file = ImportFile::from_bytes("setores.xlsx", b"PK not really a zip".to_vec());

    let err = importer
        .import::<Sector>(&file, &ExistingRecords::new())
        .unwrap_err();
    assert!(matches!(err, ImportFailure::FileFormat { .. }));
}

#[test]
fn test_uppercase_extension_is_accepted() {
    let registry = ImportRegistry::standard();
    let importer = Importer::new(&registry, ImportLimits::default());
    let mut file = xlsx(&[AUDITOR_HEADERS]);
    file.name = "AUDITORES.XLSX".to_string();

    let result = importer
        .import::<audit_import::import::Auditor>(&file, &ExistingRecords::new())
        .unwrap();
    assert!(result.no_data);
}

#[tokio::test]
async fn test_load_then_import_from_disk() {
    let dir = std::env::temp_dir().join(format!("audit-import-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("setores.xlsx");
    std::fs::write(&path, workbook(&[&["Nome", "Ativo"], &["Qualidade", "Sim"]])).unwrap();

    let file = ImportFile::load(&path).await.unwrap();
    assert_eq!(file.name, "setores.xlsx");

    let registry = ImportRegistry::standard();
    let importer = Importer::new(&registry, ImportLimits::default());
    let result = importer
        .import::<Sector>(&file, &ExistingRecords::new())
        .unwrap();
    assert_eq!(result.total_success, 1);

    let _ = std::fs::remove_dir_all(&dir);
}
