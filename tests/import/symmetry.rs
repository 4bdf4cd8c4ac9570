//! A template re-imported unchanged must be accepted in full

use audit_import::import::{
    AuditType, Auditor, ExistingRecords, ImportFile, ImportKind, ImportRecord, ImportRegistry,
    NormativeRequirement, Process, Sector, Subprocess,
};
use audit_import::template::generate_template;

use crate::common::importer;

fn import_template<T: ImportRecord>(registry: &ImportRegistry, existing: &ExistingRecords) -> Vec<T> {
    let bytes = generate_template(T::KIND, registry).unwrap();
    let file = ImportFile::from_bytes("modelo.xlsx", bytes);
    let result = importer(registry).import::<T>(&file, existing).unwrap();

    let examples = registry.get(T::KIND).unwrap().example_rows.len();
    assert_eq!(result.total_errors, 0, "{}: {:?}", T::KIND, result.errors);
    assert_eq!(result.total_success, examples, "{}", T::KIND);
    assert!(result.success);
    result.data
}

#[test]
fn test_standalone_templates_round_trip() {
    let registry = ImportRegistry::standard();
    let existing = ExistingRecords::new();

    import_template::<Auditor>(&registry, &existing);
    import_template::<Sector>(&registry, &existing);
    import_template::<AuditType>(&registry, &existing);

    let requirements = import_template::<NormativeRequirement>(&registry, &existing);
    assert_eq!(requirements[0].weight, 10.0);
}

#[test]
fn test_dependent_templates_round_trip_in_order() {
    let registry = ImportRegistry::standard();

    let sectors = import_template::<Sector>(&registry, &ExistingRecords::new());
    let existing = ExistingRecords::new().with(sectors);

    let subprocesses = import_template::<Subprocess>(&registry, &existing);
    let existing = existing.with(subprocesses);

    let processes = import_template::<Process>(&registry, &existing);
    assert_eq!(processes[0].subprocess.as_deref(), Some("Controle de Documentos"));
    assert_eq!(processes[1].subprocess, None);
}

#[test]
fn test_dependent_template_without_references_fails() {
    let registry = ImportRegistry::standard();
    let bytes = generate_template(ImportKind::Subprocesses, &registry).unwrap();
    let file = ImportFile::from_bytes("modelo.xlsx", bytes);

    let result = importer(&registry)
        .import::<Subprocess>(&file, &ExistingRecords::new())
        .unwrap();
    assert_eq!(result.total_success, 0);
    assert!(result.errors.iter().all(|e| e.field == "setor"));
}
