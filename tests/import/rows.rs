use audit_import::import::{
    AuditType, Auditor, ExistingRecords, FirstSeen, ImportKind, ImportOutcome, ImportRegistry,
    NormativeRequirement, Process, Sector, Subprocess, YesNo,
};

use crate::common::{AUDITOR_HEADERS, REQUIREMENT_HEADERS, SUBPROCESS_HEADERS, importer, xlsx};

fn quality_sector() -> Sector {
    Sector {
        name: "Qualidade".into(),
        description: None,
        manager: None,
        active: YesNo::Sim,
    }
}

#[test]
fn test_row_accounting_with_mixed_rows() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[
        AUDITOR_HEADERS,
        &["Ana Souza", "ana@empresa.com", "", "ISO 9001", "Sim"],
        &["", "sem-arroba", "", "", "talvez"],
        &["Carlos Lima", "carlos@empresa.com", "", "", "Não"],
        &["Beatriz", "beatriz@empresa", "", "", "Sim"],
    ]);

    let result = importer(&registry)
        .import::<Auditor>(&file, &ExistingRecords::new())
        .unwrap();

    assert_eq!(result.total_processed, 4);
    assert_eq!(result.total_success, 2);
    assert_eq!(result.total_errors, 2);
    assert_eq!(
        result.total_processed,
        result.total_success + result.total_errors
    );
    assert!(!result.success);
    // row 3 has three problems, row 5 one
    assert_eq!(result.errors_for_row(3).count(), 3);
    assert_eq!(result.errors_for_row(5).count(), 1);
    assert_eq!(result.failed_rows(), vec![3, 5]);
    assert_eq!(result.data[1].name, "Carlos Lima");
}

#[test]
fn test_duplicate_within_batch_keeps_first_row() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[
        AUDITOR_HEADERS,
        &["Ana Souza", "ana@empresa.com", "", "", "Sim"],
        &["Ana S.", "  ANA@Empresa.com ", "", "", "Sim"],
    ]);

    let result = importer(&registry)
        .import::<Auditor>(&file, &ExistingRecords::new())
        .unwrap();

    assert_eq!(result.total_success, 1);
    assert_eq!(result.total_errors, 1);
    assert_eq!(result.data[0].name, "Ana Souza");
    assert_eq!(result.errors[0].row, 3);
    assert_eq!(result.errors[0].field, "email");
    assert_eq!(result.errors[0].message, "Email já cadastrado");
    assert_eq!(result.duplicates.len(), 1);
    assert_eq!(result.duplicates[0].first_seen, FirstSeen::Row(2));
}

#[test]
fn test_duplicate_of_existing_record() {
    let registry = ImportRegistry::standard();
    let existing = ExistingRecords::new().with(vec![quality_sector()]);
    let file = xlsx(&[&["Nome", "Ativo"], &["qualidade", "Sim"], &["Produção", "Sim"]]);

    let result = importer(&registry)
        .import::<Sector>(&file, &existing)
        .unwrap();

    assert_eq!(result.total_success, 1);
    assert_eq!(result.duplicates[0].first_seen, FirstSeen::Existing);
    assert_eq!(result.duplicates[0].row, 2);
}

#[test]
fn test_subprocess_with_unknown_sector_fails_on_setor() {
    let registry = ImportRegistry::standard();
    let existing = ExistingRecords::new().with(vec![quality_sector()]);
    let file = xlsx(&[
        SUBPROCESS_HEADERS,
        &["Controle de Documentos", "Qualidade", "Documentos controlados", "Sim"],
        &["Inspeção Final", "Financeiro", "Inspeção antes da expedição", "Sim"],
    ]);

    let result = importer(&registry)
        .import::<Subprocess>(&file, &existing)
        .unwrap();

    assert_eq!(result.total_success, 1);
    let errors: Vec<_> = result.errors_for_row(3).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "setor");
    assert!(errors[0].message.starts_with("Setor não encontrado"));
}

const PROCESS_HEADERS: &[&str] = &["Nome", "Setor", "Subprocesso", "Responsável", "Descrição", "Ativo"];

#[test]
fn test_process_references_sector_and_subprocess() {
    let registry = ImportRegistry::standard();
    let existing = ExistingRecords::new().with(vec![quality_sector()]).with(vec![Subprocess {
        name: "Controle de Documentos".into(),
        sector: "Qualidade".into(),
        description: None,
        active: YesNo::Sim,
    }]);
    let file = xlsx(&[
        PROCESS_HEADERS,
        &["Gestão de Documentos", "Qualidade", "Controle de Documentos", "", "", "Sim"],
        &["Gestão de Não Conformidades", "Qualidade", "Tratamento de Reclamações", "", "", "Sim"],
        &["Calibração", "Metrologia", "", "", "", "Sim"],
    ]);

    let result = importer(&registry)
        .import::<Process>(&file, &existing)
        .unwrap();

    assert_eq!(result.total_success, 1);
    assert_eq!(result.data[0].subprocess.as_deref(), Some("Controle de Documentos"));

    let row3: Vec<_> = result.errors_for_row(3).collect();
    assert_eq!(row3.len(), 1);
    assert_eq!(row3[0].field, "subprocesso");
    assert!(row3[0].message.starts_with("Subprocesso não encontrado"));

    let row4: Vec<_> = result.errors_for_row(4).collect();
    assert_eq!(row4.len(), 1);
    assert_eq!(row4[0].field, "setor");
}

#[test]
fn test_audit_type_category_must_be_listed() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[
        &["Nome", "Categoria", "Descrição", "Ativo"],
        &["Auditoria Interna", "Interna", "", "Sim"],
        &["Auditoria Anual", "Anual", "", "Sim"],
    ]);

    let result = importer(&registry)
        .import::<AuditType>(&file, &ExistingRecords::new())
        .unwrap();

    assert_eq!(result.total_success, 1);
    let errors: Vec<_> = result.errors_for_row(3).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "categoria");
    assert_eq!(
        errors[0].message,
        "Categoria deve ser um dos valores: Interna, Externa, Certificação, Fornecedor"
    );
}

#[test]
fn test_requirement_codes_are_unique_within_file() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[
        REQUIREMENT_HEADERS,
        &["ISO 9001", "2015", "4", "4.1", "Contexto", "Evidência", "yes_no", "10", ""],
        &["ISO 9001", "2015", "4", " 4.1", "Contexto repetido", "Evidência", "yes_no", "10", ""],
    ]);

    let result = importer(&registry)
        .import::<NormativeRequirement>(&file, &ExistingRecords::new())
        .unwrap();

    assert_eq!(result.total_success, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, 3);
    assert_eq!(result.errors[0].field, "codigo_requisito");
    assert_eq!(result.errors[0].message, "Código do requisito duplicado");
    assert_eq!(result.duplicates[0].first_seen, FirstSeen::Row(2));
}

#[test]
fn test_row_with_content_only_under_unnamed_column_is_rejected() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[&["Nome", "Ativo", ""], &["Produção", "Sim", ""], &["", "", "Qualidade"]]);

    let result = importer(&registry)
        .import::<Sector>(&file, &ExistingRecords::new())
        .unwrap();

    assert!(!result.no_data);
    assert_eq!(result.total_processed, 2);
    assert_eq!(result.total_errors, 1);
    let fields: Vec<_> = result.errors_for_row(3).map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["nome", "ativo"]);
}

#[test]
fn test_header_only_is_no_data() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[AUDITOR_HEADERS]);

    let result = importer(&registry)
        .import::<Auditor>(&file, &ExistingRecords::new())
        .unwrap();

    assert!(result.no_data);
    assert!(result.success);
    assert_eq!(result.total_processed, 0);
    assert_eq!(result.total_success, 0);
    assert!(result.errors.is_empty());
}

#[test]
fn test_blank_rows_between_data_are_ignored() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[
        &["Nome", "Ativo"],
        &["Qualidade", "Sim"],
        &["", ""],
        &["Produção", "Talvez"],
    ]);

    let result = importer(&registry)
        .import::<Sector>(&file, &ExistingRecords::new())
        .unwrap();

    assert_eq!(result.total_processed, 2);
    assert_eq!(result.errors[0].row, 4);
}

#[test]
fn test_missing_required_column_fails_every_row() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[&["Nome"], &["Qualidade"], &["Produção"]]);

    let result = importer(&registry)
        .import::<Sector>(&file, &ExistingRecords::new())
        .unwrap();

    assert_eq!(result.total_errors, 2);
    assert!(result.errors.iter().all(|e| e.field == "ativo"));
    assert!(result.errors.iter().all(|e| e.message == "Ativo é obrigatório"));
}

#[test]
fn test_requirement_weight_rules() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[
        REQUIREMENT_HEADERS,
        &["ISO 9001", "2015", "4", "4.1", "Contexto", "Evidência", "yes_no", "10", ""],
        &["ISO 9001", "2015", "4", "4.2", "Partes", "Evidência", "yes_no", "dez", ""],
        &["ISO 9001", "2015", "4", "4.3", "Escopo", "Evidência", "yes_no", "150", ""],
        &["ISO 9001", "2015", "4", "4.4", "Sistema", "Evidência", "sim_nao", "5", ""],
    ]);

    let result = importer(&registry)
        .import::<NormativeRequirement>(&file, &ExistingRecords::new())
        .unwrap();

    assert_eq!(result.total_success, 1);
    assert_eq!(result.data[0].weight, 10.0);
    assert_eq!(result.errors_for_row(3).next().unwrap().field, "peso");
    assert_eq!(result.errors_for_row(4).next().unwrap().field, "peso");
    assert_eq!(result.errors_for_row(5).next().unwrap().field, "tipo_verificacao");
}

#[test]
fn test_requirement_weight_accepts_decimal_comma() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[
        REQUIREMENT_HEADERS,
        &["ISO 9001", "2015", "4", "4.1", "Contexto", "Evidência", "yes_no", "7,5", ""],
    ]);

    let result = importer(&registry)
        .import::<NormativeRequirement>(&file, &ExistingRecords::new())
        .unwrap();

    assert!(result.success);
    assert_eq!(result.data[0].weight, 7.5);
}

#[test]
fn test_import_any_dispatches_on_kind() {
    let registry = ImportRegistry::standard();
    let file = xlsx(&[&["Nome", "Ativo"], &["Qualidade", "Sim"]]);

    let outcome = importer(&registry)
        .import_any(ImportKind::Sectors, &file, &ExistingRecords::new())
        .unwrap();
    assert!(matches!(outcome, ImportOutcome::Sectors(_)));

    let any = outcome.into_any();
    assert_eq!(any.total_success, 1);
    assert_eq!(any.data[0].kind(), ImportKind::Sectors);
}
