use audit_import::checklist::{ChecklistMeta, build_checklist_preview, commit_checklist};
use audit_import::import::{ExistingRecords, ImportRegistry, NormativeRequirement};
use audit_import::store::{ChecklistStore, JsonStore, MemoryStore};

use crate::common::{REQUIREMENT_HEADERS, importer, xlsx};

fn meta() -> ChecklistMeta {
    ChecklistMeta::new("Auditoria ISO 9001", "ISO 9001", "2015")
}

fn imported_requirements(rows: &[&[&str]]) -> Vec<NormativeRequirement> {
    let mut all: Vec<&[&str]> = vec![REQUIREMENT_HEADERS];
    all.extend_from_slice(rows);
    let registry = ImportRegistry::standard();
    let result = importer(&registry)
        .import::<NormativeRequirement>(&xlsx(&all), &ExistingRecords::new())
        .unwrap();
    assert!(result.success, "{:?}", result.errors);
    result.data
}

#[test]
fn test_imported_chapters_group_in_first_seen_order() {
    let requirements = imported_requirements(&[
        &["ISO 9001", "2015", "A", "A.1", "Primeiro", "Critério", "yes_no", "10", ""],
        &["ISO 9001", "2015", "B", "B.1", "Segundo", "Critério", "text", "5", ""],
        &["ISO 9001", "2015", "A", "A.2", "Terceiro", "Critério", "numeric", "20", ""],
    ]);

    let checklist = build_checklist_preview(&requirements, &meta()).unwrap();

    let categories: Vec<_> = checklist
        .categories
        .iter()
        .map(|c| (c.name.as_str(), c.weight))
        .collect();
    assert_eq!(categories, vec![("A", 30.0), ("B", 5.0)]);
    assert_eq!(checklist.total_weight, 35.0);
    assert_eq!(checklist.max_score, checklist.total_weight);
    assert_eq!(checklist.item_count(), 3);
}

#[test]
fn test_long_descriptions_are_truncated_in_titles() {
    let long = "d".repeat(150);
    let short = "Liderança e comprometimento";
    let requirements = imported_requirements(&[
        &["ISO 9001", "2015", "4", "4.1", long.as_str(), "Critério", "yes_no", "50", ""],
        &["ISO 9001", "2015", "5", "5.1", short, "Critério", "yes_no", "50", ""],
    ]);

    let checklist = build_checklist_preview(&requirements, &meta()).unwrap();
    let titles: Vec<_> = checklist.items().map(|i| i.title.clone()).collect();

    assert_eq!(titles[0], format!("4.1 - {}...", "d".repeat(100)));
    assert_eq!(titles[1], format!("5.1 - {}", short));
    assert!(checklist.is_complete());
}

#[test]
fn test_preview_is_not_stored_until_committed() {
    let requirements = imported_requirements(&[&[
        "ISO 9001", "2015", "4", "4.1", "Contexto", "Critério", "yes_no", "100", "",
    ]]);
    let mut store = MemoryStore::new();

    let checklist = build_checklist_preview(&requirements, &meta()).unwrap();
    assert!(store.checklists().is_empty());

    let expected_id = checklist.id;
    let id = commit_checklist(checklist, &mut store).unwrap();
    assert_eq!(id, expected_id);
    assert_eq!(store.checklists().len(), 1);
}

#[test]
fn test_committed_checklist_survives_reopen() {
    let path = std::env::temp_dir()
        .join(format!("audit-import-{}", uuid::Uuid::new_v4()))
        .join("store.json");
    let requirements = imported_requirements(&[
        &["ISO 9001", "2015", "4", "4.1", "Contexto", "Critério", "yes_no", "60", "Ver atas"],
        &["ISO 9001", "2015", "5", "5.1", "Liderança", "Critério", "multiple_choice", "40", ""],
    ]);
    let checklist = build_checklist_preview(&requirements, &meta()).unwrap();

    let mut store = JsonStore::open(&path).unwrap();
    let id = commit_checklist(checklist.clone(), &mut store).unwrap();

    let reopened = JsonStore::open(&path).unwrap();
    assert_eq!(reopened.checklists().len(), 1);
    assert_eq!(reopened.checklists()[0].id, id);
    assert_eq!(reopened.checklists()[0], checklist);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
