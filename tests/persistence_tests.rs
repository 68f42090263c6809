use cashflow_core::domain::{ExpenseCategory, ExpenseItem, IncomeItem, IncomeKind, MonthKey, Workbook};
use cashflow_core::storage::{JsonStorage, StorageBackend};

fn sample_workbook() -> (Workbook, MonthKey) {
    let month = MonthKey::new(2026, 3).expect("valid month");
    let mut workbook = Workbook::seeded(month);
    let plan = workbook.ensure_month(month);
    plan.income
        .push(IncomeItem::new("Wage", 5300.0, IncomeKind::Active));
    plan.expenses
        .push(ExpenseItem::new("Rent", 850.0, ExpenseCategory::Living));
    (workbook, month)
}

#[test]
fn workbook_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = JsonStorage::new(Some(dir.path().to_path_buf())).expect("storage");
    let (workbook, month) = sample_workbook();

    storage.save_workbook(&workbook).expect("save");
    let loaded = storage.load_workbook().expect("load");

    let plan = loaded.plan(&month).expect("plan present");
    assert_eq!(plan.income.len(), 1);
    assert_eq!(plan.income[0].label, "Wage");
    assert_eq!(plan.income[0].id, workbook.plan(&month).unwrap().income[0].id);
    assert_eq!(plan.expenses[0].value, 850.0);
    assert_eq!(loaded.schema_version, workbook.schema_version);
}

#[test]
fn missing_workbook_seeds_the_current_month() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = JsonStorage::new(Some(dir.path().to_path_buf())).expect("storage");

    let loaded = storage.load_workbook().expect("load");
    assert_eq!(loaded.month_count(), 1);
    assert_eq!(loaded.latest_month(), Some(MonthKey::current()));
    assert!(loaded
        .plan(&MonthKey::current())
        .expect("seeded plan")
        .is_empty());
}

#[test]
fn save_leaves_no_staging_file_behind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = JsonStorage::new(Some(dir.path().to_path_buf())).expect("storage");
    let (workbook, _) = sample_workbook();

    storage.save_workbook(&workbook).expect("save");
    assert!(storage.workbook_path().exists());
    assert!(!storage.workbook_path().with_extension("tmp").exists());
}

#[test]
fn corrupt_workbook_surfaces_a_serde_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = JsonStorage::new(Some(dir.path().to_path_buf())).expect("storage");
    std::fs::write(storage.workbook_path(), "{not json").expect("write corrupt file");

    assert!(storage.load_workbook().is_err());
}

#[test]
fn works_through_the_backend_trait() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage: Box<dyn StorageBackend> =
        Box::new(JsonStorage::new(Some(dir.path().to_path_buf())).expect("storage"));
    let (workbook, month) = sample_workbook();

    storage.save_workbook(&workbook).expect("save");
    let loaded = storage.load_workbook().expect("load");
    assert!(loaded.plan(&month).is_some());
}

#[test]
fn lenient_amounts_survive_older_on_disk_formats() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = JsonStorage::new(Some(dir.path().to_path_buf())).expect("storage");
    // older front-ends persisted raw input-field strings for values
    let json = r#"{
        "months": {
            "2026-03": {
                "income": [
                    {"id":"3fa85f64-5717-4562-b3fc-2c963f66afa6","label":"Wage","value":"5300","type":"active"}
                ],
                "expenses": [
                    {"id":"8c6a1183-9d23-4a66-8c6e-2f0b9b3c7a11","label":"Rent","value":null,"category":"Living"}
                ]
            }
        },
        "created_at": "2026-03-01T00:00:00Z",
        "updated_at": "2026-03-01T00:00:00Z"
    }"#;
    std::fs::write(storage.workbook_path(), json).expect("write legacy file");

    let loaded = storage.load_workbook().expect("load");
    let month = MonthKey::new(2026, 3).unwrap();
    let plan = loaded.plan(&month).expect("plan");
    assert_eq!(plan.income[0].value, 5300.0);
    assert_eq!(plan.expenses[0].value, 0.0);
    assert_eq!(loaded.schema_version, Workbook::schema_version_default());
}
