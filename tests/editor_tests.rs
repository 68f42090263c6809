use cashflow_core::domain::{ExpenseCategory, IncomeKind, MonthKey, Workbook};
use cashflow_core::editor::Editor;
use cashflow_core::layout::NodeKind;

fn march() -> MonthKey {
    MonthKey::new(2026, 3).expect("valid month")
}

fn editor() -> Editor {
    Editor::new(Workbook::new(), march())
}

#[test]
fn add_update_remove_income_keeps_the_id_stable() {
    let mut editor = editor();
    let id = editor.add_income("Wage", IncomeKind::Active).expect("added");
    assert!(editor.update_income_value(id, 5300.0));
    assert!(editor.update_income_label(id, "Base Salary"));

    let plan = editor.plan();
    assert_eq!(plan.income.len(), 1);
    assert_eq!(plan.income[0].id, id);
    assert_eq!(plan.income[0].label, "Base Salary");
    assert_eq!(plan.income[0].value, 5300.0);

    assert!(editor.remove_income(id));
    assert!(editor.plan().income.is_empty());
    assert!(!editor.remove_income(id));
}

#[test]
fn expense_category_can_be_reassigned() {
    let mut editor = editor();
    let id = editor
        .add_expense("Gym", ExpenseCategory::Flexible)
        .expect("added");
    assert!(editor.update_expense_value(id, 45.0));
    assert!(editor.update_expense_category(id, ExpenseCategory::Living));
    assert_eq!(
        editor.plan().expenses[0].category,
        ExpenseCategory::Living
    );
}

#[test]
fn blank_labels_are_rejected() {
    let mut editor = editor();
    assert!(editor.add_income("   ", IncomeKind::Passive).is_none());
    assert!(editor.add_expense("", ExpenseCategory::Living).is_none());
    assert!(editor.plan().is_empty());
}

#[test]
fn edits_mark_the_editor_dirty() {
    let mut editor = editor();
    assert!(!editor.is_dirty());
    editor.add_income("Wage", IncomeKind::Active);
    assert!(editor.is_dirty());
    editor.mark_saved();
    assert!(!editor.is_dirty());
}

#[test]
fn month_navigation_creates_blank_plans() {
    let mut editor = editor();
    assert_eq!(editor.go_next_month(), MonthKey::new(2026, 4).unwrap());
    assert!(editor.plan().is_empty());
    assert_eq!(editor.go_prev_month(), march());
    assert_eq!(editor.workbook().month_count(), 2);
}

#[test]
fn copy_from_previous_issues_fresh_ids() {
    let mut editor = editor();
    let wage = editor.add_income("Wage", IncomeKind::Active).expect("added");
    editor.update_income_value(wage, 5300.0);
    editor
        .add_expense("Rent", ExpenseCategory::Living)
        .expect("added");

    editor.go_next_month();
    assert!(editor.has_previous_data());
    assert!(editor.copy_from_previous());

    let plan = editor.plan();
    assert_eq!(plan.income.len(), 1);
    assert_eq!(plan.expenses.len(), 1);
    assert_ne!(plan.income[0].id, wage);
    assert_eq!(plan.income[0].value, 5300.0);
}

#[test]
fn copy_from_previous_without_data_is_a_no_op() {
    let mut editor = editor();
    assert!(!editor.has_previous_data());
    assert!(!editor.copy_from_previous());
}

#[test]
fn drag_offsets_are_clamped_per_column() {
    let mut editor = editor();
    let width = 800.0;

    // outer column: 5% of width
    editor.set_column_offset(0, 500.0, width);
    assert_eq!(editor.column_offsets().get(0), 40.0);
    editor.set_column_offset(4, -500.0, width);
    assert_eq!(editor.column_offsets().get(4), -40.0);

    // inner column: 15% of width
    editor.set_column_offset(1, 500.0, width);
    assert_eq!(editor.column_offsets().get(1), 120.0);
    editor.set_column_offset(2, -90.0, width);
    assert_eq!(editor.column_offsets().get(2), -90.0);

    // out-of-range columns are ignored
    editor.set_column_offset(9, 50.0, width);
    assert_eq!(editor.column_offsets().get(9), 0.0);
}

#[test]
fn layout_reflects_the_current_plan() {
    let mut editor = editor();
    let wage = editor.add_income("Wage", IncomeKind::Active).expect("added");
    editor.update_income_value(wage, 2000.0);
    let rent = editor
        .add_expense("Rent", ExpenseCategory::Living)
        .expect("added");
    editor.update_expense_value(rent, 1500.0);

    let scene = editor.layout(800.0, 500.0);
    assert_eq!(scene.summary.total_income, 2000.0);
    assert_eq!(scene.summary.total_expenses, 1500.0);
    assert!(scene.node(NodeKind::Surplus).is_some());

    editor.go_next_month();
    let empty_scene = editor.layout(800.0, 500.0);
    assert_eq!(empty_scene.nodes.len(), 1);
    assert_eq!(empty_scene.summary.total_income, 0.0);
}
