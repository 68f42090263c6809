//! Caller-owned state container around a workbook: item edits, month
//! navigation, and drag-offset policy. Recomputing the scene after every
//! mutation is the caller's loop; the layout engine itself stays pure.

use uuid::Uuid;

use crate::domain::{ExpenseCategory, ExpenseItem, IncomeItem, IncomeKind, MonthKey, MonthlyPlan, Workbook};
use crate::layout::{build_layout, ColumnOffsets, Scene};

/// Drag limit as a fraction of canvas width for the outer columns.
const OUTER_OFFSET_LIMIT: f64 = 0.05;
/// Inner columns get more freedom.
const INNER_OFFSET_LIMIT: f64 = 0.15;

static EMPTY_PLAN: MonthlyPlan = MonthlyPlan {
    income: Vec::new(),
    expenses: Vec::new(),
};

/// Facade that owns the editable workbook and per-session view state.
pub struct Editor {
    workbook: Workbook,
    current: MonthKey,
    offsets: ColumnOffsets,
    dirty: bool,
}

impl Editor {
    /// Opens `month` in `workbook`, creating a blank plan if absent.
    pub fn new(mut workbook: Workbook, month: MonthKey) -> Self {
        workbook.ensure_month(month);
        Self {
            workbook,
            current: month,
            offsets: ColumnOffsets::default(),
            dirty: false,
        }
    }

    pub fn current_month(&self) -> MonthKey {
        self.current
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn into_workbook(self) -> Workbook {
        self.workbook
    }

    /// True when any edit happened since the last [`Editor::mark_saved`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// The current month's plan.
    pub fn plan(&self) -> &MonthlyPlan {
        self.workbook.plan(&self.current).unwrap_or(&EMPTY_PLAN)
    }

    fn plan_mut(&mut self) -> &mut MonthlyPlan {
        self.dirty = true;
        self.workbook.touch();
        self.workbook.ensure_month(self.current)
    }

    /// Adds a zero-valued income entry; rejects blank labels.
    pub fn add_income(&mut self, label: &str, kind: IncomeKind) -> Option<Uuid> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        let item = IncomeItem::new(label, 0.0, kind);
        let id = item.id;
        self.plan_mut().income.push(item);
        Some(id)
    }

    pub fn update_income_label(&mut self, id: Uuid, label: &str) -> bool {
        match self.plan_mut().income_mut(id) {
            Some(item) => {
                item.label = label.to_string();
                true
            }
            None => false,
        }
    }

    pub fn update_income_value(&mut self, id: Uuid, value: f64) -> bool {
        match self.plan_mut().income_mut(id) {
            Some(item) => {
                item.value = value;
                true
            }
            None => false,
        }
    }

    pub fn remove_income(&mut self, id: Uuid) -> bool {
        let plan = self.plan_mut();
        let before = plan.income.len();
        plan.income.retain(|item| item.id != id);
        plan.income.len() != before
    }

    /// Adds a zero-valued expense entry; rejects blank labels.
    pub fn add_expense(&mut self, label: &str, category: ExpenseCategory) -> Option<Uuid> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        let item = ExpenseItem::new(label, 0.0, category);
        let id = item.id;
        self.plan_mut().expenses.push(item);
        Some(id)
    }

    pub fn update_expense_label(&mut self, id: Uuid, label: &str) -> bool {
        match self.plan_mut().expense_mut(id) {
            Some(item) => {
                item.label = label.to_string();
                true
            }
            None => false,
        }
    }

    pub fn update_expense_value(&mut self, id: Uuid, value: f64) -> bool {
        match self.plan_mut().expense_mut(id) {
            Some(item) => {
                item.value = value;
                true
            }
            None => false,
        }
    }

    pub fn update_expense_category(&mut self, id: Uuid, category: ExpenseCategory) -> bool {
        match self.plan_mut().expense_mut(id) {
            Some(item) => {
                item.category = category;
                true
            }
            None => false,
        }
    }

    pub fn remove_expense(&mut self, id: Uuid) -> bool {
        let plan = self.plan_mut();
        let before = plan.expenses.len();
        plan.expenses.retain(|item| item.id != id);
        plan.expenses.len() != before
    }

    /// Moves to the previous month, creating its plan on first visit.
    pub fn go_prev_month(&mut self) -> MonthKey {
        self.current = self.current.prev();
        self.workbook.ensure_month(self.current);
        self.current
    }

    /// Moves to the next month, creating its plan on first visit.
    pub fn go_next_month(&mut self) -> MonthKey {
        self.current = self.current.next();
        self.workbook.ensure_month(self.current);
        self.current
    }

    pub fn has_previous_data(&self) -> bool {
        self.workbook
            .plan(&self.current.prev())
            .is_some_and(|plan| !plan.is_empty())
    }

    /// Replaces the current month with a fresh-id copy of the previous
    /// month's plan. No-op when the previous month is empty.
    pub fn copy_from_previous(&mut self) -> bool {
        let Some(previous) = self.workbook.plan(&self.current.prev()) else {
            return false;
        };
        if previous.is_empty() {
            return false;
        }
        let copy = previous.duplicated();
        *self.plan_mut() = copy;
        true
    }

    pub fn column_offsets(&self) -> ColumnOffsets {
        self.offsets
    }

    /// Applies a drag offset with the UI clamp: outer columns (0 and 4)
    /// may move at most 5% of the canvas width, inner columns 15%. This
    /// policy lives here, not in the layout engine, which accepts any
    /// offset verbatim.
    pub fn set_column_offset(&mut self, column: usize, raw: f64, canvas_width: f64) {
        if column >= ColumnOffsets::COLUMNS {
            return;
        }
        let fraction = if column == 0 || column == 4 {
            OUTER_OFFSET_LIMIT
        } else {
            INNER_OFFSET_LIMIT
        };
        // max(0) keeps the clamp well-formed for degenerate canvas widths
        let limit = (canvas_width * fraction).max(0.0);
        self.offsets.set(column, raw.clamp(-limit, limit));
    }

    /// The positioned scene for the current month.
    pub fn layout(&self, width: f64, height: f64) -> Scene {
        let plan = self.plan();
        build_layout(&plan.income, &plan.expenses, width, height, &self.offsets)
    }
}
