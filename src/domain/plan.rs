use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ExpenseItem, IncomeItem, MonthKey};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// One month's editable income and expense lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlyPlan {
    #[serde(default)]
    pub income: Vec<IncomeItem>,
    #[serde(default)]
    pub expenses: Vec<ExpenseItem>,
}

impl MonthlyPlan {
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }

    /// Deep copy with fresh item ids so the copy edits independently.
    pub fn duplicated(&self) -> Self {
        Self {
            income: self
                .income
                .iter()
                .map(|item| IncomeItem {
                    id: Uuid::new_v4(),
                    ..item.clone()
                })
                .collect(),
            expenses: self
                .expenses
                .iter()
                .map(|item| ExpenseItem {
                    id: Uuid::new_v4(),
                    ..item.clone()
                })
                .collect(),
        }
    }

    pub fn income_mut(&mut self, id: Uuid) -> Option<&mut IncomeItem> {
        self.income.iter_mut().find(|item| item.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut ExpenseItem> {
        self.expenses.iter_mut().find(|item| item.id == id)
    }
}

/// The persisted aggregate: every month's plan, keyed by calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub months: BTreeMap<MonthKey, MonthlyPlan>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Workbook::schema_version_default")]
    pub schema_version: u8,
}

impl Workbook {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            months: BTreeMap::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// An empty workbook seeded with a blank plan for `month`.
    pub fn seeded(month: MonthKey) -> Self {
        let mut workbook = Self::new();
        workbook.months.insert(month, MonthlyPlan::default());
        workbook
    }

    pub fn plan(&self, month: &MonthKey) -> Option<&MonthlyPlan> {
        self.months.get(month)
    }

    /// The plan for `month`, created empty on first access.
    pub fn ensure_month(&mut self, month: MonthKey) -> &mut MonthlyPlan {
        self.months.entry(month).or_default()
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    /// Most recent month present in the workbook.
    pub fn latest_month(&self) -> Option<MonthKey> {
        self.months.keys().next_back().copied()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}
