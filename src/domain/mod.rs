//! Domain types for monthly cash-flow plans.

pub mod item;
pub mod month;
pub mod plan;

pub use item::{ExpenseCategory, ExpenseItem, IncomeItem, IncomeKind};
pub use month::MonthKey;
pub use plan::{MonthlyPlan, Workbook};
