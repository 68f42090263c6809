//! Editable income and expense line items.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distinguishes earned income from investment-style income.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IncomeKind {
    Active,
    Passive,
}

impl fmt::Display for IncomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncomeKind::Active => write!(f, "Active"),
            IncomeKind::Passive => write!(f, "Passive"),
        }
    }
}

/// The four fixed expense buckets, in display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Payroll,
    Living,
    #[serde(rename = "Long-Term")]
    LongTerm,
    Flexible,
}

impl ExpenseCategory {
    /// Every category, in the order columns and flows are laid out.
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Payroll,
        ExpenseCategory::Living,
        ExpenseCategory::LongTerm,
        ExpenseCategory::Flexible,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Payroll => "Payroll",
            ExpenseCategory::Living => "Living",
            ExpenseCategory::LongTerm => "Long-Term",
            ExpenseCategory::Flexible => "Flexible",
        }
    }

    /// Position within [`ExpenseCategory::ALL`].
    pub fn index(&self) -> usize {
        match self {
            ExpenseCategory::Payroll => 0,
            ExpenseCategory::Living => 1,
            ExpenseCategory::LongTerm => 2,
            ExpenseCategory::Flexible => 3,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single income entry. The id survives label/value edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeItem {
    pub id: Uuid,
    pub label: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: IncomeKind,
}

impl IncomeItem {
    pub fn new(label: impl Into<String>, value: f64, kind: IncomeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            value,
            kind,
        }
    }

    /// The entry's value with non-finite garbage coerced to zero.
    pub fn amount(&self) -> f64 {
        sanitize_amount(self.value)
    }
}

/// A single expense entry assigned to one of the fixed categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseItem {
    pub id: Uuid,
    pub label: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub value: f64,
    pub category: ExpenseCategory,
}

impl ExpenseItem {
    pub fn new(label: impl Into<String>, value: f64, category: ExpenseCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            value,
            category,
        }
    }

    pub fn amount(&self) -> f64 {
        sanitize_amount(self.value)
    }
}

/// Coerces NaN and infinities to zero so garbage input cannot poison sums.
pub(crate) fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Accepts numbers, numeric strings, or nothing at all; anything
/// unparseable becomes zero. Persisted data from older front-ends stored
/// amounts as raw input-field strings.
fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct AmountVisitor;

    impl serde::de::Visitor<'_> for AmountVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or numeric string")
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<f64, E> {
            Ok(v.trim().parse().unwrap_or(0.0))
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_coerces_non_finite_values() {
        let mut item = IncomeItem::new("Wage", f64::NAN, IncomeKind::Active);
        assert_eq!(item.amount(), 0.0);
        item.value = f64::INFINITY;
        assert_eq!(item.amount(), 0.0);
        item.value = 1200.0;
        assert_eq!(item.amount(), 1200.0);
    }

    #[test]
    fn deserializes_string_amounts() {
        let item: ExpenseItem = serde_json::from_str(
            r#"{"id":"3fa85f64-5717-4562-b3fc-2c963f66afa6","label":"Rent","value":"850","category":"Living"}"#,
        )
        .expect("parse expense");
        assert_eq!(item.value, 850.0);
        assert_eq!(item.category, ExpenseCategory::Living);
    }

    #[test]
    fn deserializes_garbage_amount_as_zero() {
        let item: ExpenseItem = serde_json::from_str(
            r#"{"id":"3fa85f64-5717-4562-b3fc-2c963f66afa6","label":"Rent","value":"oops","category":"Flexible"}"#,
        )
        .expect("parse expense");
        assert_eq!(item.value, 0.0);
    }

    #[test]
    fn category_order_is_stable() {
        let labels: Vec<_> = ExpenseCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["Payroll", "Living", "Long-Term", "Flexible"]);
        for (idx, cat) in ExpenseCategory::ALL.iter().enumerate() {
            assert_eq!(cat.index(), idx);
        }
    }
}
