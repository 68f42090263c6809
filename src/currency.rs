//! Presentation helpers for amounts shown on nodes and in the CLI.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Formats a dollar amount with thousands grouping and no cents, e.g. `$5,562`.
pub fn format_amount(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rounded = value.abs().round() as i64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (pos, ch) in digits.chars().enumerate() {
        if pos > 0 && (digits.len() - pos) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && rounded != 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Share of `total` as a whole percent, e.g. `24%`. Empty when the total
/// is not positive so degenerate layouts render without noise.
pub fn percent_of(value: f64, total: f64) -> String {
    if total > 0.0 && value.is_finite() {
        format!("{:.0}%", (value / total) * 100.0)
    } else {
        String::new()
    }
}
