//! History entry recorded when a calculation is finalized.

use serde::Serialize;

/// A finalized calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// The expression text as typed.
    pub expression: String,
    /// The result text shown when "=" was pressed (may be empty).
    pub result: String,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// Render as the two-line history row, `expression` over `= result`.
    pub fn render(&self) -> String {
        format!("{}\n= {}", self.expression, self.result)
    }
}
