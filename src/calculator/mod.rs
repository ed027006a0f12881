//! Calculator core.
//!
//! This module provides functionality to:
//! - Hold the typed expression and apply keypad edits to it
//! - Sanitize incomplete expressions and evaluate them without executing code
//! - Format results for display and record finalized calculations

mod buffer;
mod error;
mod evaluation;
mod sanitize;
mod session;

pub use buffer::{DigitOrDot, ExpressionState, Operator};
pub use error::CalcError;
pub use evaluation::{EvaluationResult, evaluate_expression, evaluate_raw, format_number, format_value};
pub use sanitize::{sanitize, trim_trailing_operators};
pub use session::{Key, Session, Snapshot};
