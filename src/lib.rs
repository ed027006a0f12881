//! Keypad calculator core.
//!
//! [`calculator::Session`] owns the typed expression, re-evaluates it after
//! every key and keeps the history of finalized calculations. Evaluation
//! uses a small dedicated arithmetic parser, so typed text is never run as
//! code.

pub mod calculator;
pub mod config;
pub mod items;
pub mod keypad;
pub mod repl;

pub use calculator::{CalcError, EvaluationResult, Key, Session, evaluate_expression};
pub use items::{History, HistoryEntry};
