//! Error types for the calculator core.

use thiserror::Error;

/// Errors produced while turning typed input into a value.
///
/// `EmptyExpression` and `MalformedExpression` describe user input and never
/// reach the display: the evaluator folds them into an empty result.
/// `InvalidKey` is a collaborator bug (a key that does not exist on the pad).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("expression is empty")]
    EmptyExpression,

    #[error("malformed expression at position {position}: {reason}")]
    MalformedExpression { position: usize, reason: String },

    #[error("invalid key '{0}'")]
    InvalidKey(String),
}

impl CalcError {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedExpression {
            position,
            reason: reason.into(),
        }
    }
}
