//! The expression buffer: the text typed so far plus the "=" flag.

use super::error::CalcError;
use std::fmt;

/// A binary operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Multiply,
    Add,
    Subtract,
    Divide,
}

impl Operator {
    /// The glyph written into the buffer for this operator.
    pub fn glyph(self) -> char {
        match self {
            Self::Multiply => '×',
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Divide => '÷',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = CalcError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '×' | 'x' | 'X' => Ok(Self::Multiply),
            '+' => Ok(Self::Add),
            '-' => Ok(Self::Subtract),
            '÷' => Ok(Self::Divide),
            other => Err(CalcError::InvalidKey(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A digit (`0`-`9`) or the decimal point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitOrDot(char);

impl DigitOrDot {
    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for DigitOrDot {
    type Error = CalcError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_digit() || c == '.' {
            Ok(Self(c))
        } else {
            Err(CalcError::InvalidKey(c.to_string()))
        }
    }
}

/// The in-progress expression.
///
/// Every mutating operation returns the new buffer text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpressionState {
    text: String,
    finalized: bool,
}

impl ExpressionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether "=" was the last action.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Append a digit or dot. Right after "=" this starts a new expression.
    pub fn append_digit_or_dot(&mut self, d: DigitOrDot) -> &str {
        if self.finalized {
            self.text.clear();
            self.finalized = false;
        }
        self.text.push(d.as_char());
        &self.text
    }

    /// Append `" op "`. Right after "=" this continues from the result.
    ///
    /// A second operator is appended even if the text already ends in one;
    /// sanitizing drops the dangling run.
    pub fn append_operator(&mut self, op: Operator) -> &str {
        self.finalized = false;
        self.text.push(' ');
        self.text.push(op.glyph());
        self.text.push(' ');
        &self.text
    }

    pub fn append_percent(&mut self) -> &str {
        self.text.push('%');
        &self.text
    }

    /// Strip one leading `-`, or prepend one.
    pub fn toggle_sign(&mut self) -> &str {
        if self.text.starts_with('-') {
            self.text.remove(0);
        } else {
            self.text.insert(0, '-');
        }
        &self.text
    }

    /// Remove the last character, if any.
    pub fn delete_last(&mut self) -> &str {
        self.text.pop();
        &self.text
    }

    pub fn clear(&mut self) -> &str {
        self.text.clear();
        self.finalized = false;
        &self.text
    }

    /// Mark the expression as finished and carry `result` forward as the
    /// text the next key acts on.
    pub fn finalize(&mut self, result: &str) -> &str {
        self.text.clear();
        self.text.push_str(result);
        self.finalized = true;
        &self.text
    }
}
