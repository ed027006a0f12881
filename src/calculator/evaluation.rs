//! Expression evaluation.
//!
//! Sanitized text is tokenized over a closed alphabet (numerals and
//! `+ - * /`) and reduced with a two-level operator-precedence loop. There is
//! no grouping in the grammar, so the parser never recurses and its work is
//! linear in the input length.

use super::error::CalcError;
use super::sanitize::sanitize;
use tracing::{debug, trace};

/// Result of evaluating the current buffer text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvaluationResult {
    /// The sanitized expression handed to the parser.
    pub raw: String,
    /// The numeric value, or `None` for empty or malformed input.
    pub value: Option<f64>,
    /// The value formatted for display; empty when there is no value.
    pub display: String,
}

impl EvaluationResult {
    /// Check if the expression produced a value (including infinities and NaN).
    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }

    /// Get the display string.
    pub fn display(&self) -> &str {
        &self.display
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
}

/// A token together with the character offset it starts at.
type Spanned = (usize, Token);

fn tokenize(raw: &str) -> Result<Vec<Spanned>, CalcError> {
    let chars: Vec<char> = raw.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        let start = pos;
        match c {
            c if c.is_whitespace() => {
                pos += 1;
                continue;
            }
            '+' => tokens.push((start, Token::Plus)),
            '-' => tokens.push((start, Token::Minus)),
            '*' => tokens.push((start, Token::Star)),
            '/' => tokens.push((start, Token::Slash)),
            c if c.is_ascii_digit() || c == '.' => {
                let (value, end) = scan_number(&chars, start)?;
                tokens.push((start, Token::Number(value)));
                pos = end;
                continue;
            }
            c if c.is_ascii_alphabetic() => {
                let end = chars[start..]
                    .iter()
                    .position(|ch| !ch.is_ascii_alphabetic())
                    .map_or(chars.len(), |n| start + n);
                let word: String = chars[start..end].iter().collect();
                let value = match word.as_str() {
                    "Infinity" => f64::INFINITY,
                    "NaN" => f64::NAN,
                    _ => return Err(CalcError::malformed(start, format!("unknown word '{word}'"))),
                };
                tokens.push((start, Token::Number(value)));
                pos = end;
                continue;
            }
            other => {
                return Err(CalcError::malformed(
                    start,
                    format!("unexpected character '{other}'"),
                ));
            }
        }
        pos += 1;
    }

    Ok(tokens)
}

/// Scan a decimal numeral starting at `start`.
///
/// Accepts `12`, `12.`, `.5`, `1.5e-7` and `1e+21`. Returns the value and the
/// offset just past the numeral.
fn scan_number(chars: &[char], start: usize) -> Result<(f64, usize), CalcError> {
    let digits_from = |mut i: usize| {
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = digits_from(start);
    let mut mantissa_digits = end - start;
    if end < chars.len() && chars[end] == '.' {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return Err(CalcError::malformed(start, "decimal point without digits"));
    }

    if end < chars.len() && matches!(chars[end], 'e' | 'E') {
        let mut exp = end + 1;
        if exp < chars.len() && matches!(chars[exp], '+' | '-') {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end == exp {
            return Err(CalcError::malformed(end, "exponent without digits"));
        }
        end = exp_end;
    }

    let literal: String = chars[start..end].iter().collect();
    literal
        .parse::<f64>()
        .map(|value| (value, end))
        .map_err(|e| CalcError::malformed(start, format!("invalid number '{literal}': {e}")))
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    len: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned], len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            len,
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|&(_, token)| token)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.len, |&(at, _)| at)
    }

    /// expression := term (('+' | '-') term)*
    fn parse_expression(&mut self) -> Result<f64, CalcError> {
        let mut acc = self.parse_term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.parse_term()?;
            acc = if op == Token::Plus { acc + rhs } else { acc - rhs };
        }
        Ok(acc)
    }

    /// term := operand (('*' | '/') operand)*
    fn parse_term(&mut self) -> Result<f64, CalcError> {
        let mut acc = self.parse_operand()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.parse_operand()?;
            acc = if op == Token::Star { acc * rhs } else { acc / rhs };
        }
        Ok(acc)
    }

    /// operand := ('+' | '-')* number
    fn parse_operand(&mut self) -> Result<f64, CalcError> {
        let mut negate = false;
        loop {
            match self.peek() {
                Some(Token::Plus) => self.pos += 1,
                Some(Token::Minus) => {
                    negate = !negate;
                    self.pos += 1;
                }
                Some(Token::Number(n)) => {
                    self.pos += 1;
                    return Ok(if negate { -n } else { n });
                }
                Some(_) => return Err(CalcError::malformed(self.offset(), "expected a number")),
                None => return Err(CalcError::malformed(self.len, "unexpected end of input")),
            }
        }
    }
}

/// Evaluate already-sanitized text.
pub fn evaluate_raw(raw: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(raw)?;
    if tokens.is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let mut parser = Parser::new(&tokens, raw.chars().count());
    let value = parser.parse_expression()?;
    if parser.pos != tokens.len() {
        return Err(CalcError::malformed(parser.offset(), "unexpected trailing input"));
    }
    Ok(value)
}

/// Evaluate buffer text: sanitize, compute and format.
///
/// Never fails. Empty or malformed input gives a result with no value and an
/// empty display string.
pub fn evaluate_expression(text: &str) -> EvaluationResult {
    let Some(raw) = sanitize(text) else {
        trace!(text, "nothing to evaluate");
        return EvaluationResult::default();
    };

    let value = match evaluate_raw(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(%raw, error = %e, "expression did not evaluate");
            None
        }
    };

    EvaluationResult {
        display: format_value(value),
        raw,
        value,
    }
}

/// Format an optional value for display.
pub fn format_value(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

/// Format a number as canonical decimal text.
///
/// Whole numbers print without a fraction, other values in their shortest
/// round-trip form. Magnitudes from 1e21 up and below 1e-6 switch to exponent
/// notation with an explicit exponent sign.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let msg = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return msg.to_string();
    }
    if value == 0.0 {
        // Also covers negative zero
        return "0".to_string();
    }

    let abs = value.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        }
    } else {
        format!("{}", value)
    }
}
