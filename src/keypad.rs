//! Key-token parsing for the terminal keypad.
//!
//! Turns typed text such as `12+3=` or `5 neg % del` into keypad events.

use crate::calculator::{CalcError, DigitOrDot, Key, Operator};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One keypad token. Longer spellings come first so `+/-` is not read
    /// as `+` followed by garbage, and `clear` is not read as `c`.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"(?i)\+/-|neg|del|clear|[0-9.]|[-+*/x×÷%=<c]"
    ).unwrap();
}

/// Parse a line of key tokens.
///
/// Whitespace between tokens is optional. A word containing anything that is
/// not a key is rejected as a whole.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, CalcError> {
    let mut keys = Vec::new();

    for word in input.split_whitespace() {
        let mut covered = 0;
        for m in KEY_TOKEN.find_iter(word) {
            if m.start() != covered {
                return Err(CalcError::InvalidKey(word.to_string()));
            }
            keys.push(token_to_key(m.as_str())?);
            covered = m.end();
        }
        if covered != word.len() {
            return Err(CalcError::InvalidKey(word.to_string()));
        }
    }

    Ok(keys)
}

fn token_to_key(token: &str) -> Result<Key, CalcError> {
    let key = match token.to_lowercase().as_str() {
        "+/-" | "neg" => Key::ToggleSign,
        "del" | "<" => Key::Delete,
        "clear" | "c" => Key::Clear,
        "%" => Key::Percent,
        "=" => Key::Equals,
        "*" | "x" | "×" => Key::Operator(Operator::Multiply),
        "/" | "÷" => Key::Operator(Operator::Divide),
        "+" => Key::Operator(Operator::Add),
        "-" => Key::Operator(Operator::Subtract),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Digit(DigitOrDot::try_from(c)?),
                _ => return Err(CalcError::InvalidKey(token.to_string())),
            }
        }
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(c: char) -> Key {
        Key::Digit(DigitOrDot::try_from(c).unwrap())
    }

    #[test]
    fn test_compact_input() {
        let keys = parse_keys("12+3=").unwrap();
        assert_eq!(
            keys,
            [
                digit('1'),
                digit('2'),
                Key::Operator(Operator::Add),
                digit('3'),
                Key::Equals,
            ]
        );
    }

    #[test]
    fn test_operator_spellings() {
        let keys = parse_keys("* x X × / ÷ - +").unwrap();
        assert_eq!(
            keys,
            [
                Key::Operator(Operator::Multiply),
                Key::Operator(Operator::Multiply),
                Key::Operator(Operator::Multiply),
                Key::Operator(Operator::Multiply),
                Key::Operator(Operator::Divide),
                Key::Operator(Operator::Divide),
                Key::Operator(Operator::Subtract),
                Key::Operator(Operator::Add),
            ]
        );
    }

    #[test]
    fn test_command_words() {
        let keys = parse_keys("5 neg +/- % del < C clear").unwrap();
        assert_eq!(
            keys,
            [
                digit('5'),
                Key::ToggleSign,
                Key::ToggleSign,
                Key::Percent,
                Key::Delete,
                Key::Delete,
                Key::Clear,
                Key::Clear,
            ]
        );
    }

    #[test]
    fn test_toggle_not_split_into_operators() {
        assert_eq!(parse_keys("7+/-").unwrap(), [digit('7'), Key::ToggleSign]);
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert_eq!(
            parse_keys("2 ^ 3"),
            Err(CalcError::InvalidKey("^".to_string()))
        );
        assert_eq!(
            parse_keys("cos(0)"),
            Err(CalcError::InvalidKey("cos(0)".to_string()))
        );
        assert!(parse_keys("(1+2)").is_err());
    }

    #[test]
    fn test_empty_line() {
        assert!(parse_keys("   ").unwrap().is_empty());
    }
}
