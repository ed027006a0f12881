//! A calculator session: the buffer, its latest result and the history.
//!
//! Each key press is one buffer mutation followed by exactly one evaluation,
//! so the result text always reflects the current buffer text.

use super::buffer::{DigitOrDot, ExpressionState, Operator};
use super::evaluation::{EvaluationResult, evaluate_expression};
use crate::items::{History, HistoryEntry};
use serde::Serialize;
use tracing::{debug, trace};

/// An input event from the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(DigitOrDot),
    Operator(Operator),
    Percent,
    ToggleSign,
    Delete,
    Clear,
    Equals,
}

/// Calculator state owned by the front-end.
#[derive(Clone, Debug, Default)]
pub struct Session {
    state: ExpressionState,
    result: EvaluationResult,
    history: History,
}

/// Serializable view of a session for rendering or export.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot<'a> {
    pub expression: &'a str,
    pub result: &'a str,
    pub finalized: bool,
    pub history: &'a History,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key and re-evaluate.
    pub fn press(&mut self, key: Key) -> &EvaluationResult {
        match key {
            Key::Digit(d) => {
                self.state.append_digit_or_dot(d);
            }
            Key::Operator(op) => {
                self.state.append_operator(op);
            }
            Key::Percent => {
                self.state.append_percent();
            }
            Key::ToggleSign => {
                self.state.toggle_sign();
            }
            Key::Delete => {
                self.state.delete_last();
            }
            Key::Clear => {
                self.state.clear();
            }
            Key::Equals => self.finalize(),
        }

        self.result = evaluate_expression(self.state.text());
        trace!(
            ?key,
            text = self.state.text(),
            result = self.result.display(),
            "key applied"
        );
        &self.result
    }

    /// Apply a sequence of keys in order.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) -> &EvaluationResult {
        for key in keys {
            self.press(key);
        }
        &self.result
    }

    /// Record the current pair in history and carry the result forward.
    fn finalize(&mut self) {
        let entry = HistoryEntry::new(self.state.text(), self.result.display());
        debug!(expression = %entry.expression, result = %entry.result, "finalized");
        self.history.push(entry);
        self.state.finalize(&self.result.display);
    }

    pub fn expression_text(&self) -> &str {
        self.state.text()
    }

    pub fn result_text(&self) -> &str {
        self.result.display()
    }

    /// Whether "=" was the last key; the result line is hidden in that state.
    pub fn is_finalized(&self) -> bool {
        self.state.is_finalized()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            expression: self.expression_text(),
            result: self.result_text(),
            finalized: self.is_finalized(),
            history: &self.history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(s: &str) -> Vec<Key> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '=' => Key::Equals,
                '%' => Key::Percent,
                '~' => Key::ToggleSign,
                '<' => Key::Delete,
                'C' => Key::Clear,
                c => DigitOrDot::try_from(c)
                    .map(Key::Digit)
                    .or_else(|_| Operator::try_from(c).map(Key::Operator))
                    .unwrap(),
            })
            .collect()
    }

    fn session(s: &str) -> Session {
        let mut session = Session::new();
        session.press_all(keys(s));
        session
    }

    #[test]
    fn test_result_tracks_every_key() {
        let mut session = Session::new();
        assert_eq!(session.press(Key::Digit('1'.try_into().unwrap())).display(), "1");
        assert_eq!(session.press(Key::Digit('2'.try_into().unwrap())).display(), "12");
        assert_eq!(session.press(Key::Operator(Operator::Add)).display(), "12");
        assert_eq!(session.expression_text(), "12 + ");
        assert_eq!(session.press(Key::Digit('3'.try_into().unwrap())).display(), "15");
    }

    #[test]
    fn test_precedence_through_keys() {
        let session = session("2 + 3 × 4");
        assert_eq!(session.expression_text(), "2 + 3 × 4");
        assert_eq!(session.result_text(), "14");
    }

    #[test]
    fn test_percent_key() {
        assert_eq!(session("50%").result_text(), "0.5");
    }

    #[test]
    fn test_toggle_sign_key() {
        let s = session("5 ~");
        assert_eq!(s.expression_text(), "-5");
        assert_eq!(s.result_text(), "-5");
    }

    #[test]
    fn test_division_by_zero_key() {
        assert_eq!(session("5 ÷ 0").result_text(), "Infinity");
    }

    #[test]
    fn test_delete_and_clear() {
        let mut s = session("12 + 3 <");
        assert_eq!(s.expression_text(), "12 + ");
        assert_eq!(s.result_text(), "12");

        s.press(Key::Clear);
        assert_eq!(s.expression_text(), "");
        assert_eq!(s.result_text(), "");
    }

    #[test]
    fn test_finalize_then_digit() {
        let mut s = session("2 + 3 =");
        assert!(s.is_finalized());
        assert_eq!(s.expression_text(), "5");

        s.press(Key::Digit('7'.try_into().unwrap()));
        assert_eq!(s.expression_text(), "7");
        assert_eq!(s.result_text(), "7");
        assert!(!s.is_finalized());
    }

    #[test]
    fn test_finalize_then_operator() {
        let mut s = session("2 + 3 =");
        s.press(Key::Operator(Operator::Add));
        assert_eq!(s.expression_text(), "5 + ");

        s.press_all(keys("4"));
        assert_eq!(s.result_text(), "9");
    }

    #[test]
    fn test_history_records_each_finalize() {
        let s = session("2 + 3 = C 6 × 7 =");
        let entries = s.history().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], HistoryEntry::new("2 + 3", "5"));
        assert_eq!(entries[1], HistoryEntry::new("6 × 7", "42"));
    }

    #[test]
    fn test_repeated_finalize_is_not_deduplicated() {
        let s = session("9 × 9 = =");
        let entries = s.history().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], HistoryEntry::new("9 × 9", "81"));
        assert_eq!(entries[1], HistoryEntry::new("81", "81"));
    }

    #[test]
    fn test_finalize_empty_expression() {
        let s = session("=");
        assert_eq!(s.history().entries(), [HistoryEntry::new("", "")]);
        assert_eq!(s.expression_text(), "");
    }

    #[test]
    fn test_infinity_carries_forward() {
        let mut s = session("1 ÷ 0 =");
        assert_eq!(s.expression_text(), "Infinity");
        s.press_all(keys("- 1"));
        assert_eq!(s.result_text(), "Infinity");
    }

    #[test]
    fn test_snapshot_json() {
        let s = session("1 + 1 =");
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "expression": "2",
                "result": "2",
                "finalized": true,
                "history": [{"expression": "1 + 1", "result": "2"}],
            })
        );
    }
}
