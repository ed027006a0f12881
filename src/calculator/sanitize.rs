//! Prepares raw buffer text for the arithmetic parser.
//!
//! Buffer text is evaluated after every keystroke, so it is routinely
//! incomplete (`"12 +"`) and written with display glyphs (`×`, `÷`, `%`).
//! Sanitizing strips the dangling operators and rewrites the glyphs into the
//! plain `+ - * /` alphabet the parser understands.

/// Characters that may dangle at the end of an incomplete expression.
const TRAILING_OPERATORS: &[char] = &['×', 'x', '+', '-', '÷'];

/// Strip surrounding whitespace and any run of trailing operators.
///
/// Whitespace exposed while stripping is trimmed too, so a doubled operator
/// run such as `"5 +  - "` collapses to the last operand, `"5"`.
pub fn trim_trailing_operators(text: &str) -> &str {
    let mut trimmed = text.trim();
    while let Some(stripped) = trimmed.strip_suffix(TRAILING_OPERATORS) {
        trimmed = stripped.trim_end();
    }
    trimmed
}

/// Sanitize buffer text into parser input.
///
/// Returns `None` when nothing evaluable is left.
pub fn sanitize(text: &str) -> Option<String> {
    let trimmed = trim_trailing_operators(text);
    if trimmed.is_empty() {
        return None;
    }

    let mut raw = String::with_capacity(trimmed.len() + 8);
    for c in trimmed.chars() {
        match c {
            '×' | 'x' | 'X' => raw.push('*'),
            '÷' => raw.push('/'),
            '%' => raw.push_str("*0.01"),
            other => raw.push(other),
        }
    }
    Some(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_operator_stripped() {
        assert_eq!(sanitize("12 + ").as_deref(), Some("12"));
        assert_eq!(sanitize("12 +").as_deref(), Some("12"));
        assert_eq!(sanitize("5 ÷").as_deref(), Some("5"));
    }

    #[test]
    fn test_doubled_operator_run_collapses() {
        assert_eq!(sanitize("5 +  - ").as_deref(), Some("5"));
        assert_eq!(sanitize("5 + × ").as_deref(), Some("5"));
        assert_eq!(sanitize("5 × 2 -  + ").as_deref(), Some("5 * 2"));
    }

    #[test]
    fn test_glyph_substitution() {
        assert_eq!(sanitize("3 × 4").as_deref(), Some("3 * 4"));
        assert_eq!(sanitize("3 x 4").as_deref(), Some("3 * 4"));
        assert_eq!(sanitize("3 X 4").as_deref(), Some("3 * 4"));
        assert_eq!(sanitize("8 ÷ 2").as_deref(), Some("8 / 2"));
    }

    #[test]
    fn test_percent_is_times_hundredth() {
        assert_eq!(sanitize("50%").as_deref(), Some("50*0.01"));
        // No "percent of the left operand" special case
        assert_eq!(sanitize("50 + 10%").as_deref(), Some("50 + 10*0.01"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), None);
        assert_eq!(sanitize("   "), None);
        assert_eq!(sanitize(" - "), None);
        assert_eq!(sanitize("-"), None);
    }

    #[test]
    fn test_mid_string_operators_untouched() {
        assert_eq!(sanitize("-5 +  - 3").as_deref(), Some("-5 +  - 3"));
    }
}
