//! Tooltip and description cleaning.
//!
//! Game tooltips embed Warcraft III presentation markup: `|cAARRGGBB` starts a
//! color run, `|r` ends it, `|n` is a line break. All human-readable text is
//! passed through [`clean_tooltip`] before it reaches serialization or module
//! generation.

use regex::Regex;

/// Strip presentation markup and normalize whitespace.
///
/// Returns `None` when the cleaned text is empty, so callers can fall through
/// to the next description source instead of emitting a blank field.
pub fn clean_tooltip(text: &str) -> Option<String> {
    let color_start = Regex::new(r"\|c[0-9a-fA-F]{8}").unwrap();

    let cleaned = color_start.replace_all(text, "");
    let cleaned = cleaned.replace("|r", "");
    let cleaned = cleaned.replace("|n", " ");
    let cleaned = cleaned.replace('\n', " ");
    let cleaned = collapse_whitespace(&cleaned);

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Strip compile-time call noise (`.color(...)`, `.format(...)`,
/// `.toToolTip*()`) that leaks into concatenated tooltip expressions, then
/// normalize whitespace and trim trailing periods.
pub fn clean_tooltip_expression(text: &str) -> Option<String> {
    let color_call = Regex::new(r"\.color\([^)]+\)").unwrap();
    let format_call = Regex::new(r"\.format\([^)]+\)").unwrap();
    let tooltip_call = Regex::new(r"\.toToolTip[^()]+\(\)").unwrap();

    let cleaned = color_call.replace_all(text, "");
    let cleaned = format_call.replace_all(&cleaned, "");
    let cleaned = tooltip_call.replace_all(&cleaned, "");
    let cleaned = collapse_whitespace(&cleaned);
    let cleaned = cleaned.trim_matches(|c| c == ' ' || c == '.').to_string();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_color_codes() {
        assert_eq!(
            clean_tooltip("|cffffcc00Heals 50 HP|r"),
            Some("Heals 50 HP".to_string())
        );
    }

    #[test]
    fn test_color_code_consumes_all_eight_hex_digits() {
        // Alpha byte included: no leading digits may survive the strip.
        assert_eq!(
            clean_tooltip("|c0000ff00Poisons|r the target"),
            Some("Poisons the target".to_string())
        );
    }

    #[test]
    fn test_newline_markers_become_spaces() {
        assert_eq!(
            clean_tooltip("First line|nSecond line"),
            Some("First line Second line".to_string())
        );
        assert_eq!(
            clean_tooltip("First line\nSecond line"),
            Some("First line Second line".to_string())
        );
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            clean_tooltip("  too   many\t spaces  "),
            Some("too many spaces".to_string())
        );
    }

    #[test]
    fn test_empty_after_cleaning_is_none() {
        assert_eq!(clean_tooltip(""), None);
        assert_eq!(clean_tooltip("|r |n"), None);
    }

    #[test]
    fn test_expression_cleaning_strips_call_noise() {
        assert_eq!(
            clean_tooltip_expression("Deals damage.color(COLOR_RED) over time.format(DMG)"),
            Some("Deals damage over time".to_string())
        );
    }
}
