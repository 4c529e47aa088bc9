//! Multi-line statement normalization.
//!
//! Wurst cascade chains (`..setName(...)`) frequently continue across several
//! source lines. The extractor patterns assume one statement per line, so
//! chained statements are reassembled first.
//!
//! This is a line-join heuristic, not a grammar: a line ending with the `..`
//! continuation marker (or starting with it while the statement is not yet
//! closed) is merged with following lines until a line ends with `)`.
//! Continuation markers or closing parens inside string literals are not
//! excluded and can misjoin statements; that behavior matches the shape of
//! the source this scanner targets and is pinned by test rather than fixed.

/// Collapse multi-line cascade statements into single logical lines.
pub fn normalize_statements(content: &str) -> Vec<String> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut normalized = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim_end();
        let open_continuation = line.ends_with("..")
            || (line.trim_start().starts_with("..") && !line.ends_with(')'));

        if open_continuation {
            let mut combined = line.to_string();
            i += 1;
            while i < lines.len() && !lines[i].trim().ends_with(')') {
                combined.push(' ');
                combined.push_str(lines[i].trim());
                i += 1;
            }
            if i < lines.len() {
                combined.push(' ');
                combined.push_str(lines[i].trim());
            }
            normalized.push(combined);
        } else {
            normalized.push(line.to_string());
        }
        i += 1;
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_statements_pass_through() {
        let content = "let COOLDOWN = 10.\nlet MANACOST = 25";
        assert_eq!(
            normalize_statements(content),
            vec!["let COOLDOWN = 10.", "let MANACOST = 25"]
        );
    }

    #[test]
    fn test_joins_trailing_continuation() {
        let content = "new CustomItemType(ITEM_SWORD)..\n    setItemRecipe(ITEM_WOOD,\n    ITEM_IRON)";
        let lines = normalize_statements(content);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            "new CustomItemType(ITEM_SWORD).. setItemRecipe(ITEM_WOOD, ITEM_IRON)"
        );
    }

    #[test]
    fn test_joins_leading_continuation_without_close() {
        let content = "    ..setItemRecipe(ITEM_WOOD,\n        ITEM_IRON,\n        ITEM_HIDE)";
        let lines = normalize_statements(content);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("ITEM_HIDE)"));
    }

    #[test]
    fn test_closed_cascade_line_is_not_joined() {
        let content = "    ..setUnitRequirement(UNIT_FORGE)\n    ..setMixingPotManaRequirement(30)";
        let lines = normalize_statements(content);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_known_misjoin_on_continuation_marker_inside_string_literal() {
        // A line of a multi-line string literal that happens to end with ".."
        // triggers the join heuristic and swallows the following statements.
        // Observed behavior, pinned rather than fixed.
        let content = "let LORE = \"He waits..\npatiently\"\nlet COOLDOWN = 10.";
        let lines = normalize_statements(content);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("COOLDOWN"));
    }
}
