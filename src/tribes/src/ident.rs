//! Canonical identifier derivation.
//!
//! Every extracted entity is keyed by a canonical id derived from its source
//! constant: the domain prefix is stripped, the rest lowercased and
//! underscores replaced with dashes. The derivation is pure, so the same
//! constant always maps to the same id regardless of scan order.

/// Derive a canonical id from a source constant name.
///
/// `canonical_id("ABILITY_HEAL_SELF", "ABILITY_")` yields `"heal-self"`.
/// A constant without the prefix is converted as-is.
pub fn canonical_id(constant: &str, prefix: &str) -> String {
    let stripped = constant.strip_prefix(prefix).unwrap_or(constant);
    stripped.to_lowercase().replace('_', "-")
}

/// Turn a source constant into a display name: strip the prefix and
/// title-case the remaining words (`ITEM_STEEL_AXE` becomes "Steel Axe").
pub fn title_case_id(constant: &str, prefix: &str) -> String {
    let stripped = constant.strip_prefix(prefix).unwrap_or(constant);
    stripped
        .split('_')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title-case an already-canonical dash-separated id ("heal-self" -> "Heal Self").
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_id_strips_prefix() {
        assert_eq!(canonical_id("ABILITY_HEAL_SELF", "ABILITY_"), "heal-self");
        assert_eq!(canonical_id("ITEM_STEEL_AXE", "ITEM_"), "steel-axe");
        assert_eq!(canonical_id("UNIT_FORGE", "UNIT_"), "forge");
    }

    #[test]
    fn test_canonical_id_without_prefix() {
        assert_eq!(canonical_id("SPIRIT_WARD", "ABILITY_"), "spirit-ward");
    }

    #[test]
    fn test_canonical_id_is_pure() {
        let a = canonical_id("ABILITY_HEAL", "ABILITY_");
        let b = canonical_id("ABILITY_HEAL", "ABILITY_");
        assert_eq!(a, b);
        assert_eq!(a, "heal");
    }

    #[test]
    fn test_title_case_id() {
        assert_eq!(title_case_id("ITEM_STEEL_AXE", "ITEM_"), "Steel Axe");
        assert_eq!(title_case_id("UNIT_WITCH_DOCTORS_HUT", "UNIT_"), "Witch Doctors Hut");
    }

    #[test]
    fn test_title_case_slug() {
        assert_eq!(title_case_slug("heal-self"), "Heal Self");
        assert_eq!(title_case_slug("spirit-ward"), "Spirit Ward");
    }
}
