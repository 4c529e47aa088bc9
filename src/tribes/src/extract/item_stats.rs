//! Item stat-bonus extraction.
//!
//! Each `new CustomItemType(ITEM_X ...)` declaration opens a bounded window
//! (up to the next blank line, else a 500-byte cap) that is scanned for
//! `addBonus*` calls. The stat set is open; items with no bonuses get no
//! entry at all.

use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

use super::{list_wurst_files, read_source, write_json, ExtractError};
use crate::ident::canonical_id;
use crate::paths::{DataDir, SourceTree};
use crate::record::{ItemStatsDoc, Metadata, StatBonuses};

/// Stat key and the bonus call that sets it.
const BONUS_CALLS: &[(&str, &str)] = &[
    ("strength", r"addBonusStrength\s*\(\s*(\d+)\s*\)"),
    ("agility", r"addBonusAgility\s*\(\s*(\d+)\s*\)"),
    ("intelligence", r"addBonusIntelligence\s*\(\s*(\d+)\s*\)"),
    ("armor", r"addBonusArmou?r\s*\(\s*(\d+)\s*\)"),
    ("damage", r"addBonusDamage\s*\(\s*(\d+)\s*\)"),
    ("health", r"addBonusLife\s*\(\s*(\d+)\s*\)"),
    ("mana", r"addBonusMana\s*\(\s*(\d+)\s*\)"),
];

const WINDOW_CAP: usize = 500;

/// Stat bonuses per canonical item id from one crafting file.
pub fn extract_item_stats_from_file(path: &Path) -> BTreeMap<String, StatBonuses> {
    let Some(content) = read_source(path) else {
        return BTreeMap::new();
    };

    let item_re = Regex::new(r"new\s+CustomItemType\s*\(\s*(ITEM_\w+)\s*[^)]*\)").unwrap();
    let bonus_res: Vec<(&str, Regex)> = BONUS_CALLS
        .iter()
        .map(|&(stat, pattern)| (stat, Regex::new(pattern).unwrap()))
        .collect();

    let mut stats = BTreeMap::new();
    for caps in item_re.captures_iter(&content) {
        let m = caps.get(0).unwrap();
        let mut window_end = content[m.end()..]
            .find("\n\n")
            .map(|offset| m.end() + offset)
            .unwrap_or_else(|| content.len().min(m.end() + WINDOW_CAP));
        // The byte cap may land inside a multibyte tooltip character.
        while !content.is_char_boundary(window_end) {
            window_end -= 1;
        }
        let window = &content[m.end()..window_end];

        let mut bonuses = StatBonuses::new();
        for (stat, re) in &bonus_res {
            if let Some(value) = re.captures(window).and_then(|c| c[1].parse::<i64>().ok()) {
                bonuses.insert((*stat).to_string(), value);
            }
        }

        if !bonuses.is_empty() {
            stats.insert(canonical_id(&caps[1], "ITEM_"), bonuses);
        }
    }
    stats
}

/// Crafting files to scan, skipping the type-definition files themselves.
pub fn collect_crafting_files(crafting_dir: &Path) -> Vec<std::path::PathBuf> {
    list_wurst_files(crafting_dir)
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| !n.starts_with("CustomItemType"))
        })
        .collect()
}

/// Extract stats from every crafting file; later files override earlier ones
/// on conflicting ids.
pub fn extract_all_item_stats(source: &SourceTree) -> BTreeMap<String, StatBonuses> {
    let mut all_stats = BTreeMap::new();
    for file in collect_crafting_files(&source.crafting_dir()) {
        all_stats.extend(extract_item_stats_from_file(&file));
    }
    all_stats
}

pub fn extract_and_write(source: &SourceTree, data: &DataDir) -> Result<ItemStatsDoc, ExtractError> {
    let items = extract_all_item_stats(source);
    let doc = ItemStatsDoc {
        metadata: Metadata::new(items.len(), BTreeMap::new()),
        items,
    };
    write_json(&data.item_stats_json(), &doc)?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_crafting_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let crafting = dir.path().join("systems/craftingV2");
        fs::create_dir_all(&crafting).unwrap();
        let path = crafting.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_bonus_window_ends_at_blank_line() {
        let dir = TempDir::new().unwrap();
        let path = write_crafting_file(
            &dir,
            "Axes.wurst",
            concat!(
                "new CustomItemType(ITEM_STEEL_AXE)\n",
                "    ..addBonusDamage(12)\n",
                "    ..addBonusStrength(3)\n",
                "\n",
                "new CustomItemType(ITEM_BONE_CLUB)\n",
                "    ..addBonusDamage(4)\n",
            ),
        );

        let stats = extract_item_stats_from_file(&path);
        let axe = stats.get("steel-axe").unwrap();
        assert_eq!(axe.get("damage"), Some(&12));
        assert_eq!(axe.get("strength"), Some(&3));
        // The club's bonus must not leak into the axe's window.
        let club = stats.get("bone-club").unwrap();
        assert_eq!(club.get("damage"), Some(&4));
        assert_eq!(club.len(), 1);
    }

    #[test]
    fn test_item_without_bonuses_gets_no_entry() {
        let dir = TempDir::new().unwrap();
        let path = write_crafting_file(
            &dir,
            "Plain.wurst",
            "new CustomItemType(ITEM_STICK)\n    ..setName(\"Stick\")\n",
        );
        assert!(extract_item_stats_from_file(&path).is_empty());
    }

    #[test]
    fn test_british_armour_spelling_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_crafting_file(
            &dir,
            "Shields.wurst",
            "new CustomItemType(ITEM_SHIELD)\n    ..addBonusArmour(5)\n",
        );
        let stats = extract_item_stats_from_file(&path);
        assert_eq!(stats.get("shield").unwrap().get("armor"), Some(&5));
    }

    #[test]
    fn test_type_definition_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write_crafting_file(
            &dir,
            "CustomItemType.wurst",
            "new CustomItemType(ITEM_GHOST)\n    ..addBonusMana(50)\n",
        );
        write_crafting_file(
            &dir,
            "Helms.wurst",
            "new CustomItemType(ITEM_HELM)\n    ..addBonusArmor(2)\n",
        );

        let stats = extract_all_item_stats(&SourceTree::new(dir.path()));
        assert!(stats.contains_key("helm"));
        assert!(!stats.contains_key("ghost"));
    }
}
