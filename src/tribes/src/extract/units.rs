//! Troll unit extraction.
//!
//! The attribute-growth table in `TrollUnitTextConstant.wurst` is the source
//! of truth for which playable units exist; the object id registry is only
//! reported for comparison. Combat stats come from single-value patterns over
//! the shared `TrollUnitFactory.wurst`, so one file-wide default applies to
//! every unit.

use regex::Regex;
use std::fs;
use std::path::Path;

use super::{write_json, ExtractError};
use crate::ident::{canonical_id, title_case_id};
use crate::paths::{DataDir, SourceTree};
use crate::record::{count_by, AttributeGrowth, Metadata, UnitRecord, UnitsDoc};

const BASE_CLASSES: &[&str] = &[
    "hunter",
    "mage",
    "priest",
    "thief",
    "scout",
    "gatherer",
    "beastmaster",
];

const SUPERCLASSES: &[&str] = &[
    "juggernaut",
    "assassin",
    "sage",
    "dementia_master",
    "jungle_tyrant",
    "omnigatherer",
    "spy",
];

const SUBCLASSES: &[&str] = &[
    "warrior",
    "tracker",
    "elementalist",
    "hypnotist",
    "dreamwalker",
    "booster",
    "master_healer",
    "rogue",
    "telethief",
    "contortionist",
    "escape_artist",
    "observer",
    "trapper",
    "radar_gatherer",
    "herb_master",
    "alchemist",
    "druid",
    "shapeshifter",
];

/// Tier of a troll unit in the class tree.
pub fn determine_unit_type(unit_id: &str) -> Option<&'static str> {
    let lower = unit_id.to_lowercase();

    if BASE_CLASSES
        .iter()
        .any(|base| lower == format!("unit_{base}"))
    {
        return Some("base");
    }
    if SUPERCLASSES.iter().any(|sup| lower.contains(sup)) {
        return Some("superclass");
    }
    if SUBCLASSES.iter().any(|sub| lower.contains(sub)) {
        return Some("subclass");
    }
    None
}

/// Parse one growth argument, tolerating trailing-dot reals like `2.`.
fn parse_growth_value(raw: &str) -> Option<f64> {
    raw.trim().trim_end_matches('.').parse().ok()
}

/// Attribute growth per unit constant, in declaration order.
pub fn extract_attribute_growth(content: &str) -> Vec<(String, AttributeGrowth)> {
    let growth_re = Regex::new(r"\.\.put\((\w+),\s*new\s+AttributeGrowth\(([^)]+)\)\)").unwrap();

    let mut growth = Vec::new();
    for caps in growth_re.captures_iter(content) {
        let values: Vec<f64> = caps[2].split(',').filter_map(parse_growth_value).collect();
        if values.len() >= 3 {
            growth.push((
                caps[1].to_string(),
                AttributeGrowth {
                    strength: values[0],
                    agility: values[1],
                    intelligence: values[2],
                },
            ));
        }
    }
    growth
}

/// Shared combat-stat defaults found in the factory file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FactoryStats {
    pub base_hp: Option<u32>,
    pub base_mana: Option<u32>,
    pub base_attack_speed: Option<f64>,
    pub base_move_speed: Option<u32>,
}

pub fn extract_factory_stats(content: &str) -> FactoryStats {
    let hp_re = Regex::new(r"setHitPointsMaximumBase\((\d+)\)").unwrap();
    let mana_re = Regex::new(r"setManaMaximum\((\d+)\)").unwrap();
    let attack_re = Regex::new(r"setAttack\d+CooldownTime\(([0-9.]+)\)").unwrap();
    let move_re = Regex::new(r"setAnimation(?:Run|Walk)Speed\((\d+)\)").unwrap();

    let capture_u32 = |re: &Regex| {
        re.captures(content)
            .and_then(|c| c[1].parse::<u32>().ok())
    };

    FactoryStats {
        base_hp: capture_u32(&hp_re),
        base_mana: capture_u32(&mana_re),
        base_attack_speed: attack_re
            .captures(content)
            .and_then(|c| c[1].parse::<f64>().ok()),
        base_move_speed: capture_u32(&move_re),
    }
}

fn read_optional(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        // A missing source file is an empty contribution, not a failure.
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => {
            eprintln!("Error reading {}: {err}", path.display());
            String::new()
        }
    }
}

pub fn extract_units(source: &SourceTree) -> Vec<UnitRecord> {
    let growth = extract_attribute_growth(&read_optional(&source.unit_text_constants_file()));
    let stats = extract_factory_stats(&read_optional(&source.unit_factory_file()));

    growth
        .into_iter()
        .map(|(unit_id, growth)| UnitRecord {
            id: canonical_id(&unit_id, "UNIT_"),
            name: title_case_id(&unit_id, "UNIT_"),
            unit_type: determine_unit_type(&unit_id)
                .unwrap_or("unknown")
                .to_string(),
            unit_id,
            growth,
            base_hp: stats.base_hp,
            base_mana: stats.base_mana,
            base_attack_speed: stats.base_attack_speed,
            base_move_speed: stats.base_move_speed,
        })
        .collect()
}

pub fn extract_and_write(source: &SourceTree, data: &DataDir) -> Result<UnitsDoc, ExtractError> {
    let units = extract_units(source);
    let doc = UnitsDoc {
        metadata: Metadata::new(units.len(), count_by(&units, |u| u.unit_type.as_str())),
        units,
    };
    write_json(&data.units_json(), &doc)?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_unit_type_tiers() {
        assert_eq!(determine_unit_type("UNIT_HUNTER"), Some("base"));
        assert_eq!(determine_unit_type("UNIT_JUGGERNAUT"), Some("superclass"));
        assert_eq!(determine_unit_type("UNIT_TRACKER"), Some("subclass"));
        assert_eq!(determine_unit_type("UNIT_WOLF"), None);
    }

    #[test]
    fn test_base_class_requires_exact_match() {
        // "UNIT_MAGE" is base, but a decorated mage constant is not.
        assert_eq!(determine_unit_type("UNIT_MAGE"), Some("base"));
        assert_eq!(determine_unit_type("UNIT_FIRE_MAGE"), None);
    }

    #[test]
    fn test_growth_tolerates_trailing_dot_reals() {
        let content = "trollAttributeGrowth\n..put(UNIT_HUNTER, new AttributeGrowth(1.3, 2., 0.5))\n";
        let growth = extract_attribute_growth(content);
        assert_eq!(growth.len(), 1);
        assert_eq!(growth[0].0, "UNIT_HUNTER");
        assert_eq!(growth[0].1.strength, 1.3);
        assert_eq!(growth[0].1.agility, 2.0);
        assert_eq!(growth[0].1.intelligence, 0.5);
    }

    #[test]
    fn test_growth_with_too_few_values_is_skipped() {
        let content = "..put(UNIT_BROKEN, new AttributeGrowth(1.0, 2.0))\n";
        assert!(extract_attribute_growth(content).is_empty());
    }

    #[test]
    fn test_factory_stats_are_shared_defaults() {
        let content = concat!(
            "function trollBase(int id) returns UnitDefinition\n",
            "    return new UnitDefinition(id, UnitIds.chaoswarlord)\n",
            "        ..setHitPointsMaximumBase(100)\n",
            "        ..setManaMaximum(200)\n",
            "        ..setAttack1CooldownTime(1.75)\n",
            "        ..setAnimationRunSpeed(290)\n",
        );
        let stats = extract_factory_stats(content);
        assert_eq!(stats.base_hp, Some(100));
        assert_eq!(stats.base_mana, Some(200));
        assert_eq!(stats.base_attack_speed, Some(1.75));
        assert_eq!(stats.base_move_speed, Some(290));
    }

    #[test]
    fn test_missing_source_files_yield_no_units() {
        let dir = TempDir::new().unwrap();
        assert!(extract_units(&SourceTree::new(dir.path())).is_empty());
    }

    #[test]
    fn test_units_driven_by_growth_table() {
        let dir = TempDir::new().unwrap();
        let units_dir = dir.path().join("objects/units");
        fs::create_dir_all(&units_dir).unwrap();
        fs::write(
            units_dir.join("TrollUnitTextConstant.wurst"),
            concat!(
                "..put(UNIT_HUNTER, new AttributeGrowth(2.4, 2.0, 1.2))\n",
                "..put(UNIT_DRUID, new AttributeGrowth(1.8, 1.6, 2.2))\n",
            ),
        )
        .unwrap();
        fs::write(
            units_dir.join("TrollUnitFactory.wurst"),
            "..setHitPointsMaximumBase(100)\n",
        )
        .unwrap();

        let units = extract_units(&SourceTree::new(dir.path()));
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].id, "hunter");
        assert_eq!(units[0].name, "Hunter");
        assert_eq!(units[0].unit_type, "base");
        assert_eq!(units[0].base_hp, Some(100));
        assert_eq!(units[1].id, "druid");
        assert_eq!(units[1].unit_type, "subclass");
        assert_eq!(units[1].base_mana, None);
    }
}
