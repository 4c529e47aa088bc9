//! Canonical intermediate records.
//!
//! One serialized document per entity domain, each carrying its record list
//! plus a metadata block (counts and extraction timestamp). Documents are
//! written as a full overwrite on every run; optional fields are skipped when
//! absent so a missing value never serializes as a sentinel.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One extracted ability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub file_path: String,
}

/// Ability description scraped from tooltips, used as the override table for
/// ability extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionRecord {
    pub id: String,
    pub description: String,
    pub file: String,
}

/// One extracted building.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRecord {
    pub id: String,
    pub unit_id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub craftable_items: Option<Vec<String>>,
    pub file_path: String,
}

/// Per-level attribute growth for a troll unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeGrowth {
    pub strength: f64,
    pub agility: f64,
    pub intelligence: f64,
}

/// One extracted troll unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRecord {
    pub id: String,
    pub unit_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub growth: AttributeGrowth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_hp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_mana: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_attack_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_move_speed: Option<u32>,
}

/// Sparse stat-bonus map for one item; the stat set is open.
pub type StatBonuses = BTreeMap<String, i64>;

/// One extracted crafting recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    pub item_id: String,
    pub item_name: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub ingredient_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_requirement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mana_requirement: Option<u32>,
}

/// Metadata block attached to every intermediate document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub total: usize,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub counts: BTreeMap<String, usize>,
    pub extracted_at: String,
}

impl Metadata {
    pub fn new(total: usize, counts: BTreeMap<String, usize>) -> Self {
        Metadata {
            total,
            counts,
            extracted_at: timestamp(),
        }
    }
}

/// Extraction timestamp, the only field allowed to differ between two runs
/// against unmodified source.
pub fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AbilitiesDoc {
    pub abilities: Vec<AbilityRecord>,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DescriptionsDoc {
    pub descriptions: BTreeMap<String, DescriptionRecord>,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BuildingsDoc {
    pub buildings: Vec<BuildingRecord>,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnitsDoc {
    pub units: Vec<UnitRecord>,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatsDoc {
    pub items: BTreeMap<String, StatBonuses>,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipesDoc {
    pub recipes: Vec<RecipeRecord>,
    pub item_ids: BTreeMap<String, String>,
    pub unit_ids: BTreeMap<String, String>,
    pub metadata: Metadata,
}

/// Merge records by canonical id, first occurrence wins. Later duplicates are
/// discarded silently, so scan order is part of the observable contract and
/// collectors keep it sorted.
pub fn dedup_first_by_id<T>(records: Vec<T>, id_of: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(id_of(&record).to_string()) {
            unique.push(record);
        }
    }
    unique
}

/// Count records per key, in sorted key order.
pub fn count_by<T>(records: &[T], key_of: impl Fn(&T) -> &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key_of(record).to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ability(id: &str, name: &str) -> AbilityRecord {
        AbilityRecord {
            id: id.to_string(),
            name: name.to_string(),
            category: "unknown".to_string(),
            subcategory: None,
            description: String::new(),
            mana_cost: None,
            cooldown: None,
            duration: None,
            file_path: String::new(),
        }
    }

    #[test]
    fn test_dedup_first_occurrence_wins() {
        let records = vec![
            ability("heal", "first"),
            ability("track", "only"),
            ability("heal", "second"),
        ];
        let unique = dedup_first_by_id(records, |a| &a.id);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "first");
        assert_eq!(unique[1].id, "track");
    }

    #[test]
    fn test_count_by() {
        let records = vec![ability("a", ""), ability("b", ""), ability("c", "")];
        let counts = count_by(&records, |a| a.category.as_str());
        assert_eq!(counts.get("unknown"), Some(&3));
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let json = serde_json::to_string(&ability("heal", "Heal")).unwrap();
        assert!(!json.contains("manaCost"));
        assert!(!json.contains("cooldown"));
        assert!(!json.contains("subcategory"));
    }

    #[test]
    fn test_present_optionals_serialize_camel_case() {
        let mut a = ability("heal", "Heal");
        a.mana_cost = Some(25);
        a.cooldown = Some(10.0);
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"manaCost\":25"));
        assert!(json.contains("\"cooldown\":10.0"));
        assert!(json.contains("\"filePath\""));
    }
}
