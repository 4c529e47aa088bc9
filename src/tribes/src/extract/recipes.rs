//! Crafting recipe extraction.
//!
//! Each file is normalized into logical statements, then walked by a small
//! state machine: a `new CustomItemType(ITEM_X` statement opens an item,
//! flushing the previous one if it had an ingredient list. Station and mana
//! requirements accumulate on the open item; a new item resets them to the
//! file-level defaults. End of file flushes the last open item.

use regex::Regex;
use std::path::{Path, PathBuf};

use super::{collect_wurst_files, read_source, write_json, ExtractError};
use crate::normalize::normalize_statements;
use crate::paths::{DataDir, SourceTree};
use crate::record::{count_by, Metadata, RecipeRecord, RecipesDoc};
use crate::registry::ObjectRegistry;

/// Crafting-station constants with well-known slugs. Stations outside this
/// table fall back to the unit registry, then the raw constant.
const STATION_SLUGS: &[(&str, &str)] = &[
    ("UNIT_FORGE", "forge"),
    ("UNIT_ARMORY", "armory"),
    ("UNIT_WORKSHOP", "workshop"),
    ("UNIT_TANNERY", "tannery"),
    ("UNIT_WITCH_DOCTORS_HUT", "witch_doctors_hut"),
    ("UNIT_MIXING_POT", "mixing_pot"),
];

fn resolve_station(constant: &str, unit_ids: &ObjectRegistry) -> String {
    STATION_SLUGS
        .iter()
        .find(|(c, _)| *c == constant)
        .map(|&(_, slug)| slug.to_string())
        .unwrap_or_else(|| unit_ids.resolve(constant).to_string())
}

/// Ingredient list from a `..setItemRecipe(` statement: a paired-delimiter
/// scan from the opening parenthesis to its matching close, so nested calls
/// in arguments do not end the list early. Returns `None` when the statement
/// has no such call, `Some(vec![])` for an explicitly empty recipe.
fn scan_ingredients(line: &str) -> Option<Vec<String>> {
    const CALL: &str = "..setItemRecipe(";
    let start = line.find(CALL)? + CALL.len();

    let mut depth = 0usize;
    let mut end = start;
    for (offset, ch) in line[start..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    end = start + offset;
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
        end = start + offset + ch.len_utf8();
    }

    let item_re = Regex::new(r"ITEM_\w+").unwrap();
    let ingredients: Vec<String> = item_re
        .find_iter(&line[start..end])
        .map(|m| m.as_str().to_string())
        .collect();
    if ingredients.is_empty() && !line.contains("..setItemRecipe()") {
        return None;
    }
    Some(ingredients)
}

/// State of one in-progress recipe record.
struct OpenItem {
    item_id: String,
    ingredients: Option<Vec<String>>,
    station: Option<String>,
    mana: Option<u32>,
}

impl OpenItem {
    fn new(item_id: String, file_station: Option<&String>) -> Self {
        OpenItem {
            item_id,
            ingredients: None,
            station: file_station.cloned(),
            mana: None,
        }
    }

    /// A record is only flushable once an ingredient list was seen.
    fn flush(self, item_ids: &ObjectRegistry) -> Option<RecipeRecord> {
        let ingredients = self.ingredients?;
        Some(RecipeRecord {
            item_name: item_ids.resolve(&self.item_id).to_string(),
            item_id: self.item_id,
            ingredients,
            ingredient_names: Vec::new(),
            station_requirement: self.station,
            mana_requirement: self.mana,
        })
    }
}

/// Parse recipe records out of one file.
pub fn parse_recipe_file(
    path: &Path,
    item_ids: &ObjectRegistry,
    unit_ids: &ObjectRegistry,
) -> Vec<RecipeRecord> {
    let Some(content) = read_source(path) else {
        return Vec::new();
    };

    let file_req_re = Regex::new(r"let\s+UNIT_REQUIREMENT\s*=\s*(UNIT_\w+)").unwrap();
    let item_re = Regex::new(r"new\s+CustomItemType\s*\(\s*(ITEM_\w+)").unwrap();
    let unit_req_re = Regex::new(r"\.\.setUnitRequirement\s*\(\s*(UNIT_\w+)").unwrap();
    let mana_re = Regex::new(r"\.\.setMixingPotManaRequirement\s*\(\s*(\d+)").unwrap();

    let file_station = file_req_re
        .captures(&content)
        .map(|caps| resolve_station(&caps[1], unit_ids));

    let mut recipes = Vec::new();
    let mut open: Option<OpenItem> = None;

    for line in normalize_statements(&content) {
        if let Some(caps) = item_re.captures(&line) {
            if let Some(record) = open.take().and_then(|item| item.flush(item_ids)) {
                recipes.push(record);
            }
            open = Some(OpenItem::new(caps[1].to_string(), file_station.as_ref()));
        }

        let Some(item) = open.as_mut() else {
            continue;
        };

        if let Some(ingredients) = scan_ingredients(&line) {
            item.ingredients = Some(ingredients);
        }
        if let Some(caps) = unit_req_re.captures(&line) {
            let constant = &caps[1];
            item.station = if constant == "UNIT_REQUIREMENT" && file_station.is_some() {
                file_station.clone()
            } else {
                Some(resolve_station(constant, unit_ids))
            };
        }
        if let Some(caps) = mana_re.captures(&line) {
            item.mana = caps[1].parse().ok();
        }
    }

    if let Some(record) = open.and_then(|item| item.flush(item_ids)) {
        recipes.push(record);
    }
    recipes
}

/// Every file that may declare recipes: the crafting systems plus the item
/// definitions, scanned recursively in sorted order.
pub fn collect_recipe_files(source: &SourceTree) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in source.crafting_dirs() {
        files.extend(collect_wurst_files(&dir, &[]));
    }
    files.extend(collect_wurst_files(&source.items_dir(), &[]));
    files
}

pub fn extract_recipes(
    source: &SourceTree,
) -> (Vec<RecipeRecord>, ObjectRegistry, ObjectRegistry) {
    let item_ids = ObjectRegistry::load(&source.registry_files(), "ITEM_");
    let unit_ids = ObjectRegistry::load(&source.registry_files(), "UNIT_");

    let mut recipes = Vec::new();
    for file in collect_recipe_files(source) {
        recipes.extend(parse_recipe_file(&file, &item_ids, &unit_ids));
    }

    for recipe in &mut recipes {
        recipe.ingredient_names = recipe
            .ingredients
            .iter()
            .map(|ing| item_ids.resolve(ing).to_string())
            .collect();
    }

    (recipes, item_ids, unit_ids)
}

pub fn extract_and_write(source: &SourceTree, data: &DataDir) -> Result<RecipesDoc, ExtractError> {
    let (recipes, item_ids, unit_ids) = extract_recipes(source);
    let by_station = count_by(&recipes, |r| {
        r.station_requirement.as_deref().unwrap_or("none")
    });
    let doc = RecipesDoc {
        metadata: Metadata::new(recipes.len(), by_station),
        recipes,
        item_ids: item_ids.sorted_entries(),
        unit_ids: unit_ids.sorted_entries(),
    };
    write_json(&data.recipes_json(), &doc)?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn registries() -> (ObjectRegistry, ObjectRegistry) {
        (ObjectRegistry::default(), ObjectRegistry::default())
    }

    fn parse(content: &str) -> Vec<RecipeRecord> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Recipes.wurst");
        fs::write(&path, content).unwrap();
        let (items, units) = registries();
        parse_recipe_file(&path, &items, &units)
    }

    #[test]
    fn test_basic_recipe() {
        let recipes = parse(concat!(
            "new CustomItemType(ITEM_SWORD)\n",
            "    ..setItemRecipe(ITEM_WOOD, ITEM_IRON)\n",
            "    ..setUnitRequirement(UNIT_FORGE)\n",
        ));
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].item_id, "ITEM_SWORD");
        assert_eq!(recipes[0].ingredients, vec!["ITEM_WOOD", "ITEM_IRON"]);
        assert_eq!(recipes[0].station_requirement.as_deref(), Some("forge"));
        assert_eq!(recipes[0].mana_requirement, None);
    }

    #[test]
    fn test_item_without_recipe_is_not_flushed() {
        let recipes = parse(concat!(
            "new CustomItemType(ITEM_DECOR)\n",
            "    ..setName(\"Decoration\")\n",
            "new CustomItemType(ITEM_AXE)\n",
            "    ..setItemRecipe(ITEM_STICK, ITEM_FLINT)\n",
        ));
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].item_id, "ITEM_AXE");
    }

    #[test]
    fn test_empty_recipe_is_flushed() {
        let recipes = parse("new CustomItemType(ITEM_FREE)\n    ..setItemRecipe()\n");
        assert_eq!(recipes.len(), 1);
        assert!(recipes[0].ingredients.is_empty());
    }

    #[test]
    fn test_nested_call_does_not_end_ingredient_scan() {
        let recipes = parse(
            "new CustomItemType(ITEM_POTION)\n    ..setItemRecipe(ITEM_HERB, toItemId(ITEM_WATER))\n",
        );
        assert_eq!(recipes[0].ingredients, vec!["ITEM_HERB", "ITEM_WATER"]);
    }

    #[test]
    fn test_placeholder_resolves_to_file_level_default() {
        let recipes = parse(concat!(
            "let UNIT_REQUIREMENT = UNIT_TANNERY\n",
            "new CustomItemType(ITEM_BOOTS)\n",
            "    ..setItemRecipe(ITEM_HIDE)\n",
            "    ..setUnitRequirement(UNIT_REQUIREMENT)\n",
        ));
        assert_eq!(recipes[0].station_requirement.as_deref(), Some("tannery"));
    }

    #[test]
    fn test_new_item_resets_to_file_level_station() {
        let recipes = parse(concat!(
            "let UNIT_REQUIREMENT = UNIT_WORKSHOP\n",
            "new CustomItemType(ITEM_NET)\n",
            "    ..setItemRecipe(ITEM_ROPE)\n",
            "    ..setUnitRequirement(UNIT_ARMORY)\n",
            "new CustomItemType(ITEM_TRAP)\n",
            "    ..setItemRecipe(ITEM_STICK)\n",
        ));
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].station_requirement.as_deref(), Some("armory"));
        // The override on the previous item does not carry over.
        assert_eq!(recipes[1].station_requirement.as_deref(), Some("workshop"));
    }

    #[test]
    fn test_mixing_pot_mana_requirement() {
        let recipes = parse(concat!(
            "new CustomItemType(ITEM_ELIXIR)\n",
            "    ..setItemRecipe(ITEM_HERB, ITEM_HERB)\n",
            "    ..setUnitRequirement(UNIT_MIXING_POT)\n",
            "    ..setMixingPotManaRequirement(75)\n",
        ));
        assert_eq!(
            recipes[0].station_requirement.as_deref(),
            Some("mixing_pot")
        );
        assert_eq!(recipes[0].mana_requirement, Some(75));
    }

    #[test]
    fn test_unknown_station_falls_back_to_registry_then_constant() {
        let dir = TempDir::new().unwrap();
        let assets = dir.path().join("assets");
        fs::create_dir_all(&assets).unwrap();
        fs::write(
            assets.join("LocalObjectIDs.wurst"),
            concat!(
                "public let ITEM_NET = compiletime(x)..registerObjectID(\"ITEM_NET\")\n",
                "public let UNIT_CAMP = compiletime(y)..registerObjectID(\"UNIT_CAMP\")\n",
            ),
        )
        .unwrap();
        let crafting = dir.path().join("systems/craftingV2");
        fs::create_dir_all(&crafting).unwrap();
        fs::write(
            crafting.join("Nets.wurst"),
            concat!(
                "new CustomItemType(ITEM_NET)\n",
                "    ..setItemRecipe(ITEM_ROPE)\n",
                "    ..setUnitRequirement(UNIT_CAMP)\n",
            ),
        )
        .unwrap();

        let (recipes, _, _) = extract_recipes(&SourceTree::new(dir.path()));
        assert_eq!(recipes.len(), 1);
        assert_eq!(
            recipes[0].station_requirement.as_deref(),
            Some("UNIT_CAMP")
        );
        assert_eq!(recipes[0].item_name, "ITEM_NET");
        // Unregistered ingredient names fall back to the constant.
        assert_eq!(recipes[0].ingredient_names, vec!["ITEM_ROPE"]);
    }

    #[test]
    fn test_multi_line_recipe_is_normalized_first() {
        let recipes = parse(concat!(
            "new CustomItemType(ITEM_COAT)\n",
            "    ..setItemRecipe(\n",
            "        ITEM_HIDE,\n",
            "        ITEM_THREAD)\n",
        ));
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].ingredients, vec!["ITEM_HIDE", "ITEM_THREAD"]);
    }
}
