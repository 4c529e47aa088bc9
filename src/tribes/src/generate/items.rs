//! Item module generation.
//!
//! Items are collected from the recipe records: every recipe result is a
//! craftable item carrying its recipe, station and mana cost; ingredients
//! that never appear as a result become plain items. One module is written
//! per fixed category even when empty, plus the aggregating `items.ts`.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::{load_doc, write_module, GenerateError};
use crate::classify::{classify_item, Classification, ITEM_CATEGORIES};
use crate::generate::escape::escape_single_quoted;
use crate::ident::{canonical_id, title_case_id};
use crate::paths::{DataDir, SiteDataDir};
use crate::record::{ItemStatsDoc, RecipesDoc, StatBonuses};

const PLACEHOLDER_DESCRIPTION: &str = "Imported from game data.";

/// One item assembled from the recipe and stat records, keyed by its source
/// constant so category files sort by constant.
#[derive(Debug)]
pub struct ItemEntry {
    pub constant: String,
    pub name: String,
    pub classification: Classification,
    pub stats: Option<StatBonuses>,
    pub recipe: Option<CraftInfo>,
}

/// Crafting fields carried only by recipe results.
#[derive(Debug)]
pub struct CraftInfo {
    pub ingredients: Vec<String>,
    pub crafted_at: Option<String>,
    pub mana_requirement: Option<u32>,
}

/// Collect every item the recipes mention. A result item always wins over a
/// previous ingredient-only sighting of the same constant.
pub fn collect_items(recipes: &RecipesDoc, stats: &ItemStatsDoc) -> BTreeMap<String, ItemEntry> {
    let mut items: BTreeMap<String, ItemEntry> = BTreeMap::new();

    let entry_for = |constant: &str, recipe: Option<CraftInfo>| {
        let id = canonical_id(constant, "ITEM_");
        ItemEntry {
            name: title_case_id(constant, "ITEM_"),
            classification: classify_item(&id),
            stats: stats.items.get(&id).cloned(),
            recipe,
            constant: constant.to_string(),
        }
    };

    for recipe in &recipes.recipes {
        items.insert(
            recipe.item_id.clone(),
            entry_for(
                &recipe.item_id,
                Some(CraftInfo {
                    ingredients: recipe
                        .ingredients
                        .iter()
                        .map(|ing| canonical_id(ing, "ITEM_"))
                        .collect(),
                    crafted_at: recipe.station_requirement.clone(),
                    mana_requirement: recipe.mana_requirement,
                }),
            ),
        );

        for ingredient in &recipe.ingredients {
            if !items.contains_key(ingredient) {
                items.insert(ingredient.clone(), entry_for(ingredient, None));
            }
        }
    }
    items
}

pub fn format_item(item: &ItemEntry) -> String {
    let mut out = String::from("  {\n");
    let _ = writeln!(out, "    id: '{}',", canonical_id(&item.constant, "ITEM_"));
    let _ = writeln!(out, "    name: '{}',", escape_single_quoted(&item.name));
    let _ = writeln!(out, "    category: '{}',", item.classification.category);
    if let Some(subcategory) = item.classification.subcategory {
        let _ = writeln!(out, "    subcategory: '{subcategory}',");
    }
    let _ = writeln!(out, "    description: '{PLACEHOLDER_DESCRIPTION}',");

    if let Some(stats) = &item.stats {
        out.push_str("    stats: {\n");
        for (stat, value) in stats {
            let _ = writeln!(out, "      {stat}: {value},");
        }
        out.push_str("    },\n");
    }

    if let Some(craft) = &item.recipe {
        let quoted: Vec<String> = craft
            .ingredients
            .iter()
            .map(|ing| format!("'{ing}'"))
            .collect();
        let _ = writeln!(out, "    recipe: [{}],", quoted.join(", "));
        if let Some(station) = &craft.crafted_at {
            let _ = writeln!(out, "    craftedAt: '{station}',");
        }
        if let Some(mana) = craft.mana_requirement {
            let _ = writeln!(out, "    mixingPotManaRequirement: {mana},");
        }
    }

    out.push_str("  },\n");
    out
}

/// Export name for a category module (`raw-materials` -> `RAW_MATERIAL_ITEMS`).
pub fn export_name(category: &str) -> String {
    let singular = match category {
        "raw-materials" => "raw-material",
        "weapons" => "weapon",
        "potions" => "potion",
        "scrolls" => "scroll",
        "buildings" => "building",
        other => other.trim_end_matches('s'),
    };
    format!("{}_ITEMS", singular.to_uppercase().replace('-', "_"))
}

pub fn render_category(category: &str, items: &[&ItemEntry]) -> String {
    let mut out = String::from("import type { ItemData } from '@/types/items';\n\n");
    let _ = writeln!(out, "export const {}: ItemData[] = [", export_name(category));
    for item in items {
        out.push_str(&format_item(item));
    }
    out.push_str("];\n");
    out
}

pub fn render_items_module() -> String {
    let mut out = String::from(
        "import { ItemData, ItemsByCategory, ItemCategory, ItemSubcategory } from '@/types/items';\n",
    );
    for category in ITEM_CATEGORIES {
        let _ = writeln!(
            out,
            "import {{ {} }} from './items.{category}';",
            export_name(category)
        );
    }
    out.push_str("\nexport const ITEMS_DATA: ItemData[] = [\n");
    for category in ITEM_CATEGORIES {
        let _ = writeln!(out, "  ...{},", export_name(category));
    }
    out.push_str("];\n\n");

    out.push_str(
        "export const ITEMS_BY_CATEGORY: ItemsByCategory = ITEMS_DATA.reduce((acc, item) => {\n\
         \x20 if (!acc[item.category]) {\n\
         \x20   acc[item.category] = [];\n\
         \x20 }\n\
         \x20 acc[item.category].push(item);\n\
         \x20 return acc;\n\
         }, {} as ItemsByCategory);\n\n\
         export function getItemById(id: string): ItemData | undefined {\n\
         \x20 return ITEMS_DATA.find(item => item.id === id);\n\
         }\n\n\
         export function getItemsByCategory(category: ItemCategory): ItemData[] {\n\
         \x20 return ITEMS_BY_CATEGORY[category] || [];\n\
         }\n\n\
         export function getItemsBySubcategory(subcategory: ItemSubcategory): ItemData[] {\n\
         \x20 return ITEMS_DATA.filter(item => item.subcategory === subcategory);\n\
         }\n\n\
         export function searchItems(query: string): ItemData[] {\n\
         \x20 const lowercaseQuery = query.toLowerCase();\n\
         \x20 return ITEMS_DATA.filter(item =>\n\
         \x20   item.name.toLowerCase().includes(lowercaseQuery) ||\n\
         \x20   item.description.toLowerCase().includes(lowercaseQuery) ||\n\
         \x20   item.recipe?.some(ingredient => ingredient.toLowerCase().includes(lowercaseQuery))\n\
         \x20 );\n\
         }\n",
    );
    out
}

/// Generate every item module. Returns the number of files written.
pub fn generate_and_write(data: &DataDir, site: &SiteDataDir) -> Result<usize, GenerateError> {
    let recipes: RecipesDoc = load_doc(&data.recipes_json())?;
    let stats: ItemStatsDoc = load_doc(&data.item_stats_json())?;
    let items = collect_items(&recipes, &stats);

    let mut written = 0;
    for category in ITEM_CATEGORIES {
        // BTreeMap iteration keeps category files sorted by constant.
        let in_category: Vec<&ItemEntry> = items
            .values()
            .filter(|item| item.classification.category == *category)
            .collect();
        write_module(
            &site.item_category_file(category),
            &render_category(category, &in_category),
        )?;
        println!("Created items.{category}.ts with {} items", in_category.len());
        written += 1;
    }

    write_module(&site.items_file(), &render_items_module())?;
    Ok(written + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Metadata, RecipeRecord};
    use std::collections::BTreeMap;

    fn recipes_doc(recipes: Vec<RecipeRecord>) -> RecipesDoc {
        RecipesDoc {
            metadata: Metadata::new(recipes.len(), BTreeMap::new()),
            recipes,
            item_ids: BTreeMap::new(),
            unit_ids: BTreeMap::new(),
        }
    }

    fn stats_doc(items: BTreeMap<String, StatBonuses>) -> ItemStatsDoc {
        ItemStatsDoc {
            metadata: Metadata::new(items.len(), BTreeMap::new()),
            items,
        }
    }

    fn recipe(item_id: &str, ingredients: &[&str], station: Option<&str>) -> RecipeRecord {
        RecipeRecord {
            item_id: item_id.to_string(),
            item_name: item_id.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            ingredient_names: Vec::new(),
            station_requirement: station.map(|s| s.to_string()),
            mana_requirement: None,
        }
    }

    #[test]
    fn test_results_and_ingredients_collected() {
        let recipes = recipes_doc(vec![recipe(
            "ITEM_STEEL_AXE",
            &["ITEM_STEEL_INGOT", "ITEM_STICK"],
            Some("forge"),
        )]);
        let items = collect_items(&recipes, &stats_doc(BTreeMap::new()));

        assert_eq!(items.len(), 3);
        let axe = &items["ITEM_STEEL_AXE"];
        assert_eq!(axe.name, "Steel Axe");
        assert_eq!(axe.classification.category, "weapons");
        let craft = axe.recipe.as_ref().unwrap();
        assert_eq!(craft.ingredients, vec!["steel-ingot", "stick"]);
        assert_eq!(craft.crafted_at.as_deref(), Some("forge"));
        // Plain ingredient gets no recipe.
        assert!(items["ITEM_STICK"].recipe.is_none());
    }

    #[test]
    fn test_result_wins_over_ingredient_sighting() {
        let recipes = recipes_doc(vec![
            recipe("ITEM_SWORD", &["ITEM_INGOT"], None),
            recipe("ITEM_INGOT", &["ITEM_ORE"], Some("forge")),
        ]);
        let items = collect_items(&recipes, &stats_doc(BTreeMap::new()));
        assert!(items["ITEM_INGOT"].recipe.is_some());
    }

    #[test]
    fn test_stats_render_as_nested_object() {
        let mut stats = BTreeMap::new();
        stats.insert(
            "steel-axe".to_string(),
            StatBonuses::from([("damage".to_string(), 12), ("strength".to_string(), 3)]),
        );
        let recipes = recipes_doc(vec![recipe("ITEM_STEEL_AXE", &[], None)]);
        let items = collect_items(&recipes, &stats_doc(stats));

        let rendered = format_item(&items["ITEM_STEEL_AXE"]);
        assert!(rendered.contains("stats: {\n      damage: 12,\n      strength: 3,\n    },"));
        assert!(rendered.contains("recipe: [],"));
        assert!(!rendered.contains("craftedAt"));
    }

    #[test]
    fn test_export_names() {
        assert_eq!(export_name("raw-materials"), "RAW_MATERIAL_ITEMS");
        assert_eq!(export_name("weapons"), "WEAPON_ITEMS");
        assert_eq!(export_name("armor"), "ARMOR_ITEMS");
        assert_eq!(export_name("buildings"), "BUILDING_ITEMS");
    }

    #[test]
    fn test_items_module_spreads_every_category() {
        let module = render_items_module();
        assert!(module.contains("import { RAW_MATERIAL_ITEMS } from './items.raw-materials';"));
        assert!(module.contains("...SCROLL_ITEMS,"));
        assert!(module.contains("getItemsBySubcategory"));
        assert!(module.contains("searchItems"));
    }

    #[test]
    fn test_empty_category_still_renders_module() {
        let rendered = render_category("scrolls", &[]);
        assert!(rendered.contains("export const SCROLL_ITEMS: ItemData[] = [\n];"));
    }
}
