//! Building extraction.
//!
//! Buildings are discovered through three creation patterns, then each
//! discovered unit constant is searched for mutator calls anchored to it. A
//! second pass over the crafting system attaches the items craftable at each
//! building.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::{list_wurst_files, read_source, relative_path, write_json, ExtractError};
use crate::ident::{canonical_id, title_case_id};
use crate::paths::{DataDir, SourceTree};
use crate::record::{dedup_first_by_id, BuildingRecord, BuildingsDoc, Metadata};
use crate::registry::ObjectRegistry;
use crate::text::clean_tooltip;

/// Crafting-station constants and the building slug each maps to.
const STATION_BUILDINGS: &[(&str, &str)] = &[
    ("UNIT_ARMORY", "armory"),
    ("UNIT_FORGE", "forge"),
    ("UNIT_WORKSHOP", "workshop"),
    ("UNIT_TANNERY", "tannery"),
    ("UNIT_WITCH_DOCTORS_HUT", "witch-doctors-hut"),
    ("UNIT_MIXING_POT", "mixing-pot"),
];

/// Unit constants created as buildings in one file.
fn discover_building_units(content: &str, unit_ids: &ObjectRegistry) -> BTreeSet<String> {
    let create_call = Regex::new(r"createBuilding\((\w+)\)").unwrap();
    let create_fn =
        Regex::new(r"function\s+create(\w+)\([^)]*\)\s+returns\s+BuildingDefinition").unwrap();
    let compiletime = Regex::new(r"UNIT_(\w+)\s*=\s*compiletime").unwrap();

    let mut units = BTreeSet::new();
    for re in [&create_call, &create_fn, &compiletime] {
        for caps in re.captures_iter(content) {
            let name = caps[1].to_string();
            if name.starts_with("UNIT_") {
                units.insert(name);
            } else {
                // Reconstruct the constant and keep it only when registered.
                let constant = format!("UNIT_{}", name.to_uppercase());
                if unit_ids.get(&constant).is_some() {
                    units.insert(constant);
                }
            }
        }
    }
    units
}

/// Mutator value anchored to a specific unit constant.
fn anchored_capture(content: &str, unit_id: &str, call: &str) -> Option<String> {
    let re = Regex::new(&format!(
        r#"{}[^.]*\.\.{call}\(['"]([^'"]+)['"]\)"#,
        regex::escape(unit_id)
    ))
    .unwrap();
    re.captures(content).map(|c| c[1].to_string())
}

fn anchored_capture_u32(content: &str, unit_id: &str, call: &str) -> Option<u32> {
    let re = Regex::new(&format!(
        r"{}[^.]*\.\.{call}\((\d+)\)",
        regex::escape(unit_id)
    ))
    .unwrap();
    re.captures(content).and_then(|c| c[1].parse().ok())
}

/// Extract building records from one definition file.
pub fn extract_from_file(
    path: &Path,
    root: &Path,
    unit_ids: &ObjectRegistry,
) -> Vec<BuildingRecord> {
    let Some(content) = read_source(path) else {
        return Vec::new();
    };

    let file_path = relative_path(path, root);
    let mut buildings = Vec::new();

    for unit_id in discover_building_units(&content, unit_ids) {
        let name = anchored_capture(&content, &unit_id, "setName")
            .unwrap_or_else(|| title_case_id(&unit_id, "UNIT_"));
        let description = anchored_capture(&content, &unit_id, r"setTooltip(?:Basic|Extended)")
            .as_deref()
            .and_then(clean_tooltip)
            .unwrap_or_default();
        let hp = anchored_capture_u32(&content, &unit_id, "setHitPointsMaximumBase");
        let armor = anchored_capture_u32(&content, &unit_id, "setDefenseBase");

        buildings.push(BuildingRecord {
            id: canonical_id(&unit_id, "UNIT_"),
            unit_id,
            name,
            description,
            hp,
            armor,
            craftable_items: None,
            file_path: file_path.clone(),
        });
    }
    buildings
}

/// Map building slug -> result items of recipes requiring that building,
/// from the crafting system's per-file `UNIT_REQUIREMENT` constants.
pub fn extract_craftable_items(crafting_dir: &Path) -> BTreeMap<String, Vec<String>> {
    let unit_req_re = Regex::new(r"let\s+UNIT_REQUIREMENT\s*=\s*(\w+)").unwrap();
    let item_re = Regex::new(r"new\s+CustomItemType\s*\(\s*(ITEM_\w+)").unwrap();

    let mut craftable: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for file in list_wurst_files(crafting_dir) {
        let Some(content) = read_source(&file) else {
            continue;
        };
        let Some(caps) = unit_req_re.captures(&content) else {
            continue;
        };
        let Some(&(_, slug)) = STATION_BUILDINGS.iter().find(|(c, _)| *c == &caps[1]) else {
            continue;
        };

        // A declared item counts as craftable here only when a recipe call
        // appears before the next item declaration.
        let declarations: Vec<(usize, String)> = item_re
            .captures_iter(&content)
            .map(|c| (c.get(0).unwrap().start(), c[1].to_string()))
            .collect();
        for (i, (start, item)) in declarations.iter().enumerate() {
            let end = declarations
                .get(i + 1)
                .map_or(content.len(), |(next, _)| *next);
            if content[*start..end].contains("..setItemRecipe(") {
                craftable
                    .entry(slug.to_string())
                    .or_default()
                    .push(item.clone());
            }
        }
    }
    craftable
}

/// Extract all buildings and merge in the craftable-item lists by id.
pub fn extract_buildings(source: &SourceTree) -> Vec<BuildingRecord> {
    let unit_ids = ObjectRegistry::load(&source.registry_files(), "UNIT_");

    let mut buildings = Vec::new();
    for file in list_wurst_files(&source.buildings_dir()) {
        buildings.extend(extract_from_file(&file, source.root(), &unit_ids));
    }
    let mut buildings = dedup_first_by_id(buildings, |b| &b.id);

    let craftable = extract_craftable_items(&source.crafting_dir());
    for building in &mut buildings {
        if let Some(items) = craftable.get(&building.id) {
            building.craftable_items = Some(items.clone());
        }
    }
    buildings
}

pub fn extract_and_write(source: &SourceTree, data: &DataDir) -> Result<BuildingsDoc, ExtractError> {
    let buildings = extract_buildings(source);
    let doc = BuildingsDoc {
        metadata: Metadata::new(buildings.len(), BTreeMap::new()),
        buildings,
    };
    write_json(&data.buildings_json(), &doc)?;
    Ok(doc)
}
