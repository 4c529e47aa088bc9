//! Building module generation: a single `buildings.ts` with the data type,
//! the literal array and the two lookup helpers.

use std::fmt::Write;

use super::{load_doc, write_module, GenerateError};
use crate::generate::escape::escape_single_quoted;
use crate::paths::{DataDir, SiteDataDir};
use crate::record::{BuildingRecord, BuildingsDoc};

pub fn format_building(building: &BuildingRecord) -> String {
    let mut out = String::from("  {\n");
    let _ = writeln!(out, "    id: '{}',", building.id);
    let _ = writeln!(
        out,
        "    name: '{}',",
        escape_single_quoted(&building.name)
    );
    let _ = writeln!(
        out,
        "    description: '{}',",
        escape_single_quoted(&building.description)
    );
    if let Some(hp) = building.hp {
        let _ = writeln!(out, "    hp: {hp},");
    }
    if let Some(armor) = building.armor {
        let _ = writeln!(out, "    armor: {armor},");
    }
    if let Some(items) = &building.craftable_items {
        if !items.is_empty() {
            out.push_str("    craftableItems: [\n");
            // Grouped a few per line for readability.
            for chunk in items.chunks(4) {
                let quoted: Vec<String> = chunk.iter().map(|i| format!("'{i}'")).collect();
                let _ = writeln!(out, "      {},", quoted.join(", "));
            }
            out.push_str("    ],\n");
        }
    }
    out.push_str("  },\n");
    out
}

pub fn render_buildings(buildings: &[BuildingRecord]) -> String {
    let mut out = String::from(
        "export type BuildingData = {\n\
         \x20 id: string;\n\
         \x20 name: string;\n\
         \x20 description: string;\n\
         \x20 hp?: number;\n\
         \x20 armor?: number;\n\
         \x20 craftableItems?: string[];\n\
         };\n\n\
         // Building definitions extracted from game source\n\
         export const BUILDINGS: BuildingData[] = [\n",
    );
    for building in buildings {
        out.push_str(&format_building(building));
    }
    out.push_str(
        "];\n\n\
         export function getBuildingById(id: string): BuildingData | undefined {\n\
         \x20 return BUILDINGS.find(b => b.id === id);\n\
         }\n\n\
         export function getBuildingsByCraftableItem(itemId: string): BuildingData[] {\n\
         \x20 return BUILDINGS.filter(b =>\n\
         \x20   b.craftableItems?.some(item => item.toLowerCase() === itemId.toLowerCase())\n\
         \x20 );\n\
         }\n",
    );
    out
}

/// Generate the buildings module. Returns the number of files written.
pub fn generate_and_write(data: &DataDir, site: &SiteDataDir) -> Result<usize, GenerateError> {
    let doc: BuildingsDoc = load_doc(&data.buildings_json())?;
    write_module(&site.buildings_file(), &render_buildings(&doc.buildings))?;
    println!("Created buildings.ts with {} buildings", doc.buildings.len());
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(id: &str) -> BuildingRecord {
        BuildingRecord {
            id: id.to_string(),
            unit_id: format!("UNIT_{}", id.to_uppercase()),
            name: id.to_string(),
            description: String::new(),
            hp: None,
            armor: None,
            craftable_items: None,
            file_path: String::new(),
        }
    }

    #[test]
    fn test_optional_fields_omitted() {
        let rendered = format_building(&building("forge"));
        assert!(rendered.contains("id: 'forge',"));
        assert!(!rendered.contains("hp:"));
        assert!(!rendered.contains("craftableItems"));
    }

    #[test]
    fn test_craftable_items_chunked_per_line() {
        let mut b = building("forge");
        b.hp = Some(500);
        b.craftable_items = Some(
            ["a", "b", "c", "d", "e"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let rendered = format_building(&b);
        assert!(rendered.contains("hp: 500,"));
        assert!(rendered.contains("      'a', 'b', 'c', 'd',\n      'e',\n"));
    }

    #[test]
    fn test_module_contains_type_and_helpers() {
        let rendered = render_buildings(&[building("forge")]);
        assert!(rendered.contains("export type BuildingData = {"));
        assert!(rendered.contains("export const BUILDINGS: BuildingData[] = ["));
        assert!(rendered.contains("getBuildingsByCraftableItem"));
    }
}
