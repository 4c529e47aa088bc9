//! Ability module generation.
//!
//! Emits one module per ability category, a shared types module, an
//! aggregating index with the query helpers, and a root re-export. Category
//! modules keep extraction order; the set of category files tracks whatever
//! categories the records actually carry.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::{format_float, load_doc, write_module, GenerateError};
use crate::generate::escape::escape_single_quoted;
use crate::paths::{DataDir, SiteDataDir};
use crate::record::{AbilitiesDoc, AbilityRecord};

/// Category union members and their display labels, in emission order.
const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("basic", "Basic Abilities"),
    ("hunter", "Hunter Abilities"),
    ("beastmaster", "Beastmaster Abilities"),
    ("mage", "Mage Abilities"),
    ("priest", "Priest Abilities"),
    ("thief", "Thief Abilities"),
    ("scout", "Scout Abilities"),
    ("gatherer", "Gatherer Abilities"),
    ("subclass", "Subclass Abilities"),
    ("superclass", "Superclass Abilities"),
    ("item", "Item Abilities"),
    ("building", "Building Abilities"),
    ("unknown", "Unknown Abilities"),
];

pub fn render_types() -> String {
    let mut out = String::from("export type AbilityCategory =\n");
    for (i, (category, _)) in CATEGORY_LABELS.iter().enumerate() {
        let sep = if i + 1 == CATEGORY_LABELS.len() {
            ";"
        } else {
            ""
        };
        let _ = writeln!(out, "  | '{category}'{sep}");
    }
    out.push_str(
        "\nexport type AbilityData = {\n\
         \x20 id: string;\n\
         \x20 name: string;\n\
         \x20 category: AbilityCategory;\n\
         \x20 subcategory?: string;\n\
         \x20 description: string;\n\
         \x20 manaCost?: number;\n\
         \x20 cooldown?: number;\n\
         \x20 duration?: number;\n\
         };\n",
    );
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_ability(ability: &AbilityRecord) -> String {
    let mut out = String::from("    {\n");
    let _ = writeln!(out, "      id: '{}',", ability.id);
    let _ = writeln!(
        out,
        "      name: '{}',",
        escape_single_quoted(&ability.name)
    );
    let _ = writeln!(out, "      category: '{}',", ability.category);
    if let Some(subcategory) = &ability.subcategory {
        let _ = writeln!(out, "      subcategory: '{subcategory}',");
    }
    let _ = writeln!(
        out,
        "      description: '{}',",
        escape_single_quoted(&ability.description)
    );
    if let Some(mana_cost) = ability.mana_cost {
        let _ = writeln!(out, "      manaCost: {mana_cost},");
    }
    if let Some(cooldown) = ability.cooldown {
        let _ = writeln!(out, "      cooldown: {},", format_float(cooldown));
    }
    if let Some(duration) = ability.duration {
        let _ = writeln!(out, "      duration: {},", format_float(duration));
    }
    out.push_str("    },\n");
    out
}

pub fn render_category(category: &str, abilities: &[&AbilityRecord]) -> String {
    let mut out = String::from("import type { AbilityData } from './abilities.types';\n\n");
    let _ = writeln!(out, "// {} Abilities", capitalize(category));
    let _ = writeln!(
        out,
        "export const {}_ABILITIES: AbilityData[] = [",
        category.to_uppercase()
    );
    for ability in abilities {
        out.push_str(&format_ability(ability));
    }
    out.push_str("];\n");
    out
}

pub fn render_index(categories: &[&str]) -> String {
    let mut out = String::from(
        "// Re-export types\nexport type { AbilityCategory, AbilityData } from './abilities.types';\n\n",
    );
    for category in categories {
        let _ = writeln!(
            out,
            "import {{ {}_ABILITIES }} from './abilities.{category}';",
            category.to_uppercase()
        );
    }
    out.push_str("\n// Combine all abilities\nexport const ABILITIES: AbilityData[] = [\n");
    for category in categories {
        let _ = writeln!(out, "  ...{}_ABILITIES,", category.to_uppercase());
    }
    out.push_str("];\n\n");

    out.push_str("export const ABILITY_CATEGORIES: Record<AbilityCategory, string> = {\n");
    for (i, (category, label)) in CATEGORY_LABELS.iter().enumerate() {
        let sep = if i + 1 == CATEGORY_LABELS.len() { "" } else { "," };
        let _ = writeln!(out, "  {category}: '{label}'{sep}");
    }
    out.push_str("};\n\n");

    out.push_str(
        "export function getAbilitiesByCategory(category: AbilityCategory): AbilityData[] {\n\
         \x20 return ABILITIES.filter(ability => ability.category === category);\n\
         }\n\n\
         export function getAbilitiesBySubcategory(subcategory: string): AbilityData[] {\n\
         \x20 return ABILITIES.filter(ability => ability.subcategory === subcategory);\n\
         }\n\n\
         export function getAbilityById(id: string): AbilityData | undefined {\n\
         \x20 return ABILITIES.find(ability => ability.id === id);\n\
         }\n\n\
         export function searchAbilities(query: string): AbilityData[] {\n\
         \x20 const lowerQuery = query.toLowerCase();\n\
         \x20 return ABILITIES.filter(ability =>\n\
         \x20   ability.name.toLowerCase().includes(lowerQuery) ||\n\
         \x20   ability.description.toLowerCase().includes(lowerQuery) ||\n\
         \x20   ability.id.toLowerCase().includes(lowerQuery)\n\
         \x20 );\n\
         }\n",
    );
    out
}

pub fn render_reexport() -> String {
    "// Re-export from abilities directory\nexport * from './abilities/abilities.index';\n"
        .to_string()
}

/// Group abilities by category, record order preserved within each group.
pub fn categorize(abilities: &[AbilityRecord]) -> BTreeMap<&str, Vec<&AbilityRecord>> {
    let mut categorized: BTreeMap<&str, Vec<&AbilityRecord>> = BTreeMap::new();
    for ability in abilities {
        categorized
            .entry(ability.category.as_str())
            .or_default()
            .push(ability);
    }
    categorized
}

/// Generate every ability module. Returns the number of files written.
pub fn generate_and_write(data: &DataDir, site: &SiteDataDir) -> Result<usize, GenerateError> {
    let doc: AbilitiesDoc = load_doc(&data.abilities_json())?;
    let categorized = categorize(&doc.abilities);

    write_module(&site.abilities_types_file(), &render_types())?;
    let mut written = 1;

    for (category, abilities) in &categorized {
        write_module(
            &site.ability_category_file(category),
            &render_category(category, abilities),
        )?;
        println!(
            "Created abilities.{category}.ts with {} abilities",
            abilities.len()
        );
        written += 1;
    }

    let categories: Vec<&str> = categorized.keys().copied().collect();
    write_module(&site.abilities_index_file(), &render_index(&categories))?;
    write_module(&site.abilities_reexport_file(), &render_reexport())?;
    Ok(written + 2)
}
