//! Ability extraction.
//!
//! An ability file declares its numbers and tooltips as file-level constants
//! and may define several related abilities; every identifier referenced via
//! a constructor call or an `ABILITY_*` constant gets one record inheriting
//! the file's fields.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::descriptions::extract_tooltips;
use super::{collect_wurst_files, read_source, relative_path, write_json, ExtractError};
use crate::classify::classify_ability;
use crate::ident::{canonical_id, title_case_slug};
use crate::paths::{DataDir, SourceTree};
use crate::record::{count_by, dedup_first_by_id, AbilitiesDoc, AbilityRecord, DescriptionRecord, Metadata};
use crate::text::clean_tooltip;

/// Shared ability list files that define no ability of their own.
const SKIP_FILES: &[&str] = &["abilities.wurst", "AutoSkill.wurst", "BossAbilities.wurst"];

pub const PLACEHOLDER_DESCRIPTION: &str = "Ability extracted from game source.";

fn capture_f64(re: &Regex, content: &str) -> Option<f64> {
    re.captures(content).and_then(|c| c[1].parse().ok())
}

fn capture_u32(re: &Regex, content: &str) -> Option<u32> {
    re.captures(content).and_then(|c| c[1].parse().ok())
}

/// Identifiers declared or constructed in one file, deduplicated and sorted.
fn collect_ability_constants(content: &str, file_stem: &str) -> BTreeSet<String> {
    let ctor_re = Regex::new(r"new\s+\w+\((\w+)\s*[,)]").unwrap();
    let const_re = Regex::new(r"ABILITY_([A-Z_]+)").unwrap();

    let mut constants: BTreeSet<String> = ctor_re
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect();
    for caps in const_re.captures_iter(content) {
        let name = &caps[1];
        if name != "ID_GEN" && name != "QM_" {
            constants.insert(format!("ABILITY_{name}"));
        }
    }

    if constants.is_empty() {
        constants.insert(file_stem.to_uppercase().replace('-', "_"));
    }
    constants
}

/// Extract every ability declared in one file.
pub fn extract_from_file(
    path: &Path,
    root: &Path,
    overrides: &BTreeMap<String, DescriptionRecord>,
) -> Vec<AbilityRecord> {
    let Some(content) = read_source(path) else {
        return Vec::new();
    };

    let cooldown_re = Regex::new(r"let\s+COOLDOWN\s*=\s*([0-9.]+)").unwrap();
    let manacost_re = Regex::new(r"let\s+MANACOST\s*=\s*(\d+)").unwrap();
    let duration_re = Regex::new(r"let\s+DURATION\s*=\s*([0-9.]+)").unwrap();

    let cooldown = capture_f64(&cooldown_re, &content);
    let mana_cost = capture_u32(&manacost_re, &content);
    let duration = capture_f64(&duration_re, &content);
    let tooltips = extract_tooltips(&content);

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_path = relative_path(path, root);

    let mut records = Vec::new();
    for constant in collect_ability_constants(&content, &stem) {
        let id = canonical_id(&constant, "ABILITY_");

        let description = overrides
            .get(&id)
            .map(|record| record.description.clone())
            .or_else(|| tooltips.extended.as_deref().and_then(clean_tooltip))
            .or_else(|| tooltips.norm.as_deref().and_then(clean_tooltip))
            .unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_string());

        let classification = classify_ability(path, &id);

        records.push(AbilityRecord {
            name: tooltips
                .norm
                .clone()
                .unwrap_or_else(|| title_case_slug(&id)),
            id,
            category: classification.category.to_string(),
            subcategory: classification.subcategory.map(str::to_string),
            description,
            mana_cost,
            cooldown,
            duration,
            file_path: file_path.clone(),
        });
    }
    records
}

/// Scan the abilities directory, one record per identifier, first occurrence
/// of a canonical id winning.
pub fn extract_abilities(
    source: &SourceTree,
    overrides: &BTreeMap<String, DescriptionRecord>,
) -> Vec<AbilityRecord> {
    let mut collected = Vec::new();
    for path in collect_wurst_files(&source.abilities_dir(), SKIP_FILES) {
        collected.extend(extract_from_file(&path, source.root(), overrides));
    }
    dedup_first_by_id(collected, |a| &a.id)
}

pub fn extract_and_write(
    source: &SourceTree,
    data: &DataDir,
    overrides: &BTreeMap<String, DescriptionRecord>,
) -> Result<AbilitiesDoc, ExtractError> {
    let abilities = extract_abilities(source, overrides);
    let doc = AbilitiesDoc {
        metadata: Metadata::new(abilities.len(), count_by(&abilities, |a| a.category.as_str())),
        abilities,
    };
    write_json(&data.abilities_json(), &doc)?;
    Ok(doc)
}
