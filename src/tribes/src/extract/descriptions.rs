//! Ability description scrape.
//!
//! Walks every ability file for tooltip declarations and builds the id ->
//! description override table consumed by the ability extractor. Tooltips may
//! be a single quoted literal or a compile-time concatenation of fragments;
//! either way the text is cleaned before it is recorded.

use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

use super::{collect_wurst_files, read_source, relative_path, write_json, ExtractError};
use crate::paths::{DataDir, SourceTree};
use crate::record::{DescriptionRecord, DescriptionsDoc, Metadata};
use crate::text::{clean_tooltip, clean_tooltip_expression};

/// Constants that show up in ability files without naming the ability itself.
const NON_ABILITY_CONSTANTS: &[&str] = &["ID_GEN", "QM_", "TRACKER", "MAGE", "PRIEST"];

/// Short and extended tooltip text found in one file.
#[derive(Debug, Default)]
pub(crate) struct Tooltips {
    pub norm: Option<String>,
    pub extended: Option<String>,
}

pub(crate) fn extract_tooltips(content: &str) -> Tooltips {
    let norm_re = Regex::new(r#"let\s+TOOLTIP_NORM\s*=\s*["']([^"']+)["']"#).unwrap();
    let extended_re = Regex::new(r#"let\s+TOOLTIP_EXTENDED\s*=\s*["']([^"']*)["']"#).unwrap();
    // Concatenated form: capture the whole right-hand side up to a trailing
    // format/tooltip call, then pull out the quoted fragments.
    let concat_re =
        Regex::new(r"(?s)let\s+TOOLTIP_EXTENDED\s*=\s*([^=]+?)(?:\.format\(|\.toToolTip|$)")
            .unwrap();
    let fragment_re = Regex::new(r#"["']([^"']*)["']"#).unwrap();

    let mut tooltips = Tooltips {
        norm: norm_re.captures(content).map(|c| c[1].to_string()),
        extended: None,
    };

    if let Some(caps) = extended_re.captures(content) {
        let text = caps[1].trim().to_string();
        if !text.is_empty() {
            tooltips.extended = Some(text);
        }
    } else if let Some(caps) = concat_re.captures(content) {
        let fragments: Vec<String> = fragment_re
            .captures_iter(&caps[1])
            .map(|c| c[1].to_string())
            .collect();
        if !fragments.is_empty() {
            tooltips.extended = Some(fragments.join(" ").trim().to_string());
        }
    }

    // Compile-time strings carry their newlines escaped.
    tooltips.extended = tooltips.extended.map(|t| t.replace("\\n", "\n"));
    tooltips
}

/// Pick the ability id a file describes: the first `ABILITY_*` constant that
/// is not infrastructure noise, else the constructor argument, else the file
/// stem.
fn ability_id_from_content(content: &str, fallback: &str) -> String {
    let const_re = Regex::new(r"ABILITY_([A-Z_]+)").unwrap();
    for caps in const_re.captures_iter(content) {
        let name = &caps[1];
        if !NON_ABILITY_CONSTANTS.contains(&name) {
            return name.to_lowercase().replace('_', "-");
        }
    }

    let ctor_re = Regex::new(r"new\s+\w+\(ABILITY_([A-Z_]+)").unwrap();
    if let Some(caps) = ctor_re.captures(content) {
        return caps[1].to_lowercase().replace('_', "-");
    }

    fallback.to_lowercase().replace('_', "-")
}

/// Scrape one file; `None` when it declares no tooltips or they clean to
/// nothing.
pub fn extract_from_file(path: &Path, root: &Path) -> Option<DescriptionRecord> {
    let content = read_source(path)?;
    let tooltips = extract_tooltips(&content);

    let raw = tooltips.extended.or(tooltips.norm)?;
    let description = clean_tooltip_expression(&raw).and_then(|t| clean_tooltip(&t))?;

    let stem = path.file_stem().map(|s| s.to_string_lossy().to_string())?;
    Some(DescriptionRecord {
        id: ability_id_from_content(&content, &stem),
        description,
        file: relative_path(path, root),
    })
}

/// Scrape every ability file into an id -> description table. Later files do
/// not displace an id already recorded.
pub fn extract_descriptions(source: &SourceTree) -> BTreeMap<String, DescriptionRecord> {
    let mut descriptions = BTreeMap::new();
    for path in collect_wurst_files(&source.abilities_dir(), &[]) {
        if let Some(record) = extract_from_file(&path, source.root()) {
            descriptions.entry(record.id.clone()).or_insert(record);
        }
    }
    descriptions
}

pub fn extract_and_write(source: &SourceTree, data: &DataDir) -> Result<DescriptionsDoc, ExtractError> {
    let descriptions = extract_descriptions(source);
    let doc = DescriptionsDoc {
        metadata: Metadata::new(descriptions.len(), BTreeMap::new()),
        descriptions,
    };
    write_json(&data.ability_descriptions_json(), &doc)?;
    Ok(doc)
}
