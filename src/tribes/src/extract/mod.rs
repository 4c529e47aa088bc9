//! Extraction engine: game source -> intermediate record files.
//!
//! Each domain module scans its fixed slice of the source tree and writes one
//! intermediate JSON document. A file that cannot be read is logged and
//! contributes zero records; the batch always runs to completion. Output is a
//! full overwrite of the destination, never a merge.
//!
//! # Modules
//!
//! - `descriptions` - tooltip scrape used as the ability description override table
//! - `abilities` - ability declarations
//! - `buildings` - building definitions plus craftable-item merge
//! - `units` - troll units from the attribute growth table
//! - `item_stats` - stat bonuses from crafting declarations
//! - `recipes` - crafting recipes via a per-file state machine

pub mod abilities;
pub mod buildings;
pub mod descriptions;
pub mod item_stats;
pub mod recipes;
pub mod units;

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::paths::{DataDir, SourceTree};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Per-domain record counts for one extraction run.
#[derive(Debug, Default)]
pub struct ExtractionSummary {
    pub descriptions: usize,
    pub abilities: usize,
    pub buildings: usize,
    pub units: usize,
    pub item_stats: usize,
    pub recipes: usize,
}

/// Run every extraction step against `source`, writing intermediate
/// documents into `data`. The fixed step order keeps the description
/// override table ahead of the ability scan that consumes it.
pub fn run_extraction(source: &SourceTree, data: &DataDir) -> Result<ExtractionSummary, ExtractError> {
    let mut summary = ExtractionSummary::default();

    let descriptions = descriptions::extract_and_write(source, data)?;
    summary.descriptions = descriptions.descriptions.len();

    let abilities = abilities::extract_and_write(source, data, &descriptions.descriptions)?;
    summary.abilities = abilities.abilities.len();

    let item_stats = item_stats::extract_and_write(source, data)?;
    summary.item_stats = item_stats.items.len();

    let buildings = buildings::extract_and_write(source, data)?;
    summary.buildings = buildings.buildings.len();

    let units = units::extract_and_write(source, data)?;
    summary.units = units.units.len();

    let recipes = recipes::extract_and_write(source, data)?;
    summary.recipes = recipes.recipes.len();

    Ok(summary)
}

/// Recursively collect `.wurst` files under `dir`, skipping the given file
/// names. Sorted so scan order (and therefore first-wins deduplication) is
/// reproducible. A missing directory yields an empty list.
pub(crate) fn collect_wurst_files(dir: &Path, skip: &[&str]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == "wurst")
                .unwrap_or(false)
        })
        .filter(|e| {
            e.path()
                .file_name()
                .map(|name| !skip.iter().any(|s| name == std::ffi::OsStr::new(s)))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Non-recursive variant for directories scanned flat, sorted.
pub(crate) fn list_wurst_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "wurst").unwrap_or(false))
        .collect();
    files.sort();
    files
}

/// Read a source file, logging and skipping it on failure so the rest of the
/// batch still runs.
pub(crate) fn read_source(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            eprintln!("Error reading {}: {}", path.display(), err);
            None
        }
    }
}

/// Path string relative to the source root, for record provenance fields.
pub(crate) fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Write one intermediate document, creating parent directories as needed.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExtractError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ExtractError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| ExtractError::Write {
        path: path.to_path_buf(),
        source,
    })
}
