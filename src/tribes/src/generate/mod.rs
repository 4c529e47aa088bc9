//! Generation engine: intermediate records -> emitted source modules.
//!
//! Each domain module loads its intermediate JSON document and renders
//! strongly-typed modules for the consuming web application. Rendering is
//! pure string building; the only I/O is the initial load and the final
//! write, and output always fully overwrites whatever was there before.

pub mod abilities;
pub mod buildings;
pub mod classes;
pub mod escape;
pub mod items;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::paths::{DataDir, SiteDataDir};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("intermediate file {} not found; run extraction first", path.display())]
    MissingIntermediate { path: PathBuf },

    #[error("intermediate file {} is malformed ({source}); run extraction first", path.display())]
    MalformedIntermediate {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Per-domain module counts for one generation run.
#[derive(Debug, Default)]
pub struct GenerationSummary {
    pub ability_modules: usize,
    pub item_modules: usize,
    pub building_modules: usize,
    pub class_modules: usize,
}

/// Run every generation step: ability, item, building and class modules.
pub fn run_generation(data: &DataDir, site: &SiteDataDir) -> Result<GenerationSummary, GenerateError> {
    Ok(GenerationSummary {
        ability_modules: abilities::generate_and_write(data, site)?,
        item_modules: items::generate_and_write(data, site)?,
        building_modules: buildings::generate_and_write(data, site)?,
        class_modules: classes::generate_and_write(data, site)?,
    })
}

/// Load one intermediate document, mapping both failure modes onto the
/// "run extraction first" error.
pub(crate) fn load_doc<T: DeserializeOwned>(path: &Path) -> Result<T, GenerateError> {
    let content = fs::read_to_string(path).map_err(|_| GenerateError::MissingIntermediate {
        path: path.to_path_buf(),
    })?;
    serde_json::from_str(&content).map_err(|source| GenerateError::MalformedIntermediate {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_module(path: &Path, content: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GenerateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Emit a float the way the record carries it, keeping a trailing `.0` on
/// whole values so the literal stays visibly a float.
pub(crate) fn format_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
