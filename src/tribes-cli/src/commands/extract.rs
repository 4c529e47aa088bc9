//! Extraction command handler.

use anyhow::{bail, Context, Result};
use std::path::Path;

use tribes::paths::{DataDir, SourceTree};

/// Handle the extract command: scrape the game source into intermediate
/// record files under `data`.
pub fn handle(source: &Path, data: &Path) -> Result<()> {
    if !source.is_dir() {
        bail!("source tree {} does not exist", source.display());
    }

    println!("Extracting game data from {}...", source.display());

    let source = SourceTree::new(source);
    let data = DataDir::new(data);
    let summary = tribes::run_extraction(&source, &data)
        .with_context(|| format!("extraction into {} failed", data.root().display()))?;

    println!("  descriptions: {}", summary.descriptions);
    println!("  abilities:    {}", summary.abilities);
    println!("  buildings:    {}", summary.buildings);
    println!("  units:        {}", summary.units);
    println!("  item stats:   {}", summary.item_stats);
    println!("  recipes:      {}", summary.recipes);
    println!("Output written to: {}", data.root().display());

    Ok(())
}
