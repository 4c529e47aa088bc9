//! Generation command handler.

use anyhow::{Context, Result};
use std::path::Path;

use tribes::paths::{DataDir, SiteDataDir};

/// Handle the generate command: emit TypeScript data modules from the
/// intermediate records under `data`.
pub fn handle(data: &Path, out: &Path) -> Result<()> {
    println!("Generating TypeScript modules from {}...", data.display());

    let data = DataDir::new(data);
    let site = SiteDataDir::new(out);
    let summary = tribes::run_generation(&data, &site)
        .with_context(|| format!("generation into {} failed", site.root().display()))?;

    println!(
        "Wrote {} ability, {} item, {} building and {} class modules to {}",
        summary.ability_modules,
        summary.item_modules,
        summary.building_modules,
        summary.class_modules,
        site.root().display()
    );

    Ok(())
}
