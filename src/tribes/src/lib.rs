//! # tribes
//!
//! Island Troll Tribes game-data pipeline library - extraction and code
//! generation.
//!
//! This library provides functionality to:
//! - Scrape ability, building, unit, item and recipe declarations out of the
//!   WurstScript game source
//! - Normalize them into canonical JSON record documents
//! - Emit typed TypeScript data modules for the companion website
//!
//! ## Example
//!
//! ```no_run
//! use tribes::paths::{DataDir, SiteDataDir, SourceTree};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SourceTree::new("island-troll-tribes/wurst");
//! let data = DataDir::new("data");
//! let site = SiteDataDir::new("src/data/guides");
//!
//! // Scrape the game source into intermediate records
//! let summary = tribes::extract::run_extraction(&source, &data)?;
//! println!("{} abilities extracted", summary.abilities);
//!
//! // Emit the TypeScript modules from those records
//! tribes::generate::run_generation(&data, &site)?;
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod extract;
pub mod generate;
pub mod ident;
pub mod normalize;
pub mod paths;
pub mod record;
pub mod registry;
pub mod text;

pub use extract::{run_extraction, ExtractError, ExtractionSummary};
pub use generate::{run_generation, GenerateError, GenerationSummary};
pub use record::{
    AbilityRecord, BuildingRecord, Metadata, RecipeRecord, UnitRecord,
};
pub use registry::ObjectRegistry;
