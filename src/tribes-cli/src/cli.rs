//! CLI argument definitions for tribes
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tribes")]
#[command(about = "Island Troll Tribes game-data pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape the game source into intermediate JSON records
    #[command(visible_alias = "x")]
    Extract {
        /// Path to the game's wurst source tree
        #[arg(short, long, env = "TRIBES_SOURCE")]
        source: PathBuf,

        /// Directory for the intermediate record files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },

    /// Emit TypeScript data modules from the intermediate records
    #[command(visible_alias = "g")]
    Generate {
        /// Directory holding the intermediate record files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,

        /// Output directory for the generated modules
        #[arg(short, long, default_value = "src/data/guides")]
        out: PathBuf,
    },

    /// Run extraction then generation in one pass
    #[command(visible_alias = "a")]
    All {
        /// Path to the game's wurst source tree
        #[arg(short, long, env = "TRIBES_SOURCE")]
        source: PathBuf,

        /// Directory for the intermediate record files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,

        /// Output directory for the generated modules
        #[arg(short, long, default_value = "src/data/guides")]
        out: PathBuf,
    },
}
