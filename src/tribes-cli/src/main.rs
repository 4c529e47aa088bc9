mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { source, data } => {
            commands::extract::handle(&source, &data)?;
        }

        Commands::Generate { data, out } => {
            commands::generate::handle(&data, &out)?;
        }

        Commands::All { source, data, out } => {
            commands::extract::handle(&source, &data)?;
            commands::generate::handle(&data, &out)?;
        }
    }

    Ok(())
}
