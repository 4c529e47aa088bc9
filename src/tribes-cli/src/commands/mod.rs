//! Command handlers for the tribes CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod extract;
pub mod generate;
