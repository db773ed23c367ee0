//! Seed CLI command.

use std::path::PathBuf;

use clap::Parser;

/// Apply a JSON seed file of content documents.
#[derive(Debug, Parser)]
pub struct SeedCommand {
    /// Path to the seed file.
    pub file: PathBuf,
}
