//! City CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// City management commands.
#[derive(Debug, Parser)]
pub struct CitiesCommand {
    #[command(subcommand)]
    pub action: CitiesAction,
}

/// Available city actions.
#[derive(Debug, Subcommand)]
pub enum CitiesAction {
    /// List all cities.
    List,
    /// Create a new city.
    Create {
        /// City name.
        #[arg(long)]
        title: String,
        /// URL slug; derived from the title when omitted.
        #[arg(long)]
        slug: Option<String>,
        /// Region or province.
        #[arg(long)]
        region: Option<String>,
    },
    /// Get city by ID.
    Get {
        /// City ID.
        id: Uuid,
    },
    /// Delete city by ID.
    Delete {
        /// City ID.
        id: Uuid,
    },
}
