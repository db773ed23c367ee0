//! Category CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Category management commands.
#[derive(Debug, Parser)]
pub struct CategoriesCommand {
    #[command(subcommand)]
    pub action: CategoriesAction,
}

/// Available category actions.
#[derive(Debug, Subcommand)]
pub enum CategoriesAction {
    /// List all categories.
    List,
    /// Create a new category.
    Create {
        /// Category name.
        #[arg(long)]
        title: String,
        /// URL slug; derived from the title when omitted.
        #[arg(long)]
        slug: Option<String>,
        /// Description shown on the category page.
        #[arg(long)]
        description: Option<String>,
    },
    /// Get category by ID.
    Get {
        /// Category ID.
        id: Uuid,
    },
    /// Delete category by ID.
    Delete {
        /// Category ID.
        id: Uuid,
    },
}
