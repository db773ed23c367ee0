//! Review CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Review management commands.
#[derive(Debug, Parser)]
pub struct ReviewsCommand {
    #[command(subcommand)]
    pub action: ReviewsAction,
}

/// Available review actions.
#[derive(Debug, Subcommand)]
pub enum ReviewsAction {
    /// List reviews, optionally scoped to a venue.
    List {
        /// Filter by venue ID.
        #[arg(long)]
        venue_id: Option<Uuid>,
    },
    /// Create a new review.
    Create {
        /// Venue ID the review belongs to.
        #[arg(long)]
        venue_id: Uuid,
        /// Review title.
        #[arg(long)]
        title: String,
        /// URL slug; derived from the title when omitted.
        #[arg(long)]
        slug: Option<String>,
        /// Review author.
        #[arg(long)]
        author: String,
        /// Food score, 0 to 10.
        #[arg(long)]
        food: Option<f64>,
        /// Service score, 0 to 10.
        #[arg(long)]
        service: Option<f64>,
        /// Ambience score, 0 to 10.
        #[arg(long)]
        ambience: Option<f64>,
        /// Value-for-money score, 0 to 10.
        #[arg(long)]
        value: Option<f64>,
        /// Editorial overall score; wins over the computed mean.
        #[arg(long)]
        overall: Option<f64>,
        /// Review body text.
        #[arg(long)]
        body: Option<String>,
        /// Short summary for listings.
        #[arg(long)]
        summary: Option<String>,
        /// Tags; repeat the flag for several.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Visit date (YYYY-MM-DD).
        #[arg(long)]
        visit_date: Option<NaiveDate>,
        /// Publish immediately instead of creating a draft.
        #[arg(long)]
        published: bool,
    },
    /// Get review by ID.
    Get {
        /// Review ID.
        id: Uuid,
    },
    /// Delete review by ID.
    Delete {
        /// Review ID.
        id: Uuid,
    },
}
