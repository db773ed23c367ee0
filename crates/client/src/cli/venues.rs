//! Venue CLI commands.

use clap::{Parser, Subcommand, ValueEnum};
use tapeo_core::content::PriceRange as CorePriceRange;
use uuid::Uuid;

/// Venue management commands.
#[derive(Debug, Parser)]
pub struct VenuesCommand {
    #[command(subcommand)]
    pub action: VenuesAction,
}

/// CLI price bracket (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriceRange {
    Budget,
    Moderate,
    Premium,
    Luxury,
}

impl From<PriceRange> for CorePriceRange {
    fn from(price: PriceRange) -> Self {
        match price {
            PriceRange::Budget => CorePriceRange::Budget,
            PriceRange::Moderate => CorePriceRange::Moderate,
            PriceRange::Premium => CorePriceRange::Premium,
            PriceRange::Luxury => CorePriceRange::Luxury,
        }
    }
}

/// Available venue actions.
#[derive(Debug, Subcommand)]
pub enum VenuesAction {
    /// List venues, optionally scoped to a city.
    List {
        /// Filter by city ID.
        #[arg(long)]
        city_id: Option<Uuid>,
    },
    /// Create a new venue.
    Create {
        /// City ID the venue belongs to.
        #[arg(long)]
        city_id: Uuid,
        /// Venue name.
        #[arg(long)]
        title: String,
        /// URL slug; derived from the title when omitted.
        #[arg(long)]
        slug: Option<String>,
        /// Street address.
        #[arg(long)]
        address: String,
        /// Short summary for listings.
        #[arg(long)]
        summary: Option<String>,
        /// Price bracket.
        #[arg(long, value_enum)]
        price: Option<PriceRange>,
        /// Contact phone.
        #[arg(long)]
        phone: Option<String>,
        /// Website URL.
        #[arg(long)]
        website: Option<String>,
        /// Latitude; must be paired with --lng.
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        /// Longitude; must be paired with --lat.
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        /// Category IDs; repeat the flag for several.
        #[arg(long = "category-id")]
        category_ids: Vec<Uuid>,
    },
    /// Get venue by ID.
    Get {
        /// Venue ID.
        id: Uuid,
    },
    /// Delete venue by ID.
    Delete {
        /// Venue ID.
        id: Uuid,
    },
}
