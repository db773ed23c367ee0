//! CLI command definitions.

pub mod categories;
pub mod cities;
pub mod health;
pub mod reviews;
pub mod seed;
pub mod users;
pub mod venues;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the tapeo admin API.
#[derive(Debug, Parser)]
#[command(name = "tapeo-client")]
#[command(about = "CLI client for the tapeo admin API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "TAPEO_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Editor email; content commands sign in with it first.
    #[arg(long, env = "TAPEO_EMAIL")]
    pub email: Option<String>,

    /// Editor password.
    #[arg(long, env = "TAPEO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Provisioning secret accepted by the user endpoints.
    #[arg(long, env = "ADMIN_API_SECRET", hide_env_values = true)]
    pub admin_secret: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// User provisioning.
    Users(users::UsersCommand),
    /// City management.
    Cities(cities::CitiesCommand),
    /// Venue management.
    Venues(venues::VenuesCommand),
    /// Review management.
    Reviews(reviews::ReviewsCommand),
    /// Category management.
    Categories(categories::CategoriesCommand),
    /// Apply a seed file of documents.
    Seed(seed::SeedCommand),
    /// Server health checks.
    Health(health::HealthCommand),
}
