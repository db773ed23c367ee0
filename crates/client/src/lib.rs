//! tapeo_client - CLI client for the tapeo admin API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::TapeoClient;
pub use error::{ClientError, Result};
