//! Output formatting functions.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;

/// Format a serializable value for the selected output mode.
///
/// Pretty mode falls back to indented JSON for values without a
/// dedicated formatter in [`pretty`].
pub fn format_output<T: serde::Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::compact(value),
        OutputFormat::Pretty => json::indented(value),
    }
}
