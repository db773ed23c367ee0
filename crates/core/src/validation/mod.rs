//! Input validators for venue contact fields.
//!
//! Phone numbers and website URLs arrive from admin forms as free text;
//! these functions decide whether a value is acceptable before it is
//! written to the content store. Messages are user-facing Spanish since
//! they end up verbatim in admin form errors.

mod phone;
mod url;

pub use phone::{validate_phone, PhoneValidation};
pub use url::{is_valid_url, url_error_message};
