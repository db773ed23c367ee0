//! QR code semantics: codes placed in venues, scan-time validity and
//! visitor feedback captured from the scan landing page.

#[cfg(feature = "qr")]
mod codegen;
mod types;
mod urls;
mod validity;

#[cfg(feature = "qr")]
pub use codegen::generate_unique_code;
pub use types::{FeedbackStatus, QrCode, QrFeedback};
pub use urls::{access_url, download_url};
pub use validity::{
    evaluate_qr_code, QrValidity, REASON_EXHAUSTED, REASON_EXPIRED, REASON_INACTIVE,
};
