//! Core domain logic for tapeo.
//!
//! This crate holds the pure building blocks shared by the server, the
//! auth layer and the CLI: content document types, validation rules,
//! QR code semantics, storage traits and the cache abstractions. It has
//! no I/O of its own; concrete stores and caches live in the other
//! crates and implement the traits defined here.

#[cfg(feature = "auth")]
pub mod auth;
pub mod cache;
pub mod content;
pub mod qr;
pub mod serde;
pub mod storage;
pub mod validation;
