//! Shared data model layer (structs/type aliases only).
//!
//! ## Files
//! - `models.rs` — settings, token store, rota records, API outcomes.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `TokenStore` serializes straight to `tokens.json`; keep its shape stable so
//! existing token caches stay readable.

pub mod models;
