//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration.
//!
//! ## Files
//! - `export.rs` — load config, authenticate, fetch, transform, write.
//!
//! ## Principles
//! - Map CLI flags to options here.
//! - Delegate business logic to `services/*`.

pub mod export;

pub use export::{handle_export, run_export, ExportOptions};
