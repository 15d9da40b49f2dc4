//! Service layer containing the export pipeline and its side-effect helpers.
//!
//! ## Service map
//! - `settings.rs` — `settings.json` loading + validation.
//! - `storage.rs` — `tokens.json` load/synthesize/persist.
//! - `api.rs` — `RotaApi` seam and the blocking HTTP client behind it.
//! - `auth.rs` — token check / login per department.
//! - `fetch.rs` — person rota reads for the date window.
//! - `transform.rs` — required-field filter, additional fields, projection, date formats.
//! - `output.rs` — CSV writer (file or stdout).
//!
//! ## Conventions
//! - Network calls only go through `RotaApi`.
//! - Services never persist tokens themselves; the command handler does.
//! - Keep command handlers thin; delegate to services.

pub mod api;
pub mod auth;
pub mod fetch;
pub mod output;
pub mod settings;
pub mod storage;
pub mod transform;
