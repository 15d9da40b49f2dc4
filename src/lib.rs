//! Export person rota data from one or more Public API instances to CSV.
//!
//! The pipeline is linear: settings and cached tokens are loaded, each
//! department is authenticated, `person_rota` is read for the date window,
//! and the records are filtered/projected into a CSV.

pub mod cli;
pub mod commands;
pub mod domain;
pub mod error;
pub mod services;

pub use error::RotaError;
