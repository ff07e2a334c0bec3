#![forbid(unsafe_code)]

//! Core domain model and grouping logic for Lift.
//!
//! This crate provides:
//! - Domain types (exercise names, measurements, log entries)
//! - The grouper that splits a workout log into sets, drop sets and supersets
//! - Read-only loading of entry logs (JSON Lines, CSV)
//! - Configuration and logging setup shared by the CLI

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod entry_log;
pub mod grouping;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, OutputFormat};
pub use entry_log::load_entries;
pub use grouping::{find_group, group_entries, Group, GroupKind};
