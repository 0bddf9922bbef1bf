//! Core types for filesize.
//!
//! This crate provides the data structures shared across the filesize
//! workspace: file records, exclusion rules, walk configuration, errors and
//! the inventory a walk produces.

mod config;
mod error;
mod inventory;
mod record;
mod rules;

pub use config::{WalkConfig, WalkConfigBuilder, WalkConfigBuilderError};
pub use error::{WalkError, WalkWarning, WarningKind};
pub use inventory::{Inventory, WalkStats};
pub use record::{FileRecord, join_relative};
pub use rules::{EXCLUDED_DIRECTORIES, EXCLUDED_FILES, ExclusionSet, Exclusions, matches};
