//! Storage layer
//!
//! Persists CLI configuration (profiles, theme) as TOML.

use crate::error::StorageError;

pub mod config;

type Result<T> = std::result::Result<T, StorageError>;
