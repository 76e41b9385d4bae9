//! Item batch tasks for Groundwork.
//!
//! Currently one task: importing items from CSV files, with per-row error
//! accumulation and an optional dry-run mode.

pub mod services;
pub mod types;

pub use services::{ImportResult, ItemImportService};
pub use types::errors::ItemError;
