//! Core module - Counting, result model and rendering
//!
//! This module provides:
//! - Tally reporter and ledger (token loading, normalization, counting)
//! - Frequency data file reader/writer
//! - Result model (ItemCount, Lookup)
//! - Rendering functions for different output formats
//! - Error types and default paths

pub mod error;
pub mod frequency;
pub mod model;
pub mod paths;
pub mod render;
pub mod tally;
