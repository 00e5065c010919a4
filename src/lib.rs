//! grocer - tally grocery purchases and report item frequencies
//!
//! grocer provides:
//! - Case-insensitive item counting over whitespace-separated purchase logs
//! - Single-item lookup, full sorted report, frequency data file export
//! - A star chart and an interactive menu on top of the report
//! - Unified output format (plain/jsonl/json/md)
//!
//! ```no_run
//! let count = grocer::api::specific_item_quantity("apples")?;
//! if count == grocer::NOT_FOUND {
//!     println!("never bought");
//! }
//! # Ok::<(), grocer::TallyError>(())
//! ```

pub mod api;
pub mod cli;
pub mod core;
pub mod flows;

pub use crate::core::error::{Result, TallyError};
pub use crate::core::model::{ItemCount, Lookup};
pub use crate::core::tally::{Ledger, TallyReporter, NOT_FOUND};
