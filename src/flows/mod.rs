//! Flows module - Operations built on top of the tally core
//!
//! Provides:
//! - histogram: Export the frequency file and draw it as a star chart
//! - menu: Interactive numbered menu over the tally

pub mod histogram;
pub mod menu;
