//! Star chart flow
//!
//! Exports the frequency file, reads it back and draws one bar per item.

use colored::Colorize;
use std::path::Path;
use tracing::debug;

use crate::core::error::Result;
use crate::core::frequency::read_frequency_file;
use crate::core::model::ItemCount;
use crate::core::tally::TallyReporter;

/// Default bar symbol
pub const DEFAULT_SYMBOL: char = '*';

/// Draw `<item> <symbol x count>` lines
pub fn render_bars(items: &[ItemCount], symbol: char, color: bool) -> String {
    let mut output = String::new();
    for item in items {
        let bar: String = std::iter::repeat(symbol).take(item.count).collect();
        if color {
            output.push_str(&format!("{} {}\n", item.item.bold(), bar.green()));
        } else {
            output.push_str(&format!("{} {}\n", item.item, bar));
        }
    }
    output
}

/// Write the frequency file for `reporter` to `data_file` and chart it
pub fn build_histogram(
    reporter: &TallyReporter,
    data_file: &Path,
    symbol: char,
    color: bool,
) -> Result<String> {
    reporter.export_histogram_data(data_file)?;
    let items = read_frequency_file(data_file)?;
    debug!(items = items.len(), "charting frequency file");
    Ok(render_bars(&items, symbol, color))
}
