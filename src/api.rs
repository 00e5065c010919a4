//! Embedding API
//!
//! Plain functions for host programs. Each call builds and discards its own
//! ledger; nothing is shared between calls.

use std::io::{self, Write};
use std::path::Path;

use crate::core::error::{Result, TallyError};
use crate::core::frequency::format_lines;
use crate::core::paths::{DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
use crate::core::tally::TallyReporter;

/// Print every item and its count from the default input file to stdout
pub fn all_item_quantities() -> Result<()> {
    all_item_quantities_in(Path::new(DEFAULT_INPUT_FILE))
}

/// Print every item and its count from `input` to stdout
pub fn all_item_quantities_in(input: &Path) -> Result<()> {
    let stdout = io::stdout();
    write_item_quantities(input, stdout.lock())
}

/// Write `<name> <count>` lines for `input` to `writer`
pub fn write_item_quantities<W: Write>(input: &Path, mut writer: W) -> Result<()> {
    let report = format_lines(TallyReporter::new(input).report_all_items()?);
    writer
        .write_all(report.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| TallyError::write("<output>", e))
}

/// Occurrences of `name` in the default input file, or -1 if absent
pub fn specific_item_quantity(name: &str) -> Result<i64> {
    specific_item_quantity_in(Path::new(DEFAULT_INPUT_FILE), name)
}

/// Occurrences of `name` in `input`, or -1 if absent
pub fn specific_item_quantity_in(input: &Path, name: &str) -> Result<i64> {
    TallyReporter::new(input).count_specific_item(name)
}

/// Write the default frequency file from the default input file
pub fn read_and_create_file() -> Result<()> {
    read_and_create_file_in(Path::new(DEFAULT_INPUT_FILE), Path::new(DEFAULT_OUTPUT_FILE))
}

/// Write the frequency file for `input` to `output`
pub fn read_and_create_file_in(input: &Path, output: &Path) -> Result<()> {
    TallyReporter::new(input).export_histogram_data(output)
}
