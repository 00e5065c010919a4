//! Tally reporter - token loading, normalization and counting
//!
//! Every query builds a fresh [`Ledger`] from the input source, so results
//! always reflect the file as it is on disk at call time.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::error::{Result, TallyError};
use crate::core::frequency::write_frequency_file;
use crate::core::model::{ItemCount, Lookup};

/// Lookup result for an item that never appears in the input
pub const NOT_FOUND: i64 = -1;

/// Normalize a token or query: trim surrounding whitespace, lowercase
pub fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Split text on whitespace runs, keeping original case and order
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Read every token from a stream.
///
/// `origin` is only used to label the error if the stream cannot be read.
pub fn read_tokens<R: Read>(mut reader: R, origin: &Path) -> Result<Vec<String>> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(|e| TallyError::not_found(origin, e))?;

    // No encoding validation: undecodable bytes become U+FFFD
    let text = String::from_utf8_lossy(&buffer);
    Ok(split_tokens(&text))
}

/// Load the raw tokens of a file
pub fn load_tokens(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| TallyError::not_found(path, e))?;
    let tokens = read_tokens(file, path)?;
    debug!(path = %path.display(), tokens = tokens.len(), "loaded tokens");
    Ok(tokens)
}

/// Normalized item name -> occurrence count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    counts: BTreeMap<String, usize>,
    total: usize,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from raw tokens, normalizing each one
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ledger = Self::new();
        for token in tokens {
            ledger.record(token.as_ref());
        }
        ledger
    }

    /// Count one occurrence of `token`. Blank tokens are ignored.
    pub fn record(&mut self, token: &str) {
        let key = normalize(token);
        if key.is_empty() {
            return;
        }
        *self.counts.entry(key).or_insert(0) += 1;
        self.total += 1;
    }

    /// Occurrences of `name` after normalization, `None` if absent
    pub fn get(&self, name: &str) -> Option<usize> {
        self.counts.get(&normalize(name)).copied()
    }

    /// Occurrences of `name`, or [`NOT_FOUND`] when it never appears
    pub fn count(&self, name: &str) -> i64 {
        self.get(name).map(|n| n as i64).unwrap_or(NOT_FOUND)
    }

    /// Number of tokens recorded
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl IntoIterator for Ledger {
    type Item = ItemCount;
    type IntoIter = LedgerItems;

    fn into_iter(self) -> Self::IntoIter {
        LedgerItems {
            inner: self.counts.into_iter(),
        }
    }
}

/// Owning iterator over a ledger, ascending by item name
#[derive(Debug)]
pub struct LedgerItems {
    inner: btree_map::IntoIter<String, usize>,
}

impl Iterator for LedgerItems {
    type Item = ItemCount;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(ItemCount::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for LedgerItems {}

/// Answers queries over one input file
#[derive(Debug, Clone)]
pub struct TallyReporter {
    source: PathBuf,
}

impl TallyReporter {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Raw tokens of the source, in input order
    pub fn load_tokens(&self) -> Result<Vec<String>> {
        load_tokens(&self.source)
    }

    /// A ledger over the current file contents
    pub fn ledger(&self) -> Result<Ledger> {
        let ledger = Ledger::from_tokens(self.load_tokens()?);
        debug!(items = ledger.len(), tokens = ledger.total(), "built ledger");
        Ok(ledger)
    }

    /// Occurrences of `name` (case-insensitive, trimmed), or -1 if absent
    pub fn count_specific_item(&self, name: &str) -> Result<i64> {
        let count = self.ledger()?.count(name);
        debug!(item = %normalize(name), count, "lookup");
        Ok(count)
    }

    /// Same as [`count_specific_item`](Self::count_specific_item), packaged for rendering
    pub fn lookup(&self, name: &str) -> Result<Lookup> {
        Ok(Lookup::new(normalize(name), self.count_specific_item(name)?))
    }

    /// Every distinct item with its count, ascending by name
    pub fn report_all_items(&self) -> Result<LedgerItems> {
        Ok(self.ledger()?.into_iter())
    }

    /// Write the report as `<name> <count>` lines to `destination`, replacing it
    pub fn export_histogram_data(&self, destination: &Path) -> Result<()> {
        write_frequency_file(destination, self.report_all_items()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const GROCERIES: &str = "Apple banana APPLE Grape banana banana";

    fn reporter_with(content: &str) -> (tempfile::TempDir, TallyReporter) {
        let temp = tempdir().unwrap();
        let input = temp.path().join("input.txt");
        fs::write(&input, content).unwrap();
        (temp, TallyReporter::new(input))
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  ApPle \t"), "apple");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_split_tokens_mixed_whitespace() {
        let tokens = split_tokens("Apple\tbanana\n\n  Kiwi \r\n");
        assert_eq!(tokens, vec!["Apple", "banana", "Kiwi"]);
    }

    #[test]
    fn test_load_tokens_preserves_order_and_case() {
        let (_temp, reporter) = reporter_with(GROCERIES);
        let tokens = reporter.load_tokens().unwrap();
        assert_eq!(
            tokens,
            vec!["Apple", "banana", "APPLE", "Grape", "banana", "banana"]
        );
    }

    #[test]
    fn test_load_tokens_missing_file() {
        let temp = tempdir().unwrap();
        let err = load_tokens(&temp.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, TallyError::NotFound { .. }));
    }

    #[test]
    fn test_load_tokens_directory_is_unreadable() {
        let temp = tempdir().unwrap();
        let err = load_tokens(temp.path()).unwrap_err();
        assert!(matches!(err, TallyError::NotFound { .. }));
    }

    #[test]
    fn test_read_tokens_lossy() {
        let bytes: &[u8] = b"milk \xff\xfe eggs";
        let tokens = read_tokens(bytes, Path::new("<bytes>")).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], "milk");
        assert_eq!(tokens[2], "eggs");
    }

    #[test]
    fn test_count_specific_item() {
        let (_temp, reporter) = reporter_with(GROCERIES);
        assert_eq!(reporter.count_specific_item("apple").unwrap(), 2);
        assert_eq!(reporter.count_specific_item("  BANANA ").unwrap(), 3);
        assert_eq!(reporter.count_specific_item("kiwi").unwrap(), NOT_FOUND);
        assert_eq!(reporter.count_specific_item("").unwrap(), NOT_FOUND);
        assert_eq!(reporter.count_specific_item("   ").unwrap(), NOT_FOUND);
    }

    #[test]
    fn test_count_is_case_insensitive() {
        let (_temp, reporter) = reporter_with(GROCERIES);
        for name in ["apple", "Apple", "grape", "banana"] {
            assert_eq!(
                reporter.count_specific_item(name).unwrap(),
                reporter.count_specific_item(&name.to_uppercase()).unwrap()
            );
        }
    }

    #[test]
    fn test_count_on_empty_input() {
        let (_temp, reporter) = reporter_with("");
        assert_eq!(reporter.count_specific_item("apple").unwrap(), NOT_FOUND);
    }

    #[test]
    fn test_report_all_items() {
        let (_temp, reporter) = reporter_with(GROCERIES);
        let items: Vec<_> = reporter.report_all_items().unwrap().collect();
        assert_eq!(
            items,
            vec![
                ItemCount::new("apple", 2),
                ItemCount::new("banana", 3),
                ItemCount::new("grape", 1),
            ]
        );
    }

    #[test]
    fn test_report_sum_matches_token_count() {
        let content = "Zucchini\tzucchini Onions\nPeas peas PEAS\n\nRadishes Onions  onions";
        let (_temp, reporter) = reporter_with(content);
        let total: usize = reporter.report_all_items().unwrap().map(|i| i.count).sum();
        assert_eq!(total, content.split_whitespace().count());
    }

    #[test]
    fn test_report_sorted_without_duplicates() {
        let (_temp, reporter) = reporter_with("pears Beets apples beets Cranberries PEARS");
        let names: Vec<_> = reporter
            .report_all_items()
            .unwrap()
            .map(|i| i.item)
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names, vec!["apples", "beets", "cranberries", "pears"]);
    }

    #[test]
    fn test_report_empty_input() {
        let (_temp, reporter) = reporter_with("  \n\t ");
        assert_eq!(reporter.report_all_items().unwrap().len(), 0);
    }

    #[test]
    fn test_report_reflects_current_file() {
        let (_temp, reporter) = reporter_with("apple");
        assert_eq!(reporter.count_specific_item("apple").unwrap(), 1);
        fs::write(reporter.source(), "apple apple").unwrap();
        assert_eq!(reporter.count_specific_item("apple").unwrap(), 2);
    }

    #[test]
    fn test_export_histogram_data() {
        let (temp, reporter) = reporter_with(GROCERIES);
        let out = temp.path().join("frequency.dat");
        reporter.export_histogram_data(&out).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "apple 2\nbanana 3\ngrape 1\n"
        );
    }

    #[test]
    fn test_missing_source_fails_every_operation() {
        let temp = tempdir().unwrap();
        let reporter = TallyReporter::new(temp.path().join("missing.txt"));
        let out = temp.path().join("frequency.dat");

        assert!(matches!(
            reporter.count_specific_item("apple"),
            Err(TallyError::NotFound { .. })
        ));
        assert!(matches!(
            reporter.report_all_items(),
            Err(TallyError::NotFound { .. })
        ));
        assert!(matches!(
            reporter.export_histogram_data(&out),
            Err(TallyError::NotFound { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_ledger_record_and_totals() {
        let mut ledger = Ledger::new();
        ledger.record("Milk");
        ledger.record(" milk ");
        ledger.record("");
        ledger.record("Eggs");
        assert_eq!(ledger.total(), 3);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get("MILK"), Some(2));
        assert_eq!(ledger.get("bread"), None);
        assert_eq!(ledger.count("bread"), NOT_FOUND);
        assert_eq!(
            ledger.into_iter().collect::<Vec<_>>(),
            vec![ItemCount::new("eggs", 1), ItemCount::new("milk", 2)]
        );
    }
}
