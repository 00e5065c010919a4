//! Default file names and path resolution

use std::path::{Path, PathBuf};

/// Input file read when no other source is given
pub const DEFAULT_INPUT_FILE: &str = "CS210_Project_Three_Input_File.txt";

/// Frequency data file written by the histogram export
pub const DEFAULT_OUTPUT_FILE: &str = "frequency.dat";

/// Resolve `path` against `root` unless it is already absolute
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Normalize a path to use '/' as separator (for stable log and error output)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
