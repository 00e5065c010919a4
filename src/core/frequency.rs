//! Frequency data file (`<name> <count>` per line)

use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::core::error::{Result, TallyError};
use crate::core::model::ItemCount;

/// Render items as newline-terminated `<name> <count>` lines
pub fn format_lines<I>(items: I) -> String
where
    I: IntoIterator<Item = ItemCount>,
{
    let mut output = String::new();
    for item in items {
        output.push_str(&item.to_line());
        output.push('\n');
    }
    output
}

/// Write items to `path`, replacing the contents of any existing file.
///
/// The content is written to a temporary file next to the destination and
/// renamed into place, so a failure leaves the previous file (or no file)
/// behind. An existing destination keeps its permissions, and a symlinked
/// destination keeps its link: the file it points to is replaced.
pub fn write_frequency_file<I>(path: &Path, items: I) -> Result<()>
where
    I: IntoIterator<Item = ItemCount>,
{
    let content = format_lines(items);

    let (target, existing) = match fs::metadata(path) {
        Ok(meta) => (
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
            Some(meta.permissions()),
        ),
        Err(_) => (path.to_path_buf(), None),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    if existing.is_none() {
        use std::os::unix::fs::PermissionsExt;
        // Masked by the umask, like a plain create
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| TallyError::write(path, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| TallyError::write(path, e))?;
    #[cfg(unix)]
    if let Some(perms) = existing {
        tmp.as_file()
            .set_permissions(perms)
            .map_err(|e| TallyError::write(path, e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| TallyError::write(path, e))?;
    debug!(tmp = %tmp.path().display(), bytes = content.len(), "staged frequency data");

    tmp.persist(&target)
        .map_err(|e| TallyError::write(path, e.error))?;

    info!(path = %path.display(), "wrote frequency file");
    Ok(())
}

/// Read a frequency file back into items.
///
/// Parsing stops at the first entry whose count is not a number.
pub fn read_frequency_file(path: &Path) -> Result<Vec<ItemCount>> {
    let content = fs::read_to_string(path).map_err(|e| TallyError::not_found(path, e))?;
    Ok(parse_lines(&content))
}

/// Parse whitespace-separated `<name> <count>` pairs
pub fn parse_lines(content: &str) -> Vec<ItemCount> {
    let mut items = Vec::new();
    let mut words = content.split_whitespace();

    while let Some(item) = words.next() {
        let Some(count) = words.next().and_then(|w| w.parse::<usize>().ok()) else {
            break;
        };
        items.push(ItemCount::new(item, count));
    }

    items
}
