//! Byte accounting for matched entries
//!
//! Sizing never fails: anything that cannot be read counts as zero bytes.

use std::fs;
use std::path::{Path, PathBuf};

/// Size of a file, or the recursive total of all files under a directory
///
/// Symlinks are not followed; a symlink counts as the size of the link itself.
/// A path that no longer exists is 0.
pub fn size_of(path: &Path) -> u64 {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => calculate_dir_size(path),
        Ok(meta) => meta.len(),
        Err(_) => 0,
    }
}

/// Total size of every file in a directory tree
///
/// Walks with an explicit stack. Directories that cannot be listed and entries
/// whose metadata cannot be read contribute nothing.
pub fn calculate_dir_size(path: &Path) -> u64 {
    let mut total = 0u64;
    let mut dir_stack: Vec<PathBuf> = vec![path.to_path_buf()];

    while let Some(current_dir) = dir_stack.pop() {
        let entries = match fs::read_dir(&current_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::trace!(path = %current_dir.display(), error = %e, "skipping unreadable directory");
                continue;
            }
        };

        for entry in entries.flatten() {
            let entry_path = entry.path();

            let meta = match fs::symlink_metadata(&entry_path) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if meta.is_dir() {
                dir_stack.push(entry_path);
            } else {
                total += meta.len();
            }
        }
    }

    total
}

/// Render a byte count with binary units and one decimal place
///
/// - 10 -> "10.0 B"
/// - 1536 -> "1.5 KB"
/// - 5 * 1024^4 -> "5.0 TB"
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{:.1} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} TB", value)
}
