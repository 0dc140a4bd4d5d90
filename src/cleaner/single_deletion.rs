//! Single deletion feature.
//!
//! This module owns deleting one planned entry, with the optional backup step
//! and the statistics update.

use super::backup::backup_entry;
use super::category_cleaning::PlannedEntry;
use super::run_context::CleanupStats;
use crate::error::CleanupError;
use crate::scanner::EntryKind;
use std::fs;
use std::path::Path;

/// Delete one entry, backing it up first when `backup_root` is given
///
/// On success the stats gain exactly one file or directory and the entry's
/// pre-computed size. On failure nothing is counted and the entry is left
/// where it was (a failed backup stops the deletion).
pub fn delete_entry(
    planned: &PlannedEntry,
    backup_root: Option<&Path>,
    stats: &mut CleanupStats,
) -> Result<EntryKind, CleanupError> {
    let entry = &planned.entry;

    if let Some(backup_root) = backup_root {
        backup_entry(entry, backup_root)?;
    }

    let result = match entry.kind {
        EntryKind::Dir => fs::remove_dir_all(&entry.path),
        EntryKind::File => fs::remove_file(&entry.path),
    };
    result.map_err(|e| CleanupError::delete(&entry.path, e))?;

    stats.record(entry.kind, planned.size);
    tracing::debug!(path = %entry.path.display(), bytes = planned.size, "deleted");
    Ok(entry.kind)
}
