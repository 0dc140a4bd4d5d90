//! Batch deletion feature.
//!
//! This module owns deleting every entry of a category and collecting the
//! per-entry failures without stopping.

use super::category_cleaning::PlannedEntry;
use super::run_context::CleanupStats;
use super::single_deletion::delete_entry;
use crate::error::CleanupError;
use crate::scanner::EntryKind;
use indicatif::ProgressBar;
use std::path::Path;

#[derive(Debug, Default)]
pub struct BatchDeleteResult {
    pub files_deleted: usize,
    pub dirs_deleted: usize,
    pub failures: Vec<CleanupError>,
}

impl BatchDeleteResult {
    pub fn deleted(&self) -> usize {
        self.files_deleted + self.dirs_deleted
    }
}

/// Delete entries one by one; a failure is recorded and the loop moves on
pub fn delete_batch(
    entries: &[PlannedEntry],
    backup_root: Option<&Path>,
    stats: &mut CleanupStats,
    progress: Option<&ProgressBar>,
) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    for planned in entries {
        if let Some(pb) = progress {
            pb.set_message(planned.entry.relative.display().to_string());
        }

        match delete_entry(planned, backup_root, stats) {
            Ok(EntryKind::File) => result.files_deleted += 1,
            Ok(EntryKind::Dir) => result.dirs_deleted += 1,
            Err(e) => {
                tracing::debug!(error = %e, "entry not deleted");
                result.failures.push(e);
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    result
}
