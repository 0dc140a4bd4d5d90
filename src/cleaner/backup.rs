//! Backup feature.
//!
//! This module owns copying an entry under the run's backup root before it is
//! deleted. Layout: `<root>/<backup_dir>/<YYYYMMDD_HHMMSS>/<relative path>`.

use crate::error::CleanupError;
use crate::scanner::MatchedEntry;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Timestamp format of a backup root directory name
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn backup_root_for<Tz>(root: &Path, backup_dir: &str, started_at: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    root.join(backup_dir)
        .join(started_at.format(BACKUP_TIMESTAMP_FORMAT).to_string())
}

/// Copy `entry` to `backup_root/<entry.relative>` and return the copy's path
///
/// Directories are copied recursively and merged into an existing copy. Any
/// failure is reported as a backup error; the caller must not delete the entry.
pub fn backup_entry(entry: &MatchedEntry, backup_root: &Path) -> Result<PathBuf, CleanupError> {
    let target = backup_root.join(&entry.relative);

    if entry.is_dir() && backup_root.starts_with(&entry.path) {
        // Copying would walk into its own output
        return Err(CleanupError::backup(
            &entry.path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("backup directory {} is inside it", backup_root.display()),
            ),
        ));
    }

    let result = if entry.is_dir() {
        copy_dir_merge(&entry.path, &target)
    } else {
        create_parent(&target).and_then(|_| copy_file_preserving(&entry.path, &target))
    };

    result.map_err(|e| CleanupError::backup(&entry.path, e))?;
    tracing::debug!(from = %entry.path.display(), to = %target.display(), "backed up");
    Ok(target)
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}

/// Copy one file keeping permissions and modification time
///
/// Symlinks are recreated as links on Unix instead of being followed.
fn copy_file_preserving(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(src)?;

    #[cfg(unix)]
    {
        if meta.file_type().is_symlink() {
            let link = fs::read_link(src)?;
            if fs::symlink_metadata(dst).is_ok() {
                fs::remove_file(dst)?;
            }
            return std::os::unix::fs::symlink(link, dst);
        }
    }

    fs::copy(src, dst)?;

    if let Ok(modified) = meta.modified() {
        let applied = fs::File::options()
            .write(true)
            .open(dst)
            .and_then(|f| f.set_modified(modified));
        if let Err(e) = applied {
            tracing::trace!(path = %dst.display(), error = %e, "could not keep modification time");
        }
    }

    Ok(())
}

fn copy_dir_merge(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;

    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry?;
        let relative = match entry.path().strip_prefix(src) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            create_parent(&target)?;
            copy_file_preserving(entry.path(), &target)?;
        }
    }

    Ok(())
}
