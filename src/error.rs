//! Error taxonomy for a cleanup run.
//!
//! Scan failures never show up here: unreadable entries are skipped or sized as
//! zero where they are encountered.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code used when the run aborts because of unknown category names
pub const EXIT_USAGE: u8 = 2;

#[derive(Debug, Error)]
pub enum CleanupError {
    /// The persisted configuration could not be read or parsed
    #[error("could not load config from {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// A backup copy could not be written, so the entry was left in place
    #[error("could not back up {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Removing the entry failed
    #[error("could not delete {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One or more requested categories do not exist in the config
    #[error("unknown categories: {}", invalid.join(", "))]
    UnknownCategories {
        invalid: Vec<String>,
        available: Vec<String>,
    },
}

impl CleanupError {
    pub fn backup(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Backup {
            path: path.into(),
            source,
        }
    }

    pub fn delete(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Delete {
            path: path.into(),
            source,
        }
    }

    /// Whether this error must stop the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnknownCategories { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_categories_message() {
        let err = CleanupError::UnknownCategories {
            invalid: vec!["bogus".to_string(), "nope".to_string()],
            available: vec!["cache".to_string()],
        };
        assert_eq!(err.to_string(), "unknown categories: bogus, nope");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_delete_error_names_path_and_cause() {
        let err = CleanupError::delete(
            "a/x.pyc",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("a/x.pyc"));
        assert!(msg.contains("gone"));
        assert!(!err.is_fatal());
    }
}
