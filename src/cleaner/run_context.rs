//! Run context feature.
//!
//! This module owns the per-invocation state: project root, config, mode flags,
//! the run's start time and the running statistics.

use super::backup::backup_root_for;
use crate::config::Config;
use crate::matcher::PathMatcher;
use crate::output::OutputMode;
use crate::scanner::{EntryKind, Scanner};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Mode flags for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub dry_run: bool,
    pub backup: bool,
    pub interactive: bool,
    pub output_mode: OutputMode,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            backup: false,
            interactive: true,
            output_mode: OutputMode::Normal,
        }
    }
}

/// Running totals of what was actually deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanupStats {
    pub files_deleted: u64,
    pub dirs_deleted: u64,
    pub bytes_freed: u64,
}

impl CleanupStats {
    /// Count one successful deletion
    pub fn record(&mut self, kind: EntryKind, bytes: u64) {
        match kind {
            EntryKind::File => self.files_deleted += 1,
            EntryKind::Dir => self.dirs_deleted += 1,
        }
        self.bytes_freed += bytes;
    }

    pub fn items_deleted(&self) -> u64 {
        self.files_deleted + self.dirs_deleted
    }
}

/// Everything a cleanup run needs, built once per invocation
#[derive(Debug)]
pub struct RunContext<'a> {
    pub config: &'a Config,
    pub options: RunOptions,
    pub stats: CleanupStats,
    matcher: PathMatcher,
    started_at: DateTime<Local>,
}

impl<'a> RunContext<'a> {
    /// `root` must be an absolute path to the project directory
    pub fn new(root: impl Into<PathBuf>, config: &'a Config, options: RunOptions) -> Self {
        Self::started_at(root, config, options, Local::now())
    }

    /// Same as [`RunContext::new`] with a fixed start time
    pub fn started_at(
        root: impl Into<PathBuf>,
        config: &'a Config,
        options: RunOptions,
        started_at: DateTime<Local>,
    ) -> Self {
        let root = root.into();
        let matcher = PathMatcher::new(root, &config.protected_patterns);
        Self {
            config,
            options,
            stats: CleanupStats::default(),
            matcher,
            started_at,
        }
    }

    pub fn root(&self) -> &Path {
        self.matcher.root()
    }

    pub fn matcher(&self) -> &PathMatcher {
        &self.matcher
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn mode(&self) -> OutputMode {
        self.options.output_mode
    }

    /// `<root>/<backup_dir>`, the parent of every run's backup root
    pub fn backup_base(&self) -> PathBuf {
        self.root().join(&self.config.backup_dir)
    }

    /// `<root>/<backup_dir>/<YYYYMMDD_HHMMSS>` for this run
    pub fn backup_root(&self) -> PathBuf {
        backup_root_for(self.root(), &self.config.backup_dir, &self.started_at)
    }

    /// Scanner over the project that never walks into the backup directory
    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::new(&self.matcher).skip_dir(self.backup_base())
    }
}
