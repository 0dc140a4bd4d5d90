use crate::matcher::{compile_patterns, PathMatcher, Pattern};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// A filesystem entry selected for cleanup
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchedEntry {
    /// Absolute path
    pub path: PathBuf,
    /// Path relative to the project root
    pub relative: PathBuf,
    pub kind: EntryKind,
}

impl MatchedEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Walks the project tree and collects entries matching category patterns
///
/// Directory patterns (trailing `/`) select directories, every other pattern
/// selects files. A selected directory is taken as a whole and not descended
/// into. Protected entries are never selected, and directories registered with
/// [`Scanner::skip_dir`] are not walked at all.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    matcher: &'a PathMatcher,
    skipped: Vec<PathBuf>,
}

impl<'a> Scanner<'a> {
    pub fn new(matcher: &'a PathMatcher) -> Self {
        Self {
            matcher,
            skipped: Vec::new(),
        }
    }

    /// Never walk into `dir` (an absolute path) and never select a directory
    /// that contains it
    pub fn skip_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.skipped.push(dir.into());
        self
    }

    pub fn root(&self) -> &Path {
        self.matcher.root()
    }

    /// True when `dir` is a strict ancestor of a skipped directory
    fn holds_skipped(&self, dir: &Path) -> bool {
        self.skipped.iter().any(|s| s != dir && s.starts_with(dir))
    }

    /// Number of protected paths below `dir`
    ///
    /// A selected directory is deleted as a whole, so these go with it.
    pub fn protected_descendants(&self, dir: &Path) -> usize {
        WalkDir::new(dir)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| self.matcher.is_protected(e.path()))
            .count()
    }

    /// Compile raw patterns and find matching entries
    pub fn find_patterns(&self, patterns: &[String]) -> Vec<MatchedEntry> {
        self.find(&compile_patterns(patterns))
    }

    /// Find every non-protected entry matching any of `patterns`
    ///
    /// The result is deduplicated and sorted by path. Entries that cannot be
    /// read while walking are left out.
    pub fn find(&self, patterns: &[Pattern]) -> Vec<MatchedEntry> {
        if patterns.is_empty() {
            return Vec::new();
        }

        let (dir_patterns, file_patterns): (Vec<&Pattern>, Vec<&Pattern>) =
            patterns.iter().partition(|p| p.is_dir_pattern());

        let root = self.root();
        let mut found: HashSet<MatchedEntry> = HashSet::new();
        let mut walker = WalkDir::new(root).follow_links(false).into_iter();

        loop {
            let entry = match walker.next() {
                None => break,
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    tracing::trace!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let relative = match entry.path().strip_prefix(root) {
                Ok(rel) => rel,
                Err(_) => continue,
            };

            if entry.file_type().is_dir() {
                if self.skipped.iter().any(|s| s == entry.path()) {
                    walker.skip_current_dir();
                    continue;
                }

                if dir_patterns.iter().any(|p| p.is_match_relative(relative))
                    && !self.matcher.is_protected_relative(relative)
                {
                    if self.holds_skipped(entry.path()) {
                        // Deleting it would take the skipped dir along; look inside instead
                        tracing::warn!(
                            path = %entry.path().display(),
                            "not selecting a directory that contains a skipped directory"
                        );
                        continue;
                    }

                    found.insert(MatchedEntry {
                        path: entry.path().to_path_buf(),
                        relative: relative.to_path_buf(),
                        kind: EntryKind::Dir,
                    });
                    walker.skip_current_dir();
                }
            } else if file_patterns.iter().any(|p| p.is_match_relative(relative))
                && !self.matcher.is_protected_relative(relative)
            {
                found.insert(MatchedEntry {
                    path: entry.path().to_path_buf(),
                    relative: relative.to_path_buf(),
                    kind: EntryKind::File,
                });
            }
        }

        let mut entries: Vec<MatchedEntry> = found.into_iter().collect();
        entries.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
        entries
    }
}
