//! Glob matching of project paths against category and protected patterns
//!
//! Patterns are always compared against the path relative to the project root.
//! The rules are:
//!
//! - `*` matches within one path segment, `**` crosses segments, `?` matches a
//!   single character. Matching is case-sensitive.
//! - A pattern without a `/` (like `*.pyc` or `__pycache__`) matches an entry of
//!   that name at any depth.
//! - A pattern with a `/` (like `docs/**/*`) is anchored to the full relative
//!   path. A leading `/` is accepted and ignored.
//! - A trailing `/` marks a directory pattern; it is stripped before matching.

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    /// Nothing left once the slashes are stripped (`""`, `"/"`, `"//"`)
    #[error("pattern is empty")]
    Empty,

    #[error(transparent)]
    Glob(#[from] globset::Error),
}

/// A compiled glob pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    dir_only: bool,
    glob: Glob,
    matcher: GlobMatcher,
}

impl Pattern {
    pub fn new(raw: &str) -> Result<Self, PatternError> {
        let dir_only = raw.ends_with('/');
        let body = raw.trim_end_matches('/');
        let anchored = body.contains('/');
        let body = body.trim_start_matches('/');
        if body.is_empty() {
            return Err(PatternError::Empty);
        }

        let source = if anchored {
            body.to_string()
        } else {
            format!("**/{}", body)
        };

        let glob = GlobBuilder::new(&source).literal_separator(true).build()?;
        let matcher = glob.compile_matcher();

        Ok(Self {
            raw: raw.to_string(),
            dir_only,
            glob,
            matcher,
        })
    }

    /// True for patterns ending in `/`, which select directories
    pub fn is_dir_pattern(&self) -> bool {
        self.dir_only
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match an already-relative path
    pub fn is_match_relative(&self, relative: &Path) -> bool {
        !relative.as_os_str().is_empty() && self.matcher.is_match(relative)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Compile raw patterns, skipping (and logging) empty ones and invalid globs
pub fn compile_patterns(raw: &[String]) -> Vec<Pattern> {
    raw.iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!(pattern = %p, error = %e, "ignoring invalid pattern");
                None
            }
        })
        .collect()
}

/// Decides whether project paths match patterns and whether they are protected
#[derive(Debug, Clone)]
pub struct PathMatcher {
    root: PathBuf,
    protected: GlobSet,
}

impl PathMatcher {
    pub fn new(root: impl Into<PathBuf>, protected_patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in compile_patterns(protected_patterns) {
            builder.add(pattern.glob);
        }

        let protected = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not build protected pattern set");
            GlobSet::empty()
        });

        Self {
            root: root.into(),
            protected,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path relative to the project root, or None for paths outside it
    pub fn relative<'a>(&self, path: &'a Path) -> Option<&'a Path> {
        path.strip_prefix(&self.root).ok()
    }

    pub fn matches(&self, path: &Path, pattern: &Pattern) -> bool {
        match self.relative(path) {
            Some(rel) => pattern.is_match_relative(rel),
            None => false,
        }
    }

    /// A path is protected when any protected pattern matches it
    pub fn is_protected(&self, path: &Path) -> bool {
        match self.relative(path) {
            Some(rel) => self.is_protected_relative(rel),
            None => false,
        }
    }

    pub fn is_protected_relative(&self, relative: &Path) -> bool {
        !relative.as_os_str().is_empty() && self.protected.is_match(relative)
    }
}
