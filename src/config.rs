use crate::error::CleanupError;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the project root
pub const CONFIG_FILE_NAME: &str = ".cleanrc";

/// Category name -> ordered glob patterns, in config order
pub type CategoryPatternMap = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_protected_patterns")]
    pub protected_patterns: Vec<String>,

    #[serde(default = "default_cleanup_patterns")]
    pub cleanup_patterns: CategoryPatternMap,

    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,

    #[serde(default = "default_interactive")]
    pub interactive: bool,

    #[serde(default)]
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protected_patterns: default_protected_patterns(),
            cleanup_patterns: default_cleanup_patterns(),
            backup_dir: default_backup_dir(),
            interactive: default_interactive(),
            dry_run: false,
        }
    }
}

fn default_protected_patterns() -> Vec<String> {
    [
        "examples/notebooks/*.ipynb",
        "docs/**/*",
        ".git/**/*",
        "*.md",
        "pyproject.toml",
        "setup.cfg",
        "Makefile",
        "LICENSE",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_cleanup_patterns() -> CategoryPatternMap {
    let table: &[(&str, &[&str])] = &[
        (
            "cache",
            &["__pycache__/", ".pytest_cache/", ".mypy_cache/", ".ruff_cache/"],
        ),
        ("python_compiled", &["*.pyc", "*.pyo"]),
        ("models", &["*.pkl", "*.pt", "*.ts", "*.onnx"]),
        ("logs", &["*.log", "*.out", "*.err"]),
        ("coverage", &["htmlcov/", "coverage.xml", ".coverage*"]),
        (
            "results",
            &["*.png", "*.jpg", "*.csv", "results/", "benchmarks/results/"],
        ),
        ("build", &["build/", "dist/", "*.egg-info/"]),
    ];

    table
        .iter()
        .map(|(name, patterns)| {
            (
                name.to_string(),
                patterns.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect()
}

fn default_backup_dir() -> String {
    "cleanup_backups".to_string()
}

fn default_interactive() -> bool {
    true
}

impl Config {
    /// Default config location for a project root: `<root>/.cleanrc`
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }

    /// Parse a config file, filling any absent key with its built-in default
    pub fn from_file(path: &Path) -> std::result::Result<Self, CleanupError> {
        let content = fs::read_to_string(path).map_err(|e| CleanupError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| CleanupError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load config from file or return defaults
    ///
    /// A missing file silently yields the defaults. A file that cannot be read
    /// or parsed also yields the defaults, and the error is handed back so the
    /// caller can surface it as a warning.
    pub fn load(path: &Path) -> (Self, Option<CleanupError>) {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return (Self::default(), None);
        }

        match Self::from_file(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                (config, None)
            }
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Save config to file as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Category names in config order
    pub fn category_names(&self) -> Vec<String> {
        self.cleanup_patterns.keys().cloned().collect()
    }

    /// Resolve the categories to run
    ///
    /// An empty request selects every configured category. Any unknown name
    /// rejects the whole request.
    pub fn select_categories(
        &self,
        requested: &[String],
    ) -> std::result::Result<Vec<String>, CleanupError> {
        if requested.is_empty() {
            return Ok(self.category_names());
        }

        let mut invalid: Vec<String> = Vec::new();
        for name in requested {
            if !self.cleanup_patterns.contains_key(name.as_str()) && !invalid.contains(name) {
                invalid.push(name.clone());
            }
        }

        if !invalid.is_empty() {
            return Err(CleanupError::UnknownCategories {
                invalid,
                available: self.category_names(),
            });
        }

        let mut selected: Vec<String> = Vec::with_capacity(requested.len());
        for name in requested {
            if !selected.contains(name) {
                selected.push(name.clone());
            }
        }
        Ok(selected)
    }
}
