use crate::cleaner::RunOptions;
use crate::config::Config;
use crate::output::{self, OutputMode};
use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "tidyup")]
#[command(version)]
#[command(about = "Interactively clean build artifacts, caches and generated files from a project")]
#[command(
    long_about = "tidyup removes build artifacts, caches and generated files from a project \
    tree. Files are grouped into categories of glob patterns; protected patterns are never \
    touched.\n\n\
    Examples:\n  \
    tidyup --list                      # Show categories with match counts\n  \
    tidyup --dry-run                   # Preview what every category would delete\n  \
    tidyup cache logs                  # Clean two categories, asking first\n  \
    tidyup build --backup --no-interactive  # Back up, then delete without asking"
)]
pub struct Cli {
    /// Categories to clean (default: all)
    #[arg(value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Show what would be deleted without deleting
    #[arg(long)]
    pub dry_run: bool,

    /// Backup files before deletion
    #[arg(long)]
    pub backup: bool,

    /// Skip confirmation prompts
    #[arg(long)]
    pub no_interactive: bool,

    /// List available categories and exit
    #[arg(long)]
    pub list: bool,

    /// Path to configuration file [default: <root>/.cleanrc]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Save current configuration and exit
    #[arg(long)]
    pub save_config: bool,

    /// Project root to clean (default: current directory)
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.quiet, self.verbose)
    }

    /// Effective mode flags: command-line switches on top of config defaults
    pub fn run_options(&self, config: &Config) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run || config.dry_run,
            backup: self.backup,
            interactive: config.interactive && !self.no_interactive,
            output_mode: self.output_mode(),
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let output_mode = self.output_mode();
        let root = resolve_root(self.root.as_deref())?;

        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| Config::default_path(&root));
        let (config, load_error) = Config::load(&config_path);
        if let Some(e) = load_error {
            output::warn(output_mode, &e.to_string());
            output::warn(output_mode, "Using default configuration.");
        }

        if self.save_config {
            return commands::config_command::handle_save_config(
                &config,
                &config_path,
                output_mode,
            );
        }

        if self.list {
            return commands::list_command::handle_list(&root, &config, output_mode);
        }

        let options = self.run_options(&config);
        commands::clean_command::handle_clean(&root, &config, &self.categories, options)
    }
}

/// Absolute project root: the given path or the current directory
fn resolve_root(root: Option<&Path>) -> anyhow::Result<PathBuf> {
    let root = match root {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let canonical = root
        .canonicalize()
        .with_context(|| format!("Project root not found: {}", root.display()))?;

    if !canonical.is_dir() {
        anyhow::bail!("Project root is not a directory: {}", canonical.display());
    }

    Ok(canonical)
}
