//! List command feature.
//!
//! This module owns and handles the "tidyup --list" behavior.

use crate::cleaner::{self, RunContext, RunOptions};
use crate::config::Config;
use crate::output::{self, OutputMode};
use std::path::Path;

pub(crate) fn handle_list(root: &Path, config: &Config, output_mode: OutputMode) -> anyhow::Result<()> {
    let options = RunOptions {
        dry_run: true,
        backup: false,
        interactive: false,
        output_mode,
    };
    let ctx = RunContext::new(root, config, options);

    let plans = cleaner::plan_all(&ctx);
    output::print_category_list(&plans);

    Ok(())
}
