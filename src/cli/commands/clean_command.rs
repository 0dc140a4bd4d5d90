//! Clean command feature.
//!
//! This module owns and handles the default "tidyup [CATEGORY...]" behavior.

use crate::cleaner::{self, RunContext, RunOptions};
use crate::config::Config;
use crate::error::CleanupError;
use crate::output;
use crate::prompt::StdinPrompt;
use std::path::Path;

pub(crate) fn handle_clean(
    root: &Path,
    config: &Config,
    categories: &[String],
    options: RunOptions,
) -> anyhow::Result<()> {
    let mut ctx = RunContext::new(root, config, options);
    let mut prompt = StdinPrompt;

    match cleaner::run_cleanup(&mut ctx, categories, &mut prompt) {
        Ok(report) => {
            output::print_summary(&report, options.output_mode);
            Ok(())
        }
        Err(e) => {
            if let CleanupError::UnknownCategories { invalid, available } = &e {
                output::print_unknown_categories(invalid, available);
            }
            Err(e.into())
        }
    }
}
