//! Config command feature.
//!
//! This module owns and handles the "tidyup --save-config" behavior.

use crate::config::Config;
use crate::output::OutputMode;
use crate::theme::Theme;
use std::path::Path;

pub(crate) fn handle_save_config(
    config: &Config,
    path: &Path,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    config.save(path)?;

    if output_mode != OutputMode::Quiet {
        println!(
            "{}",
            Theme::success(&format!("Configuration saved to {}", path.display()))
        );
    }

    Ok(())
}
