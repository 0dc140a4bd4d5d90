use crate::cleaner::{BatchDeleteResult, CategoryPlan, RunOptions, RunReport};
use crate::prompt::Decision;
use crate::size::format_size;
use crate::theme::Theme;
use std::path::Path;

/// Entries listed per category before the rest is summarized
pub const LISTING_LIMIT: usize = 10;

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Quiet,       // Only errors
    Normal,      // Standard output
    Verbose,     // More details
    VeryVerbose, // Every matched path
}

impl OutputMode {
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            OutputMode::Quiet
        } else {
            match verbose {
                0 => OutputMode::Normal,
                1 => OutputMode::Verbose,
                _ => OutputMode::VeryVerbose,
            }
        }
    }
}

/// Print a warning on stderr unless quiet
pub fn warn(mode: OutputMode, message: &str) {
    if mode != OutputMode::Quiet {
        eprintln!("{} {}", Theme::warning_msg("[WARNING]"), message);
    }
}

pub fn print_banner(root: &Path, options: &RunOptions) {
    if options.output_mode == OutputMode::Quiet {
        return;
    }

    println!("{}", Theme::header("Project Cleanup"));
    println!("Project root: {}", Theme::muted(&root.display().to_string()));

    if options.dry_run {
        println!(
            "{}",
            Theme::warning_msg("DRY RUN MODE - No files will be deleted")
        );
    }

    if options.backup {
        println!("Backup mode enabled - files will be backed up before deletion");
    }
}

pub fn print_nothing_found(category: &str, mode: OutputMode) {
    if mode != OutputMode::Quiet {
        println!("No {} files found to clean.", category);
    }
}

/// Category header followed by the matched entries
///
/// Selected directories that hold protected paths are called out as warnings,
/// since those paths are removed with the directory.
pub fn print_category_plan(plan: &CategoryPlan, mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }

    println!();
    println!(
        "{} files found ({} items, {}):",
        Theme::category(&plan.name.to_uppercase()),
        Theme::value(&plan.len().to_string()),
        Theme::size(&format_size(plan.total_size))
    );

    for line in entry_listing(plan, mode) {
        println!("{}", line);
    }

    for (dir, count) in &plan.holds_protected {
        warn(
            mode,
            &format!(
                "{} contains {} protected path(s) that will be deleted with it",
                dir.display(),
                count
            ),
        );
    }
}

/// One line per listed entry, then a "... and N more files" line
///
/// Lists the first [`LISTING_LIMIT`] entries, or all of them in very verbose
/// mode.
pub fn entry_listing(plan: &CategoryPlan, mode: OutputMode) -> Vec<String> {
    let shown = if mode == OutputMode::VeryVerbose {
        plan.len()
    } else {
        LISTING_LIMIT
    };

    let mut lines: Vec<String> = plan
        .entries
        .iter()
        .take(shown)
        .map(|planned| {
            format!(
                "  {} ({})",
                planned.entry.relative.display(),
                format_size(planned.size)
            )
        })
        .collect();

    if plan.len() > shown {
        lines.push(format!("  ... and {} more files", plan.len() - shown));
    }

    lines
}

pub fn print_dry_run_category(plan: &CategoryPlan, mode: OutputMode) {
    if mode != OutputMode::Quiet {
        println!(
            "[DRY RUN] Would delete {} {} files ({})",
            plan.len(),
            plan.name,
            format_size(plan.total_size)
        );
    }
}

pub fn print_category_skipped(category: &str, decision: Decision, mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }
    match decision {
        Decision::Skip => println!("{}", Theme::muted(&format!("Skipped {}.", category))),
        _ => println!("{}", Theme::muted(&format!("Kept {} files.", category))),
    }
}

pub fn print_category_cleaned(
    category: &str,
    result: &BatchDeleteResult,
    total_size: u64,
    mode: OutputMode,
) {
    if mode == OutputMode::Quiet {
        return;
    }

    if result.failures.is_empty() {
        println!(
            "{} Deleted {} {} files ({})",
            Theme::success("[OK]"),
            result.deleted(),
            category,
            format_size(total_size)
        );
    } else {
        println!(
            "{} Deleted {} {} files, {} failed",
            Theme::warning_msg("[WARNING]"),
            result.deleted(),
            category,
            Theme::error(&result.failures.len().to_string())
        );
    }

    if mode != OutputMode::Normal {
        println!(
            "  {}",
            Theme::muted(&format!(
                "{} files, {} directories",
                result.files_deleted, result.dirs_deleted
            ))
        );
    }
}

pub fn print_summary(report: &RunReport, mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }

    let stats = &report.stats;
    println!();
    println!("{}", Theme::header("Cleanup Summary:"));
    println!("{}", Theme::divider(40));
    println!("  Files deleted: {}", Theme::value(&stats.files_deleted.to_string()));
    println!(
        "  Directories deleted: {}",
        Theme::value(&stats.dirs_deleted.to_string())
    );
    println!("  Space freed: {}", Theme::size(&format_size(stats.bytes_freed)));

    if report.total_failures() > 0 {
        println!(
            "  Failed: {}",
            Theme::error(&report.total_failures().to_string())
        );
    }

    if report.dry_run {
        println!(
            "  Total files that would be deleted: {}",
            Theme::value(&report.total_items_found().to_string())
        );
        println!(
            "  Total space that would be freed: {}",
            Theme::size(&format_size(report.total_size_found()))
        );
    }
}

/// One line per category: name, match count and size
pub fn print_category_list(plans: &[CategoryPlan]) {
    println!("Available cleanup categories:");
    for plan in plans {
        println!(
            "  {:12} - {:3} items ({})",
            plan.name,
            plan.len(),
            format_size(plan.total_size)
        );
    }
}

pub fn print_unknown_categories(invalid: &[String], available: &[String]) {
    eprintln!(
        "{} Unknown categories: {}",
        Theme::error("Error:"),
        invalid.join(", ")
    );
    eprintln!("Available categories: {}", available.join(", "));
}
