//! Category cleaning feature.
//!
//! This module owns planning a category (scan + size snapshot), deciding what to
//! do with it, and running the selected categories in config order.

use super::batch_deletion::delete_batch;
use super::run_context::{CleanupStats, RunContext};
use crate::error::CleanupError;
use crate::output::{self, OutputMode};
use crate::progress;
use crate::prompt::{Decision, DecisionSource};
use crate::scanner::MatchedEntry;
use crate::size;
use std::path::PathBuf;

/// Categories with more entries than this get a progress bar while deleting
const PROGRESS_BAR_MIN_ENTRIES: usize = 10;

/// A matched entry together with its size measured before any deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub entry: MatchedEntry,
    pub size: u64,
}

/// Everything a category would delete, sized up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPlan {
    pub name: String,
    pub entries: Vec<PlannedEntry>,
    pub total_size: u64,
    /// Selected directories holding protected paths, with how many each holds
    pub holds_protected: Vec<(PathBuf, usize)>,
}

impl CategoryPlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// What happened to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryAction {
    /// Nothing matched
    Empty,
    /// Reported only
    DryRun,
    /// The user did not confirm
    Skipped(Decision),
    /// Deletion ran; `failed` entries were left in place
    Cleaned { deleted: usize, failed: usize },
}

#[derive(Debug, Clone)]
pub struct CategoryOutcome {
    pub plan: CategoryPlan,
    pub action: CategoryAction,
}

impl CategoryOutcome {
    /// Pre-deletion size of the category, whatever the action was
    pub fn reported_size(&self) -> u64 {
        self.plan.total_size
    }
}

/// Result of a whole run, for the summary
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcomes: Vec<CategoryOutcome>,
    pub stats: CleanupStats,
    pub dry_run: bool,
}

impl RunReport {
    pub fn total_items_found(&self) -> usize {
        self.outcomes.iter().map(|o| o.plan.len()).sum()
    }

    pub fn total_size_found(&self) -> u64 {
        self.outcomes.iter().map(|o| o.reported_size()).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.action {
                CategoryAction::Cleaned { failed, .. } => failed,
                _ => 0,
            })
            .sum()
    }
}

/// Find and size a category's entries without touching the filesystem
pub fn plan_category(ctx: &RunContext<'_>, name: &str, patterns: &[String]) -> CategoryPlan {
    let scanner = ctx.scanner();
    let entries: Vec<PlannedEntry> = scanner
        .find_patterns(patterns)
        .into_iter()
        .map(|entry| {
            let size = size::size_of(&entry.path);
            PlannedEntry { entry, size }
        })
        .collect();

    let holds_protected: Vec<(PathBuf, usize)> = entries
        .iter()
        .filter(|p| p.entry.is_dir())
        .filter_map(|p| match scanner.protected_descendants(&p.entry.path) {
            0 => None,
            n => Some((p.entry.relative.clone(), n)),
        })
        .collect();

    let total_size = entries.iter().map(|e| e.size).sum();
    tracing::debug!(category = name, items = entries.len(), bytes = total_size, "planned");

    CategoryPlan {
        name: name.to_string(),
        entries,
        total_size,
        holds_protected,
    }
}

/// Plan every configured category, in config order
pub fn plan_all(ctx: &RunContext<'_>) -> Vec<CategoryPlan> {
    ctx.config
        .cleanup_patterns
        .iter()
        .map(|(name, patterns)| plan_category(ctx, name, patterns))
        .collect()
}

/// Plan a category, then report it, ask about it, or delete it
///
/// Dry runs never mutate anything. Interactive runs delete only after an
/// explicit affirmative. Individual deletion failures are printed as warnings
/// and do not stop the category.
pub fn clean_category(
    ctx: &mut RunContext<'_>,
    name: &str,
    patterns: &[String],
    decisions: &mut dyn DecisionSource,
) -> CategoryOutcome {
    let mode = ctx.mode();
    let plan = plan_category(ctx, name, patterns);

    if plan.is_empty() {
        output::print_nothing_found(name, mode);
        return CategoryOutcome {
            plan,
            action: CategoryAction::Empty,
        };
    }

    output::print_category_plan(&plan, mode);

    if ctx.options.dry_run {
        output::print_dry_run_category(&plan, mode);
        return CategoryOutcome {
            plan,
            action: CategoryAction::DryRun,
        };
    }

    if ctx.options.interactive {
        let decision = decisions.decide(name, &plan.entries, plan.total_size);
        if !decision.proceeds() {
            output::print_category_skipped(name, decision, mode);
            return CategoryOutcome {
                plan,
                action: CategoryAction::Skipped(decision),
            };
        }
    }

    let backup_root = if ctx.options.backup {
        Some(ctx.backup_root())
    } else {
        None
    };

    let progress = if mode != OutputMode::Quiet && plan.len() > PROGRESS_BAR_MIN_ENTRIES {
        Some(progress::deletion_bar(name, plan.len() as u64))
    } else {
        None
    };

    let result = delete_batch(
        &plan.entries,
        backup_root.as_deref(),
        &mut ctx.stats,
        progress.as_ref(),
    );

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    for failure in &result.failures {
        output::warn(mode, &failure.to_string());
    }
    output::print_category_cleaned(name, &result, plan.total_size, mode);

    CategoryOutcome {
        plan,
        action: CategoryAction::Cleaned {
            deleted: result.deleted(),
            failed: result.failures.len(),
        },
    }
}

/// Clean the requested categories (all of them when `requested` is empty)
///
/// Unknown category names fail the run before anything is scanned or deleted.
pub fn run_cleanup(
    ctx: &mut RunContext<'_>,
    requested: &[String],
    decisions: &mut dyn DecisionSource,
) -> Result<RunReport, CleanupError> {
    let config = ctx.config;
    let categories = config.select_categories(requested)?;

    output::print_banner(ctx.root(), &ctx.options);

    let mut outcomes = Vec::with_capacity(categories.len());
    for name in &categories {
        let patterns = config
            .cleanup_patterns
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        outcomes.push(clean_category(ctx, name, patterns, decisions));
    }

    Ok(RunReport {
        outcomes,
        stats: ctx.stats,
        dry_run: ctx.options.dry_run,
    })
}
