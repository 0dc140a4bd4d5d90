//! Deletion planning and execution
//!
//! A run goes category by category: scan and size the matches, then report,
//! ask, or delete them. Deletion backs entries up first when asked to and
//! keeps going past individual failures.

mod backup;
mod batch_deletion;
mod category_cleaning;
mod run_context;
mod single_deletion;

pub use backup::{backup_entry, backup_root_for, BACKUP_TIMESTAMP_FORMAT};
pub use batch_deletion::{delete_batch, BatchDeleteResult};
pub use category_cleaning::{
    clean_category, plan_all, plan_category, run_cleanup, CategoryAction, CategoryOutcome,
    CategoryPlan, PlannedEntry, RunReport,
};
pub use run_context::{CleanupStats, RunContext, RunOptions};
pub use single_deletion::delete_entry;
