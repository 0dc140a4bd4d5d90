//! tidyup library crate
//!
//! Pattern-based cleanup of build artifacts and caches in a project tree. The
//! binary is a thin CLI over this API: load a [`config::Config`], build a
//! [`cleaner::RunContext`] and call [`cleaner::run_cleanup`].

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod scanner;
pub mod size;
pub mod theme;
