//! Command feature handlers.
//!
//! Each module owns one command feature.

pub mod clean_command;
pub mod config_command;
pub mod list_command;
