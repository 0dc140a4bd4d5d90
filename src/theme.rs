//! Terminal styling for CLI output
//!
//! Colors are turned off automatically when `NO_COLOR` is set or stdout is not
//! a terminal (handled by `colored`).

use colored::Colorize;

pub struct Theme;

impl Theme {
    pub fn header(text: &str) -> String {
        text.bold().to_string()
    }

    pub fn category(text: &str) -> String {
        text.bold().cyan().to_string()
    }

    pub fn value(text: &str) -> String {
        text.bold().to_string()
    }

    pub fn size(text: &str) -> String {
        text.yellow().to_string()
    }

    pub fn success(text: &str) -> String {
        text.green().to_string()
    }

    pub fn warning_msg(text: &str) -> String {
        text.yellow().bold().to_string()
    }

    pub fn error(text: &str) -> String {
        text.red().to_string()
    }

    pub fn muted(text: &str) -> String {
        text.dimmed().to_string()
    }

    pub fn divider(width: usize) -> String {
        "-".repeat(width).dimmed().to_string()
    }
}
