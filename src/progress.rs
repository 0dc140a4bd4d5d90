//! Progress display while a category is being deleted

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str = "{spinner:.green} {prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}";

/// Bar counting deleted entries of one category
///
/// The message slot shows the entry currently being removed.
pub fn deletion_bar(category: &str, entries: u64) -> ProgressBar {
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");

    let pb = ProgressBar::new(entries).with_style(style);
    pb.set_prefix(category.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
