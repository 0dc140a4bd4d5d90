//! Interactive confirmation for each category
//!
//! The cleaner only sees the [`DecisionSource`] trait, so tests can script
//! answers instead of reading a terminal.

use crate::cleaner::PlannedEntry;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Delete the category's entries
    Proceed,
    /// Explicit `s`: leave the category alone
    Skip,
    /// Any other answer; has the same effect as [`Decision::Skip`]
    Decline,
}

impl Decision {
    pub fn proceeds(self) -> bool {
        self == Decision::Proceed
    }
}

/// Map a typed answer to a decision; only `y` proceeds
pub fn parse_decision(input: &str) -> Decision {
    match input.trim().to_lowercase().as_str() {
        "y" => Decision::Proceed,
        "s" => Decision::Skip,
        _ => Decision::Decline,
    }
}

pub trait DecisionSource {
    fn decide(&mut self, category: &str, entries: &[PlannedEntry], total_size: u64) -> Decision;
}

/// Asks on stdout and reads the answer from stdin
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl DecisionSource for StdinPrompt {
    fn decide(&mut self, category: &str, _entries: &[PlannedEntry], _total_size: u64) -> Decision {
        print!("Delete these {} files? [y/N/s(kip)]: ", category);

        match read_line_from_stdin() {
            Ok(line) => parse_decision(&line),
            Err(e) => {
                tracing::debug!(error = %e, "could not read answer, declining");
                Decision::Decline
            }
        }
    }
}

/// Read one line from stdin after flushing the pending prompt
fn read_line_from_stdin() -> io::Result<String> {
    io::stdout().flush()?;

    let mut input = String::new();
    let stdin = io::stdin();
    let mut handle = stdin.lock();
    if handle.read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }

    Ok(input)
}

/// Replays a fixed list of decisions; declines once the list runs out
#[derive(Debug, Default)]
pub struct ScriptedDecisions {
    answers: VecDeque<Decision>,
    asked: Vec<String>,
}

impl ScriptedDecisions {
    pub fn new(answers: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Categories that were asked about, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl DecisionSource for ScriptedDecisions {
    fn decide(&mut self, category: &str, _entries: &[PlannedEntry], _total_size: u64) -> Decision {
        self.asked.push(category.to_string());
        self.answers.pop_front().unwrap_or(Decision::Decline)
    }
}
