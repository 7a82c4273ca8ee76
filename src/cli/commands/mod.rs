//! Command implementations for the weft CLI.

pub mod locales;
pub mod translate;

use crate::issues::Issue;

/// What a command produced, for reporting and exit-status decisions.
#[derive(Debug, Default)]
pub struct CommandResult {
    pub issues: Vec<Issue>,
    pub error_count: usize,
    pub source_files: usize,
    pub rewritten_files: usize,
    pub locale_count: usize,
}
