//! Selection Controller
//!
//! Turns the directory into select options, filters them for the search
//! box and owns the current [`Selection`]. Every change replaces the
//! selection outright; a cleared control (`None`) is the empty selection.

use serde::Serialize;
use thiserror::Error;

use crate::directory::PrefectureDirectory;
use crate::model::{PrefCode, Selection};

/// One entry of the multi-select control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: PrefCode,
    pub label: String,
}

/// Errors resolving user-typed prefecture selectors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown prefecture: {0}")]
    Unknown(String),

    #[error("Ambiguous prefecture '{input}', matches: {}", .candidates.join(", "))]
    Ambiguous {
        input: String,
        candidates: Vec<String>,
    },
}

/// Owns the selected-code set
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// One option per directory entry, in directory order
    pub fn options(directory: &PrefectureDirectory) -> Vec<SelectOption> {
        directory
            .all()
            .iter()
            .map(|p| SelectOption {
                value: p.code,
                label: p.name.clone(),
            })
            .collect()
    }

    /// Options whose name contains `query` (case-insensitive) or whose code
    /// equals it. A blank query matches everything.
    pub fn search(directory: &PrefectureDirectory, query: &str) -> Vec<SelectOption> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Self::options(directory);
        }

        Self::options(directory)
            .into_iter()
            .filter(|o| o.label.to_lowercase().contains(&query) || o.value.to_string() == query)
            .collect()
    }

    /// Replace the selection with the control's new value
    pub fn on_change(&mut self, change: Option<Vec<PrefCode>>) -> &Selection {
        self.selection = Selection::new(change.unwrap_or_default());
        tracing::debug!(codes = ?self.selection.codes(), "Selection changed");
        &self.selection
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

/// Resolve codes or names typed by the user into prefecture codes
///
/// Numeric input is taken as a code as-is. Names match exactly first, then
/// by unique case-insensitive substring ("Tokyo" finds "Tokyo-to").
pub fn resolve_selectors<S: AsRef<str>>(
    directory: &PrefectureDirectory,
    inputs: &[S],
) -> Result<Vec<PrefCode>, SelectionError> {
    inputs
        .iter()
        .map(|input| resolve_one(directory, input.as_ref().trim()))
        .collect()
}

fn resolve_one(directory: &PrefectureDirectory, input: &str) -> Result<PrefCode, SelectionError> {
    if let Ok(code) = input.parse::<PrefCode>() {
        return Ok(code);
    }

    if let Some(p) = directory.all().iter().find(|p| p.name == input) {
        return Ok(p.code);
    }

    let needle = input.to_lowercase();
    let matches: Vec<_> = directory
        .all()
        .iter()
        .filter(|p| !needle.is_empty() && p.name.to_lowercase().contains(&needle))
        .collect();

    match matches.as_slice() {
        [only] => Ok(only.code),
        [] => Err(SelectionError::Unknown(input.to_string())),
        many => Err(SelectionError::Ambiguous {
            input: input.to_string(),
            candidates: many.iter().map(|p| p.name.clone()).collect(),
        }),
    }
}
