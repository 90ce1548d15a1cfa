//! Text normalization for classification input.
//!
//! The zero-shot classification service has a practical input ceiling, so
//! document text is whitespace-collapsed and truncated before it is sent.
//! Summarization and question answering always receive the original text.

use lazy_static::lazy_static;
use regex::Regex;

/// Maximum number of characters forwarded to the classification service.
pub const CLASSIFIER_INPUT_LIMIT: usize = 1500;

lazy_static! {
    /// Any maximal run of whitespace (spaces, tabs, newlines)
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse whitespace runs to single spaces and truncate to
/// [`CLASSIFIER_INPUT_LIMIT`] characters.
///
/// Leading/trailing whitespace is collapsed, not stripped, and truncation
/// counts characters rather than bytes, so multi-byte text is never split
/// mid-character. Total function: defined for any input, including empty.
pub fn normalize_for_classification(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    collapsed.chars().take(CLASSIFIER_INPUT_LIMIT).collect()
}
