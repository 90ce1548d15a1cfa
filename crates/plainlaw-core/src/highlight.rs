//! Keyword highlighting in summary text.
//!
//! Each keyword is applied in rank order as its own case-insensitive
//! whole-word pattern, wrapping matches in `<mark>` tags while keeping the
//! matched casing. Keywords are applied sequentially over the running
//! result, so a later keyword can match text a prior keyword's markup
//! introduced (overlapping keywords double-wrap). That compounding is part
//! of the contract and is pinned by tests.

use regex::Regex;

/// Wrap every whole-word occurrence of each keyword in `<mark>` tags.
///
/// Keywords match literally (metacharacters escaped) and case-insensitively.
/// Text outside matches is untouched; no keywords means the text comes back
/// unchanged.
pub fn highlight_keywords(text: &str, keywords: &[String]) -> String {
    let mut highlighted = text.to_string();
    for keyword in keywords {
        let pattern = format!(r"(?i)\b({})\b", regex::escape(keyword));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        highlighted = re.replace_all(&highlighted, "<mark>$1</mark>").into_owned();
    }
    highlighted
}
