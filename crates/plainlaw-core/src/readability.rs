//! Flesch-Kincaid readability scoring with qualitative bands.
//!
//! The grade estimates the US school grade needed to follow a text. The
//! service reports it as a band plus the numeric grade, and falls back to
//! "N/A" for degenerate input instead of failing the request.

use lazy_static::lazy_static;
use regex::Regex;

/// Grades below this read as "Very Easy"
const VERY_EASY_BELOW: f64 = 6.0;
/// Grades below this (and at least `VERY_EASY_BELOW`) read as "Easy"
const EASY_BELOW: f64 = 9.0;
/// Grades below this (and at least `EASY_BELOW`) read as "Medium"
const MEDIUM_BELOW: f64 = 12.0;

lazy_static! {
    /// Words are maximal alphabetic runs
    static ref WORD: Regex = Regex::new(r"[A-Za-z]+").unwrap();

    /// Sentence terminators (runs collapse to one boundary)
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]+").unwrap();
}

/// Count syllables in a single word by vowel-group counting.
///
/// Consecutive vowels (`aeiouy`) form one group; a trailing silent `e` is
/// discounted unless the word ends in `le`. Every word counts at least one
/// syllable.
fn count_syllables(word: &str) -> usize {
    let lowered = word.to_lowercase();
    let mut groups = 0;
    let mut prev_was_vowel = false;
    for c in lowered.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_was_vowel {
            groups += 1;
        }
        prev_was_vowel = is_vowel;
    }
    if groups > 1 && lowered.ends_with('e') && !lowered.ends_with("le") {
        groups -= 1;
    }
    groups.max(1)
}

/// Compute the Flesch-Kincaid grade for `text`.
///
/// Returns `None` when the text contains no words, the one degenerate case
/// the formula cannot express.
pub fn flesch_kincaid_grade(text: &str) -> Option<f64> {
    let words: Vec<&str> = WORD.find_iter(text).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return None;
    }

    // A segment between terminators counts as a sentence if it holds a word;
    // text with words but no terminator is one sentence.
    let sentences = SENTENCE_END
        .split(text)
        .filter(|segment| WORD.is_match(segment))
        .count()
        .max(1);

    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let word_count = words.len() as f64;
    let grade = 0.39 * (word_count / sentences as f64) + 11.8 * (syllables as f64 / word_count)
        - 15.59;
    Some(grade)
}

/// Map a grade to its qualitative band.
pub fn readability_band(grade: f64) -> &'static str {
    if grade < VERY_EASY_BELOW {
        "Very Easy"
    } else if grade < EASY_BELOW {
        "Easy"
    } else if grade < MEDIUM_BELOW {
        "Medium"
    } else {
        "Difficult"
    }
}

/// Render the readability of `text` as `"<band> (Grade <g>)"`, or `"N/A"`
/// when the grade cannot be computed.
pub fn readability_summary(text: &str) -> String {
    match flesch_kincaid_grade(text) {
        Some(grade) => format!("{} (Grade {:.1})", readability_band(grade), grade),
        None => "N/A".to_string(),
    }
}
