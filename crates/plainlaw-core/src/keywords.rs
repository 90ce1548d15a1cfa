//! Single-document TF-IDF keyword extraction.
//!
//! The document is treated as the sole member of its corpus, so smooth IDF
//! degenerates to 1.0 for every term and the TF-IDF weight reduces to raw
//! term frequency, L2-normalized across the document's vocabulary. Stop
//! words are removed before scoring; ranking is score-descending with an
//! alphabetical tie-break so identical input always yields identical output.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;

/// Number of keywords returned when the caller does not ask otherwise.
pub const DEFAULT_KEYWORD_COUNT: usize = 5;

lazy_static! {
    /// Tokens are maximal runs of two or more word characters; single-letter
    /// tokens never score.
    static ref TOKEN: Regex = Regex::new(r"\b\w\w+\b").unwrap();

    /// Standard English stop-word list.
    static ref STOP_WORDS: HashSet<&'static str> = [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
        "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
        "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
        "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
        "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
        "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
        "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
        "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
        "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its",
        "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many",
        "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most",
        "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
        "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
        "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only",
        "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
        "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re", "same",
        "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she", "should",
        "show", "side", "since", "sincere", "six", "sixty", "so", "some", "somehow",
        "someone", "something", "sometime", "sometimes", "somewhere", "still", "such",
        "system", "take", "ten", "than", "that", "the", "their", "them", "themselves",
        "then", "thence", "there", "thereafter", "thereby", "therefore", "therein",
        "thereupon", "these", "they", "thick", "thin", "third", "this", "those", "though",
        "three", "through", "throughout", "thru", "thus", "to", "together", "too", "top",
        "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
        "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
        "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
        "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
        "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
        "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect();
}

/// A vocabulary term with its normalized importance score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTerm {
    pub term: String,
    pub score: f64,
}

/// Score every non-stop-word term in `text` and rank best-first.
///
/// Ties in score order alphabetically by term. Returns an empty vector when
/// the text has no scorable vocabulary.
pub fn rank_terms(text: &str) -> Vec<ScoredTerm> {
    let lowered = text.to_lowercase();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in TOKEN.find_iter(&lowered) {
        let term = token.as_str();
        if STOP_WORDS.contains(term) {
            continue;
        }
        *counts.entry(term).or_insert(0) += 1;
    }

    if counts.is_empty() {
        return Vec::new();
    }

    // L2 norm over the document's term-frequency vector; monotonic, so it
    // never changes rank order but keeps scores comparable across documents.
    let norm = counts
        .values()
        .map(|&c| (c * c) as f64)
        .sum::<f64>()
        .sqrt();

    let mut terms: Vec<ScoredTerm> = counts
        .into_iter()
        .map(|(term, count)| ScoredTerm {
            term: term.to_string(),
            score: count as f64 / norm,
        })
        .collect();

    terms.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.term.cmp(&b.term))
    });

    terms
}

/// Return up to `limit` keywords for `text`, most important first.
///
/// Never fails: degenerate input (empty, all stop words, no tokens of two or
/// more characters) yields an empty vector.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    rank_terms(text)
        .into_iter()
        .take(limit)
        .map(|scored| scored.term)
        .collect()
}
