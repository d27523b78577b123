//! Keyword Extractor: single-document TF-IDF over a job description.
//!
//! With one document the IDF factor is constant, so the score is the term
//! count L2-normalised over the document vector. Ranking is descending score,
//! ties broken lexicographically.

pub mod stop_words;

use std::collections::BTreeMap;

use serde::Serialize;

use self::stop_words::is_stop_word;

/// Upper bound on the number of keywords fed into the prompt.
pub const DEFAULT_MAX_TERMS: usize = 15;

/// A single extracted term with its ranking weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredKeyword {
    pub term: String,
    pub count: u32,
    /// L2-normalised term frequency in 0.0..=1.0
    pub weight: f64,
}

/// Ordered, de-duplicated keywords drawn from one document.
/// Weights rank the terms; only the terms travel onward into the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeywordSet {
    keywords: Vec<ScoredKeyword>,
}

impl KeywordSet {
    pub fn terms(&self) -> Vec<&str> {
        self.keywords.iter().map(|k| k.term.as_str()).collect()
    }

    pub fn scored(&self) -> &[ScoredKeyword] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Comma-space joined display string used in the prompt.
    pub fn display(&self) -> String {
        self.terms().join(", ")
    }
}

#[cfg(test)]
impl FromIterator<String> for KeywordSet {
    /// Builds an unweighted set, keeping the first occurrence of each term.
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut keywords: Vec<ScoredKeyword> = Vec::new();
        for term in iter {
            if keywords.iter().all(|k| k.term != term) {
                keywords.push(ScoredKeyword {
                    term,
                    count: 1,
                    weight: 0.0,
                });
            }
        }
        KeywordSet { keywords }
    }
}

/// Extracts up to `max_terms` keywords from `text`.
///
/// Empty input, or input made only of stop words and single characters,
/// yields an empty set.
pub fn extract_keywords(text: &str, max_terms: usize) -> KeywordSet {
    if max_terms == 0 {
        return KeywordSet::default();
    }

    // BTreeMap keeps the vocabulary in lexicographic order, which is the tie-break.
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for token in tokenize(text) {
        if !is_stop_word(&token) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    if counts.is_empty() {
        return KeywordSet::default();
    }

    let norm = counts
        .values()
        .map(|&c| f64::from(c) * f64::from(c))
        .sum::<f64>()
        .sqrt();

    let mut ranked: Vec<ScoredKeyword> = counts
        .into_iter()
        .map(|(term, count)| ScoredKeyword {
            weight: f64::from(count) / norm,
            term,
            count,
        })
        .collect();

    // Stable sort on count preserves the lexicographic order among ties.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(max_terms);

    KeywordSet { keywords: ranked }
}

/// Lower-cases and splits on anything that isn't a word character.
/// Tokens shorter than two characters are dropped.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|raw| raw.chars().count() >= 2)
        .map(str::to_lowercase)
}
