// Match engine — shared vocabulary and TF-IDF similarity between documents.
//
// Two independent pipelines that only share the extractor:
//   common: normalize -> filter stop words -> set intersection -> counts
//   tfidf:  raw extracted text -> TF-IDF vectors -> cosine similarity

pub mod common;
pub mod tfidf;

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::error::{CompareError, Result};
use crate::extract::Document;

pub use common::{match_words, MatchOptions};

/// The unique filtered, normalized words of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordIndex {
    words: HashSet<String>,
}

impl WordIndex {
    pub fn from_filtered<S: AsRef<str>>(filtered: &[S]) -> Self {
        Self {
            words: filtered.iter().map(|w| w.as_ref().to_string()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words present in both indexes, sorted.
    pub fn intersection(&self, other: &WordIndex) -> BTreeSet<String> {
        self.words.intersection(&other.words).cloned().collect()
    }
}

/// How many times a common word occurs in the first document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Result of set-intersection matching for one document pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Normalized words found in both documents.
    pub common: BTreeSet<String>,
    /// Counts over the first document, highest first. Equal counts keep the
    /// order in which the words first appear in the first document.
    pub frequencies: Vec<WordCount>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.common.is_empty()
    }

    /// Total number of matched token occurrences in the first document.
    pub fn total_matches(&self) -> usize {
        self.frequencies.iter().map(|wc| wc.count).sum()
    }
}

/// TF-IDF cosine similarity between two extracted documents.
///
/// Fails with `EmptyDocument` when either side extracted no text at all.
pub fn compute_similarity(doc1: &Document, doc2: &Document) -> Result<f64> {
    for doc in [doc1, doc2] {
        if doc.is_empty() {
            return Err(CompareError::EmptyDocument {
                path: doc.path.clone(),
            });
        }
    }
    Ok(tfidf::similarity(&doc1.text(), &doc2.text()))
}
