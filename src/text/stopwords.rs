// Stop-word sets excluded from vocabulary matching.
//
// The default set is the short fixed list the comparison tool has always
// used. An extended English list from the `stop-words` crate is available for
// callers that want less noise in the match report. Both are built once and
// shared process-wide; neither changes after construction.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};

/// The default stop words.
pub const MINIMAL_STOP_WORDS: &[&str] = &[
    "the", "and", "a", "an", "of", "in", "on", "at", "to", "for", "with", "is", "it", "by", "this",
    "that", "from",
];

static MINIMAL: LazyLock<StopWordSet> =
    LazyLock::new(|| StopWordSet::from_words(MINIMAL_STOP_WORDS.iter().copied()));

static ENGLISH: LazyLock<StopWordSet> = LazyLock::new(|| {
    let words: Vec<String> = get(LANGUAGE::English);
    StopWordSet::from_words(
        words
            .iter()
            .map(String::as_str)
            .chain(MINIMAL_STOP_WORDS.iter().copied()),
    )
});

/// An immutable set of normalized words excluded from matching.
#[derive(Debug, Clone)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    fn from_words<'a>(words: impl Iterator<Item = &'a str>) -> Self {
        Self {
            words: words.map(|w| w.to_lowercase()).collect(),
        }
    }

    /// The fixed 17-word default set.
    pub fn minimal() -> &'static StopWordSet {
        &MINIMAL
    }

    /// The `stop-words` crate's English list plus the default set.
    pub fn english() -> &'static StopWordSet {
        &ENGLISH
    }

    /// Never true for the empty string.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Drop stop words from a normalized sequence, keeping order.
    pub fn filter(&self, normalized: Vec<String>) -> Vec<String> {
        normalized.into_iter().filter(|w| !self.contains(w)).collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Which stop-word set a comparison should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StopWordList {
    #[default]
    Minimal,
    English,
}

impl StopWordList {
    pub fn set(self) -> &'static StopWordSet {
        match self {
            StopWordList::Minimal => StopWordSet::minimal(),
            StopWordList::English => StopWordSet::english(),
        }
    }
}

impl FromStr for StopWordList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(StopWordList::Minimal),
            "english" => Ok(StopWordList::English),
            other => Err(format!("unknown stop-word list '{other}' (expected minimal or english)")),
        }
    }
}

impl fmt::Display for StopWordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopWordList::Minimal => f.write_str("minimal"),
            StopWordList::English => f.write_str("english"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_set_is_exact() {
        let set = StopWordSet::minimal();
        assert_eq!(set.len(), 17);
        assert!(set.contains("the"));
        assert!(set.contains("from"));
        assert!(!set.contains("quick"));
        assert!(!set.contains(""));
    }

    #[test]
    fn test_english_is_a_superset() {
        let english = StopWordSet::english();
        for w in MINIMAL_STOP_WORDS {
            assert!(english.contains(w), "missing {w}");
        }
        assert!(english.len() > StopWordSet::minimal().len());
    }

    #[test]
    fn test_filter_keeps_order_and_empty_strings() {
        let words = vec!["the".to_string(), "".to_string(), "fox".to_string(), "a".to_string()];
        assert_eq!(StopWordSet::minimal().filter(words), vec!["", "fox"]);
    }

    #[test]
    fn test_parse_list_name() {
        assert_eq!("English".parse::<StopWordList>().unwrap(), StopWordList::English);
        assert_eq!(" minimal ".parse::<StopWordList>().unwrap(), StopWordList::Minimal);
        assert!("klingon".parse::<StopWordList>().is_err());
    }
}
