// Set-intersection matching with a frequency table.
//
// Both token sequences are normalized and stop-word filtered. The common set
// is the intersection of the two unique-word indexes; counts are taken over
// the first document's filtered sequence, not its index.

use std::collections::HashMap;

use tracing::debug;

use crate::text::normalize::normalize;
use crate::text::stopwords::StopWordSet;

use super::{MatchResult, WordCount, WordIndex};

/// Knobs for set-intersection matching.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    pub stop_words: &'static StopWordSet,
    /// Drop tokens that normalize to the empty string (pure punctuation).
    /// They are not stop words, so without this they can match each other.
    pub drop_empty: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            stop_words: StopWordSet::minimal(),
            drop_empty: false,
        }
    }
}

/// Normalize raw tokens and drop stop words, keeping order.
pub fn filter_tokens<S: AsRef<str>>(tokens: &[S], options: &MatchOptions) -> Vec<String> {
    tokens
        .iter()
        .map(|t| normalize(t.as_ref()))
        .filter(|w| !options.stop_words.contains(w))
        .filter(|w| !(options.drop_empty && w.is_empty()))
        .collect()
}

/// Find the words two token sequences share and count them in the first.
pub fn match_words<A, B>(tokens1: &[A], tokens2: &[B], options: &MatchOptions) -> MatchResult
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let filtered1 = filter_tokens(tokens1, options);
    let filtered2 = filter_tokens(tokens2, options);

    let common =
        WordIndex::from_filtered(&filtered1).intersection(&WordIndex::from_filtered(&filtered2));

    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut frequencies: Vec<WordCount> = Vec::new();
    for word in filtered1.iter().filter(|w| common.contains(*w)) {
        match position.get(word.as_str()) {
            Some(&i) => frequencies[i].count += 1,
            None => {
                position.insert(word, frequencies.len());
                frequencies.push(WordCount {
                    word: word.clone(),
                    count: 1,
                });
            }
        }
    }
    // stable: ties stay in first-occurrence order
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));

    debug!(
        filtered1 = filtered1.len(),
        filtered2 = filtered2.len(),
        common = common.len(),
        "Matched words"
    );

    MatchResult {
        common,
        frequencies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn test_quick_brown_scenario() {
        let result = match_words(
            &words("the quick brown fox"),
            &words("a quick brown dog"),
            &MatchOptions::default(),
        );
        let common: Vec<&str> = result.common.iter().map(String::as_str).collect();
        assert_eq!(common, vec!["brown", "quick"]);
        assert_eq!(
            result.frequencies,
            vec![
                WordCount { word: "quick".into(), count: 1 },
                WordCount { word: "brown".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_counts_come_from_first_document() {
        let result = match_words(
            &words("Rust, rust and RUST! borrow borrow checker"),
            &words("rust borrow"),
            &MatchOptions::default(),
        );
        assert_eq!(result.frequencies[0], WordCount { word: "rust".into(), count: 3 });
        assert_eq!(result.frequencies[1], WordCount { word: "borrow".into(), count: 2 });
        assert_eq!(result.total_matches(), 5);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let result = match_words(
            &words("zeta alpha mid alpha zeta"),
            &words("alpha zeta mid"),
            &MatchOptions::default(),
        );
        let order: Vec<&str> = result.frequencies.iter().map(|wc| wc.word.as_str()).collect();
        assert_eq!(order, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_empty_normalized_words_match_unless_dropped() {
        let a = words("hello ... world");
        let b = words("(!) world");

        let kept = match_words(&a, &b, &MatchOptions::default());
        assert!(kept.common.contains(""));

        let options = MatchOptions {
            drop_empty: true,
            ..MatchOptions::default()
        };
        let dropped = match_words(&a, &b, &options);
        assert!(!dropped.common.contains(""));
        assert!(dropped.common.contains("world"));
    }

    #[test]
    fn test_stop_words_never_match() {
        let result = match_words(
            &words("the and of"),
            &words("The AND of"),
            &MatchOptions::default(),
        );
        assert!(result.is_empty());
        assert!(result.frequencies.is_empty());
    }
}
