// TF-IDF cosine similarity between two texts.
//
// Follows the usual vectorizer conventions so scores line up with what people
// expect from off-the-shelf tooling:
//   - lowercase, tokens are runs of 2+ word characters (`\b\w\w+\b`)
//   - raw term counts as TF
//   - smoothed IDF: ln((1 + n) / (1 + df)) + 1
//   - each vector L2-normalized, similarity is their dot product
//
// No stop-word filtering happens here; IDF already downweights words that
// appear in both documents.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Sparse term-weight vector. Ordered so that sums are reproducible.
pub type TermVector = BTreeMap<String, f64>;

/// Lowercased term counts for one text.
pub fn term_counts(text: &str) -> BTreeMap<String, usize> {
    let lower = text.to_lowercase();
    let mut counts = BTreeMap::new();
    for m in TOKEN_PATTERN.find_iter(&lower) {
        *counts.entry(m.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Fit IDF over `texts` and return one L2-normalized TF-IDF vector per text.
pub fn tfidf_vectors(texts: &[&str]) -> Vec<TermVector> {
    let counts: Vec<BTreeMap<String, usize>> = texts.iter().map(|t| term_counts(t)).collect();

    let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in &counts {
        for term in doc.keys() {
            *document_frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let n = texts.len() as f64;
    counts
        .iter()
        .map(|doc| {
            let mut vector: TermVector = doc
                .iter()
                .map(|(term, &tf)| {
                    let df = document_frequency[term.as_str()] as f64;
                    let idf = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
                    (term.clone(), tf as f64 * idf)
                })
                .collect();

            let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for w in vector.values_mut() {
                    *w /= norm;
                }
            }
            vector
        })
        .collect()
}

/// Cosine of two L2-normalized vectors, clamped to [0, 1].
///
/// Summation runs over shared terms in key order, so `cosine(a, b)` and
/// `cosine(b, a)` are bit-for-bit equal. Vectors with no shared terms score
/// positive zero.
pub fn cosine(a: &TermVector, b: &TermVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    // An empty f64 `sum()` is -0.0, which would print as "-0.0".
    let dot = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .fold(0.0_f64, |acc, p| acc + p);
    if dot <= 0.0 {
        return 0.0;
    }
    dot.min(1.0)
}

/// TF-IDF cosine similarity of two texts, in [0, 1].
///
/// Texts with no scorable terms score 0.0; identical term distributions
/// score exactly 1.0.
pub fn similarity(text1: &str, text2: &str) -> f64 {
    let vectors = tfidf_vectors(&[text1, text2]);
    cosine(&vectors[0], &vectors[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_counts_pattern() {
        let counts = term_counts("A cat, the CAT; a_b x 42 café-au-lait");
        assert_eq!(counts.get("cat"), Some(&2));
        assert_eq!(counts.get("the"), Some(&1));
        assert_eq!(counts.get("a_b"), Some(&1));
        assert_eq!(counts.get("42"), Some(&1));
        assert_eq!(counts.get("café"), Some(&1));
        assert!(!counts.contains_key("a"));
        assert!(!counts.contains_key("x"));
    }

    #[test]
    fn test_vectors_are_unit_length() {
        for v in tfidf_vectors(&["alpha beta beta gamma", "beta delta"]) {
            let norm: f64 = v.values().map(|w| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_shared_terms_get_lower_idf() {
        let v = tfidf_vectors(&["shared only1", "shared only2"]);
        assert!(v[0]["shared"] < v[0]["only1"]);
    }

    #[test]
    fn test_known_value() {
        // idf(shared) = 1, idf(unique) = ln(1.5) + 1
        let u = 1.5f64.ln() + 1.0;
        let expected = 1.0 / (1.0 + u * u);
        let score = similarity("shared one", "shared two");
        assert!((score - expected).abs() < 1e-12, "got {score}, want {expected}");
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let a = "The borrow checker enforces ownership rules at compile time";
        let b = "Ownership and borrowing replace a garbage collector at runtime";
        let ab = similarity(a, b);
        assert_eq!(ab, similarity(b, a));
        assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn test_identical_and_disjoint() {
        let t = "same words in the same order";
        assert_eq!(similarity(t, t), 1.0);
        assert_eq!(similarity("apples oranges", "trucks planes"), 0.0);
        assert_eq!(similarity("a b c", "a b c"), 0.0);
    }

    #[test]
    fn test_disjoint_is_positive_zero() {
        let score = similarity("apples oranges", "trucks planes");
        assert!(!score.is_sign_negative());
        assert_eq!(crate::output::report::format_score(score), "0.0");

        let a = tfidf_vectors(&["left side", "right hand"]);
        assert!(!cosine(&a[0], &a[1]).is_sign_negative());
    }
}
