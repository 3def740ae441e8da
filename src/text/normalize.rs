// Word normalization for matching.
//
// A normalized token is only ever used as a lookup key. The raw token is what
// gets displayed and re-emitted, so nothing here mutates its input.

/// Characters trimmed from both ends of a token after lowercasing.
pub const STRIP_CHARS: &[char] = &['.', ',', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\''];

/// Lowercase a raw token and trim surrounding punctuation.
///
/// Total and idempotent: every token maps to exactly one normalized form,
/// which may be empty (e.g. `"..."` or `"()"`).
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().trim_matches(STRIP_CHARS).to_string()
}

/// Normalize a token sequence, one output per input, in order.
pub fn normalize_all<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens.iter().map(|t| normalize(t.as_ref())).collect()
}
