// Control-character stripping.
//
// XML 1.0 forbids most C0 control codes, and a single stray one from a PDF
// text layer is enough to make a generated .docx unreadable. Tab, line feed
// and carriage return are legal and are left alone.

/// True for the banned C0 codes: 0x00-0x08, 0x0B-0x0C, 0x0E-0x1F.
pub fn is_banned_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}'..='\u{0C}' | '\u{0E}'..='\u{1F}')
}

/// Remove banned control codes and leave every other character untouched.
pub fn strip_control_chars(text: &str) -> String {
    text.chars().filter(|c| !is_banned_control(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_only_banned_codes() {
        assert_eq!(strip_control_chars("a\u{0}b\u{8}c\u{1F}d"), "abcd");
        assert_eq!(strip_control_chars("tab\there\nnew\rline"), "tab\there\nnew\rline");
        assert_eq!(strip_control_chars("\u{B}\u{C}\u{E}"), "");
        assert_eq!(strip_control_chars("café ✓ \u{7F}"), "café ✓ \u{7F}");
    }

    #[test]
    fn test_every_banned_code_is_removed() {
        let all: String = (0u32..0x20).filter_map(char::from_u32).collect();
        let stripped = strip_control_chars(&all);
        assert_eq!(stripped, "\t\n\r");
        assert!(!stripped.chars().any(is_banned_control));
    }
}
