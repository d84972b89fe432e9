//! CSS identifier escaping.
//!
//! Ids and class names go into selectors verbatim, so anything outside the
//! identifier alphabet must be escaped first (CSSOM "serialize an
//! identifier", the same transform `CSS.escape` applies). Skipping this is a
//! correctness bug: a generated selector with a raw `1` or space in an id is
//! not valid selector syntax.

use std::fmt::Write;

/// Escape an arbitrary string so it can be used as a CSS identifier.
pub fn escape_ident(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());

    for (i, &c) in chars.iter().enumerate() {
        let code = c as u32;
        if code == 0 {
            out.push('\u{FFFD}');
        } else if (0x01..=0x1f).contains(&code) || code == 0x7f {
            push_hex_escape(&mut out, code);
        } else if c.is_ascii_digit() && (i == 0 || (i == 1 && chars[0] == '-')) {
            // An identifier cannot start with a digit, nor with `-` + digit.
            push_hex_escape(&mut out, code);
        } else if c == '-' && chars.len() == 1 {
            out.push('\\');
            out.push(c);
        } else if code >= 0x80 || c == '-' || c == '_' || c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }

    out
}

fn push_hex_escape(out: &mut String, code: u32) {
    // Infallible for String targets.
    let _ = write!(out, "\\{:x} ", code);
}

#[cfg(test)]
mod tests {
    use super::escape_ident;

    #[test]
    fn identifier_chars_pass_through() {
        assert_eq!(escape_ident("item-1"), "item-1");
        assert_eq!(escape_ident("_private"), "_private");
        assert_eq!(escape_ident("içone"), "içone");
    }

    #[test]
    fn leading_digit_is_hex_escaped() {
        assert_eq!(escape_ident("1st"), "\\31 st");
        assert_eq!(escape_ident("-2nd"), "-\\32 nd");
        // A digit later on is fine.
        assert_eq!(escape_ident("a1"), "a1");
    }

    #[test]
    fn punctuation_is_backslash_escaped() {
        assert_eq!(escape_ident("a b"), "a\\ b");
        assert_eq!(escape_ident("a.b:c"), "a\\.b\\:c");
        assert_eq!(escape_ident("odd#id"), "odd\\#id");
    }

    #[test]
    fn lone_hyphen_is_escaped() {
        assert_eq!(escape_ident("-"), "\\-");
        assert_eq!(escape_ident("-a"), "-a");
    }

    #[test]
    fn controls_and_nul() {
        assert_eq!(escape_ident("\u{1}x"), "\\1 x");
        assert_eq!(escape_ident("a\u{7f}"), "a\\7f ");
        assert_eq!(escape_ident("\0"), "\u{FFFD}");
    }
}
