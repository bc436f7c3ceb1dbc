//! Case folding rules shared by index construction and query processing.
//!
//! Phrases keep their original casing for display, while the tree is keyed by
//! folded characters. Folding maps one character to exactly one character so
//! that a folded phrase has the same number of characters as the original,
//! and a prefix of the original folds to a prefix of the folded phrase.
//!
//! The same folding must be used when inserting phrases and when descending the
//! tree for a query, otherwise prefixes silently stop matching.

use std::cmp::Ordering;

/// Converts a character into its lower case variant, ignoring special casing
/// characters as described by
/// https://www.unicode.org/Public/UCD/latest/ucd/SpecialCasing.txt.
///
/// If the lower case form expands to several code points (e.g. 'İ'), the
/// character is returned unchanged. 'ẞ' (upper Eszett) folds to 'ß'.
///
/// This is deliberately not full lower-casing: context-free and one character
/// at a time. 'İ' stays 'İ' (so "İstanbul" does not match "i"), titlecase
/// digraphs such as 'ǅ' are kept, and 'Σ' always folds to 'σ', never to the
/// word-final 'ς'.
pub fn fold_char(c: char) -> char {
    if c.is_ascii() {
        c.to_ascii_lowercase()
    } else if c == 'ẞ' {
        'ß'
    } else if c.is_uppercase() {
        let mut lowercase_char = c.to_lowercase();
        match (lowercase_char.next(), lowercase_char.next()) {
            (Some(ch), None) => ch,
            _ => c,
        }
    } else {
        c
    }
}

/// Returns the folded characters of `text`, one per input character.
pub fn fold(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().map(fold_char)
}

/// Returns the folded form of `text` as a new string.
pub fn fold_to_string(text: &str) -> String {
    fold(text).collect()
}

/// Tests whether `text` starts with `prefix`, ignoring case differences.
///
/// An empty prefix matches any text.
pub fn starts_with(text: &str, prefix: &str) -> bool {
    let mut text = fold(text);
    for pch in fold(prefix) {
        match text.next() {
            Some(tch) if tch == pch => (),
            _ => return false,
        }
    }
    true
}

/// Compares two strings case-insensitively, falling back to a case-sensitive
/// comparison when they fold to the same characters.
pub fn compare(left: &str, right: &str) -> Ordering {
    fold(left)
        .cmp(fold(right))
        .then_with(|| left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_char() {
        assert_eq!(fold_char('A'), 'a');
        assert_eq!(fold_char('z'), 'z');
        assert_eq!(fold_char('1'), '1');
        assert_eq!(fold_char('?'), '?');

        assert_eq!(fold_char('Ñ'), 'ñ');
        assert_eq!(fold_char('É'), 'é');
        assert_eq!(fold_char('ẞ'), 'ß');
        assert_eq!(fold_char('ß'), 'ß');

        // 'İ' lowercases to two code points, so it stays as is.
        assert_eq!(fold_char('İ'), 'İ');
        assert!(!starts_with("İstanbul", "i"));
        assert!(starts_with("İstanbul", "İs"));

        // Titlecase is not uppercase; final sigma is not context-sensitive.
        assert_eq!(fold_char('ǅ'), 'ǅ');
        assert_eq!(fold_char('Σ'), 'σ');
        assert_eq!(fold_to_string("ΟΔΟΣ"), "οδοσ");
    }

    #[test]
    fn test_fold_preserves_char_count() {
        for text in ["How do I?", "CAFÉ", "İstanbul", "Straẞe", "你好"] {
            assert_eq!(fold(text).count(), text.chars().count(), "{text}");
        }
        assert_eq!(fold_to_string("How DO I"), "how do i");
    }

    #[test]
    fn test_starts_with() {
        assert!(starts_with("How do I reset my password?", "HOW"));
        assert!(starts_with("How do I reset my password?", "how do"));
        assert!(starts_with("CAFÉ au lait", "café"));
        assert!(starts_with("anything", ""));
        assert!(starts_with("", ""));
        assert!(!starts_with("how", "how do"));
        assert!(!starts_with("hello", "world"));
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare("abc", "ABD"), Ordering::Less);
        assert_eq!(compare("same", "same"), Ordering::Equal);
        assert_ne!(compare("abc", "ABC"), Ordering::Equal);

        let mut phrases = vec!["banana", "Apple", "apple", "Cherry"];
        phrases.sort_by(|a, b| compare(a, b));
        assert_eq!(phrases, vec!["Apple", "apple", "banana", "Cherry"]);
    }
}
