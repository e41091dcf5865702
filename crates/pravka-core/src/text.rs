//! Text processing utilities.
//!
//! Provides sentence and word splitting for Russian prose plus the
//! character/byte offset helpers shared by the scanner, classifier and
//! corrector. Every offset in the public API counts characters, never bytes.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of sentence terminators (including the ellipsis character).
static SENTENCE_TERMINATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?…]+").expect("valid regex"));

/// Persisted texts are capped at this many characters by storage collaborators.
pub const STORAGE_CHAR_LIMIT: usize = 10_000;

/// Split text into sentences on runs of `.`, `!`, `?` and `…`.
///
/// Segments that are empty after trimming are dropped. Abbreviations such as
/// `т.е.` and `и т.д.` count as boundaries.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_TERMINATORS
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether a character may appear inside a word: Cyrillic or Latin letter, or hyphen.
pub const fn is_word_char(ch: char) -> bool {
    matches!(ch, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё' | 'a'..='z' | 'A'..='Z' | '-')
}

/// Extract lowercase words: every non-letter (other than `-`) acts as a separator.
///
/// A dash typed as a free-standing `-` survives as a one-character word.
pub fn extract_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Whether a word contains at least one Cyrillic letter.
pub fn is_cyrillic(word: &str) -> bool {
    word.chars()
        .any(|c| matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё'))
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Convert a byte index (on a char boundary) into a character offset.
pub fn char_offset(text: &str, byte_idx: usize) -> usize {
    text[..byte_idx].chars().count()
}

/// Convert a character offset into a byte index.
///
/// Returns `None` when the offset lies past the end of the text; an offset
/// equal to the character length maps to `text.len()`.
pub fn byte_index(text: &str, char_offset: usize) -> Option<usize> {
    if char_offset == 0 {
        return Some(0);
    }
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(char_offset)
}

/// Convert a span counted in UTF-16 code units into a character span.
///
/// Characters outside the Basic Multilingual Plane (emoji, some symbols)
/// take two units each. A position inside such a pair rounds up to the next
/// character. Positions past the end stay past the end by the same surplus,
/// so bounds checks still reject them.
pub fn utf16_span(text: &str, offset: usize, length: usize) -> (usize, usize) {
    let start = utf16_to_char(text, offset);
    let end = utf16_to_char(text, offset.saturating_add(length));
    (start, end.saturating_sub(start))
}

fn utf16_to_char(text: &str, units: usize) -> usize {
    let mut seen = 0;
    let mut chars = 0;
    for ch in text.chars() {
        if seen >= units {
            return chars;
        }
        seen += ch.len_utf16();
        chars += 1;
    }
    chars.saturating_add(units.saturating_sub(seen))
}

/// Slice `text` by character range `[offset, offset + length)`.
///
/// Returns `None` when the range does not fit inside the text.
pub fn char_slice(text: &str, offset: usize, length: usize) -> Option<&str> {
    let start = byte_index(text, offset)?;
    let end = byte_index(text, offset.checked_add(length)?)?;
    Some(&text[start..end])
}

/// The original text around a span, `width` characters on each side.
///
/// Used to show an error in place; the window is clamped to the text.
pub fn context_window(text: &str, offset: usize, length: usize, width: usize) -> String {
    let total = char_len(text);
    let start = offset.saturating_sub(width).min(total);
    let end = offset.saturating_add(length).saturating_add(width).min(total);
    text.chars().skip(start).take(end - start).collect()
}

/// Truncate text to the first `limit` characters.
pub fn truncate_for_storage(text: &str, limit: usize) -> &str {
    match byte_index(text, limit) {
        Some(end) => &text[..end],
        None => text,
    }
}

/// Copy the case of `pattern`'s first letter onto `word`.
pub fn match_initial_case(word: &str, pattern: &str) -> String {
    let starts_upper = pattern.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_sentences() {
        let sentences = split_sentences("Кот спит. Собака бежит!");
        assert_eq!(sentences, vec!["Кот спит", "Собака бежит"]);
    }

    #[test]
    fn ellipsis_and_runs_split_once() {
        let sentences = split_sentences("Ну что ж… Пойдём?! Да...");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("  . ! ").is_empty());
    }

    #[test]
    fn extract_words_mixed_scripts() {
        let words = extract_words("Привет, world! Кое-где — 42 раза.");
        assert_eq!(words, vec!["привет", "world", "кое-где", "раза"]);
    }

    #[test]
    fn free_standing_hyphen_counts_as_word() {
        assert_eq!(extract_words("да - нет"), vec!["да", "-", "нет"]);
    }

    #[test]
    fn utf16_span_is_identity_without_astral_chars() {
        assert_eq!(utf16_span("Я сел кашу", 2, 3), (2, 3));
        assert_eq!(utf16_span("кот", 5, 2), (5, 2));
    }

    #[test]
    fn utf16_span_skips_surrogate_pairs() {
        let text = "😀 Я сел кашу";
        // the emoji is two code units, one character
        assert_eq!(utf16_span(text, 5, 3), (4, 3));
        assert_eq!(char_slice(text, 4, 3), Some("сел"));
        assert_eq!(utf16_span("a😀b", 1, 2), (1, 1));
        assert_eq!(utf16_span("😀", 4, 1), (3, 1));
    }

    #[test]
    fn offsets_round_trip_on_cyrillic() {
        let text = "в кино но";
        let byte = byte_index(text, 2).unwrap();
        assert_eq!(&text[byte..byte + "кино".len()], "кино");
        assert_eq!(char_offset(text, byte), 2);
        assert_eq!(byte_index(text, char_len(text)), Some(text.len()));
        assert_eq!(byte_index(text, char_len(text) + 1), None);
    }

    #[test]
    fn char_slice_bounds() {
        assert_eq!(char_slice("красивая утро", 0, 8), Some("красивая"));
        assert_eq!(char_slice("утро", 2, 5), None);
    }

    #[test]
    fn context_window_clamps() {
        assert_eq!(context_window("абвгдеж", 3, 1, 2), "бвгде");
        assert_eq!(context_window("абв", 0, 3, 20), "абв");
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_for_storage("привет", 3), "при");
        assert_eq!(truncate_for_storage("да", 10), "да");
    }

    #[test]
    fn initial_case_follows_pattern() {
        assert_eq!(match_initial_case("красивое", "Красивая"), "Красивое");
        assert_eq!(match_initial_case("красивое", "красивая"), "красивое");
    }
}
