//! Personal dictionary matching.
//!
//! Decides whether a flagged word should be left alone because the user has
//! added it (or something close to it) to their exclusion dictionary. Checks
//! run in a fixed order and stop at the first hit:
//!
//! 1. the flagged word itself, case-folded;
//! 2. any of the checker's suggestions, case-folded;
//! 3. any dictionary word within a small Levenshtein distance.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default maximum edit distance for near matches.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// A user's exclusion dictionary. Words are stored lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct UserDictionary {
    words: HashSet<String>,
}

impl UserDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from words, trimming and case-folding each one.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parse a newline-separated word list. Blank lines and `#` comments are skipped.
    pub fn from_text(content: &str) -> Self {
        Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Add a word (case-folded). Returns `false` if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        !word.is_empty() && self.words.insert(word)
    }

    /// Whether the dictionary contains the case-folded word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the stored (lowercase) words.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Why a word was suppressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LexiconMatch {
    /// The flagged word itself is in the dictionary.
    Exact,
    /// One of the checker's suggestions is in the dictionary.
    Suggestion {
        /// The matching suggestion, case-folded.
        word: String,
    },
    /// A dictionary word is within the allowed edit distance.
    Near {
        /// The dictionary word that matched.
        word: String,
        /// Its edit distance to the flagged word.
        distance: usize,
    },
}

/// A dictionary together with its near-match threshold.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon<'a> {
    dictionary: &'a UserDictionary,
    max_distance: usize,
}

impl<'a> Lexicon<'a> {
    /// Wrap a dictionary with the default distance threshold.
    pub const fn new(dictionary: &'a UserDictionary) -> Self {
        Self {
            dictionary,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }

    /// Override the maximum edit distance for near matches.
    pub const fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// The wrapped dictionary.
    pub const fn dictionary(&self) -> &'a UserDictionary {
        self.dictionary
    }

    /// Find the first reason to suppress `candidate`, if any.
    pub fn match_word<S: AsRef<str>>(
        &self,
        candidate: &str,
        suggestions: &[S],
    ) -> Option<LexiconMatch> {
        if self.dictionary.is_empty() {
            return None;
        }

        let lower = candidate.trim().to_lowercase();
        if self.dictionary.words.contains(&lower) {
            return Some(LexiconMatch::Exact);
        }

        if let Some(word) = suggestions
            .iter()
            .map(|s| s.as_ref().to_lowercase())
            .find(|s| self.dictionary.words.contains(s))
        {
            return Some(LexiconMatch::Suggestion { word });
        }

        // Sorted so the reported match does not depend on hash order.
        let mut words: Vec<&str> = self.dictionary.iter().collect();
        words.sort_unstable();
        words.into_iter().find_map(|word| {
            let distance = edit_distance(&lower, word);
            (distance <= self.max_distance).then(|| LexiconMatch::Near {
                word: word.to_string(),
                distance,
            })
        })
    }

    /// Whether `candidate` should be suppressed.
    pub fn should_suppress<S: AsRef<str>>(&self, candidate: &str, suggestions: &[S]) -> bool {
        self.match_word(candidate, suggestions).is_some()
    }
}

/// Whether a flagged word should be suppressed by the user's dictionary,
/// using the default distance threshold.
pub fn should_suppress<S: AsRef<str>>(
    candidate: &str,
    suggestions: &[S],
    dictionary: &UserDictionary,
) -> bool {
    Lexicon::new(dictionary).should_suppress(candidate, suggestions)
}

/// Levenshtein distance between two strings, counted in characters.
///
/// Insertions, deletions and substitutions each cost 1.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_SUGGESTIONS: &[&str] = &[];

    fn dict(words: &[&str]) -> UserDictionary {
        UserDictionary::from_words(words)
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let d = dict(&["Яндекс"]);
        assert!(should_suppress("ЯНДЕКС", NO_SUGGESTIONS, &d));
        assert_eq!(
            Lexicon::new(&d).match_word("яндекс", NO_SUGGESTIONS),
            Some(LexiconMatch::Exact)
        );
    }

    #[test]
    fn suggestion_in_dictionary_suppresses() {
        let d = dict(&["гугл"]);
        let found = Lexicon::new(&d).match_word("гуголь", &["Гугл", "гогль"]);
        assert_eq!(
            found,
            Some(LexiconMatch::Suggestion {
                word: "гугл".to_string()
            })
        );
    }

    #[test]
    fn near_match_within_two_edits() {
        let d = dict(&["съел"]);
        assert_eq!(
            Lexicon::new(&d).match_word("сел", NO_SUGGESTIONS),
            Some(LexiconMatch::Near {
                word: "съел".to_string(),
                distance: 1
            })
        );
    }

    #[test]
    fn distant_word_not_suppressed() {
        let d = dict(&["программирование"]);
        assert!(!should_suppress("прогулка", NO_SUGGESTIONS, &d));
    }

    #[test]
    fn threshold_is_configurable() {
        let d = dict(&["съел"]);
        assert!(
            !Lexicon::new(&d)
                .with_max_distance(0)
                .should_suppress("сел", NO_SUGGESTIONS)
        );
    }

    #[test]
    fn empty_dictionary_never_suppresses() {
        let d = UserDictionary::new();
        assert!(!should_suppress("", NO_SUGGESTIONS, &d));
        assert!(!should_suppress("слово", &["слово"], &d));
    }

    #[test]
    fn member_words_always_suppressed() {
        let d = dict(&["Хабр", "котлин", "раст"]);
        for word in ["хабр", "ХАБР", "Котлин", "РАСТ"] {
            assert!(should_suppress(word, &["другое"], &d), "{word}");
        }
    }

    #[test]
    fn from_text_skips_comments_and_blanks() {
        let d = UserDictionary::from_text("# мои слова\n\nКотлин\n  раст  \n");
        assert_eq!(d.len(), 2);
        assert!(d.contains("КОТЛИН"));
        assert!(d.contains("раст"));
    }

    #[test]
    fn insert_folds_case() {
        let mut d = UserDictionary::new();
        assert!(d.insert("Слово"));
        assert!(!d.insert("слово"));
        assert!(!d.insert("   "));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn edit_distance_base_cases() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("", "кот"), 3);
        assert_eq!(edit_distance("кот", ""), 3);
        assert_eq!(edit_distance("кот", "кот"), 0);
    }

    #[test]
    fn edit_distance_counts_characters_not_bytes() {
        assert_eq!(edit_distance("сел", "съел"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("молоко", "малако"), 2);
    }

    #[test]
    fn edit_distance_is_symmetric() {
        let words = ["", "а", "сел", "съел", "привет", "превед", "kitten", "sitting"];
        for a in words {
            for b in words {
                assert_eq!(edit_distance(a, b), edit_distance(b, a), "{a} / {b}");
            }
        }
    }
}
