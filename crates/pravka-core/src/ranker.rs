//! Suggestion ranking.
//!
//! Picks the most likely replacement for a flagged word. Each candidate
//! starts from its popularity in [`WORD_POPULARITY`] and earns a bonus when it
//! completes one of the stable phrases in [`PHRASE_BONUSES`] with a word near
//! the error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::word_lists::{DEFAULT_POPULARITY, PHRASE_BONUSES, WORD_POPULARITY};

/// Words considered on each side of the flagged word.
pub const CONTEXT_WORDS: usize = 5;

/// A candidate with its computed weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeightedSuggestion {
    /// The candidate replacement.
    pub text: String,
    /// Popularity plus context bonus.
    pub weight: u32,
}

/// Words around the flagged one, lowercased and stripped of punctuation.
#[derive(Debug, Default)]
struct WordWindow {
    before: Vec<String>,
    after: Vec<String>,
}

impl WordWindow {
    /// Build the window around the word containing character `offset`.
    fn around(full_text: &str, offset: usize) -> Self {
        let mut words = Vec::new();
        let mut target = None;
        for (end, token) in tokens_with_end(full_text) {
            let normalized: String = token
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '-')
                .flat_map(char::to_lowercase)
                .collect();
            if normalized.is_empty() {
                continue;
            }
            if target.is_none() && end >= offset {
                target = Some(words.len());
            }
            words.push(normalized);
        }

        let Some(index) = target else {
            return Self::default();
        };
        let from = index.saturating_sub(CONTEXT_WORDS);
        let to = (index + 1 + CONTEXT_WORDS).min(words.len());
        Self {
            before: words[from..index].to_vec(),
            after: words[index + 1..to].to_vec(),
        }
    }

    fn bonus(&self, candidate: &str) -> u32 {
        PHRASE_BONUSES
            .iter()
            .filter(|(first, second, _)| {
                (candidate == *first && self.after.iter().any(|w| w == second))
                    || (candidate == *second && self.before.iter().any(|w| w == first))
            })
            .map(|(_, _, bonus)| bonus)
            .sum()
    }
}

/// Whitespace-separated tokens paired with their end character offset.
fn tokens_with_end(text: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = 0;
    for (byte, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(from) = start.take() {
                tokens.push((chars, &text[from..byte]));
            }
        } else if start.is_none() {
            start = Some(byte);
        }
        chars += 1;
    }
    if let Some(from) = start {
        tokens.push((chars, &text[from..]));
    }
    tokens
}

/// Popularity of a word, case-folded; [`DEFAULT_POPULARITY`] when unknown.
pub fn popularity(word: &str) -> u32 {
    WORD_POPULARITY
        .get(word.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_POPULARITY)
}

/// Weigh every suggestion in the context of `full_text`.
///
/// The result is sorted by weight, highest first; equal weights keep their
/// input order.
pub fn rank_suggestions<S: AsRef<str>>(
    suggestions: &[S],
    offset: usize,
    full_text: &str,
) -> Vec<WeightedSuggestion> {
    let window = WordWindow::around(full_text, offset);
    let mut ranked: Vec<WeightedSuggestion> = suggestions
        .iter()
        .map(|s| {
            let text = s.as_ref();
            let lower = text.to_lowercase();
            WeightedSuggestion {
                text: text.to_string(),
                weight: popularity(&lower) + window.bonus(&lower),
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.weight.cmp(&a.weight));
    ranked
}

/// The best replacement for `flagged` among `suggestions`.
///
/// No suggestions leaves the flagged text as is; a single suggestion is
/// returned without ranking.
#[tracing::instrument(level = "trace", skip(suggestions, full_text), fields(count = suggestions.len()))]
pub fn best_suggestion<S: AsRef<str>>(
    flagged: &str,
    suggestions: &[S],
    offset: usize,
    full_text: &str,
) -> String {
    match suggestions {
        [] => flagged.to_string(),
        [only] => only.as_ref().to_string(),
        _ => {
            let ranked = rank_suggestions(suggestions, offset, full_text);
            tracing::trace!(?ranked, "ranked suggestions");
            ranked
                .into_iter()
                .next()
                .map_or_else(|| flagged.to_string(), |best| best.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_suggestions_keeps_flagged_text() {
        let none: [&str; 0] = [];
        assert_eq!(best_suggestion("слово", &none, 0, "слово"), "слово");
    }

    #[test]
    fn single_suggestion_wins_outright() {
        assert_eq!(best_suggestion("абв", &["где"], 0, "абв"), "где");
    }

    #[test]
    fn popularity_decides_without_context() {
        // сел (35) outranks съел (30) when nothing nearby helps.
        assert_eq!(best_suggestion("сэл", &["съел", "сел"], 2, "Я сэл"), "сел");
    }

    #[test]
    fn phrase_bonus_uses_following_word() {
        let text = "Дбоое утро всем";
        assert_eq!(best_suggestion("Дбоое", &["добрый", "доброе"], 0, text), "доброе");
    }

    #[test]
    fn phrase_bonus_uses_preceding_word() {
        let text = "Большое спосибо за помощь";
        let ranked = rank_suggestions(&["способ", "спасибо"], 8, text);
        assert_eq!(ranked[0].text, "спасибо");
        assert_eq!(ranked[0].weight, 50 + 25);
    }

    #[test]
    fn phrase_outside_window_is_ignored() {
        let text = "доброе раз два три четыре пять шесть утро";
        let ranked = rank_suggestions(&["утро"], 38, text);
        assert_eq!(ranked[0].weight, popularity("утро"));
    }

    #[test]
    fn punctuation_around_context_words_is_stripped() {
        let text = "Спокойной ноче!";
        let ranked = rank_suggestions(&["ночи", "ночь"], 10, text);
        assert_eq!(ranked[0].text, "ночи");
        assert_eq!(ranked[0].weight, 45 + 30);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = rank_suggestions(&["абв", "где", "ёжз"], 0, "слово");
        let order: Vec<_> = ranked.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(order, vec!["абв", "где", "ёжз"]);
        assert!(ranked.iter().all(|w| w.weight == DEFAULT_POPULARITY));
    }

    #[test]
    fn popularity_is_case_insensitive() {
        assert_eq!(popularity("ЧТО"), popularity("что"));
        assert_eq!(popularity("нетакогослова"), DEFAULT_POPULARITY);
    }
}
