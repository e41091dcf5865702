//! Readability scoring for Russian (and mixed Latin) prose.
//!
//! Combines four signals into a composite score in `[0, 1]`:
//!
//! | signal | weight | normalization |
//! |---|---|---|
//! | Flesch-Kincaid, Russian-adapted | 0.40 | `/ 100` |
//! | Coleman-Liau, shifted | 0.30 | `/ 100` |
//! | lexical diversity | 0.15 | `min(1, 2 * diversity)` |
//! | simple-word share | 0.15 | `1 - complex% / 100` |
//!
//! Flesch-Kincaid: `206.835 - 1.3 * (words/sentences) - 60.1 * (syllables/words)`.
//! Coleman-Liau: `5.89 * (chars/words) - 29.5 * (sentences/words) - 15.8 + 50`.
//! Both are clamped to `[0, 100]`. The constants are tuned for Russian and
//! must not change, or historical scores stop being comparable.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;

const FLESCH_WEIGHT: f64 = 0.4;
const COLEMAN_LIAU_WEIGHT: f64 = 0.3;
const DIVERSITY_WEIGHT: f64 = 0.15;
const COMPLEXITY_WEIGHT: f64 = 0.15;

/// Words with at least this many syllables count as complex.
pub const COMPLEX_WORD_SYLLABLES: usize = 4;

/// Silent endings stripped before counting English syllables.
static LATIN_SILENT_ENDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").expect("valid regex"));

/// English vowel groups (one syllable each).
static LATIN_VOWEL_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[aeiouy]{1,2}").expect("valid regex"));

/// Readability statistics for one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityMetrics {
    /// Composite score, nominally in `[0, 1]` (higher = easier).
    pub score: f64,
    /// Russian-adapted Flesch-Kincaid reading ease, `[0, 100]`.
    pub flesch_kincaid: f64,
    /// Shifted Coleman-Liau index, `[0, 100]`.
    pub coleman_liau: f64,
    /// Mean words per sentence.
    pub avg_sentence_length: f64,
    /// Mean letters per word.
    pub avg_word_length: f64,
    /// Share of words with four or more syllables, `[0, 100]`.
    pub complex_words_percentage: f64,
    /// Distinct words divided by total words, `[0, 1]`.
    pub lexical_diversity: f64,
    /// Number of sentences detected.
    pub sentence_count: usize,
    /// Number of words detected.
    pub word_count: usize,
    /// Total syllable count.
    pub syllable_count: usize,
    /// Number of complex words.
    pub complex_word_count: usize,
}

/// Readability metrics with an optional minimum-score gate.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// The computed metrics.
    #[serde(flatten)]
    pub metrics: ReadabilityMetrics,
    /// Minimum acceptable composite score (if provided).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    /// Whether the score falls below the minimum.
    pub below_min: bool,
}

/// Compute readability metrics for `text`.
///
/// Empty or whitespace-only input yields all-zero metrics.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn analyze(text: &str) -> ReadabilityMetrics {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return ReadabilityMetrics::default();
    }

    let sentence_count = text::split_sentences(&normalized).len().max(1);
    let words = text::extract_words(&normalized);
    let word_count = words.len().max(1);

    let mut syllable_count = 0;
    let mut complex_word_count = 0;
    let mut char_count = 0;
    for word in &words {
        let syllables = count_syllables(word);
        syllable_count += syllables;
        if syllables >= COMPLEX_WORD_SYLLABLES {
            complex_word_count += 1;
        }
        char_count += word.chars().count();
    }
    let unique_words = words.iter().collect::<HashSet<_>>().len();

    let words_f = word_count as f64;
    let sentences_f = sentence_count as f64;

    let avg_sentence_length = words_f / sentences_f;
    let avg_word_length = char_count as f64 / words_f;
    let avg_syllables = syllable_count as f64 / words_f;
    let complex_words_percentage = 100.0 * complex_word_count as f64 / words_f;
    let lexical_diversity = unique_words as f64 / words_f;

    let flesch_kincaid =
        (206.835 - 1.3 * avg_sentence_length - 60.1 * avg_syllables).clamp(0.0, 100.0);
    let coleman_liau = (5.89 * avg_word_length - 29.5 * (sentences_f / words_f) - 15.8 + 50.0)
        .clamp(0.0, 100.0);

    let score = FLESCH_WEIGHT * (flesch_kincaid / 100.0)
        + COLEMAN_LIAU_WEIGHT * (coleman_liau / 100.0)
        + DIVERSITY_WEIGHT * (lexical_diversity * 2.0).min(1.0)
        + COMPLEXITY_WEIGHT * (1.0 - complex_words_percentage / 100.0);

    tracing::debug!(
        sentence_count,
        word_count,
        syllable_count,
        score,
        "readability computed"
    );

    ReadabilityMetrics {
        score,
        flesch_kincaid,
        coleman_liau,
        avg_sentence_length,
        avg_word_length,
        complex_words_percentage,
        lexical_diversity,
        sentence_count: if words.is_empty() { 0 } else { sentence_count },
        word_count: words.len(),
        syllable_count,
        complex_word_count,
    }
}

/// Compute readability and compare the score against an optional minimum.
pub fn check_readability(text: &str, min_score: Option<f64>) -> ReadabilityReport {
    let metrics = analyze(text);
    let below_min = min_score.is_some_and(|min| metrics.score < min);
    ReadabilityReport {
        metrics,
        min_score,
        below_min,
    }
}

/// Count syllables in a lowercase word.
///
/// Cyrillic words have one syllable per vowel letter. Latin words use an
/// English vowel-group heuristic. Every non-empty word has at least one.
pub fn count_syllables(word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }
    let count = if text::is_cyrillic(word) {
        word.chars()
            .filter(|c| matches!(c, 'а' | 'е' | 'ё' | 'и' | 'о' | 'у' | 'ы' | 'э' | 'ю' | 'я'))
            .count()
    } else {
        let stripped = LATIN_SILENT_ENDING.replace(word, "");
        let core = stripped.strip_prefix('y').unwrap_or(stripped.as_ref());
        LATIN_VOWEL_GROUP.find_iter(core).count()
    };
    count.max(1)
}
