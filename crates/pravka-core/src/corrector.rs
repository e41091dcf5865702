//! Automatic correction.
//!
//! Applies classified errors to the original text, last offset first, so a
//! replacement never shifts a span that is still waiting to be applied. Each
//! error is resolved in order of preference: a comma insertion for
//! zero-length punctuation errors, the best-ranked suggestion, or a
//! replacement derived from the error message. Errors that cannot be applied
//! are reported in [`CorrectionOutcome::skipped`] instead of failing the run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classify::NormalizedError;
use crate::extract::CorrectionExtractor;
use crate::lexicon::{Lexicon, UserDictionary};
use crate::ranker;
use crate::text;

/// How a replacement was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixSource {
    /// A comma inserted at a zero-length punctuation error.
    Insertion,
    /// The best-ranked checker suggestion.
    Suggestion,
    /// Derived from the error message by a correction rule.
    Extracted {
        /// Name of the rule that produced the replacement.
        rule: String,
    },
}

/// A correction that was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AppliedFix {
    /// Character offset in the original text.
    pub offset: usize,
    /// Characters replaced.
    pub length: usize,
    /// The replaced text.
    pub original: String,
    /// The text put in its place.
    pub replacement: String,
    /// Rule id of the error.
    pub rule_id: String,
    /// How the replacement was chosen.
    pub source: FixSource,
}

/// Why an error was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The user's dictionary covers the flagged word.
    Suppressed,
    /// No suggestion and no rule produced a replacement.
    NoCorrection,
    /// The span does not fit the text.
    OutOfBounds,
    /// The span overlaps a correction already applied.
    Overlap,
}

/// An error that was left unapplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SkippedFix {
    /// Character offset in the original text.
    pub offset: usize,
    /// Characters covered.
    pub length: usize,
    /// Rule id of the error.
    pub rule_id: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Result of a correction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CorrectionOutcome {
    /// The corrected text.
    pub text: String,
    /// Applied corrections, in application order (highest offset first).
    pub applied: Vec<AppliedFix>,
    /// Errors that were not applied.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFix>,
}

/// Applies errors to text using a dictionary and a set of correction rules.
#[derive(Debug)]
pub struct Corrector<'a> {
    lexicon: Lexicon<'a>,
    extractor: CorrectionExtractor,
}

impl<'a> Corrector<'a> {
    /// A corrector with the built-in correction rules.
    pub fn new(lexicon: Lexicon<'a>) -> Self {
        Self {
            lexicon,
            extractor: CorrectionExtractor::new(),
        }
    }

    /// Replace the correction rules.
    #[must_use]
    pub fn with_extractor(mut self, extractor: CorrectionExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Apply `errors` to `text`.
    ///
    /// Offsets refer to `text` as given. Ranking always sees the original
    /// text, not a partially corrected one.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), errors = errors.len()))]
    pub fn apply(&self, text: &str, errors: &[NormalizedError]) -> CorrectionOutcome {
        let mut outcome = CorrectionOutcome {
            text: text.to_string(),
            ..CorrectionOutcome::default()
        };

        let mut pending: Vec<&NormalizedError> = Vec::with_capacity(errors.len());
        for error in errors {
            if self.is_suppressed(text, error) {
                outcome.skipped.push(skipped(error, SkipReason::Suppressed));
            } else {
                pending.push(error);
            }
        }
        pending.sort_by(|a, b| b.offset.cmp(&a.offset));

        // Start of the lowest span applied so far; later spans must end before it.
        let mut floor = usize::MAX;
        for error in pending {
            let Some(end) = error.offset.checked_add(error.length) else {
                outcome.skipped.push(skipped(error, SkipReason::OutOfBounds));
                continue;
            };
            if end > floor {
                outcome.skipped.push(skipped(error, SkipReason::Overlap));
                continue;
            }
            let Some((start_byte, end_byte)) = byte_span(&outcome.text, error.offset, end) else {
                tracing::warn!(
                    offset = error.offset,
                    length = error.length,
                    "correction span outside text"
                );
                outcome.skipped.push(skipped(error, SkipReason::OutOfBounds));
                continue;
            };

            let flagged = &outcome.text[start_byte..end_byte];
            let Some((replacement, source)) = self.resolve(text, error, flagged) else {
                outcome.skipped.push(skipped(error, SkipReason::NoCorrection));
                continue;
            };

            let fix = AppliedFix {
                offset: error.offset,
                length: error.length,
                original: flagged.to_string(),
                replacement,
                rule_id: error.rule_id.clone(),
                source,
            };
            outcome
                .text
                .replace_range(start_byte..end_byte, &fix.replacement);
            outcome.applied.push(fix);
            floor = error.offset;
        }

        tracing::debug!(
            applied = outcome.applied.len(),
            skipped = outcome.skipped.len(),
            "correction complete"
        );
        outcome
    }

    /// Punctuation spans are junctions between words, never dictionary words.
    fn is_suppressed(&self, text: &str, error: &NormalizedError) -> bool {
        if error.is_punctuation() {
            return false;
        }
        text::char_slice(text, error.offset, error.length)
            .is_some_and(|flagged| self.lexicon.should_suppress(flagged, &error.suggestions))
    }

    fn resolve(
        &self,
        original: &str,
        error: &NormalizedError,
        flagged: &str,
    ) -> Option<(String, FixSource)> {
        if error.length == 0 && error.is_punctuation() {
            return Some((",".to_string(), FixSource::Insertion));
        }
        if !error.suggestions.is_empty() {
            let best =
                ranker::best_suggestion(flagged, &error.suggestions, error.offset, original);
            return Some((best, FixSource::Suggestion));
        }
        self.extractor
            .extract(&error.message, flagged)
            .map(|found| {
                (
                    found.replacement,
                    FixSource::Extracted {
                        rule: found.rule.to_string(),
                    },
                )
            })
    }
}

fn byte_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let start_byte = text::byte_index(text, start)?;
    let end_byte = text::byte_index(text, end)?;
    Some((start_byte, end_byte))
}

fn skipped(error: &NormalizedError, reason: SkipReason) -> SkippedFix {
    SkippedFix {
        offset: error.offset,
        length: error.length,
        rule_id: error.rule_id.clone(),
        reason,
    }
}

/// Correct `text` with the built-in rules and the default distance threshold.
pub fn correct(text: &str, errors: &[NormalizedError], dictionary: &UserDictionary) -> String {
    Corrector::new(Lexicon::new(dictionary))
        .apply(text, errors)
        .text
}
