//! The full check pipeline.
//!
//! One call takes the text, the speller's errors, optional grammar-checker
//! matches and the user's dictionary, and returns everything a caller needs
//! to display or store: categorized errors, the corrected text and
//! readability metrics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classify::{self, Classification, DEFAULT_CONTEXT_WIDTH, ErrorCategory, NormalizedError};
use crate::config::Config;
use crate::corrector::{AppliedFix, Corrector, SkippedFix};
use crate::lexicon::{DEFAULT_MAX_DISTANCE, Lexicon, UserDictionary};
use crate::punctuation;
use crate::readability::{self, ReadabilityMetrics};
use crate::speller::{GrammarMatch, RawSpellError};

/// Everything a check needs from its collaborators.
#[derive(Debug, Clone, Copy)]
pub struct CheckInput<'a> {
    /// The text to check.
    pub text: &'a str,
    /// Errors reported by the spelling service.
    pub speller_errors: &'a [RawSpellError],
    /// Matches reported by a grammar checker.
    pub grammar_matches: &'a [GrammarMatch],
    /// The user's exclusion dictionary.
    pub dictionary: &'a UserDictionary,
}

impl<'a> CheckInput<'a> {
    /// Input with no speller errors or grammar matches.
    pub const fn new(text: &'a str, dictionary: &'a UserDictionary) -> Self {
        Self {
            text,
            speller_errors: &[],
            grammar_matches: &[],
            dictionary,
        }
    }

    /// Attach the speller's errors.
    #[must_use]
    pub const fn with_speller_errors(mut self, errors: &'a [RawSpellError]) -> Self {
        self.speller_errors = errors;
        self
    }

    /// Attach grammar-checker matches.
    #[must_use]
    pub const fn with_grammar_matches(mut self, matches: &'a [GrammarMatch]) -> Self {
        self.grammar_matches = matches;
        self
    }
}

/// Tunable parameters of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Maximum edit distance for near dictionary matches.
    pub max_edit_distance: usize,
    /// Characters of context on each side of an error.
    pub context_width: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_DISTANCE,
            context_width: DEFAULT_CONTEXT_WIDTH,
        }
    }
}

impl From<&Config> for CheckOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_edit_distance: config.max_edit_distance(),
            context_width: config.context_width(),
        }
    }
}

/// Number of errors per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryCounts {
    /// Spelling errors.
    pub spelling: usize,
    /// Punctuation errors.
    pub punctuation: usize,
    /// Semantic and style errors.
    pub semantic: usize,
    /// Uncategorized errors.
    pub other: usize,
}

impl CategoryCounts {
    /// Tally the categories of `errors`.
    pub fn tally(errors: &[NormalizedError]) -> Self {
        let mut counts = Self::default();
        for error in errors {
            *counts.slot(error.category) += 1;
        }
        counts
    }

    /// Count for one category.
    pub const fn get(&self, category: ErrorCategory) -> usize {
        match category {
            ErrorCategory::Spelling => self.spelling,
            ErrorCategory::Punctuation => self.punctuation,
            ErrorCategory::Semantic => self.semantic,
            ErrorCategory::Other => self.other,
        }
    }

    /// Total across categories.
    pub const fn total(&self) -> usize {
        self.spelling + self.punctuation + self.semantic + self.other
    }

    const fn slot(&mut self, category: ErrorCategory) -> &mut usize {
        match category {
            ErrorCategory::Spelling => &mut self.spelling,
            ErrorCategory::Punctuation => &mut self.punctuation,
            ErrorCategory::Semantic => &mut self.semantic,
            ErrorCategory::Other => &mut self.other,
        }
    }
}

/// Result of a full check.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckReport {
    /// Categorized errors, sorted by offset.
    pub errors: Vec<NormalizedError>,
    /// The text with every applicable correction applied.
    pub corrected_text: String,
    /// Readability of the original text.
    pub readability: ReadabilityMetrics,
    /// Errors per category.
    pub counts: CategoryCounts,
    /// Speller errors the dictionary suppressed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed: Vec<classify::SuppressedWord>,
    /// Corrections that were applied, highest offset first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied: Vec<AppliedFix>,
    /// Errors left uncorrected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFix>,
}

/// Run readability analysis, punctuation scanning, classification and
/// correction over one text.
#[tracing::instrument(skip_all, fields(text_len = input.text.len()))]
pub fn check_text(input: &CheckInput<'_>, options: &CheckOptions) -> CheckReport {
    let readability = readability::analyze(input.text);
    let findings = punctuation::scan(input.text);

    let lexicon = Lexicon::new(input.dictionary).with_max_distance(options.max_edit_distance);
    let Classification { errors, suppressed } = classify::classify_all(
        input.text,
        input.speller_errors,
        input.grammar_matches,
        &findings,
        &lexicon,
        options.context_width,
    );

    let outcome = Corrector::new(lexicon).apply(input.text, &errors);
    let counts = CategoryCounts::tally(&errors);

    tracing::debug!(
        errors = counts.total(),
        applied = outcome.applied.len(),
        score = readability.score,
        "check complete"
    );

    CheckReport {
        errors,
        corrected_text: outcome.text,
        readability,
        counts,
        suppressed,
        applied: outcome.applied,
        skipped: outcome.skipped,
    }
}
