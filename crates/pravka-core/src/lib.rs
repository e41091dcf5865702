//! Core library for pravka.
//!
//! This crate provides the proofreading engine used by the `pravka` CLI and
//! MCP server: it triages a spell-checker's raw errors against the user's
//! dictionary, finds missing commas, categorizes everything, corrects the
//! text and scores its readability.
//!
//! # Modules
//!
//! - [`check`] - The full pipeline in one call
//! - [`lexicon`] - Personal dictionary matching
//! - [`readability`] - Readability metrics
//! - [`punctuation`] - Missing-comma scanner
//! - [`classify`] - Error categorization and de-duplication
//! - [`ranker`] - Suggestion ranking
//! - [`extract`] - Corrections derived from checker messages
//! - [`corrector`] - Applying corrections to text
//! - [`speller`] - Spelling-service boundary types
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use pravka_core::{CheckInput, CheckOptions, UserDictionary, check_text};
//!
//! let dictionary = UserDictionary::new();
//! let input = CheckInput::new("Я хотел пойти в кино но у меня не было времени", &dictionary);
//! let report = check_text(&input, &CheckOptions::default());
//!
//! assert_eq!(report.corrected_text, "Я хотел пойти в кино, но у меня не было времени");
//! ```
#![deny(unsafe_code)]

pub mod check;
pub mod classify;
pub mod config;
pub mod corrector;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod punctuation;
pub mod ranker;
pub mod readability;
pub mod speller;
pub mod text;
pub mod word_lists;

pub use check::{CategoryCounts, CheckInput, CheckOptions, CheckReport, check_text};
pub use classify::{ErrorCategory, NormalizedError, classify, classify_all};
pub use config::{Config, ConfigLoader, LogLevel};
pub use corrector::{CorrectionOutcome, Corrector, correct};
pub use error::{ConfigError, ConfigResult, SpellerError, SpellerResult};
pub use extract::{CorrectionExtractor, CorrectionRule};
pub use lexicon::{Lexicon, LexiconMatch, UserDictionary, edit_distance, should_suppress};
pub use punctuation::PunctuationFinding;
pub use ranker::{best_suggestion, rank_suggestions};
pub use readability::{ReadabilityMetrics, ReadabilityReport};
pub use speller::{GrammarMatch, RawSpellError, SpellingIssueKind};

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
