//! Boundary types for external checking services.
//!
//! The spelling service is a black box: it receives a [`SpellerRequest`] and
//! answers with a JSON array of [`RawSpellError`]s. Grammar checkers answer
//! with [`GrammarMatch`]es carrying a free-text message. Both are parsed into
//! strict types here so that nothing loosely shaped reaches classification.
//!
//! Both services count positions in UTF-16 code units. Classification
//! converts them to character offsets with [`text::utf16_span`], so text with
//! emoji or other astral characters before an error still lines up.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{SpellerError, SpellerResult};
use crate::text;

/// Speller option: skip words containing digits.
pub const IGNORE_DIGITS: u32 = 2;
/// Speller option: skip URLs, e-mail addresses and file names.
pub const IGNORE_URLS: u32 = 4;
/// Speller option: report repeated words.
pub const FIND_REPEAT_WORDS: u32 = 8;
/// Speller option: ignore capitalization errors.
pub const IGNORE_CAPITALIZATION: u32 = 512;

/// Kind of issue reported by the speller, encoded as an integer `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SpellingIssueKind {
    /// The word is not in the speller's vocabulary.
    UnknownWord,
    /// The same word appears twice in a row.
    RepeatedWord,
    /// Wrong use of upper/lower case.
    Capitalization,
    /// The text has too many errors to check reliably.
    TooManyErrors,
}

impl SpellingIssueKind {
    /// Stable rule id for issues of this kind.
    pub const fn rule_id(self) -> &'static str {
        match self {
            Self::UnknownWord => "SPELLER_UNKNOWN_WORD",
            Self::RepeatedWord => "SPELLER_REPEAT_WORD",
            Self::Capitalization => "SPELLER_CAPITALIZATION",
            Self::TooManyErrors => "SPELLER_TOO_MANY_ERRORS",
        }
    }
}

impl TryFrom<u8> for SpellingIssueKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::UnknownWord),
            2 => Ok(Self::RepeatedWord),
            3 => Ok(Self::Capitalization),
            4 => Ok(Self::TooManyErrors),
            other => Err(format!("unknown speller error code {other}")),
        }
    }
}

impl From<SpellingIssueKind> for u8 {
    fn from(kind: SpellingIssueKind) -> Self {
        match kind {
            SpellingIssueKind::UnknownWord => 1,
            SpellingIssueKind::RepeatedWord => 2,
            SpellingIssueKind::Capitalization => 3,
            SpellingIssueKind::TooManyErrors => 4,
        }
    }
}

/// One error as reported by the spelling service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RawSpellError {
    /// Issue kind.
    #[serde(rename = "code")]
    #[schemars(with = "u8")]
    pub kind: SpellingIssueKind,
    /// Offset of the word in the checked text, in UTF-16 code units.
    #[serde(rename = "pos")]
    pub position: usize,
    /// Line number (0-based).
    #[serde(default)]
    pub row: usize,
    /// Column within the line (0-based).
    #[serde(default)]
    pub col: usize,
    /// Length of the flagged word, in UTF-16 code units.
    #[serde(rename = "len")]
    pub length: usize,
    /// The flagged word.
    pub word: String,
    /// Replacement candidates, best first.
    #[serde(rename = "s", default)]
    pub suggestions: Vec<String>,
}

/// One match reported by a grammar checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GrammarMatch {
    /// Human-readable description of the problem.
    pub message: String,
    /// Offset of the flagged span, in UTF-16 code units.
    pub offset: usize,
    /// Length of the flagged span.
    pub length: usize,
    /// Replacement candidates, best first.
    #[serde(default, alias = "replacements")]
    pub suggestions: Vec<String>,
    /// Identifier of the rule that fired.
    #[serde(default, alias = "ruleId")]
    pub rule_id: String,
}

/// Request sent to the spelling service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SpellerRequest {
    /// Text to check.
    pub text: String,
    /// Language code.
    pub lang: String,
    /// Option bitmask.
    pub options: u32,
    /// Text format (`plain` or `html`).
    pub format: String,
}

impl SpellerRequest {
    /// A plain-text Russian request that skips URLs and reports repeated words.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: "ru".to_string(),
            options: IGNORE_URLS | FIND_REPEAT_WORDS,
            format: "plain".to_string(),
        }
    }
}

/// Fail on a non-success HTTP status from the spelling service.
pub fn ensure_success(status: u16) -> SpellerResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(SpellerError::Status { status })
    }
}

/// Parse the spelling service's JSON response.
///
/// An empty body or an empty array yields no errors.
#[tracing::instrument(skip_all, fields(body_len = body.len()))]
pub fn parse_speller_response(body: &str) -> SpellerResult<Vec<RawSpellError>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let errors: Vec<RawSpellError> = serde_json::from_str(body)?;
    tracing::debug!(count = errors.len(), "parsed speller response");
    Ok(errors)
}

/// Parse a grammar checker's JSON array of matches.
#[tracing::instrument(skip_all, fields(body_len = body.len()))]
pub fn parse_grammar_matches(body: &str) -> SpellerResult<Vec<GrammarMatch>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let matches: Vec<GrammarMatch> = serde_json::from_str(body)?;
    tracing::debug!(count = matches.len(), "parsed grammar matches");
    Ok(matches)
}

/// Whether `[offset, offset + length)` lies inside `text`.
pub fn span_fits(text: &str, offset: usize, length: usize) -> bool {
    offset
        .checked_add(length)
        .is_some_and(|end| end <= text::char_len(text))
}
