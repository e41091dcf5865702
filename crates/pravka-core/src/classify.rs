//! Error classification.
//!
//! Merges speller errors, grammar-checker matches and punctuation findings
//! into one list of [`NormalizedError`]s. Every error gets a category, from
//! its rule id when the id is known and from keywords in its message
//! otherwise. Speller errors the user's dictionary covers are dropped, as are
//! errors whose span does not fit the text. The result is sorted by offset
//! with at most one error per offset.

use std::fmt;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lexicon::{Lexicon, LexiconMatch, UserDictionary};
use crate::punctuation::PunctuationFinding;
use crate::speller::{self, GrammarMatch, RawSpellError, SpellingIssueKind};
use crate::text;
use crate::word_lists::{
    COMMA_RULE_PREFIX, PUNCTUATION_KEYWORDS, PUNCTUATION_RULE_IDS, SEMANTIC_KEYWORDS,
    SEMANTIC_RULE_IDS, SPELLING_KEYWORDS, SPELLING_RULE_IDS,
};

/// Default number of characters shown on each side of an error.
pub const DEFAULT_CONTEXT_WIDTH: usize = 20;

/// Broad kind of a writing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Misspelled, repeated or wrongly capitalized words.
    Spelling,
    /// Missing or misplaced punctuation.
    Punctuation,
    /// Agreement, word choice and style.
    Semantic,
    /// Anything else.
    Other,
}

impl ErrorCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [Self::Spelling, Self::Punctuation, Self::Semantic, Self::Other];

    /// Lowercase name, as serialized.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spelling => "spelling",
            Self::Punctuation => "punctuation",
            Self::Semantic => "semantic",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorized error located in the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedError {
    /// Human-readable description.
    pub message: String,
    /// Character offset into the original text.
    pub offset: usize,
    /// Characters covered (0 for a pure insertion).
    pub length: usize,
    /// Replacement candidates, best first.
    pub suggestions: Vec<String>,
    /// Error category.
    pub category: ErrorCategory,
    /// Identifier of the rule that produced the error.
    pub rule_id: String,
    /// Original text around the error, for display.
    pub context: String,
}

impl NormalizedError {
    /// Convert a speller error. The category comes from its rule id.
    ///
    /// The speller's UTF-16 position and length become character offsets.
    pub fn from_spell_error(raw: &RawSpellError, text: &str, context_width: usize) -> Self {
        let rule_id = raw.kind.rule_id().to_string();
        let message = speller_message(raw.kind, &raw.word);
        let (offset, length) = text::utf16_span(text, raw.position, raw.length);
        Self {
            category: categorize(&rule_id, &message),
            context: text::context_window(text, offset, length, context_width),
            message,
            offset,
            length,
            suggestions: raw.suggestions.clone(),
            rule_id,
        }
    }

    /// Convert a grammar-checker match, with its UTF-16 span as characters.
    pub fn from_grammar_match(m: &GrammarMatch, text: &str, context_width: usize) -> Self {
        let (offset, length) = text::utf16_span(text, m.offset, m.length);
        Self {
            message: m.message.clone(),
            offset,
            length,
            suggestions: m.suggestions.clone(),
            category: categorize(&m.rule_id, &m.message),
            rule_id: m.rule_id.clone(),
            context: text::context_window(text, offset, length, context_width),
        }
    }

    /// Convert a punctuation finding. Always [`ErrorCategory::Punctuation`].
    pub fn from_finding(f: &PunctuationFinding, text: &str, context_width: usize) -> Self {
        Self {
            message: f.message.clone(),
            offset: f.offset,
            length: f.length,
            suggestions: vec![f.suggestion.clone()],
            category: ErrorCategory::Punctuation,
            rule_id: f.rule_id.clone(),
            context: text::context_window(text, f.offset, f.length, context_width),
        }
    }

    /// Whether this error concerns punctuation.
    pub fn is_punctuation(&self) -> bool {
        self.category == ErrorCategory::Punctuation || self.rule_id.starts_with(COMMA_RULE_PREFIX)
    }
}

fn speller_message(kind: SpellingIssueKind, word: &str) -> String {
    match kind {
        SpellingIssueKind::UnknownWord => format!("Орфографическая ошибка в слове «{word}»"),
        SpellingIssueKind::RepeatedWord => format!("Повтор слова «{word}»"),
        SpellingIssueKind::Capitalization => {
            format!("Неверное употребление прописных и строчных букв: «{word}»")
        }
        SpellingIssueKind::TooManyErrors => "Слишком много ошибок".to_string(),
    }
}

/// Keyword automata, in the order they are consulted.
static KEYWORD_MATCHERS: LazyLock<[(ErrorCategory, AhoCorasick); 3]> = LazyLock::new(|| {
    let build = |keywords: &[&str]| AhoCorasick::new(keywords).expect("valid keyword patterns");
    [
        (ErrorCategory::Punctuation, build(PUNCTUATION_KEYWORDS)),
        (ErrorCategory::Spelling, build(SPELLING_KEYWORDS)),
        (ErrorCategory::Semantic, build(SEMANTIC_KEYWORDS)),
    ]
});

/// Categorize an error by rule id, falling back to keywords in its message.
pub fn categorize(rule_id: &str, message: &str) -> ErrorCategory {
    category_for_rule(rule_id)
        .or_else(|| category_for_message(message))
        .unwrap_or(ErrorCategory::Other)
}

fn category_for_rule(rule_id: &str) -> Option<ErrorCategory> {
    if rule_id.starts_with(COMMA_RULE_PREFIX) || PUNCTUATION_RULE_IDS.contains(rule_id) {
        Some(ErrorCategory::Punctuation)
    } else if SPELLING_RULE_IDS.contains(rule_id) {
        Some(ErrorCategory::Spelling)
    } else if SEMANTIC_RULE_IDS.contains(rule_id) {
        Some(ErrorCategory::Semantic)
    } else {
        None
    }
}

fn category_for_message(message: &str) -> Option<ErrorCategory> {
    let lower = message.to_lowercase();
    KEYWORD_MATCHERS
        .iter()
        .find(|(_, matcher)| matcher.is_match(&lower))
        .map(|(category, _)| *category)
}

/// A speller error dropped because the user's dictionary covers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuppressedWord {
    /// The flagged word.
    pub word: String,
    /// Its character offset.
    pub offset: usize,
    /// Why the dictionary matched.
    pub reason: LexiconMatch,
}

/// Classifier output: the kept errors plus the dictionary's suppressions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Classification {
    /// Kept errors, sorted by offset, one per offset.
    pub errors: Vec<NormalizedError>,
    /// Speller errors the dictionary suppressed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed: Vec<SuppressedWord>,
}

/// Classify speller errors and punctuation findings with default settings.
pub fn classify(
    text: &str,
    raw: &[RawSpellError],
    findings: &[PunctuationFinding],
    dictionary: &UserDictionary,
) -> Vec<NormalizedError> {
    classify_all(
        text,
        raw,
        &[],
        findings,
        &Lexicon::new(dictionary),
        DEFAULT_CONTEXT_WIDTH,
    )
    .errors
}

/// Classify every error source against `text`.
///
/// Speller errors come first, then grammar matches, then punctuation
/// findings; when two errors share an offset the earlier one is kept.
#[tracing::instrument(
    skip_all,
    fields(
        text_len = text.len(),
        raw = raw.len(),
        grammar = grammar.len(),
        findings = findings.len()
    )
)]
pub fn classify_all(
    text: &str,
    raw: &[RawSpellError],
    grammar: &[GrammarMatch],
    findings: &[PunctuationFinding],
    lexicon: &Lexicon<'_>,
    context_width: usize,
) -> Classification {
    let mut errors = Vec::with_capacity(raw.len() + grammar.len() + findings.len());
    let mut suppressed = Vec::new();

    for error in raw {
        let (offset, length) = text::utf16_span(text, error.position, error.length);
        if !fits(text, offset, length, error.kind.rule_id()) {
            continue;
        }
        if let Some(reason) = lexicon.match_word(&error.word, &error.suggestions) {
            tracing::debug!(word = %error.word, ?reason, "suppressed by dictionary");
            suppressed.push(SuppressedWord {
                word: error.word.clone(),
                offset,
                reason,
            });
            continue;
        }
        errors.push(NormalizedError::from_spell_error(error, text, context_width));
    }

    for m in grammar {
        let (offset, length) = text::utf16_span(text, m.offset, m.length);
        if fits(text, offset, length, &m.rule_id) {
            errors.push(NormalizedError::from_grammar_match(m, text, context_width));
        }
    }

    for f in findings {
        if fits(text, f.offset, f.length, &f.rule_id) {
            errors.push(NormalizedError::from_finding(f, text, context_width));
        }
    }

    errors.sort_by_key(|e| e.offset);
    errors.dedup_by_key(|e| e.offset);

    tracing::debug!(
        kept = errors.len(),
        suppressed = suppressed.len(),
        "classification complete"
    );
    Classification { errors, suppressed }
}

fn fits(text: &str, offset: usize, length: usize, rule_id: &str) -> bool {
    let ok = speller::span_fits(text, offset, length);
    if !ok {
        tracing::warn!(offset, length, rule_id, "error span outside text, dropping");
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::punctuation;

    fn spell(kind: SpellingIssueKind, position: usize, word: &str, s: &[&str]) -> RawSpellError {
        RawSpellError {
            kind,
            position,
            row: 0,
            col: position,
            length: word.chars().count(),
            word: word.to_string(),
            suggestions: s.iter().map(ToString::to_string).collect(),
        }
    }

    fn grammar(message: &str, offset: usize, length: usize, rule_id: &str) -> GrammarMatch {
        GrammarMatch {
            message: message.to_string(),
            offset,
            length,
            suggestions: Vec::new(),
            rule_id: rule_id.to_string(),
        }
    }

    #[test]
    fn dictionary_suppresses_near_word() {
        let text = "Я сел кашу";
        let raw = [spell(SpellingIssueKind::UnknownWord, 2, "сел", &["съел"])];
        let dictionary = UserDictionary::from_words(["съел"]);
        let errors = classify(text, &raw, &[], &dictionary);
        assert!(errors.is_empty());

        let out = classify_all(
            text,
            &raw,
            &[],
            &[],
            &Lexicon::new(&dictionary),
            DEFAULT_CONTEXT_WIDTH,
        );
        assert_eq!(out.suppressed.len(), 1);
        assert_eq!(out.suppressed[0].word, "сел");
    }

    #[test]
    fn speller_messages_by_kind() {
        let text = "мама мама москва";
        let raw = [
            spell(SpellingIssueKind::RepeatedWord, 5, "мама", &[]),
            spell(SpellingIssueKind::Capitalization, 10, "москва", &["Москва"]),
        ];
        let errors = classify(text, &raw, &[], &UserDictionary::new());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Повтор слова «мама»");
        assert_eq!(errors[0].rule_id, "SPELLER_REPEAT_WORD");
        assert_eq!(errors[0].category, ErrorCategory::Spelling);
        assert_eq!(
            errors[1].message,
            "Неверное употребление прописных и строчных букв: «москва»"
        );
        assert_eq!(errors[1].category, ErrorCategory::Spelling);
    }

    #[test]
    fn comma_finding_is_punctuation() {
        let text = "Я хотел пойти в кино но у меня не было времени";
        let findings = punctuation::scan(text);
        let errors = classify(text, &[], &findings, &UserDictionary::new());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, ErrorCategory::Punctuation);
        assert_eq!(errors[0].offset, 19);
        assert_eq!(errors[0].suggestions, vec!["о, н"]);
    }

    #[test]
    fn context_window_is_clamped() {
        let text = "Привет мир";
        let raw = [spell(SpellingIssueKind::UnknownWord, 7, "мир", &[])];
        let errors = classify(text, &raw, &[], &UserDictionary::new());
        assert_eq!(errors[0].context, "Привет мир");

        let out = classify_all(
            text,
            &raw,
            &[],
            &[],
            &Lexicon::new(&UserDictionary::new()),
            2,
        );
        assert_eq!(out.errors[0].context, "т мир");
    }

    #[test]
    fn rule_ids_take_precedence_over_keywords() {
        // The message mentions a comma, but the rule id is a known semantic one.
        assert_eq!(
            categorize("RU_GENDER_AGREEMENT", "запятая"),
            ErrorCategory::Semantic
        );
        assert_eq!(categorize("COMMA_BEFORE_NO", ""), ErrorCategory::Punctuation);
        assert_eq!(
            categorize("MORFOLOGIK_RULE_RU_RU", ""),
            ErrorCategory::Spelling
        );
    }

    #[test]
    fn keyword_fallback_order() {
        assert_eq!(
            categorize("X", "Пропущена ЗАПЯТАЯ перед союзом"),
            ErrorCategory::Punctuation
        );
        assert_eq!(
            categorize("X", "Возможно, опечатка"),
            ErrorCategory::Spelling
        );
        assert_eq!(
            categorize("X", "Прилагательное не согласуется с существительным по роду"),
            ErrorCategory::Semantic
        );
        // Both a punctuation and a semantic stem: punctuation wins.
        assert_eq!(
            categorize("X", "Обособление не согласуется"),
            ErrorCategory::Punctuation
        );
        assert_eq!(categorize("X", "Что-то странное"), ErrorCategory::Other);
    }

    #[test]
    fn too_many_errors_has_no_category_rule() {
        let text = "абв";
        let raw = [RawSpellError {
            kind: SpellingIssueKind::TooManyErrors,
            position: 0,
            row: 0,
            col: 0,
            length: 0,
            word: String::new(),
            suggestions: Vec::new(),
        }];
        let errors = classify(text, &raw, &[], &UserDictionary::new());
        assert_eq!(errors[0].message, "Слишком много ошибок");
        assert_eq!(errors[0].category, ErrorCategory::Other);
    }

    #[test]
    fn out_of_bounds_errors_are_dropped() {
        let text = "кот";
        let raw = [spell(SpellingIssueKind::UnknownWord, 2, "котик", &[])];
        let matches = [grammar("странно", 10, 1, "X")];
        let out = classify_all(
            text,
            &raw,
            &matches,
            &[],
            &Lexicon::new(&UserDictionary::new()),
            DEFAULT_CONTEXT_WIDTH,
        );
        assert!(out.errors.is_empty());
    }

    #[test]
    fn utf16_positions_after_emoji_are_realigned() {
        let text = "Привет 😀 я сел кашу";
        // the speller counts the emoji as two units, so "сел" is at 12, not 11
        let raw = spell(SpellingIssueKind::UnknownWord, 12, "сел", &["съел"]);
        let matches = [grammar("Проверьте падеж", 16, 4, "CASE")];
        let out = classify_all(
            text,
            &[raw],
            &matches,
            &[],
            &Lexicon::new(&UserDictionary::new()),
            DEFAULT_CONTEXT_WIDTH,
        );
        let spans: Vec<_> = out
            .errors
            .iter()
            .map(|e| text::char_slice(text, e.offset, e.length))
            .collect();
        assert_eq!(spans, vec![Some("сел"), Some("кашу")]);
    }

    #[test]
    fn first_error_at_an_offset_wins() {
        let text = "Я хотел пойти в кино но у меня не было времени";
        let findings = punctuation::scan(text);
        let matches = [grammar("Пропущена запятая", 19, 3, "RU_COMMA_BEFORE_CONJUNCTION")];
        let raw = [spell(SpellingIssueKind::UnknownWord, 2, "хотел", &[])];
        let out = classify_all(
            text,
            &raw,
            &matches,
            &findings,
            &Lexicon::new(&UserDictionary::new()),
            DEFAULT_CONTEXT_WIDTH,
        );
        assert_eq!(out.errors.len(), 2);
        assert_eq!(out.errors[0].offset, 2);
        assert_eq!(out.errors[1].offset, 19);
        assert_eq!(out.errors[1].rule_id, "RU_COMMA_BEFORE_CONJUNCTION");
    }

    #[test]
    fn output_sorted_by_offset() {
        let text = "один два три четыре";
        let raw = [
            spell(SpellingIssueKind::UnknownWord, 13, "четыре", &[]),
            spell(SpellingIssueKind::UnknownWord, 0, "один", &[]),
            spell(SpellingIssueKind::UnknownWord, 5, "два", &[]),
        ];
        let errors = classify(text, &raw, &[], &UserDictionary::new());
        let offsets: Vec<_> = errors.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 5, 13]);
    }

    #[test]
    fn grammar_matches_are_not_dictionary_filtered() {
        let text = "красивая утро";
        let matches = [grammar(
            "Прилагательное «красивая» не согласуется с существительным «утро» по роду",
            0,
            8,
            "",
        )];
        let dictionary = UserDictionary::from_words(["красивая"]);
        let out = classify_all(
            text,
            &[],
            &matches,
            &[],
            &Lexicon::new(&dictionary),
            DEFAULT_CONTEXT_WIDTH,
        );
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].category, ErrorCategory::Semantic);
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&ErrorCategory::Punctuation).unwrap();
        assert_eq!(json, "\"punctuation\"");
        assert_eq!(ErrorCategory::Semantic.to_string(), "semantic");
    }
}
