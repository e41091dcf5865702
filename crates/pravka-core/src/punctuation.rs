//! Missing-comma detection before subordinating conjunctions.
//!
//! Each rule matches `word, space, conjunction, space, word` (case-insensitive).
//! A match is reported unless the conjunction opens a sentence, a comma is
//! already there, the conjunction is the tail of `потому что` (flagged by its
//! own rule before `потому`), or an earlier rule already flagged the same
//! junction.
//!
//! A finding spans the junction itself: the last letter of the preceding
//! word, the whitespace, and the first letter of the conjunction. Replacing
//! that span with the suggestion inserts the comma.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;
use crate::word_lists::COMMA_RULE_PREFIX;

/// A candidate missing comma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PunctuationFinding {
    /// Rule id, e.g. `COMMA_BEFORE_NO`.
    pub rule_id: String,
    /// The conjunction as written in the text.
    pub conjunction: String,
    /// Human-readable description.
    pub message: String,
    /// Character offset of the last letter of the preceding word.
    pub offset: usize,
    /// Characters covered: that letter, the whitespace, and the conjunction's first letter.
    pub length: usize,
    /// Replacement for the covered span with the comma inserted.
    pub suggestion: String,
}

/// A conjunction rule.
struct ConjunctionRule {
    id: &'static str,
    pattern: Regex,
    /// Preceding words whose junction with this conjunction another rule covers.
    compound_heads: &'static [&'static str],
}

impl ConjunctionRule {
    fn new(id: &'static str, conjunction: &str, compound_heads: &'static [&'static str]) -> Self {
        let pattern = Regex::new(&format!(r"(?i)(\w+)(,?\s+)({conjunction})(\s+)(\w+)"))
            .expect("valid regex");
        Self {
            id,
            pattern,
            compound_heads,
        }
    }
}

/// Rules in priority order: compound conjunctions before their single-word tails.
static RULES: LazyLock<Vec<ConjunctionRule>> = LazyLock::new(|| {
    vec![
        ConjunctionRule::new("POTOMU_CHTO", r"потому\s+что", &[]),
        ConjunctionRule::new("NO", "но", &[]),
        ConjunctionRule::new("CHTO", "что", &["потому"]),
        ConjunctionRule::new("KOTORYI", "который|которая|которое|которые", &[]),
        ConjunctionRule::new("ESLI", "если", &[]),
        ConjunctionRule::new("CHTOBY", "чтобы", &[]),
        ConjunctionRule::new("KOGDA", "когда", &[]),
    ]
});

/// Scan text for missing commas before conjunctions.
///
/// Findings are sorted by offset and no two share an offset.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn scan(text: &str) -> Vec<PunctuationFinding> {
    let mut flagged: HashSet<usize> = HashSet::new();
    let mut findings = Vec::new();

    for rule in RULES.iter() {
        for caps in rule.pattern.captures_iter(text) {
            if let Some(finding) = evaluate_match(text, rule, &caps, &flagged) {
                flagged.insert(finding.offset);
                findings.push(finding);
            }
        }
    }

    findings.sort_by_key(|f| f.offset);
    tracing::debug!(count = findings.len(), "punctuation scan complete");
    findings
}

fn evaluate_match(
    text: &str,
    rule: &ConjunctionRule,
    caps: &Captures<'_>,
    flagged: &HashSet<usize>,
) -> Option<PunctuationFinding> {
    let word = caps.get(1)?;
    let gap = caps.get(2)?;
    let conjunction = caps.get(3)?;

    let last_char = word.as_str().chars().last()?;
    let first_char = conjunction.as_str().chars().next()?;
    let offset = text::char_offset(text, word.end()) - 1;

    if flagged.contains(&offset) {
        return None;
    }
    if is_sentence_start(text, conjunction.start()) {
        return None;
    }
    if has_preceding_comma(text, conjunction.start()) {
        return None;
    }
    let head = word.as_str().to_lowercase();
    if rule.compound_heads.contains(&head.as_str()) {
        tracing::trace!(rule = rule.id, head, "compound conjunction, skipping");
        return None;
    }

    let gap_len = gap.as_str().chars().count();
    let conjunction_text = conjunction.as_str().to_string();
    Some(PunctuationFinding {
        rule_id: format!("{COMMA_RULE_PREFIX}{}", rule.id),
        message: format!("Возможно, пропущена запятая перед «{conjunction_text}»"),
        conjunction: conjunction_text,
        offset,
        length: 1 + gap_len + 1,
        suggestion: format!("{last_char}, {first_char}"),
    })
}

/// Whether the conjunction starting at byte `start` opens a sentence.
///
/// True when only whitespace precedes it, or the nearest non-space character
/// before it is a sentence terminator or a dash.
pub fn is_sentence_start(text: &str, start: usize) -> bool {
    match text[..start].trim_end().chars().last() {
        None => true,
        Some(ch) => matches!(ch, '.' | '!' | '?' | '…' | '-' | '–' | '—'),
    }
}

/// Whether a comma already stands right before the conjunction at byte `start`.
pub fn has_preceding_comma(text: &str, start: usize) -> bool {
    text[..start].trim_end().ends_with(',')
}
