//! Corrections derived from free-text checker messages.
//!
//! Grammar checkers often describe the fix in prose instead of listing a
//! replacement: `Исправьте на: «красивое»`, or just "the adjective does not
//! agree with the noun in gender". A [`CorrectionExtractor`] runs an ordered
//! list of [`CorrectionRule`]s over such a message and takes the first
//! replacement any of them produces.
//!
//! The built-in list covers the common phrase patterns followed by
//! [`GenderAgreementRule`]. Callers add their own patterns with
//! [`CorrectionExtractor::with_rule`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::text;

/// Derives a replacement for a flagged span from a checker message.
pub trait CorrectionRule: Send + Sync {
    /// Short identifier used in traces.
    fn name(&self) -> &str;

    /// The replacement for `flagged`, if this rule understands `message`.
    fn extract(&self, message: &str, flagged: &str) -> Option<String>;
}

/// A rule whose regex captures the replacement in its first group.
#[derive(Debug, Clone)]
pub struct PhraseRule {
    name: String,
    pattern: Regex,
}

impl PhraseRule {
    /// Compile a phrase rule. The pattern's first capture group is the replacement.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
        })
    }
}

impl CorrectionRule for PhraseRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, message: &str, _flagged: &str) -> Option<String> {
        let fix = self.pattern.captures(message)?.get(1)?.as_str().trim();
        (!fix.is_empty()).then(|| fix.to_string())
    }
}

/// Built-in phrase patterns, in the order they are tried.
static PHRASE_RULES: LazyLock<Vec<PhraseRule>> = LazyLock::new(|| {
    [
        ("recommended", r"(?i)рекомендуется:?\s*[«“]([^»”]+)[»”]"),
        ("should_be", r"(?i)должно\s+быть:?\s*[«“]([^»”]+)[»”]"),
        ("correct_form", r"(?i)\bправильно:?\s*[«“]([^»”]+)[»”]"),
        (
            "instead_of",
            r"(?i)вместо\s*[«“][^»”]*[»”]\s*нужно:?\s*[«“]([^»”]+)[»”]",
        ),
        ("fix_to", r"(?i)исправьте\s+на:?\s*[«“]([^»”]+)[»”]"),
        ("replace_with", r"(?i)замените\s+на:?\s*[«“]([^»”]+)[»”]"),
    ]
    .into_iter()
    .map(|(name, pattern)| PhraseRule::new(name, pattern).expect("valid regex"))
    .collect()
});

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[«“]([^»”]+)[»”]").expect("valid regex"));

static ADJECTIVE_QUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)прилагательн\w*\s*[«“]([^»”]+)[»”]").expect("valid regex")
});

static NOUN_QUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)существительн\w*\s*[«“]([^»”]+)[»”]").expect("valid regex")
});

/// Grammatical gender of a Russian noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    /// Мужской род.
    Masculine,
    /// Женский род.
    Feminine,
    /// Средний род.
    Neuter,
}

impl Gender {
    /// Guess a noun's gender from its final letter.
    ///
    /// `-о`/`-е` is neuter, `-а`/`-я` feminine, anything else masculine.
    pub fn of_noun(noun: &str) -> Option<Self> {
        let last = noun.trim().chars().last()?.to_lowercase().next()?;
        Some(match last {
            'о' | 'е' | 'ё' => Self::Neuter,
            'а' | 'я' => Self::Feminine,
            _ => Self::Masculine,
        })
    }
}

const ADJECTIVE_ENDINGS: &[&str] = &["ая", "яя", "ое", "ее", "ый", "ий", "ой"];

/// Re-inflect a nominative singular adjective for `gender`.
///
/// Soft stems (`синий`, `синяя`) keep soft endings. After a hushing
/// consonant the neuter ending is `-ее` and the masculine `-ий`; after
/// `г к х` the masculine ending is `-ий`. A stressed `-ой` stays stressed.
/// Returns `None` when the word has no recognizable adjective ending.
pub fn inflect_adjective(adjective: &str, gender: Gender) -> Option<String> {
    let lower = adjective.trim().to_lowercase();
    let ending = ADJECTIVE_ENDINGS.iter().find(|e| lower.ends_with(*e))?;
    let stem = &lower[..lower.len() - ending.len()];
    let last = stem.chars().last()?;

    let hushing = matches!(last, 'ж' | 'ш' | 'щ' | 'ч');
    let velar = matches!(last, 'г' | 'к' | 'х');
    let stressed = *ending == "ой";
    let soft = matches!(*ending, "яя" | "ее") || (*ending == "ий" && !hushing && !velar);

    let target = match gender {
        Gender::Feminine if soft => "яя",
        Gender::Feminine => "ая",
        Gender::Neuter if soft || (hushing && !stressed) => "ее",
        Gender::Neuter => "ое",
        Gender::Masculine if stressed => "ой",
        Gender::Masculine if soft || hushing || velar => "ий",
        Gender::Masculine => "ый",
    };
    Some(format!("{stem}{target}"))
}

/// Fixes adjective-noun gender disagreement described in a message.
///
/// Fires on messages containing both `не согласуется` and `по роду`. The
/// noun is the quoted word after `существительным` (or the second quoted
/// word); the adjective is the quoted word after `Прилагательное` (or the
/// first other quoted word, or the flagged text).
#[derive(Debug, Clone, Copy, Default)]
pub struct GenderAgreementRule;

impl CorrectionRule for GenderAgreementRule {
    fn name(&self) -> &str {
        "gender_agreement"
    }

    fn extract(&self, message: &str, flagged: &str) -> Option<String> {
        let lower = message.to_lowercase();
        if !(lower.contains("не согласуется") && lower.contains("по роду")) {
            return None;
        }

        let quoted: Vec<&str> = QUOTED
            .captures_iter(message)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();
        let noun = first_capture(&NOUN_QUOTE, message).or_else(|| quoted.get(1).copied())?;
        let adjective = first_capture(&ADJECTIVE_QUOTE, message)
            .or_else(|| quoted.iter().copied().find(|q| *q != noun))
            .unwrap_or(flagged);

        let gender = Gender::of_noun(noun)?;
        let inflected = inflect_adjective(adjective, gender)?;
        tracing::trace!(adjective, noun, ?gender, %inflected, "gender agreement");
        Some(text::match_initial_case(&inflected, flagged))
    }
}

fn first_capture<'t>(pattern: &Regex, haystack: &'t str) -> Option<&'t str> {
    pattern
        .captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// A replacement together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<'a> {
    /// Name of the rule that fired.
    pub rule: &'a str,
    /// The replacement text.
    pub replacement: String,
}

/// Ordered list of correction rules; the first one that fires wins.
pub struct CorrectionExtractor {
    rules: Vec<Box<dyn CorrectionRule>>,
}

impl CorrectionExtractor {
    /// The built-in phrase patterns followed by gender agreement.
    pub fn new() -> Self {
        let mut rules: Vec<Box<dyn CorrectionRule>> = PHRASE_RULES
            .iter()
            .cloned()
            .map(|rule| Box::new(rule) as Box<dyn CorrectionRule>)
            .collect();
        rules.push(Box::new(GenderAgreementRule));
        Self { rules }
    }

    /// An extractor with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. It runs after every rule already present.
    #[must_use]
    pub fn with_rule(mut self, rule: impl CorrectionRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Names of the rules, in order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    /// Run the rules in order and return the first replacement.
    pub fn extract(&self, message: &str, flagged: &str) -> Option<Extraction<'_>> {
        self.rules.iter().find_map(|rule| {
            rule.extract(message, flagged).map(|replacement| Extraction {
                rule: rule.name(),
                replacement,
            })
        })
    }
}

impl Default for CorrectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CorrectionExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}
