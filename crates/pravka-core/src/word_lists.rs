//! Curated word lists for Russian text correction.
//!
//! Word popularity used to rank replacement candidates, stable two-word
//! phrases that boost a candidate in context, the keyword stems used to
//! categorize free-text checker messages, and the rule-id sets of known
//! checkers.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Weight given to a candidate that is absent from [`WORD_POPULARITY`].
pub const DEFAULT_POPULARITY: u32 = 10;

/// Relative popularity of common Russian words (higher = more likely intended).
pub static WORD_POPULARITY: LazyLock<HashMap<&'static str, u32>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Function words
    map.extend([
        ("и", 100),
        ("в", 100),
        ("не", 100),
        ("на", 95),
        ("что", 95),
        ("с", 90),
        ("как", 90),
        ("это", 90),
        ("по", 85),
        ("но", 85),
        ("так", 80),
        ("за", 80),
        ("от", 80),
        ("все", 75),
        ("всё", 75),
        ("уже", 70),
        ("для", 70),
        ("тоже", 60),
        ("также", 60),
        ("чтобы", 60),
        ("если", 60),
        ("когда", 60),
        ("потому", 55),
        ("тем", 50),
        ("более", 50),
        ("течение", 40),
        ("крайней", 35),
    ]);

    // Pronouns
    map.extend([
        ("я", 95),
        ("он", 90),
        ("она", 85),
        ("они", 85),
        ("мы", 85),
        ("вы", 80),
        ("меня", 75),
        ("его", 75),
        ("её", 70),
        ("нас", 65),
    ]);

    // Verbs and frequent content words
    map.extend([
        ("был", 70),
        ("была", 70),
        ("было", 70),
        ("быть", 65),
        ("есть", 65),
        ("может", 60),
        ("можно", 60),
        ("нужно", 60),
        ("надо", 55),
        ("сказал", 50),
        ("знаю", 50),
        ("время", 65),
        ("человек", 65),
        ("год", 60),
        ("день", 60),
        ("утро", 50),
        ("вечер", 50),
        ("ночи", 45),
        ("жизнь", 55),
        ("работа", 50),
        ("дом", 50),
        ("сейчас", 55),
        ("здесь", 50),
        ("очень", 60),
        ("хорошо", 55),
        ("спасибо", 50),
        ("пожалуйста", 50),
        ("привет", 45),
        ("здравствуйте", 45),
        ("доброе", 40),
        ("добрый", 40),
        ("спокойной", 35),
        ("большое", 40),
        ("сел", 35),
        ("съел", 30),
    ]);

    map
});

/// Stable two-word phrases: `(first, second, bonus)`.
///
/// When a candidate equals `first` and `second` follows it nearby (or the
/// candidate equals `second` and `first` precedes it), the bonus is added.
pub const PHRASE_BONUSES: &[(&str, &str, u32)] = &[
    ("доброе", "утро", 30),
    ("добрый", "день", 30),
    ("добрый", "вечер", 30),
    ("спокойной", "ночи", 30),
    ("большое", "спасибо", 25),
    ("потому", "что", 25),
    ("так", "что", 20),
    ("для", "того", 20),
    ("в", "течение", 20),
    ("тем", "более", 15),
    ("по", "крайней", 15),
    ("всё", "равно", 15),
    ("как", "будто", 15),
    ("несмотря", "на", 15),
];

/// Message stems that mark a punctuation issue.
pub const PUNCTUATION_KEYWORDS: &[&str] = &[
    "запят",
    "точк",
    "тире",
    "скобк",
    "деепричастн",
    "причастн",
    "двоеточ",
    "кавыч",
    "пунктуац",
    "обособ",
    "вводн",
];

/// Message stems that mark a spelling issue.
pub const SPELLING_KEYWORDS: &[&str] = &[
    "опечатк",
    "орфографическ",
    "написани",
    "правописан",
    "слитно",
    "раздельно",
    "дефис",
    "прописн",
];

/// Message stems that mark a semantic or stylistic issue.
pub const SEMANTIC_KEYWORDS: &[&str] = &[
    "согласу",
    "стил",
    "падеж",
    "род",
    "числ",
    "тавтолог",
    "плеоназм",
    "смысл",
    "лексическ",
];

/// Rule ids known to describe punctuation issues.
pub static PUNCTUATION_RULE_IDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "COMMA_PARENTHESIS_WHITESPACE",
        "DOUBLE_PUNCTUATION",
        "UNPAIRED_BRACKETS",
        "PUNCTUATION_PARAGRAPH_END",
        "WHITESPACE_PUNCTUATION",
        "RU_COMMA_BEFORE_CONJUNCTION",
        "RU_PARTICIPLE_COMMA",
        "RU_INTRODUCTORY_WORD_COMMA",
    ]
    .into_iter()
    .collect()
});

/// Prefix shared by the comma rules of the built-in punctuation scanner.
pub const COMMA_RULE_PREFIX: &str = "COMMA_BEFORE_";

/// Rule ids known to describe spelling issues.
pub static SPELLING_RULE_IDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "SPELLER_UNKNOWN_WORD",
        "SPELLER_REPEAT_WORD",
        "SPELLER_CAPITALIZATION",
        "MORFOLOGIK_RULE_RU_RU",
        "HUNSPELL_RULE",
        "UPPERCASE_SENTENCE_START",
        "WORD_REPEAT_RULE",
        "RU_YO_SPELLING",
    ]
    .into_iter()
    .collect()
});

/// Rule ids known to describe semantic, agreement or style issues.
pub static SEMANTIC_RULE_IDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "RU_ADJ_NOUN_AGREEMENT",
        "RU_GENDER_AGREEMENT",
        "RU_VERB_AGREEMENT",
        "RU_CASE_GOVERNMENT",
        "RU_SIMPLE_REPLACE",
        "STYLE_REPEATED_WORD_RULE",
        "RU_TAUTOLOGY",
    ]
    .into_iter()
    .collect()
});
