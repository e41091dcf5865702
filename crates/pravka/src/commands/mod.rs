//! Command implementations.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;

use pravka_core::config::Config;
use pravka_core::{GrammarMatch, RawSpellError, UserDictionary, speller};

pub mod check;
pub mod correct;
pub mod info;
pub mod punctuation;
pub mod readability;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Input shared by `check` and `correct`: the text plus what the speller and
/// grammar checker reported about it.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// File to check.
    pub file: Utf8PathBuf,

    /// Speller response for the file (JSON array of raw errors).
    #[arg(long, value_name = "JSON")]
    pub speller: Option<Utf8PathBuf>,

    /// Grammar-checker matches for the file (JSON array).
    #[arg(long, value_name = "JSON")]
    pub grammar: Option<Utf8PathBuf>,

    /// Personal dictionary, one word per line (overrides config).
    #[arg(long, value_name = "FILE")]
    pub dictionary: Option<Utf8PathBuf>,
}

/// Everything loaded from [`InputArgs`].
#[derive(Debug)]
pub struct LoadedInput {
    /// The text to check.
    pub text: String,
    /// Speller errors, empty when none were given.
    pub speller_errors: Vec<RawSpellError>,
    /// Grammar matches, empty when none were given.
    pub grammar_matches: Vec<GrammarMatch>,
    /// The user's dictionary.
    pub dictionary: UserDictionary,
}

impl InputArgs {
    /// Read the text, collaborator reports and dictionary.
    pub fn load(
        &self,
        config: &Config,
        max_bytes: Option<usize>,
    ) -> anyhow::Result<LoadedInput> {
        let text = read_input_file(&self.file, max_bytes)?;

        let speller_errors = match self.speller {
            Some(ref path) => {
                let body = read_input_file(path, max_bytes)?;
                speller::parse_speller_response(&body)
                    .with_context(|| format!("failed to parse speller response {path}"))?
            }
            None => Vec::new(),
        };
        let grammar_matches = match self.grammar {
            Some(ref path) => {
                let body = read_input_file(path, max_bytes)?;
                speller::parse_grammar_matches(&body)
                    .with_context(|| format!("failed to parse grammar matches {path}"))?
            }
            None => Vec::new(),
        };

        let dictionary = load_dictionary(self.dictionary.as_deref(), config)?;

        tracing::debug!(
            speller_errors = speller_errors.len(),
            grammar_matches = grammar_matches.len(),
            dictionary = dictionary.len(),
            "input loaded"
        );
        Ok(LoadedInput {
            text,
            speller_errors,
            grammar_matches,
            dictionary,
        })
    }
}

/// Load the dictionary named on the command line, or the configured one.
///
/// Inline `words` from config are merged either way.
pub fn load_dictionary(
    path: Option<&Utf8Path>,
    config: &Config,
) -> anyhow::Result<UserDictionary> {
    let mut dictionary = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path.as_std_path())
                .with_context(|| format!("failed to read dictionary {path}"))?;
            UserDictionary::from_text(&content)
        }
        None => {
            return config
                .load_dictionary()
                .context("failed to load configured dictionary");
        }
    };
    for word in config.words.iter().flatten() {
        dictionary.insert(word);
    }
    Ok(dictionary)
}
