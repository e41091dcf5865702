//! MCP server: the proofreading engine as tools over stdio.
//!
//! Tools are thin. Each one checks the input size, calls into `pravka_core`
//! and answers with pretty-printed JSON. The dictionary is loaded once at
//! startup and shared by every call.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use pravka_core::config::Config;
use pravka_core::{
    CheckInput, CheckOptions, CheckReport, GrammarMatch, RawSpellError, UserDictionary,
    check_text, punctuation, readability,
};

/// Parameters for the `check_text` and `correct_text` tools.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckTextParams {
    /// The text to check.
    pub text: String,
    /// Errors the spelling service reported for this text.
    #[serde(default)]
    pub speller_errors: Vec<RawSpellError>,
    /// Matches a grammar checker reported for this text.
    #[serde(default)]
    pub grammar_matches: Vec<GrammarMatch>,
    /// Extra dictionary words for this call, merged with the configured dictionary.
    #[serde(default)]
    pub words: Vec<String>,
}

/// Parameters for the `check_readability` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckReadabilityParams {
    /// The text to analyze.
    pub text: String,
    /// Minimum acceptable composite score (0.0 to 1.0).
    pub min_score: Option<f64>,
}

/// Parameters for the `scan_punctuation` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScanPunctuationParams {
    /// The text to scan.
    pub text: String,
}

/// What `get_info` reports.
#[derive(Serialize)]
struct ServerSummary {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    dictionary_words: usize,
    max_edit_distance: usize,
    context_width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

#[derive(Serialize)]
struct CorrectTextOutput<'a> {
    text: &'a str,
    applied: usize,
    skipped: usize,
}

/// MCP server exposing the proofreading engine.
#[derive(Clone)]
pub struct PravkaServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    dictionary: Arc<UserDictionary>,
    options: CheckOptions,
    min_score: Option<f64>,
    max_input_bytes: Option<usize>,
}

impl Default for PravkaServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PravkaServer {
    /// Create a server with an empty dictionary, default options and no input limit.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            dictionary: Arc::new(UserDictionary::new()),
            options: CheckOptions::default(),
            min_score: None,
            max_input_bytes: None,
        }
    }

    /// Use `dictionary` for every check.
    #[must_use]
    pub fn with_dictionary(mut self, dictionary: UserDictionary) -> Self {
        self.dictionary = Arc::new(dictionary);
        self
    }

    /// Take check options and the default minimum score from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &Config) -> Self {
        self.options = CheckOptions::from(config);
        self.min_score = config.min_score;
        self
    }

    /// Reject texts larger than `max` bytes.
    #[must_use]
    pub const fn with_max_input_bytes(mut self, max: Option<usize>) -> Self {
        self.max_input_bytes = max;
        self
    }

    fn ensure_size(&self, text: &str) -> Result<(), McpError> {
        match self.max_input_bytes {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            )),
            _ => Ok(()),
        }
    }

    fn run_check(&self, params: &CheckTextParams) -> Result<CheckReport, McpError> {
        self.ensure_size(&params.text)?;
        let merged;
        let dictionary = if params.words.is_empty() {
            self.dictionary.as_ref()
        } else {
            let mut extended = UserDictionary::clone(&self.dictionary);
            for word in &params.words {
                extended.insert(word);
            }
            merged = extended;
            &merged
        };
        let input = CheckInput::new(&params.text, dictionary)
            .with_speller_errors(&params.speller_errors)
            .with_grammar_matches(&params.grammar_matches);
        Ok(check_text(&input, &self.options))
    }

    /// Describe the server and the settings it runs with.
    #[tool(
        description = "Get pravka's name and version plus the active settings: dictionary size, edit distance, context width, default readability minimum and input limit"
    )]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(&self) -> Result<CallToolResult, McpError> {
        let summary = ServerSummary {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            dictionary_words: self.dictionary.len(),
            max_edit_distance: self.options.max_edit_distance,
            context_width: self.options.context_width,
            min_score: self.min_score,
            max_input_bytes: self.max_input_bytes,
        };
        tracing::debug!(tool = "get_info", "MCP tool completed");
        json_result(&summary)
    }

    /// Full check: categorized errors, corrected text and readability.
    #[tool(
        description = "Check Russian text. Takes the text plus optional speller errors and grammar matches; returns categorized errors (spelling, punctuation, semantic, other) with character offsets, the corrected text, and readability metrics."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn check_text(
        &self,
        Parameters(params): Parameters<CheckTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            speller_errors = params.speller_errors.len(),
            grammar_matches = params.grammar_matches.len(),
            words = params.words.len(),
            "check_text"
        );
        let report = self.run_check(&params)?;
        tracing::info!(tool = "check_text", errors = report.errors.len(), "checked");
        json_result(&report)
    }

    /// Correct text and return only the result.
    #[tool(
        description = "Correct Russian text: insert missing commas and apply the best speller suggestions, skipping words in the user's dictionary. Returns the corrected text."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn correct_text(
        &self,
        Parameters(params): Parameters<CheckTextParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.run_check(&params)?;
        let output = CorrectTextOutput {
            text: &report.corrected_text,
            applied: report.applied.len(),
            skipped: report.skipped.len(),
        };
        tracing::info!(tool = "correct_text", applied = output.applied, "corrected");
        json_result(&output)
    }

    /// Score readability.
    #[tool(
        description = "Check readability of Russian text. Returns a composite score in [0, 1] (higher is easier) with Flesch-Kincaid, Coleman-Liau, and word statistics."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_readability(
        &self,
        Parameters(params): Parameters<CheckReadabilityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_size(&params.text)?;
        let min_score = params.min_score.or(self.min_score);
        let report = readability::check_readability(&params.text, min_score);
        tracing::info!(tool = "check_readability", score = report.metrics.score, "scored");
        json_result(&report)
    }

    /// Find missing commas before conjunctions.
    #[tool(
        description = "Find missing commas before Russian conjunctions (но, что, который, если, чтобы, когда, потому что). Returns findings with character offsets and suggested replacements."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn scan_punctuation(
        &self,
        Parameters(params): Parameters<ScanPunctuationParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_size(&params.text)?;
        let findings = punctuation::scan(&params.text);
        tracing::info!(tool = "scan_punctuation", findings = findings.len(), "scanned");
        json_result(&findings)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[tool_handler]
impl ServerHandler for PravkaServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Proofreading for Russian text. Pass speller errors and grammar matches you already have to check_text for a categorized review, or to correct_text for the fixed text alone. scan_punctuation and check_readability need only the text."
                    .to_string(),
            ),
        }
    }
}
