//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes scoring over stdio so AI assistants can check prose as they write
//! it. Tools delegate to the [`Scorer`] the CLI uses; nothing here computes
//! scores itself.
//!
//! # Tools
//!
//! - `get_info` - name and version
//! - `score_text` - counts and scores for a text
//! - `classify_words` - Spache and Dale-Chall outcomes per word

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use readscore_core::{ScoreConfig, Scorer, markdown};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `score_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScoreTextParams {
    /// The text to score.
    pub text: String,
    /// Formula selection and word-list flags. Omit to use the server defaults.
    pub options: Option<ScoreConfig>,
    /// Whether to strip markdown formatting before scoring.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// Parameters for the `classify_words` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ClassifyWordsParams {
    /// Words to classify.
    pub words: Vec<String>,
    /// Treat words starting with a capital letter as proper names.
    #[serde(default)]
    pub caps_as_names: bool,
}

/// MCP server exposing readability scoring.
#[derive(Clone)]
pub struct ReadscoreServer {
    scorer: Arc<Scorer>,
    defaults: ScoreConfig,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for ReadscoreServer {
    fn default() -> Self {
        Self::new(Scorer::new(), ScoreConfig::default(), None)
    }
}

#[tool_router]
impl ReadscoreServer {
    /// Create a server around `scorer`.
    ///
    /// `defaults` applies when a `score_text` call carries no options.
    pub fn new(scorer: Scorer, defaults: ScoreConfig, max_input_bytes: Option<usize>) -> Self {
        Self {
            scorer: Arc::new(scorer),
            defaults,
            max_input_bytes,
            tool_router: Self::tool_router(),
        }
    }

    fn check_size(&self, bytes: usize) -> Result<(), McpError> {
        match self.max_input_bytes {
            Some(max) if bytes > max => Err(McpError::invalid_params(
                format!("input too large: {bytes} bytes (limit: {max} bytes)"),
                None,
            )),
            _ => Ok(()),
        }
    }

    /// Get project information.
    #[tool(description = "Get readscore name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let text = if params.format == "json" {
            let info = serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
            });
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score a text.
    #[tool(
        description = "Score the readability of English text. Returns word, sentence, letter and syllable counts plus Dale-Chall, ARI, Coleman-Liau, Flesch-Kincaid, SMOG and Gunning-Fog grades (Spache on request via options.onlySpache)."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_text(
        &self,
        Parameters(params): Parameters<ScoreTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "score_text",
            strip_md = params.strip_markdown,
            "executing MCP tool"
        );
        self.check_size(params.text.len())?;

        let text = if params.strip_markdown {
            markdown::strip_to_prose(&params.text)
        } else {
            params.text
        };
        let options = params.options.unwrap_or(self.defaults);
        let Some(result) = self.scorer.score(&text, &options) else {
            return Err(McpError::invalid_params("text contains no words to score", None));
        };

        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "score_text",
            words = result.word_count,
            sentences = result.sentence_count,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Classify words against both lists.
    #[tool(
        description = "Show how words are classified: normalized form, syllables, and whether each is familiar under the Spache and Dale-Chall lists."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn classify_words(
        &self,
        Parameters(params): Parameters<ClassifyWordsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "classify_words",
            count = params.words.len(),
            "executing MCP tool"
        );
        self.check_size(params.words.iter().map(String::len).sum())?;

        let reports = self
            .scorer
            .describe(params.words.iter().map(String::as_str), params.caps_as_names);
        let json = serde_json::to_string_pretty(&reports)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(tool = "classify_words", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ReadscoreServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use score_text for readability grades and classify_words to see why a word counted as difficult.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
