//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes keyword-density analysis and the user-defined word list to AI
//! assistants over stdio. Tools delegate to `mitsudo-core`; the server owns a
//! shared segmenter (loading the dictionary once) and a shared word-list store.

use std::sync::Arc;

use mitsudo_core::density::AnalysisOptions;
use mitsudo_core::segmenter::Segmenter;
use mitsudo_core::word_list::WordListStore;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use crate::commands::analyze::analyze_with_store;

/// Segmenter shared across tool calls.
pub type SharedSegmenter = Arc<dyn Segmenter + Send + Sync>;

/// Word-list store shared across tool calls.
pub type SharedWordStore = Arc<dyn WordListStore + Send + Sync>;

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

/// Parameters for the `analyze_keyword_density` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeKeywordDensityParams {
    /// The Japanese text to analyze.
    pub text: String,
    /// Keywords whose density to measure. Surrounding whitespace is trimmed
    /// and blank entries are skipped.
    pub keywords: Vec<String>,
    /// Words to add to the user-defined list before analyzing.
    #[serde(default)]
    pub user_defined_words: Vec<String>,
}

/// Parameters for the `add_user_words` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AddUserWordsParams {
    /// Words to add. Blanks and duplicates are ignored.
    pub words: Vec<String>,
}

/// MCP server for keyword-density analysis.
#[derive(Clone)]
pub struct MitsudoServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    segmenter: SharedSegmenter,
    store: SharedWordStore,
    options: AnalysisOptions,
    max_input_bytes: Option<usize>,
}

#[tool_router]
impl MitsudoServer {
    /// Create a server over a segmenter and word-list store.
    pub fn new(
        segmenter: SharedSegmenter,
        store: SharedWordStore,
        options: AnalysisOptions,
        max_input_bytes: Option<usize>,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            segmenter,
            store,
            options,
            max_input_bytes,
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Measure keyword density in Japanese text.
    #[tool(
        description = "Measure keyword density in Japanese text. Counts independent words (nouns, verbs, adjectives, adjectival nouns), reports each keyword's rate against the acceptable band, and ranks the most frequent words. Optional user-defined words are saved and treated as single words."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn analyze_keyword_density(
        &self,
        Parameters(params): Parameters<AnalyzeKeywordDensityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "analyze_keyword_density",
            keywords = params.keywords.len(),
            additions = params.user_defined_words.len(),
            "executing MCP tool"
        );

        if let Some(max) = self.max_input_bytes
            && params.text.len() > max
        {
            return Err(McpError::invalid_params(
                format!(
                    "input too large: text is {} bytes (limit: {max} bytes)",
                    params.text.len()
                ),
                None,
            ));
        }

        let report = analyze_with_store(
            self.segmenter.as_ref(),
            self.store.as_ref(),
            &params.text,
            &params.keywords,
            &params.user_defined_words,
            &self.options,
        )
        .map_err(|e| McpError::internal_error(format!("{e:#}"), None))?;

        tracing::info!(
            tool = "analyze_keyword_density",
            total = report.total_independent_words,
            out_of_band = report.out_of_band_count(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &report,
        )?)]))
    }

    /// List the user-defined words.
    #[tool(description = "List the user-defined words treated as single independent words.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn list_user_words(&self) -> Result<CallToolResult, McpError> {
        let words = self
            .store
            .load()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let json = serde_json::json!({ "independent_words": words });
        Ok(CallToolResult::success(vec![Content::text(to_json(&json)?)]))
    }

    /// Add user-defined words.
    #[tool(
        description = "Add words to the user-defined list. Returns the full list after merging."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", additions = params.words.len()))]
    fn add_user_words(
        &self,
        Parameters(params): Parameters<AddUserWordsParams>,
    ) -> Result<CallToolResult, McpError> {
        let words = self
            .store
            .save(&params.words)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        tracing::info!(tool = "add_user_words", total = words.len(), "MCP tool completed");
        let json = serde_json::json!({ "independent_words": words });
        Ok(CallToolResult::success(vec![Content::text(to_json(&json)?)]))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_handler]
impl ServerHandler for MitsudoServer {
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
                "{} MCP server. Use analyze_keyword_density to check how often keywords appear in Japanese text.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
