//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes rhyme lookup, syllable counting and rhyme scheme labelling over
//! MCP, making them available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It holds one [`Lexicon`] behind an
//! `Arc` and each `#[tool]` method delegates to the same core functions the
//! CLI commands use.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use versekit_core::{Lexicon, SyllableMode, analyze_lines, markdown, rhyme_scheme};

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

/// Parameters for the `lookup_rhymes` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct LookupRhymesParams {
    /// The word to find rhymes for.
    pub word: String,
    /// Maximum number of rhymes to return.
    pub limit: Option<usize>,
}

/// Parameters for the `count_syllables` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CountSyllablesParams {
    /// Words to count.
    pub words: Vec<String>,
    /// Counting mode: "auto" (dictionary, then estimate) or "estimate".
    pub mode: Option<SyllableMode>,
}

/// Parameters for the `analyze_lines` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeLinesParams {
    /// Lyric or poem text, one line per verse line.
    pub text: String,
    /// Counting mode: "auto" (dictionary, then estimate) or "estimate".
    pub mode: Option<SyllableMode>,
    /// Whether to strip markdown formatting before analysis.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// Parameters for the `rhyme_scheme` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RhymeSchemeParams {
    /// Lyric or poem text, one line per verse line.
    pub text: String,
    /// Whether to strip markdown formatting before analysis.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// Defaults applied when a tool call leaves a setting out.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerDefaults {
    /// Syllable counting mode.
    pub syllable_mode: SyllableMode,
    /// Cap on listed rhymes.
    pub rhyme_limit: Option<usize>,
    /// Maximum accepted text size in bytes; `None` disables the check.
    pub max_input_bytes: Option<usize>,
}

/// MCP server exposing the lexicon to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    lexicon: Arc<Lexicon>,
    defaults: ServerDefaults,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl ProjectServer {
    /// Create a new MCP server instance over `lexicon`.
    pub fn new(lexicon: Arc<Lexicon>, defaults: ServerDefaults) -> Self {
        Self {
            lexicon,
            defaults,
            tool_router: Self::tool_router(),
        }
    }

    fn prepare_text(&self, text: &str, strip_markdown: bool) -> Result<String, McpError> {
        versekit_core::validate_input_size(text, self.defaults.max_input_bytes)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        Ok(if strip_markdown {
            markdown::strip_to_lyrics(text)
        } else {
            text.to_string()
        })
    }

    /// Get project and dictionary information.
    #[tool(description = "Get project name, version, and loaded dictionary statistics")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let stats = self.lexicon.stats();
        let text = if params.format == "json" {
            let info = serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
                "dictionary": stats,
            });
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}\nDictionary: {} ({} words, {} rhyme keys)",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
                stats.origin,
                stats.words,
                stats.rhyme_keys,
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// List words that rhyme with a word.
    #[tool(
        description = "Find dictionary words that rhyme with a word. Returns the rhyme key, pronunciation and rhyming words; unknown words have no rhymes."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn lookup_rhymes(
        &self,
        Parameters(params): Parameters<LookupRhymesParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "lookup_rhymes", word = %params.word, "executing MCP tool");

        let limit = params.limit.or(self.defaults.rhyme_limit);
        let report = self.lexicon.rhyme_report(&params.word, limit);

        tracing::info!(
            tool = "lookup_rhymes",
            total = report.total,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &report,
        )?)]))
    }

    /// Count syllables in words.
    #[tool(
        description = "Count syllables in words. Uses the pronunciation dictionary, falling back to a spelling estimate for unknown words."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn count_syllables(
        &self,
        Parameters(params): Parameters<CountSyllablesParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "count_syllables",
            words = params.words.len(),
            "executing MCP tool"
        );

        if params.words.is_empty() {
            return Err(McpError::invalid_params("no words given", None));
        }
        let mode = params.mode.unwrap_or(self.defaults.syllable_mode);
        let reports: Vec<_> = params
            .words
            .iter()
            .map(|word| self.lexicon.syllables(word, mode))
            .collect();

        Ok(CallToolResult::success(vec![Content::text(to_json(
            &reports,
        )?)]))
    }

    /// Count syllables line by line.
    #[tool(
        description = "Count syllables per line of a lyric or poem. Returns per-line and per-word counts with their source."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_lines(
        &self,
        Parameters(params): Parameters<AnalyzeLinesParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "analyze_lines",
            strip_md = params.strip_markdown,
            "executing MCP tool"
        );

        let text = self.prepare_text(&params.text, params.strip_markdown)?;
        let mode = params.mode.unwrap_or(self.defaults.syllable_mode);
        let report = analyze_lines(&self.lexicon, &text, mode)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        tracing::info!(
            tool = "analyze_lines",
            lines = report.lines.len(),
            syllables = report.total_syllables,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &report,
        )?)]))
    }

    /// Label the rhyme scheme of a text.
    #[tool(
        description = "Label each line of a lyric or poem by the rhyme of its final word (e.g. ABAB). Lines ending in unknown words get '-'."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn rhyme_scheme(
        &self,
        Parameters(params): Parameters<RhymeSchemeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "rhyme_scheme",
            strip_md = params.strip_markdown,
            "executing MCP tool"
        );

        let text = self.prepare_text(&params.text, params.strip_markdown)?;
        let report = rhyme_scheme(&self.lexicon, &text)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        tracing::info!(
            tool = "rhyme_scheme",
            scheme = %report.scheme,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &report,
        )?)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
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
                "{} MCP server. Use tools to look up rhymes, count syllables and label rhyme schemes.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn server() -> ProjectServer {
        server_with(ServerDefaults::default())
    }

    fn server_with(defaults: ServerDefaults) -> ProjectServer {
        let lexicon = Lexicon::bundled().expect("bundled dictionary should load");
        ProjectServer::new(Arc::new(lexicon), defaults)
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn extract_json(result: &CallToolResult) -> serde_json::Value {
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("output should be valid JSON")
    }

    #[test]
    fn server_info_has_correct_name() {
        let info = ServerHandler::get_info(&server());

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let info = ServerHandler::get_info(&server());
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn server_has_instructions() {
        let info = ServerHandler::get_info(&server());
        let instructions = info.instructions.expect("server should have instructions");
        assert!(instructions.contains(env!("CARGO_PKG_NAME")));
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let params = Parameters(GetInfoParams {
            format: "text".to_string(),
        });

        let result = server().get_info(params).expect("get_info should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains(env!("CARGO_PKG_NAME")));
        assert!(text.contains("bundled"));
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let result = server().get_info(params).expect("get_info should succeed");
        let json = extract_json(&result);

        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert!(json["dictionary"]["words"].as_u64().unwrap() > 0);
    }

    #[test]
    fn lookup_rhymes_tool_works() {
        let params = Parameters(LookupRhymesParams {
            word: "time".to_string(),
            limit: None,
        });

        let result = server()
            .lookup_rhymes(params)
            .expect("lookup_rhymes should succeed");
        let json = extract_json(&result);

        assert_eq!(json["key"], "AY-M");
        let rhymes: Vec<&str> = json["rhymes"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(rhymes.contains(&"dime"));
        assert!(rhymes.contains(&"rhyme"));
    }

    #[test]
    fn lookup_rhymes_applies_default_limit() {
        let server = server_with(ServerDefaults {
            rhyme_limit: Some(2),
            ..Default::default()
        });
        let params = Parameters(LookupRhymesParams {
            word: "time".to_string(),
            limit: None,
        });

        let json = extract_json(&server.lookup_rhymes(params).unwrap());
        assert_eq!(json["rhymes"].as_array().unwrap().len(), 2);
        assert!(json["total"].as_u64().unwrap() > 2);
    }

    #[test]
    fn lookup_rhymes_unknown_word_is_empty() {
        let params = Parameters(LookupRhymesParams {
            word: "blorfle".to_string(),
            limit: None,
        });

        let json = extract_json(&server().lookup_rhymes(params).unwrap());
        assert!(json["rhymes"].as_array().unwrap().is_empty());
        assert!(json.get("key").is_none());
    }

    #[test]
    fn count_syllables_tool_works() {
        let params = Parameters(CountSyllablesParams {
            words: vec!["banana".to_string(), "blorfle".to_string()],
            mode: None,
        });

        let json = extract_json(&server().count_syllables(params).unwrap());
        assert_eq!(json[0]["syllables"], 3);
        assert_eq!(json[0]["source"], "dictionary");
        assert_eq!(json[1]["syllables"], 2);
        assert_eq!(json[1]["source"], "estimate");
    }

    #[test]
    fn count_syllables_rejects_empty_list() {
        let params = Parameters(CountSyllablesParams {
            words: Vec::new(),
            mode: None,
        });
        assert!(server().count_syllables(params).is_err());
    }

    #[test]
    fn analyze_lines_tool_works() {
        let params = Parameters(AnalyzeLinesParams {
            text: "## Chorus\n\nThe ocean in motion\n".to_string(),
            mode: Some(SyllableMode::Auto),
            strip_markdown: true,
        });

        let json = extract_json(&server().analyze_lines(params).unwrap());
        assert_eq!(json["lines"].as_array().unwrap().len(), 1);
        assert_eq!(json["total_syllables"], 6);
    }

    #[test]
    fn analyze_lines_rejects_oversized_text() {
        let server = server_with(ServerDefaults {
            max_input_bytes: Some(8),
            ..Default::default()
        });
        let params = Parameters(AnalyzeLinesParams {
            text: "The ocean in motion".to_string(),
            mode: None,
            strip_markdown: false,
        });
        assert!(server.analyze_lines(params).is_err());
    }

    #[test]
    fn rhyme_scheme_tool_works() {
        let params = Parameters(RhymeSchemeParams {
            text: "day\nnight\nway\nlight\n".to_string(),
            strip_markdown: false,
        });

        let json = extract_json(&server().rhyme_scheme(params).unwrap());
        assert_eq!(json["scheme"], "ABAB");
    }

    #[test]
    fn rhyme_scheme_empty_text_errors() {
        let params = Parameters(RhymeSchemeParams {
            text: "   \n".to_string(),
            strip_markdown: false,
        });
        assert!(server().rhyme_scheme(params).is_err());
    }
}
