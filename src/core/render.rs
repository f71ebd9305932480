//! Renderer module
//!
//! Renders JSON values to the supported output formats: json, jsonl

use serde_json::Value;
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    #[cfg(test)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for JSON values
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[cfg(test)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a value to a string
    pub fn render(&self, value: &Value) -> String {
        match self.config.format {
            OutputFormat::Json => self.to_json(value),
            OutputFormat::Jsonl => self.render_jsonl(value),
        }
    }

    /// Render to a writer, followed by a newline
    pub fn render_to<W: Write>(&self, value: &Value, mut writer: W) -> std::io::Result<()> {
        let output = self.render(value);
        if output.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", output)
    }

    /// Arrays render one element per line; anything else renders as a single line
    fn render_jsonl(&self, value: &Value) -> String {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| self.to_json(item))
                .collect::<Vec<_>>()
                .join(if self.config.pretty { "\n\n" } else { "\n" }),
            other => self.to_json(other),
        }
    }

    fn to_json(&self, value: &Value) -> String {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        // Serializing a Value cannot fail: all map keys are strings
        rendered.unwrap_or_else(|_| "null".to_string())
    }
}
