//! Renderer module
//!
//! Renders reports and lookups to different output formats: plain, jsonl, json, md

use crate::core::frequency::format_lines;
use crate::core::model::{ErrorItem, ItemCount, Lookup};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<name> <count>` lines, the historical listing format
    #[default]
    Plain,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(OutputFormat::Plain),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
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

/// Renderer for reports and lookups.
///
/// Non-empty output always ends with a newline.
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> RenderConfig {
        self.config
    }

    /// Render a full item report
    pub fn render_report(&self, items: &[ItemCount]) -> String {
        match self.config.format {
            OutputFormat::Plain => format_lines(items.iter().cloned()),
            OutputFormat::Jsonl => self.render_jsonl(items),
            OutputFormat::Json => self.render_json(items),
            OutputFormat::Markdown => render_markdown_table(items),
        }
    }

    /// Render a single-item lookup
    pub fn render_lookup(&self, lookup: &Lookup) -> String {
        match self.config.format {
            OutputFormat::Plain => format!("{}\n", lookup_message(lookup)),
            OutputFormat::Jsonl | OutputFormat::Json => self.render_json(lookup),
            OutputFormat::Markdown => format!("**{}**\n", lookup_message(lookup)),
        }
    }

    /// Render an error for machine-readable formats; plain and md get a one-liner
    pub fn render_error(&self, error: &ErrorItem) -> String {
        match self.config.format {
            OutputFormat::Jsonl | OutputFormat::Json => self.render_json(error),
            OutputFormat::Markdown => format!("- **{}**: {}\n", error.code, error.message),
            OutputFormat::Plain => format!("{}\n", error.message),
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, items: &[ItemCount]) -> String {
        let mut output = String::new();
        for item in items {
            let line = if self.config.pretty {
                serde_json::to_string_pretty(item)
            } else {
                serde_json::to_string(item)
            };
            if let Ok(line) = line {
                if self.config.pretty && !output.is_empty() {
                    output.push('\n');
                }
                output.push_str(&line);
                output.push('\n');
            }
        }
        output
    }

    fn render_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> String {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        format!("{}\n", json.unwrap_or_else(|_| "null".to_string()))
    }
}

/// Human-readable lookup outcome
pub fn lookup_message(lookup: &Lookup) -> String {
    if lookup.is_found() {
        format!("Total of {} {} sold today.", lookup.count, lookup.item)
    } else {
        "Item not found in file or entered incorrectly.".to_string()
    }
}

fn render_markdown_table(items: &[ItemCount]) -> String {
    if items.is_empty() {
        return "_No items._\n".to_string();
    }

    let mut output = String::from("| Item | Count |\n|------|------:|\n");
    for item in items {
        output.push_str(&format!("| {} | {} |\n", item.item, item.count));
    }
    output
}
