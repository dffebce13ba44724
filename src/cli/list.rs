//! `tools list` rendering.

use clap::ValueEnum;
use comfy_table::{ContentArrangement, Table};
use serde_json::{Value, json};

use crate::core::Result;
use crate::domains::tools::ToolKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Text,
    Json,
    Table,
}

/// One documented parameter of a tool schema.
struct Param {
    name: String,
    kind: String,
    required: bool,
    description: String,
    default: Option<String>,
}

impl Param {
    fn required_mark(&self) -> &'static str {
        if self.required {
            " (required)"
        } else {
            " (optional)"
        }
    }

    fn default_text(&self) -> String {
        self.default
            .as_ref()
            .map(|d| format!(" [default: {d}]"))
            .unwrap_or_default()
    }
}

/// Parameters of a tool in schema order.
fn params(kind: ToolKind) -> Vec<Param> {
    let tool = kind.to_tool();
    let required: Vec<&str> = tool
        .input_schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(properties) = tool.input_schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    properties
        .iter()
        .map(|(name, schema)| Param {
            name: name.clone(),
            kind: type_name(schema),
            required: required.contains(&name.as_str()),
            // Multi-line descriptions are summarized by their first line
            description: schema
                .get("description")
                .and_then(Value::as_str)
                .and_then(|d| d.lines().next())
                .unwrap_or("No description")
                .to_string(),
            default: schema.get("default").map(|d| match d {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        })
        .collect()
}

/// JSON schema type, ignoring the `null` of optional values.
fn type_name(schema: &Value) -> String {
    match schema.get("type") {
        Some(Value::String(t)) => t.clone(),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .unwrap_or("unknown")
            .to_string(),
        _ => "unknown".to_string(),
    }
}

fn description(kind: ToolKind) -> String {
    kind.to_tool()
        .description
        .map(|d| d.to_string())
        .unwrap_or_default()
}

/// Render the tool list in the requested format.
pub fn render_tool_list(format: ListFormat, verbose: bool) -> Result<String> {
    match format {
        ListFormat::Json => render_json(),
        ListFormat::Table => Ok(render_table(verbose)),
        ListFormat::Text => Ok(render_text(verbose)),
    }
}

fn render_json() -> Result<String> {
    let tools: Vec<Value> = ToolKind::ALL
        .iter()
        .map(|&kind| {
            let tool = kind.to_tool();
            let examples: Vec<Value> = kind
                .examples()
                .iter()
                .map(|e| {
                    json!({
                        "description": e.description,
                        "input": e.input_json(),
                        "usage": e.usage,
                    })
                })
                .collect();
            json!({
                "name": tool.name,
                "description": tool.description,
                "input_schema": tool.input_schema,
                "examples": examples,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&tools)?)
}

fn render_text(verbose: bool) -> String {
    let mut out = String::from("Available MCP Tools:\n\n");

    for kind in ToolKind::ALL {
        out.push_str(&format!("• {}: {}\n", kind.name(), description(kind)));

        if verbose {
            let params = params(kind);
            if !params.is_empty() {
                out.push_str("  Parameters:\n");
                for p in &params {
                    out.push_str(&format!(
                        "    - {}{}: {}{}\n",
                        p.name,
                        p.required_mark(),
                        p.description,
                        p.default_text()
                    ));
                }
            }

            out.push_str("  Examples:\n");
            for example in kind.examples() {
                out.push_str(&format!(
                    "    - {}: {}\n      Input: {}\n",
                    example.description,
                    example.usage,
                    example.input_json()
                ));
            }
        }

        out.push('\n');
    }

    out
}

fn render_table(verbose: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Tool", "Description"]);

    for kind in ToolKind::ALL {
        let mut cell = description(kind);

        if verbose {
            cell.push_str("\n\nInput Schema:");
            let params = params(kind);
            if params.is_empty() {
                cell.push_str("\n  No parameters required");
            }
            for p in &params {
                cell.push_str(&format!(
                    "\n  • {} ({}){}: {}{}",
                    p.name,
                    p.kind,
                    p.required_mark(),
                    p.description,
                    p.default_text()
                ));
            }

            cell.push_str("\n\nUsage Examples:");
            for (i, example) in kind.examples().iter().enumerate() {
                cell.push_str(&format!(
                    "\n  {}. {}\n     Input: {}\n     Usage: {}",
                    i + 1,
                    example.description,
                    example.input_json(),
                    example.usage
                ));
            }
        }

        table.add_row(vec![kind.name().to_string(), cell]);
    }

    format!("Available MCP Tools\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_format() {
        let text = render_tool_list(ListFormat::Text, false).unwrap();
        assert!(text.starts_with("Available MCP Tools:"));
        for kind in ToolKind::ALL {
            assert!(text.contains(kind.name()));
        }
        assert!(!text.contains("Parameters:"));
    }

    #[test]
    fn test_text_verbose() {
        let text = render_tool_list(ListFormat::Text, true).unwrap();
        assert!(text.contains("  Parameters:"));
        assert!(text.contains("  Examples:"));
        assert!(text.contains("query (required)"));
        assert!(text.contains("paper_id (required)"));
    }

    #[test]
    fn test_table_format() {
        let text = render_tool_list(ListFormat::Table, false).unwrap();
        assert!(text.starts_with("Available MCP Tools"));
        assert!(text.contains("search_paper"));
        assert!(text.contains("get_citation"));
        assert!(!text.contains("Input Schema:"));
    }

    #[test]
    fn test_table_verbose() {
        let text = render_tool_list(ListFormat::Table, true).unwrap();
        assert!(text.contains("Input Schema:"));
        assert!(text.contains("Usage Examples:"));
    }

    #[test]
    fn test_json_format() {
        let text = render_tool_list(ListFormat::Json, false).unwrap();
        let tools: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(tools.len(), 4);
        assert_eq!(tools[0]["name"], "search_paper");
        assert_eq!(tools[0]["examples"][0]["input"]["query"], "machine learning");
        assert!(tools[3]["input_schema"]["properties"].get("format").is_some());
    }

    #[test]
    fn test_type_name_skips_null() {
        assert_eq!(type_name(&json!({"type": ["string", "null"]})), "string");
        assert_eq!(type_name(&json!({"type": "integer"})), "integer");
        assert_eq!(type_name(&json!({})), "unknown");
    }
}
