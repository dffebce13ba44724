//! Command-line interface.
//!
//! `serve` starts the MCP server on STDIO or HTTP. `tools` runs a single tool
//! against the live API and prints its text result, or lists the tools.

mod list;

use std::io::Write;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rmcp::model::JsonObject;
use serde_json::{Value, json};
use tracing::info;

use crate::core::config::API_KEY_ENV;
use crate::core::{Config, Error, McpServer, Result, TransportConfig, TransportService};
use crate::domains::scholar::ScholarClient;
use crate::domains::tools::definitions::common::result_text;
use crate::domains::tools::definitions::{
    get_authors::DEFAULT_AUTHOR_FIELDS, get_paper::DEFAULT_PAPER_FIELDS,
    search_paper::DEFAULT_SEARCH_FIELDS,
};
use crate::domains::tools::{ToolKind, ToolRegistry};

pub use list::{ListFormat, render_tool_list};

#[derive(Debug, Parser)]
#[command(
    name = "semantic-scholar-mcp",
    version,
    about = "Semantic Scholar MCP Server - A Model Context Protocol server for Semantic Scholar",
    long_about = "Semantic Scholar MCP Server - A Model Context Protocol server for Semantic Scholar.\n\n\
                  This CLI provides commands to interact with Semantic Scholar API, including \
                  search, paper details, author info, and citation operations."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the MCP server with specified transport
    Serve(ServeArgs),
    /// MCP tools for interacting with Semantic Scholar
    Tools(ToolsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// Standard MCP communication via stdin/stdout
    Stdio,
    /// JSON-RPC over HTTP POST
    Http,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Transport to serve on
    #[arg(value_enum, default_value = "stdio")]
    pub transport: TransportKind,

    /// Port to bind the HTTP server to (only used with 'http' transport)
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Host to bind the HTTP server to (only used with 'http' transport)
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Enable debug mode with additional logging
    #[arg(long)]
    pub debug: bool,

    /// Semantic Scholar API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Debug, Args)]
pub struct ToolsArgs {
    /// Semantic Scholar API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: ToolCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CitationFormat {
    Bibtex,
    Apa,
    Mla,
    Chicago,
}

impl CitationFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Bibtex => "bibtex",
            Self::Apa => "apa",
            Self::Mla => "mla",
            Self::Chicago => "chicago",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ToolCommand {
    /// List all available MCP tools provided by the server
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: ListFormat,

        /// Show parameters and usage examples for each tool
        #[arg(short, long)]
        verbose: bool,
    },

    /// Search for papers using Semantic Scholar
    #[command(name = "search_paper")]
    SearchPaper {
        /// The search query string
        query: String,

        /// Comma-separated list of fields to return
        #[arg(long, default_value = DEFAULT_SEARCH_FIELDS)]
        fields: String,

        /// Maximum number of results to return (max: 100)
        #[arg(long, default_value_t = 10)]
        limit: u64,

        /// Starting position in the list of results
        #[arg(long, default_value_t = 0)]
        offset: u64,

        /// Publication year or range (e.g., '2019', '2016-2020')
        #[arg(long)]
        year: Option<String>,

        /// Comma-separated list of fields of study to filter by
        #[arg(long)]
        fields_of_study: Option<String>,

        /// Only include papers with open access PDFs
        #[arg(long)]
        open_access_pdf: bool,
    },

    /// Get detailed information about a specific paper
    #[command(name = "get_paper")]
    GetPaper {
        /// Paper ID (supports S2, DOI, ArXiv, MAG, ACL, PubMed, Corpus ID)
        paper_id: String,

        /// Comma-separated list of fields to return
        #[arg(long, default_value = DEFAULT_PAPER_FIELDS)]
        fields: String,
    },

    /// Get authors information for a specific paper
    #[command(name = "get_authors")]
    GetAuthors {
        /// Paper ID to get authors for
        paper_id: String,

        /// Comma-separated list of author fields to return
        #[arg(long, default_value = DEFAULT_AUTHOR_FIELDS)]
        fields: String,

        /// Maximum number of authors to return
        #[arg(long, default_value_t = 100)]
        limit: u64,

        /// Starting position in the list of authors
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },

    /// Get citation information in various formats
    #[command(name = "get_citation")]
    GetCitation {
        /// Paper ID to get citation for
        paper_id: String,

        /// Citation format
        #[arg(long, value_enum, default_value = "bibtex")]
        format: CitationFormat,
    },
}

impl ToolCommand {
    /// The tool to run and its arguments, or `None` for `list`.
    pub fn invocation(&self) -> Option<(ToolKind, JsonObject)> {
        let (kind, args) = match self {
            Self::List { .. } => return None,
            Self::SearchPaper {
                query,
                fields,
                limit,
                offset,
                year,
                fields_of_study,
                open_access_pdf,
            } => {
                let mut args = json!({
                    "query": query,
                    "fields": fields,
                    "limit": limit,
                    "offset": offset,
                });
                if let Some(year) = year {
                    args["year"] = json!(year);
                }
                if let Some(fields_of_study) = fields_of_study {
                    args["fieldsOfStudy"] = json!(fields_of_study);
                }
                if *open_access_pdf {
                    args["openAccessPdf"] = json!(true);
                }
                (ToolKind::SearchPaper, args)
            }
            Self::GetPaper { paper_id, fields } => (
                ToolKind::GetPaper,
                json!({"paper_id": paper_id, "fields": fields}),
            ),
            Self::GetAuthors {
                paper_id,
                fields,
                limit,
                offset,
            } => (
                ToolKind::GetAuthors,
                json!({
                    "paper_id": paper_id,
                    "fields": fields,
                    "limit": limit,
                    "offset": offset,
                }),
            ),
            Self::GetCitation { paper_id, format } => (
                ToolKind::GetCitation,
                json!({"paper_id": paper_id, "format": format.as_str()}),
            ),
        };

        match args {
            Value::Object(map) => Some((kind, map)),
            _ => None,
        }
    }
}

impl Cli {
    /// Whether `serve --debug` was given.
    pub fn debug(&self) -> bool {
        matches!(&self.command, Command::Serve(args) if args.debug)
    }

    /// Run the selected command.
    pub async fn run(self, config: Config) -> Result<()> {
        match self.command {
            Command::Serve(args) => serve(args, config).await,
            Command::Tools(args) => run_tools(args, config).await,
        }
    }
}

impl ServeArgs {
    /// Resolve the transport to start, keeping env-configured HTTP settings.
    pub fn transport_config(&self, base: TransportConfig) -> Result<TransportConfig> {
        match self.transport {
            #[cfg(feature = "stdio")]
            TransportKind::Stdio => Ok(TransportConfig::stdio()),
            #[cfg(feature = "http")]
            TransportKind::Http => Ok(base.into_http(self.port, self.host.clone())),
            #[allow(unreachable_patterns)]
            other => {
                let _ = base;
                Err(Error::config(format!(
                    "transport {other:?} is not enabled in this build"
                )))
            }
        }
    }
}

async fn serve(args: ServeArgs, config: Config) -> Result<()> {
    let mut config = config.with_api_key(args.api_key.clone());
    config.transport = args.transport_config(config.transport.clone())?;

    if args.debug {
        info!("Debug mode enabled");
    }
    info!("Starting {} v{}", config.server.name, config.server.version);
    config.log_credentials();

    info!("Available tools:");
    for kind in ToolKind::ALL {
        info!(
            "  • {} - {}",
            kind.name(),
            kind.to_tool().description.unwrap_or_default()
        );
    }

    #[cfg(feature = "http")]
    if let TransportConfig::Http(http) = &config.transport {
        info!("Starting HTTP server on http://{}:{}", http.host, http.port);
        info!(
            "  • HTTP  http://{}:{}{} - MCP over HTTP endpoint",
            http.host, http.port, http.rpc_path
        );
    }
    if config.transport.is_stdio() {
        info!("Starting Semantic Scholar MCP Server...");
        info!("Server will communicate via stdio (MCP standard)");
    }

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config);
    transport.run(server).await?;

    info!("Server shutting down");
    Ok(())
}

async fn run_tools(args: ToolsArgs, config: Config) -> Result<()> {
    let Some((kind, arguments)) = args.command.invocation() else {
        if let ToolCommand::List { format, verbose } = args.command {
            let listing = render_tool_list(format, verbose)?;
            writeln!(std::io::stdout().lock(), "{listing}")?;
        }
        return Ok(());
    };

    let config = config.with_api_key(args.api_key);
    let client = Arc::new(ScholarClient::from_config(&config));
    let registry = ToolRegistry::new(client);
    let result = registry
        .call_tool(kind.name(), Value::Object(arguments))
        .await?;

    if let Some(text) = result_text(&result) {
        writeln!(std::io::stdout().lock(), "{text}")?;
    }
    Ok(())
}
