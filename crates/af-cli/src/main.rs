#![forbid(unsafe_code)]

//! Autofigure CLI - turn free-form text into flow and hierarchy diagrams.
//!
//! # Commands
//!
//! - `generate`: Build a diagram from text and print it as JSON
//! - `detect`: Show which layout auto-detection picks and why
//! - `chat`: Apply a chat instruction to a saved diagram
//! - `serve`: Start the HTTP generation endpoints (requires `serve` feature)

use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

use af_core::{ChatRequest, DiagramMode, DiagramResponse, EngineConfig, GenerateRequest};
use af_diagram::{api, detect, generate};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(
    name = "autofigure",
    version,
    about = "Autofigure CLI - turn free-form text into diagrams",
    long_about = "Converts notes, steps and enumerations into node-and-edge diagrams.\n\n\
        Chooses between a left-to-right flow and a root-and-children hierarchy\n\
        from keyword signals in the text."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (can be repeated for more detail: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// TOML file overriding layout spacing and label limits
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a diagram from text and print it as JSON.
    Generate {
        /// Input file path, "-" for stdin, or inline text.
        #[arg(default_value = "-")]
        input: String,

        /// Which builder to use
        #[arg(short, long, value_enum, default_value = "auto")]
        mode: ModeArg,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Print counts, extent and timing instead of the diagram
        #[arg(long)]
        summary: bool,

        /// Output file path. If omitted, writes to stdout.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show which layout auto-detection picks and why.
    Detect {
        /// Input file path, "-" for stdin, or inline text.
        #[arg(default_value = "-")]
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a chat instruction ("explain", "add ...", "simplify") to a diagram.
    Chat {
        /// The chat message.
        message: String,

        /// Diagram JSON file, or "-" for stdin.
        #[arg(short, long)]
        diagram: String,

        /// Diagram type named in replies (defaults to the diagram's own type)
        #[arg(long)]
        diagram_type: Option<String>,

        /// Output the full chat response as JSON
        #[arg(long)]
        json: bool,

        /// Write the updated diagram here when the message edits it.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Start the HTTP generation endpoints (requires `serve` feature).
    #[cfg(feature = "serve")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum ModeArg {
    /// Pick from keyword signals
    Auto,
    /// One node per sentence, left to right
    Flow,
    /// Root node over listed items
    Hierarchy,
}

impl From<ModeArg> for DiagramMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => Self::Auto,
            ModeArg::Flow => Self::Flow,
            ModeArg::Hierarchy => Self::Hierarchy,
        }
    }
}

/// Result of `generate --summary`.
#[derive(Debug, Serialize)]
struct GenerateSummary {
    mode: String,
    diagram_type: String,
    node_count: usize,
    edge_count: usize,
    width: f64,
    height: f64,
    generate_time_ms: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet, cli.log_json);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Generate {
            input,
            mode,
            pretty,
            summary,
            output,
        } => cmd_generate(
            &input,
            mode.into(),
            pretty,
            summary,
            output.as_deref(),
            &config,
        ),

        Command::Detect { input, json } => cmd_detect(&input, json, &config),

        Command::Chat {
            message,
            diagram,
            diagram_type,
            json,
            output,
        } => cmd_chat(
            &message,
            &diagram,
            diagram_type,
            json,
            output.as_deref(),
            &config,
        ),

        #[cfg(feature = "serve")]
        Command::Serve { port, host } => cmd_serve(&host, port, &config),
    }
}

fn init_tracing(verbose: u8, quiet: bool, json: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time();
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config: {path}"))?;
    let config: EngineConfig =
        toml::from_str(&raw).with_context(|| format!("Invalid config file: {path}"))?;
    debug!(?config, "loaded engine config");
    Ok(config.sanitized())
}

fn load_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else if Path::new(input).exists() {
        std::fs::read_to_string(input).context(format!("Failed to read file: {input}"))
    } else {
        // Treat as inline text
        Ok(input.to_string())
    }
}

fn write_output(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).context(format!("Failed to write to: {path}"))?;
            info!("Wrote output to: {path}");
        }
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

// =============================================================================
// Command: generate
// =============================================================================

fn cmd_generate(
    input: &str,
    mode: DiagramMode,
    pretty: bool,
    summary: bool,
    output: Option<&str>,
    config: &EngineConfig,
) -> Result<()> {
    let source = load_input(input)?;

    let started = Instant::now();
    let diagram = generate(&GenerateRequest::new(source, mode), config)?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let rendered = if summary {
        to_json(&summarize(&diagram, mode, elapsed_ms), pretty)?
    } else {
        to_json(&diagram, pretty)?
    };
    write_output(output, &rendered)
}

fn summarize(diagram: &DiagramResponse, mode: DiagramMode, elapsed_ms: f64) -> GenerateSummary {
    let (width, height) =
        af_layout::bounds(&diagram.nodes).map_or((0.0, 0.0), |b| (b.width(), b.height()));
    GenerateSummary {
        mode: mode.as_str().to_string(),
        diagram_type: diagram.kind().as_str().to_string(),
        node_count: diagram.nodes.len(),
        edge_count: diagram.edges.len(),
        width,
        height,
        generate_time_ms: elapsed_ms,
    }
}

// =============================================================================
// Command: detect
// =============================================================================

fn cmd_detect(input: &str, json_output: bool, config: &EngineConfig) -> Result<()> {
    let source = load_input(input)?;
    if source.trim().is_empty() {
        return Err(af_core::AutofigureError::EmptyText.into());
    }
    let report = detect(&source, config);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Diagram type: {}", report.kind.as_str());
        println!("Confidence:   {:.1}", report.confidence);
        println!("Method:       {}", report.strategy.as_str());
        println!(
            "Signals:      hierarchy={} flow={} list={}",
            report.hierarchy_keyword.unwrap_or("-"),
            report.flow_keyword.unwrap_or("-"),
            report.list_keyword.as_deref().unwrap_or("-"),
        );
        println!(
            "Size:         {} nodes, {} edges",
            report.node_count, report.edge_count
        );
    }

    Ok(())
}

// =============================================================================
// Command: chat
// =============================================================================

fn cmd_chat(
    message: &str,
    diagram_path: &str,
    diagram_type: Option<String>,
    json_output: bool,
    output: Option<&str>,
    config: &EngineConfig,
) -> Result<()> {
    let raw = if diagram_path == "-" {
        load_input("-")?
    } else {
        std::fs::read_to_string(diagram_path)
            .context(format!("Failed to read diagram: {diagram_path}"))?
    };
    let diagram: DiagramResponse = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid diagram JSON: {diagram_path}"))?;

    let request = ChatRequest {
        message: Some(message.to_string()),
        diagram: Some(diagram),
        diagram_type,
    };
    let response = api::chat(&request, config)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.reply);
    }

    if let (Some(path), Some(updated)) = (output, response.updated_diagram.as_ref()) {
        write_output(Some(path), &to_json(updated, true)?)?;
    }
    Ok(())
}

// =============================================================================
// Command: serve (optional feature)
// =============================================================================

#[cfg(feature = "serve")]
fn cmd_serve(host: &str, port: u16, config: &EngineConfig) -> Result<()> {
    use tiny_http::{Header, Response, Server};

    let addr = format!("{host}:{port}");
    let server = Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?;

    println!("Autofigure endpoints listening at: http://{addr}");
    println!("  POST {}", api::GENERATE_PATH);
    println!("  POST {}", api::CHAT_PATH);
    println!("  POST {}", api::OCR_PATH);
    println!("Press Ctrl+C to stop");

    for mut request in server.incoming_requests() {
        let method = request.method().to_string();
        let path = request.url().to_string();

        let mut body = Vec::new();
        let result = match request.as_reader().read_to_end(&mut body) {
            Ok(_) => api::handle_request(&method, &path, &body, config),
            Err(err) => api::ApiResponse {
                status: 400,
                body: serde_json::json!({ "error": format!("Failed to read body: {err}") })
                    .to_string(),
            },
        };
        info!(%method, %path, status = result.status, "handled request");

        let mut response = Response::from_data(result.body.into_bytes()).with_status_code(result.status);
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
            response = response.with_header(header);
        }
        let _ = request.respond(response);
    }

    Ok(())
}
