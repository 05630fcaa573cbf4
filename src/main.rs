//! hash-router
//!
//! Dispatches location fragments to handlers through a compiled route table.
//!
//! # Architecture Overview
//!
//! ```text
//!     stdin lines (one fragment per line)
//!          │
//!          ▼
//!   ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!   │ host::events │───▶│  host::run   │───▶│   routing    │
//!   │  (location)  │    │ serial loop  │    │   Router     │
//!   └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                  │
//!                                                  ▼
//!                                           ┌──────────────┐
//!                                           │   handlers   │
//!                                           │ presentation │
//!                                           └──────────────┘
//!
//!   config (TOML) → lifecycle::startup → Router (compiled once)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use hash_router::host;
use hash_router::lifecycle::{signals, startup, Shutdown};
use hash_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "hash-router")]
#[command(about = "Dispatch location fragments to handlers", long_about = None)]
struct Cli {
    /// Route table and settings (TOML). Uses the built-in demo table when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch the initial fragment, then one fragment per stdin line
    Run {
        /// Fragment present at startup
        #[arg(short, long, default_value = "")]
        initial: String,
    },
    /// Resolve fragments without invoking handlers and print the matches as JSON
    Resolve {
        #[arg(required = true)]
        fragments: Vec<String>,
    },
    /// List the compiled route table
    Routes,
    /// Load and compile the configuration, then exit
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = startup::load(cli.config.as_deref())?;
    logging::init_logging(&config.observability)?;
    metrics::describe_metrics();

    tracing::info!(
        config = ?cli.config,
        routes = config.routes.len(),
        marker = %config.matching.marker,
        "Configuration loaded"
    );

    let app = startup::build(config)?;

    let code = match cli.command {
        Commands::Run { initial } => run(app, initial).await?,
        Commands::Resolve { fragments } => resolve(&app, &fragments)?,
        Commands::Routes => routes(&app)?,
        Commands::Check => {
            println!("ok: {} routes", app.router.len());
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}

async fn run(app: startup::App, initial: String) -> std::io::Result<ExitCode> {
    let shutdown = Shutdown::new();
    tokio::spawn(signals::wait_for_ctrl_c(shutdown.clone()));

    let (handle, events) = host::location(initial.clone());
    // Detached: a stdin read still pending after shutdown must not block exit.
    let _reader = host::spawn_stdin_source(handle)?;

    let summary = host::run(&app.router, &initial, events, &shutdown).await;

    tracing::info!(presentation = ?app.presentation.current(), "Final presentation state");
    Ok(if summary.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn resolve(app: &startup::App, fragments: &[String]) -> Result<ExitCode, serde_json::Error> {
    let mut code = ExitCode::SUCCESS;
    for fragment in fragments {
        let line = match app.router.resolve(fragment) {
            Ok(m) => json!({ "fragment": fragment, "match": m }),
            Err(e) => {
                code = ExitCode::FAILURE;
                json!({ "fragment": fragment, "error": e.to_string() })
            }
        };
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(code)
}

fn routes(app: &startup::App) -> Result<ExitCode, serde_json::Error> {
    app.router.dump_routes();
    let table: Vec<_> = app
        .router
        .routes()
        .map(|r| {
            json!({
                "pattern": r.pattern,
                "handler": r.handler_name,
                "regex": r.matcher.as_ref().map(|m| m.as_str()),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(ExitCode::SUCCESS)
}
