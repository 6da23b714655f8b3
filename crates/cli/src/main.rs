//! Gargi CLI: the main entry point.
//!
//! Commands:
//! - `serve`  : Start the HTTP gateway
//! - `fetch`  : Print one NPP resource through the cache
//! - `ask`    : Ask Gargi a single question
//! - `doctor` : Diagnose configuration and upstream reachability
//! - `config` : Show the effective configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gargi",
    about = "Gargi, India energy data gateway and energy-analyst chat",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch an NPP resource (installed-capacity, generation-chart, transmission, map-data)
    Fetch {
        resource: String,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        raw: bool,
    },

    /// Ask Gargi a question
    Ask {
        query: String,

        /// Augment the answer with web search results
        #[arg(long)]
        web: bool,
    },

    /// Diagnose system health
    Doctor,

    /// Show the effective configuration (secrets redacted)
    Config {
        /// Print the built-in defaults instead
        #[arg(long)]
        default: bool,

        /// Print the config file path only
        #[arg(long, conflicts_with = "default")]
        path: bool,
    },
}

fn init_tracing(verbose: bool, json: bool) {
    let filter = if verbose { "debug" } else { "info" };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Fetch { resource, raw } => commands::fetch::run(&resource, raw).await?,
        Commands::Ask { query, web } => commands::ask::run(&query, web).await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Config { default, path } => {
            if path {
                commands::config_cmd::path()?
            } else if default {
                commands::config_cmd::defaults()?
            } else {
                commands::config_cmd::show()?
            }
        }
    }

    Ok(())
}
