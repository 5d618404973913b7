//! debug-bridge command line.
//!
//! Inspect how a routing configuration treats namespaces, and emit test
//! records through the configured sink.
//!
//! ```text
//! debug-bridge --config bridge.toml table
//! debug-bridge --config bridge.toml resolve app:db worker:1
//! DEBUG=app:* debug-bridge emit app:db "connected to %s" primary
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use debug_bridge::config::env::enablement_from;
use debug_bridge::config::{enablement_from_env, load_config, BridgeConfig, LogFormat};
use debug_bridge::observability::logging::init_logging;
use debug_bridge::{Bridge, DebugArg, JsonLogger, Level, StructuredLogger, TracingLogger};

#[derive(Parser)]
#[command(name = "debug-bridge")]
#[command(about = "Route namespaced debug output to a structured logger", long_about = None)]
struct Cli {
    /// TOML configuration file (map, auto, skip, logger).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enabled namespaces; overrides the DEBUG environment variable.
    #[arg(short, long)]
    enable: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the compiled routing table in match order
    Table,
    /// Show whether each namespace is enabled and the level it routes to
    Resolve {
        #[arg(required = true)]
        namespaces: Vec<String>,
    },
    /// Emit one record through the configured sink
    Emit {
        namespace: String,
        #[arg(required = true)]
        args: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BridgeConfig::default(),
    };
    let enablement = match &cli.enable {
        Some(list) => enablement_from(Some(list.as_str())),
        None => enablement_from_env(),
    };

    match cli.command {
        Commands::Table => {
            let bridge = Bridge::with_enablement(&config, Arc::new(TracingLogger::new()), enablement);
            if bridge.table().is_empty() {
                println!("(no routes; every namespace logs at debug)");
            } else {
                print!("{}", bridge.table());
            }
            println!("enabled: {}", bridge.enabled_list());
        }
        Commands::Resolve { namespaces } => {
            let bridge = Bridge::with_enablement(&config, Arc::new(TracingLogger::new()), enablement);
            for ns in namespaces {
                let level = match bridge.resolve(&ns) {
                    Some(level) => level.to_string(),
                    None => format!("{} (default)", Level::default()),
                };
                let state = if bridge.is_enabled(&ns) { "enabled" } else { "disabled" };
                println!("{ns}\t{state}\t{level}");
            }
        }
        Commands::Emit { namespace, args } => {
            let logger: Arc<dyn StructuredLogger> = match config.logger.format {
                LogFormat::Json => Arc::new(JsonLogger::stdout(config.logger.level)),
                LogFormat::Pretty => {
                    init_logging(&config.logger)?;
                    Arc::new(TracingLogger::new())
                }
            };

            let bridge = debug_bridge::install_bridge(Bridge::with_enablement(&config, logger, enablement))?;
            let debugger = debug_bridge::debugger(namespace)?;
            if !debugger.enabled() {
                eprintln!(
                    "namespace '{}' is not enabled (enabled: {})",
                    debugger.namespace(),
                    bridge.enabled_list()
                );
                return Ok(());
            }
            debugger.log(args.into_iter().map(DebugArg::from));
        }
    }

    Ok(())
}
