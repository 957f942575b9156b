//! fragment-router command line.
//!
//! Resolves hashes and renders route chains from a live site, for checking
//! a route tree without a browser.
//!
//! # Architecture Overview
//!
//! ```text
//!   hash ──▶ routing ──▶ navigation ──▶ fetch (HTTP) ──▶ origin
//!                          │    ▲
//!                          │    └── cache (absent paths)
//!                          ▼
//!                       compose ──▶ dom ──▶ rendered HTML
//!                          │
//!                          └──▶ behavior (scripts: logged, not executed)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use fragment_router::behavior::BehaviorRegistry;
use fragment_router::config::{load_config, validate_config, ConfigError, RouterConfig};
use fragment_router::navigation::{NavigationOutcome, Navigator};
use fragment_router::observability::logging::init_logging;
use fragment_router::routing::{layout_fragment_path, resolve_with_base, script_path};

#[derive(Parser)]
#[command(name = "fragment-router")]
#[command(about = "Resolve and render hash-routed fragment sites", long_about = None)]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Origin route files are fetched from (overrides the config file)
    #[arg(long)]
    origin: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route a hash resolves to, with its fragment and script paths
    Resolve {
        hash: String,
    },
    /// Navigate through the hashes in order and print the final document
    Render {
        #[arg(required = true)]
        hashes: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(origin) = cli.origin {
        config.site.origin = origin;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability.log_level);

    match cli.command {
        Commands::Resolve { hash } => {
            let route = resolve_with_base(&hash, &config.routing.base_path);
            let layouts: Vec<_> = route
                .chain
                .layouts()
                .iter()
                .map(|dir| {
                    let fragment = layout_fragment_path(dir);
                    serde_json::json!({ "fragment": fragment, "script": script_path(&fragment) })
                })
                .collect();
            let output = serde_json::json!({
                "segments": route.segments,
                "params": route.params,
                "chain": route.chain,
                "layouts": layouts,
                "page": {
                    "fragment": route.page_fragment_path(),
                    "script": route.page_script_path(),
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Render { hashes } => {
            tracing::info!(origin = %config.site.origin, "Rendering route chain");
            let resolver = Arc::new(BehaviorRegistry::new().with_logging_fallback());
            let navigator = Navigator::over_http(&config, resolver)?;

            for (i, hash) in hashes.iter().enumerate() {
                let outcome = if i == 0 {
                    navigator.on_ready(hash).await?
                } else {
                    navigator.on_hash_change(hash).await?
                };
                if let NavigationOutcome::Completed(report) = &outcome {
                    tracing::info!(
                        hash = %hash,
                        composed = report.layouts_composed.len(),
                        skipped = report.layouts_skipped.len(),
                        absent = report.layouts_absent.len(),
                        page_composed = report.page_composed,
                        "Navigation complete"
                    );
                }
            }
            println!("{}", navigator.render_html());
        }
    }

    Ok(())
}
