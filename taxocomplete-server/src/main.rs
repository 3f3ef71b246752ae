//! Taxonomy-scoped autocomplete server.
//!
//! Serves the autocomplete endpoint over in-memory stores seeded from a
//! fixtures file, issuing the constraint tokens listed in the config at
//! startup.
//!
//! Usage:
//!   taxocomplete-server --config taxocomplete.toml --port 8080

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use taxocomplete_server::{
    build_router, build_state,
    config::{ServerConfig, SALT_ENV},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "taxocomplete-server")]
#[command(about = "Taxonomy-scoped autocomplete endpoint")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "taxocomplete.toml")]
    config: PathBuf,

    /// Port to listen on, overriding the configured bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let mut config = ServerConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.bind.set_port(port);
    }
    let salt = config.resolve_salt(std::env::var(SALT_ENV).ok())?;
    let state = build_state(&config, salt)?;

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("autocomplete endpoint listening on {}", config.bind);

    axum::serve(listener, build_router(Arc::new(state)))
        .await
        .context("HTTP server failed")?;
    Ok(())
}
