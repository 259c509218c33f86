//! `ordinal` - drag-and-drop ordering service.
//!
//! ```text
//! ordinal --config ordinal.toml serve
//! ordinal --config ordinal.toml check-config
//! ```

mod config;
mod http;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ordinal_core::impls::BroadcastInvalidator;
use ordinal_core::{AppBuilder, BuildError};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::config::{CliConfig, ConfigError};
use crate::http::OrderServer;

#[derive(Parser)]
#[command(name = "ordinal", version, about = "Persist drag-and-drop ordering of content collections")]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Override `[log] level`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default).
    Serve {
        /// Override `[server] listen_addr`.
        #[arg(long)]
        listen: Option<String>,
    },
    /// Parse and validate the config, then print a summary.
    CheckConfig,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&PathBuf>) -> Result<CliConfig, ConfigError> {
    match path {
        Some(path) => CliConfig::load(path),
        None => Ok(CliConfig::default()),
    }
}

/// Log every invalidation. Stands in for a downstream cache.
async fn watch_invalidations(mut rx: broadcast::Receiver<ordinal_core::CollectionKey>) {
    loop {
        match rx.recv().await {
            Ok(collection) => debug!(%collection, "cache invalidated"),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "invalidation watcher lagged; treating all collections as stale");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl-c");
        return;
    }
    info!("shutdown requested");
}

async fn serve(config: CliConfig, listen: Option<String>) -> Result<(), CliError> {
    let invalidator = Arc::new(BroadcastInvalidator::new(config.server.invalidation_buffer));
    tokio::spawn(watch_invalidations(invalidator.subscribe()));

    let app = AppBuilder::new()
        .with_authorizer(Arc::new(config.capabilities()?))
        .with_content_index(Arc::new(config.catalog()?))
        .with_invalidator(invalidator)
        .build()?;

    let addr = listen.unwrap_or_else(|| config.server.listen_addr.clone());
    let server = OrderServer::new(Arc::new(app), config.sessions());
    server.serve_with_shutdown(&addr, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

fn check_config(config: &CliConfig) {
    println!("listen_addr: {}", config.server.listen_addr);
    println!("log level:   {}", config.log.level);
    println!("actors:      {}", config.actors.len());
    for collection in &config.collections {
        println!(
            "collection:  {} ({} items)",
            collection.name.trim(),
            collection.items.len()
        );
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.log.level).to_string();
    init_logging(&level);

    let result = match cli.command.unwrap_or(Commands::Serve { listen: None }) {
        Commands::Serve { listen } => serve(config, listen).await,
        Commands::CheckConfig => {
            check_config(&config);
            Ok(())
        }
    };

    if let Err(e) = result {
        error!(error = %e, "ordinal exited with an error");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["ordinal"]).expect("bare invocation should parse");
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn global_flags_parse_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "ordinal",
            "serve",
            "--listen",
            "0.0.0.0:9999",
            "--config",
            "ordinal.toml",
            "--log-level",
            "debug",
        ])
        .expect("serve flags should parse");

        assert_eq!(cli.config, Some(PathBuf::from("ordinal.toml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Some(Commands::Serve { listen }) => assert_eq!(listen.as_deref(), Some("0.0.0.0:9999")),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn check_config_subcommand_parses() {
        let cli = Cli::try_parse_from(["ordinal", "check-config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::CheckConfig)));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = load_config(Some(&PathBuf::from("/nonexistent/ordinal.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
