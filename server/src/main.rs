//! Leaf Disease Server
//!
//! HTTP API serving leaf disease diagnoses from uploaded photos.
//! Provides endpoints for health checks, predictions and the list of
//! supported disease classes.

mod error;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use leaf_disease::backend::backend_name;
use leaf_disease::utils::{init_logging, LogConfig, LogLevel};
use leaf_disease::Normalization;

use crate::state::{AppState, ServerConfig};

/// Leaf Disease Server
#[derive(Parser, Debug)]
#[command(name = "leaf-disease-server")]
#[command(author = "Warre Snaet")]
#[command(version = "0.1.0")]
#[command(about = "HTTP API server for leaf disease diagnosis")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "LEAF_DISEASE_PORT", default_value = "5000")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "LEAF_DISEASE_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Model weights (.mpk)
    #[arg(short, long, env = "LEAF_DISEASE_MODEL")]
    model: Option<PathBuf>,

    /// Model architecture config; defaults to the weights' .json sidecar
    #[arg(long, env = "LEAF_DISEASE_MODEL_CONFIG")]
    model_config: Option<PathBuf>,

    /// Knowledge base JSON replacing the builtin disease table
    #[arg(long, env = "LEAF_DISEASE_KNOWLEDGE_BASE")]
    knowledge_base: Option<PathBuf>,

    /// Pixel normalization the model was trained with: imagenet (mean/std),
    /// unit ([0, 1]) or raw ([0, 255], alias none)
    #[arg(long, env = "LEAF_DISEASE_NORMALIZATION", default_value = "imagenet")]
    normalization: Normalization,

    /// Maximum upload size in megabytes
    #[arg(long, env = "LEAF_DISEASE_MAX_UPLOAD_MB", default_value = "16")]
    max_upload_mb: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LEAF_DISEASE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Disable ANSI colors in log output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging with module targets
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn log_config(&self) -> LogConfig {
        if self.verbose {
            return LogConfig::verbose();
        }

        let base = if self.no_color {
            LogConfig::production()
        } else {
            LogConfig::default()
        };
        base.with_level(LogLevel::parse_or_info(&self.log_level))
    }

    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig {
            host: self.host,
            port: self.port,
            model_config_path: self.model_config,
            knowledge_base_path: self.knowledge_base,
            normalization: self.normalization,
            max_upload_mb: self.max_upload_mb,
            ..ServerConfig::default()
        };

        if let Some(model) = self.model {
            config.model_path = model;
        }

        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_config()).map_err(anyhow::Error::msg)?;

    let config = cli.into_config();

    info!("Leaf Disease Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Backend:        {}", backend_name());
    info!("  Model:          {:?}", config.model_path);
    info!("  Model config:   {:?}", config.model_config_path);
    info!("  Knowledge base: {:?}", config.knowledge_base_path);
    info!("  Normalization:  {}", config.normalization);
    info!("  Max upload:     {} MB", config.max_upload_mb);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let state = Arc::new(AppState::bootstrap(config)?);
    let app = routes::router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
