//! ComplaintOps - customer complaint analysis service
//!
//! Runs each submitted complaint through the remote AI service (mask, triage,
//! retrieve, generate), stores the analyzed record and serves it over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: listen on 0.0.0.0:8080, AI service at http://localhost:8000
//! cargo run --release
//!
//! # Point at another AI service and refuse to store unmasked text
//! ./complaint-ops --ai-service-url http://ai-service:8000 --strict-masking
//! ```
//!
//! # Environment Variables
//!
//! - `COMPLAINT_OPS_CONFIG`: Path to a TOML config file
//! - `COMPLAINT_OPS_SERVER_ADDR`: Bind address override
//! - `COMPLAINT_OPS_CORS_ORIGINS`: Comma-separated allowed origins (default: any)
//! - `AI_SERVICE_URL`: AI service base URL override
//! - `RUST_LOG`: Logging level (default: info)
//! - `LOG_FORMAT`: Set to "json" for JSON log lines
//! - `RESET_DB`: Set to "true" to wipe all persistent data on startup (for testing)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use complaint_ops::api::{create_app, ApiState};
use complaint_ops::config::{AppConfig, MaskingPolicy};
use complaint_ops::pipeline::PipelineOrchestrator;
use complaint_ops::stages::StageClients;
use complaint_ops::storage::{RecordStore, SledRecordStore};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "complaint-ops")]
#[command(about = "ComplaintOps complaint analysis service")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long, value_name = "HOST:PORT")]
    addr: Option<String>,

    /// Override the AI service base URL (default: "http://localhost:8000")
    #[arg(long, value_name = "URL")]
    ai_service_url: Option<String>,

    /// Directory holding the complaint database (default: "./data")
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Reject complaints when the masking stage is unavailable instead of
    /// continuing with unmasked text
    #[arg(long)]
    strict_masking: bool,

    /// Reset all persistent data on startup.
    /// WARNING: This is destructive and cannot be undone!
    /// Can also be set via RESET_DB=true environment variable.
    #[arg(long)]
    reset_db: bool,
}

impl CliArgs {
    /// Apply CLI overrides on top of file and environment config.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(addr) = &self.addr {
            config.server.addr = addr.clone();
        }
        if let Some(url) = &self.ai_service_url {
            config.stages.base_url = url.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
        }
        if self.strict_masking {
            config.pipeline.masking_policy = MaskingPolicy::Strict;
        }
    }
}

// ============================================================================
// Startup Helpers
// ============================================================================

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

/// Check if database reset is requested via CLI flag or `RESET_DB`.
fn should_reset_db(cli_flag: bool, env_value: Option<&str>) -> bool {
    if cli_flag {
        return true;
    }
    env_value.is_some_and(|val| {
        let val_lower = val.to_lowercase();
        val_lower == "true" || val_lower == "1" || val_lower == "yes"
    })
}

/// Remove the data directory and all its contents.
fn reset_data_directory(data_path: &Path) -> Result<()> {
    if !data_path.exists() {
        info!("Data directory does not exist, nothing to reset");
        return Ok(());
    }

    warn!(path = %data_path.display(), "RESET_DB detected, wiping all persistent data");
    std::fs::remove_dir_all(data_path)
        .with_context(|| format!("Failed to remove data directory {}", data_path.display()))?;
    warn!("Data directory removed");

    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = CliArgs::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    args.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;

    // Reset before any storage initialization
    let reset_env = std::env::var("RESET_DB").ok();
    if should_reset_db(args.reset_db, reset_env.as_deref()) {
        reset_data_directory(&config.storage.data_dir)?;
    }

    info!(
        addr = %config.server.addr,
        ai_service = %config.stages.base_url,
        masking_policy = %config.pipeline.masking_policy,
        data_dir = %config.storage.data_dir.display(),
        "ComplaintOps starting"
    );
    if config.pipeline.masking_policy == MaskingPolicy::Permissive {
        info!("Masking outages fall back to unmasked text; use --strict-masking to refuse instead");
    }

    std::fs::create_dir_all(&config.storage.data_dir).with_context(|| {
        format!("Failed to create data directory {}", config.storage.data_dir.display())
    })?;
    let db_path = config.storage.db_path();
    let store: Arc<dyn RecordStore> = Arc::new(
        SledRecordStore::open(&db_path)
            .with_context(|| format!("Failed to open complaint store at {}", db_path.display()))?,
    );

    let stages =
        StageClients::from_config(&config.stages).context("Failed to build stage clients")?;
    let orchestrator = PipelineOrchestrator::new(stages, store)
        .with_masking_policy(config.pipeline.masking_policy);
    let app = create_app(ApiState::new(Arc::new(orchestrator)), &config.server.cors_origins);

    let listener = tokio::net::TcpListener::bind(&config.server.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.addr))?;
    info!(addr = %config.server.addr, "HTTP server listening");

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown");
        shutdown_token.cancel();
    });

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await;

    if let Err(e) = result {
        error!(error = %e, "HTTP server error");
        return Err(anyhow::anyhow!("HTTP server error: {}", e));
    }

    info!("ComplaintOps shutdown complete");
    Ok(())
}
