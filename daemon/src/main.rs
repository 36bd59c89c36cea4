//! Salus daemon — entry point for running the reward service.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use salus_rpc::{RpcServer, ServiceConfig};

#[derive(Parser)]
#[command(name = "salus-daemon", about = "Salus health-reward service daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address the HTTP API binds to.
    #[arg(long, env = "SALUS_LISTEN_ADDR")]
    listen_addr: Option<SocketAddr>,

    /// Wallet address granted the controller role at startup.
    #[arg(long, env = "SALUS_CONTROLLER")]
    controller: Option<String>,

    /// Wallet address that receives the charity share of sales.
    #[arg(long, env = "SALUS_CHARITY")]
    charity: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "SALUS_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON instead of human-readable lines.
    #[arg(long, env = "SALUS_LOG_JSON")]
    log_json: bool,

    /// Disable the Prometheus metrics endpoint.
    #[arg(long, env = "SALUS_DISABLE_METRICS")]
    disable_metrics: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServiceConfig::from_toml_file(path)?,
        None => ServiceConfig::default(),
    };

    // CLI flags and env vars override the file.
    if let Some(listen_addr) = cli.listen_addr {
        config.listen_addr = listen_addr;
    }
    if let Some(controller) = cli.controller {
        config.controller_address = Some(controller);
    }
    if let Some(charity) = cli.charity {
        config.charity_address = charity;
    }
    config.log_level = cli.log_level;
    if cli.log_json {
        config.log_format = "json".into();
    }
    if cli.disable_metrics {
        config.enable_metrics = false;
    }

    salus_utils::init_tracing(&config.log_level, config.log_format == "json");

    if config.controller_address.is_none() {
        tracing::warn!(
            "no controller address configured — no role can be granted and all mints will fail"
        );
    }
    tracing::info!(addr = %config.listen_addr, "starting salus daemon");

    RpcServer::new(config).serve().await?;
    Ok(())
}
