//! Presupuestos main entry point

use anyhow::Context;
use clap::Parser;
use presupuestos_client::HttpBudgetService;
use presupuestos_config::{Config, ConfigResult};
use presupuestos_core::{PageController, ServiceRef};
use presupuestos_web::start_server;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "presupuestos")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web interface for managing budgets over a REST API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Budget API base URL (overrides the config file and PRESUPUESTOS_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,
}

/// Config file (or defaults), then environment, then command line
fn load_config(args: &Args) -> ConfigResult<Config> {
    let mut config = Config::load_or_default(&args.config)?
        .apply_env()?
        .with_api_url(args.api_url.clone())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] {}", e.report());
            return Err(e).with_context(|| format!("failed to load configuration from {}", args.config.display()));
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    if !args.config.exists() {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!("Config loaded: api={}, port={}", config.budgets_url(), config.server.port);

    let service: ServiceRef = Arc::new(HttpBudgetService::new(&config.api)?);
    let controller = PageController::new(service);

    start_server(config, controller).await
}
