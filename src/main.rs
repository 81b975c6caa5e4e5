use anyhow::Result;
use clap::Parser;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;

use moodeng_ticker::api::DexScreenerClient;
use moodeng_ticker::cli::Cli;
use moodeng_ticker::config::Config;
use moodeng_ticker::display::TerminalDisplay;
use moodeng_ticker::refresh::PriceRefreshLoop;
use moodeng_ticker::{logging, metrics};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref());
    let mut config = match Config::load_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration from {:?}: {}", cli.config, e);
            return Err(anyhow::anyhow!("Configuration loading failed: {}", e));
        }
    };
    config.apply_env()?;
    if let Some(secs) = cli.interval {
        config.refresh.interval_secs = secs;
    }
    if let Some(token) = cli.token.clone() {
        config.api.token_address = token;
    }
    config.validate()?;

    logging::init(&config.logging, cli.debug)?;
    match &config_path {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => debug!("No configuration file found, using built-in defaults"),
    }
    info!("Tracking {}", config.api.token_address);

    if config.monitoring.enable_prometheus {
        metrics::init()?;
    }

    let client = DexScreenerClient::new(&config.api)?;
    let display = Arc::new(TerminalDisplay::default());
    let refresh = PriceRefreshLoop::new(Arc::new(client), display, config.refresh.interval())?;

    if cli.once {
        let outcome = refresh.run_cycle().await;
        dump_metrics(&config);
        return outcome.map(|_| ()).map_err(Into::into);
    }

    let handle = refresh.spawn();
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for ctrl+c: {}", e);
    }
    info!("Shutting down...");

    if tokio::time::timeout(Duration::from_secs(5), handle.stop()).await.is_err() {
        warn!("Refresh loop did not stop within 5s");
    }
    dump_metrics(&config);
    Ok(())
}

fn dump_metrics(config: &Config) {
    if !config.monitoring.enable_prometheus {
        return;
    }
    match metrics::gather_text() {
        Ok(text) => println!("{}", text),
        Err(e) => error!("Failed to export metrics: {}", e),
    }
}
