mod ai;
mod api;
mod app;
mod config;
mod crawler;
mod domain;
mod filter;
mod infrastructure;
mod report;
mod scan;
mod search;

use anyhow::Result;
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let (shutdown, listener) = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown);

    let state = app::AppState::new(config)?;
    app::serve(state, listener).await
}
