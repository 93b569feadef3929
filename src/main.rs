use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use draft::DraftStore;
use store::HttpStore;
use types::{Config, OutputFmt};

mod cli;
mod commands;
mod draft;
mod history;
mod store;
mod types;
mod workout;

const DEFAULT_STORE_URL: &str = "http://localhost:8787";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let fmt = if cli.json { OutputFmt::Json } else { OutputFmt::Text };

    let config_path = dirs::config_dir()
        .map(|d| d.join("swole").join("config"))
        .context("Could not determine config directory")?;
    let cfg = Config::load(&config_path)?;

    let base_url = cfg
        .map
        .get("store_url")
        .map(String::as_str)
        .unwrap_or(DEFAULT_STORE_URL);
    let store = HttpStore::new(base_url, cfg.map.get("auth_token").cloned());
    let drafts = DraftStore::at_default_location()?;

    match cli.cmd {
        Commands::Session(cmd) => commands::session::handle(cmd, &store, &drafts, fmt).await?,
        Commands::Exercise(cmd) => commands::exercise::handle(cmd, &store, fmt).await?,
        Commands::History { raw } => commands::history::handle(&store, raw, fmt).await?,
        Commands::Config(cmd) => commands::config::handle(cmd, &config_path).await?,
    }

    Ok(())
}
