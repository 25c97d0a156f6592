use anyhow::Result;
use clap::Parser;
use client_core::{FileTokenStore, RestClient, Session};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use cli::Args;
use commands::AppContext;
use config::{load_settings, normalize_base_url};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        settings.base_url = normalize_base_url(base_url);
    }
    debug!(base_url = %settings.base_url, token_path = %settings.token_path.display(), "settings loaded");

    let store = FileTokenStore::new(settings.token_path.clone());
    let session = Session::from_store(&store).await?;
    let client = RestClient::new(&settings.base_url)?;

    let ctx = AppContext {
        client,
        session,
        store,
    };
    commands::run(&ctx, args.command).await
}
