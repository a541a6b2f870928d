//! voice-relay - HTTP relay for Cloudflare text-to-speech and a Gemini language tutor

mod config;
mod error;
mod server;
mod text;
mod tts;
mod tutor;
mod voices;

use anyhow::{Context, Result};
use clap::Parser;
use config::{RelayConfig, mask_secret};
use server::AppState;

#[derive(Parser, Debug)]
#[command(name = "voice-relay")]
#[command(about = "Relay text-to-speech and tutor chat requests to hosted models", long_about = None)]
#[command(version)]
struct Args {
    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = RelayConfig::from_env().context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.default_log_level(args.debug)),
    )
    .init();

    log_startup(&config);

    let state = AppState::from_config(&config)?;
    server::serve(&config.bind_address(), state).await
}

fn log_startup(config: &RelayConfig) {
    let cloudflare = &config.cloudflare;
    match (&cloudflare.account_id, &cloudflare.api_token) {
        (Some(account_id), Some(api_token)) => {
            log::info!("Cloudflare Account ID: {}", mask_secret(account_id));
            log::info!("Cloudflare API Token: {}", mask_secret(api_token));
        }
        _ => log::warn!(
            "Cloudflare credentials not found; set CLOUDFLARE_ACCOUNT_ID and CLOUDFLARE_API_TOKEN"
        ),
    }

    if config.gemini.has_api_key() {
        log::info!("Gemini API: configured ({})", config.gemini.model);
    } else {
        log::warn!("Gemini API key not found; tutor chat is disabled");
    }

    if !config.production {
        log::debug!("Development mode");
    }
}
