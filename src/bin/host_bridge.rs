//! Headless host bridge binary for stdin/stdout JSON communication.
//!
//! Reads `UiEvent` messages as newline-delimited JSON from stdin and writes
//! `Envelope` messages to stdout. An optional first argument names a TOML
//! config file; otherwise the default config path is used when it exists.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.

use std::path::PathBuf;

use etya::SiteConfig;
use etya::host::SiteHost;
use etya::host::stdio::run_stdio_bridge;
use etya_search::DuckDuckGoEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing to stderr only (stdout is reserved for the JSON
    // protocol).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("etya=info,etya_search=info")),
        )
        .init();

    let config = load_config()?;
    let engine = DuckDuckGoEngine::new(config.search.to_search_config())
        .map_err(|e| anyhow::anyhow!("failed to build search engine: {e}"))?;

    tracing::info!(endpoint = %config.search.endpoint, "etya-host starting");

    let (host, outbound) = SiteHost::new(&config, engine);
    run_stdio_bridge(host, outbound).await.map_err(|e| {
        tracing::error!(error = %e, "etya-host exited with error");
        anyhow::anyhow!("etya-host failed: {e}")
    })?;

    tracing::info!("etya-host shut down cleanly");
    Ok(())
}

fn load_config() -> anyhow::Result<SiteConfig> {
    let path = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => {
            let default = SiteConfig::default_config_path();
            if !default.exists() {
                tracing::info!("no config file; using defaults");
                return Ok(SiteConfig::default());
            }
            default
        }
    };

    let config = SiteConfig::from_file(&path)
        .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}
