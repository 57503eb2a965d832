//! casino-guide server entry point.
//!
//! Loads configuration, wires the content store client, and serves the
//! site over HTTP.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use casino_guide::app_state::AppState;
use casino_guide::build_app;
use casino_guide::config::{LogFormat, SiteConfig};
use casino_guide::content::SanityClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = SiteConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(
        addr = %config.listen_addr,
        site = %config.site_url,
        project = %config.content.project_id,
        dataset = %config.content.dataset,
        "starting casino-guide"
    );

    let client = SanityClient::new(&config.content)?;
    let listen_addr = config.listen_addr;
    let sweep_interval = config.rate_limit_sweep_interval;
    let state = AppState::new(config, Arc::new(client));

    if !sweep_interval.is_zero() {
        let limiter = Arc::clone(&state.rate_limiter);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweep_interval);
            loop {
                ticker.tick().await;
                let removed = limiter.evict_expired();
                if removed > 0 {
                    tracing::debug!(removed, "swept expired rate-limit windows");
                }
            }
        });
    }

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(addr = %listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
