use anyhow::Context;
use dotenv::dotenv;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod handlers;
mod router;
mod services;
mod state;

use config::Settings;
use services::search::AzureSearchProvider;
use state::AppState;

const DEFAULT_LOG_FILTER: &str = "info";

/// Log filter from `RUST_LOG` directives, `info` when unset or unparsable.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    let env_filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Load Config
    let settings = Settings::from_env()?;

    let client = reqwest::Client::builder()
        .timeout(settings.http_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    // Resolve the search key once; requests only ever read it
    let credential = services::secrets::provider_for(&settings.secret_source, client.clone())
        .search_credential()
        .await
        .context("Failed to resolve search credential")?;

    let search_provider = AzureSearchProvider::new(
        client,
        &settings.search_endpoint,
        &settings.index_name,
        &settings.api_version,
        credential,
    );

    tracing::info!(
        "Exporting from index '{}' at {} (page size {})",
        settings.index_name,
        settings.search_endpoint,
        settings.page_size
    );

    let addr = settings.bind_addr;
    let app_state = AppState {
        settings: Arc::new(settings),
        search_provider: Arc::new(search_provider),
    };

    let app = router::app(app_state);

    // Start Server
    tracing::info!("Search export API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).to_string(), "info");
        assert_eq!(log_filter(Some("  ".to_string())).to_string(), "info");
    }

    #[test]
    fn test_log_filter_uses_directives() {
        let filter = log_filter(Some("search_collector=debug".to_string()));
        assert_eq!(filter.to_string(), "search_collector=debug");
    }
}
