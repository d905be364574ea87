use anyhow::{anyhow, bail, Context, Result};
use search_collector::PageSize;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_API_VERSION: &str = "2023-11-01";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:7071";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7071";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Name of the vault secret holding the search API key.
pub const SEARCH_KEY_SECRET_NAME: &str = "AZURE-SEARCH-API-KEY";

/// Where the search API key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// Read from `AZURE_SEARCH_API_KEY` (local development, `.env`).
    Env { api_key: String },
    /// Read from Key Vault using the host's managed identity.
    KeyVault {
        vault_url: String,
        identity: ManagedIdentityEndpoint,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagedIdentityEndpoint {
    /// App Service / Functions identity endpoint.
    AppService { endpoint: String, header: String },
    /// VM instance metadata service.
    InstanceMetadata,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub search_endpoint: String,
    pub index_name: String,
    pub api_version: String,
    pub secret_source: SecretSource,
    pub page_size: PageSize,
    pub public_base_url: String,
    pub bind_addr: SocketAddr,
    pub http_timeout: Duration,
}

impl Settings {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| get(key).ok_or_else(|| anyhow!("{} must be set", key));

        let search_endpoint = require("AZURE_SEARCH_SERVICE_ENDPOINT")?
            .trim_end_matches('/')
            .to_string();
        let index_name = require("AZURE_SEARCH_INDEX_NAME")?;
        let api_version = get("SEARCH_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let secret_source = match get("SEARCH_SECRET_SOURCE").as_deref() {
            None | Some("env") => SecretSource::Env {
                api_key: require("AZURE_SEARCH_API_KEY")?,
            },
            Some("keyvault") => {
                let identity = match (get("IDENTITY_ENDPOINT"), get("IDENTITY_HEADER")) {
                    (Some(endpoint), Some(header)) => {
                        ManagedIdentityEndpoint::AppService { endpoint, header }
                    }
                    _ => ManagedIdentityEndpoint::InstanceMetadata,
                };
                SecretSource::KeyVault {
                    vault_url: require("AZURE_KEYVAULT_URL")?
                        .trim_end_matches('/')
                        .to_string(),
                    identity,
                }
            }
            Some(other) => bail!(
                "SEARCH_SECRET_SOURCE must be 'env' or 'keyvault', got '{}'",
                other
            ),
        };

        let page_size = match get("SEARCH_PAGE_SIZE") {
            Some(raw) => {
                let size: usize = raw
                    .parse()
                    .with_context(|| format!("SEARCH_PAGE_SIZE is not a number: {}", raw))?;
                PageSize::new(size).ok_or_else(|| anyhow!("SEARCH_PAGE_SIZE must be at least 1"))?
            }
            None => PageSize::default(),
        };

        let public_base_url = get("PUBLIC_BASE_URL")
            .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        let timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {}", raw))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            search_endpoint,
            index_name,
            api_version,
            secret_source,
            page_size,
            public_base_url,
            bind_addr,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
