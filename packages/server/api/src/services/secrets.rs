use crate::config::{ManagedIdentityEndpoint, SecretSource, SEARCH_KEY_SECRET_NAME};
use anyhow::{Context, Result};
use serde::Deserialize;

const VAULT_RESOURCE: &str = "https://vault.azure.net";
const VAULT_API_VERSION: &str = "7.4";
const IMDS_TOKEN_URL: &str = "http://169.254.169.254/metadata/identity/oauth2/token";

/// The search service API key. Resolved once at startup and shared read-only.
#[derive(Clone, PartialEq, Eq)]
pub struct SearchCredential(String);

impl SearchCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SearchCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SearchCredential(***)")
    }
}

#[async_trait::async_trait]
pub trait SecretProvider: Send + Sync {
    async fn search_credential(&self) -> Result<SearchCredential>;
}

/// Key taken straight from configuration.
pub struct EnvSecretProvider {
    api_key: String,
}

impl EnvSecretProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[async_trait::async_trait]
impl SecretProvider for EnvSecretProvider {
    async fn search_credential(&self) -> Result<SearchCredential> {
        Ok(SearchCredential::new(self.api_key.clone()))
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SecretBundle {
    value: String,
}

/// Reads the key from Key Vault with a managed identity token.
pub struct KeyVaultSecretProvider {
    client: reqwest::Client,
    vault_url: String,
    identity: ManagedIdentityEndpoint,
}

impl KeyVaultSecretProvider {
    pub fn new(client: reqwest::Client, vault_url: String, identity: ManagedIdentityEndpoint) -> Self {
        Self {
            client,
            vault_url,
            identity,
        }
    }

    async fn access_token(&self) -> Result<String> {
        let request = match &self.identity {
            ManagedIdentityEndpoint::AppService { endpoint, header } => self
                .client
                .get(endpoint)
                .query(&[("resource", VAULT_RESOURCE), ("api-version", "2019-08-01")])
                .header("X-IDENTITY-HEADER", header),
            ManagedIdentityEndpoint::InstanceMetadata => self
                .client
                .get(IMDS_TOKEN_URL)
                .query(&[("resource", VAULT_RESOURCE), ("api-version", "2018-02-01")])
                .header("Metadata", "true"),
        };

        let token: TokenResponse = request
            .send()
            .await
            .context("Failed to reach managed identity endpoint")?
            .error_for_status()
            .context("Managed identity endpoint refused the token request")?
            .json()
            .await
            .context("Failed to parse managed identity token")?;

        Ok(token.access_token)
    }
}

#[async_trait::async_trait]
impl SecretProvider for KeyVaultSecretProvider {
    async fn search_credential(&self) -> Result<SearchCredential> {
        let token = self.access_token().await?;
        let url = format!("{}/secrets/{}", self.vault_url, SEARCH_KEY_SECRET_NAME);

        tracing::info!("Reading {} from {}", SEARCH_KEY_SECRET_NAME, self.vault_url);

        let secret: SecretBundle = self
            .client
            .get(&url)
            .query(&[("api-version", VAULT_API_VERSION)])
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to reach Key Vault")?
            .error_for_status()
            .context("Key Vault refused the secret request")?
            .json()
            .await
            .context("Failed to parse Key Vault secret")?;

        Ok(SearchCredential::new(secret.value))
    }
}

/// Picks the provider matching the configured source.
pub fn provider_for(source: &SecretSource, client: reqwest::Client) -> Box<dyn SecretProvider> {
    match source {
        SecretSource::Env { api_key } => Box::new(EnvSecretProvider::new(api_key.clone())),
        SecretSource::KeyVault {
            vault_url,
            identity,
        } => Box::new(KeyVaultSecretProvider::new(
            client,
            vault_url.clone(),
            identity.clone(),
        )),
    }
}
