//! Wallet-Auth Service Client
//!
//! A client for the wallet-auth service, covering session restore, the
//! interactive connect flow, disconnect, and account resolution. The session
//! token persisted in the config file is what makes restore possible across
//! invocations.

use crate::address::is_valid_address;
use crate::auth::error::AuthError;
use crate::auth::{ProviderHandle, WalletAuth};
use crate::config::Config;
use crate::consts::cli_consts::{connect_flow, http};
use crate::environment::Environment;
use crate::pretty::print_cmd_info;
use reqwest::{Client, ClientBuilder, Response};
use serde::Deserialize;
use std::path::PathBuf;
use tokio::time::sleep;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("chaincms/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectStartResponse {
    request_id: String,
    verification_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectPollResponse {
    status: String,
    token: Option<String>,
    wallet_address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountsResponse {
    accounts: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct WalletAuthClient {
    client: Client,
    environment: Environment,
    config_path: PathBuf,
}

impl WalletAuthClient {
    pub fn new(environment: Environment, config_path: PathBuf) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(http::connect_timeout())
                .timeout(http::request_timeout())
                .build()
                .expect("Failed to create HTTP client"),
            environment,
            config_path,
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.auth_base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, AuthError> {
        if !response.status().is_success() {
            return Err(AuthError::from_response(response).await);
        }
        Ok(response)
    }

    /// Session cached on disk for this environment, if any.
    fn cached_session(&self) -> Option<Config> {
        let config = Config::load_from_file(&self.config_path).ok()?;
        if config.environment != self.environment || config.provider_token.is_empty() {
            return None;
        }
        Some(config)
    }

    async fn poll_connect(&self, request_id: &str) -> Result<ConnectPollResponse, AuthError> {
        let url = self.build_url(&format!("v1/connect/{}", urlencoding::encode(request_id)));
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let response = Self::handle_response_status(response).await?;
        Ok(response.json::<ConnectPollResponse>().await?)
    }
}

#[async_trait::async_trait]
impl WalletAuth for WalletAuthClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn init_modal(&self) -> Result<Option<ProviderHandle>, AuthError> {
        let Some(config) = self.cached_session() else {
            return Ok(None);
        };

        // Ask the service whether the cached token still names a live session.
        let url = self.build_url("v1/session");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&config.provider_token)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            // Stale token. Drop the cache and report no prior session.
            let _ = Config::clear_session(&self.config_path);
            return Ok(None);
        }
        if !response.status().is_success() {
            let err = AuthError::from_response(response).await;
            return Err(AuthError::Restore(err.to_string()));
        }

        Ok(Some(ProviderHandle::new(config.provider_token)))
    }

    async fn connect(&self) -> Result<ProviderHandle, AuthError> {
        let url = self.build_url("v1/connect/start");
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let response = Self::handle_response_status(response).await?;
        let start = response.json::<ConnectStartResponse>().await?;

        // The verification link is this client's "connect modal".
        print_cmd_info!(
            "Wallet connection requested.",
            "Approve the connection in your wallet: {}",
            start.verification_url
        );

        for _ in 0..connect_flow::MAX_POLLS {
            let poll = self.poll_connect(&start.request_id).await?;
            match poll.status.as_str() {
                "approved" => {
                    let token = poll.token.ok_or_else(|| AuthError::Http {
                        status: 200,
                        message: "Approved connect response carried no session token".to_string(),
                    })?;
                    let wallet_address = poll.wallet_address.unwrap_or_default();

                    // Persist the session so later invocations can restore it.
                    let config =
                        Config::new(wallet_address, token.clone(), self.environment);
                    if let Err(e) = config.save(&self.config_path) {
                        log::warn!("Failed to cache wallet session: {}", e);
                    }

                    return Ok(ProviderHandle::new(token));
                }
                "denied" | "expired" => return Err(AuthError::Cancelled),
                _ => sleep(connect_flow::poll_interval()).await,
            }
        }

        Err(AuthError::Cancelled)
    }

    async fn disconnect(&self) -> Result<(), AuthError> {
        let cached = self.cached_session();

        // The local cache goes away no matter what the service says.
        if let Err(e) = Config::clear_session(&self.config_path) {
            log::warn!("Failed to clear cached wallet session: {}", e);
        }

        let Some(config) = cached else {
            return Ok(());
        };

        let url = self.build_url("v1/disconnect");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&config.provider_token)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| AuthError::Disconnect(e.to_string()))?;

        if !response.status().is_success() {
            let err = AuthError::from_response(response).await;
            return Err(AuthError::Disconnect(err.to_string()));
        }
        Ok(())
    }

    async fn resolve_address(&self, provider: &ProviderHandle) -> Result<String, AuthError> {
        let url = self.build_url("v1/accounts");
        let response = self
            .client
            .get(&url)
            .bearer_auth(provider.token())
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let response = Self::handle_response_status(response).await?;
        let accounts = response.json::<AccountsResponse>().await?;

        let address = accounts
            .accounts
            .into_iter()
            .next()
            .ok_or_else(|| AuthError::AccountResolution("No accounts returned".to_string()))?;

        if !is_valid_address(&address) {
            return Err(AuthError::AccountResolution(format!(
                "Service returned a malformed address: {}",
                address
            )));
        }
        Ok(address)
    }
}
