// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Request credentials
//!
//! An explicit session object per agent: each [`ReqwestPodClient`] owns its
//! own credentials and token cache, so several agents can act concurrently in
//! one process without sharing state.
//!
//! [`ReqwestPodClient`]: crate::infrastructure::http::ReqwestPodClient

use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::config::{CredentialsConfig, PodshareConfig};
use crate::domain::error::PodError;

/// Tokens are refreshed this long before the server-declared expiry.
const REFRESH_MARGIN: Duration = Duration::from_secs(30);

/// Used when the token endpoint omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME: u64 = 600;

#[derive(Debug)]
pub enum Credentials {
    Anonymous,
    Bearer(String),
    ClientCredentials(ClientCredentialsTokenSource),
}

impl Credentials {
    pub fn from_config(config: &PodshareConfig, http: Client) -> anyhow::Result<Self> {
        Ok(match &config.credentials {
            CredentialsConfig::Anonymous => Credentials::Anonymous,
            CredentialsConfig::Bearer { token } => Credentials::Bearer(token.clone()),
            CredentialsConfig::ClientCredentials {
                client_id,
                client_secret,
                ..
            } => Credentials::ClientCredentials(ClientCredentialsTokenSource::new(
                http,
                config.token_url()?,
                client_id.clone(),
                client_secret.clone(),
            )),
        })
    }

    /// Bearer token to attach, if any.
    pub async fn bearer_token(&self) -> Result<Option<String>, PodError> {
        match self {
            Credentials::Anonymous => Ok(None),
            Credentials::Bearer(token) => Ok(Some(token.clone())),
            Credentials::ClientCredentials(source) => source.token().await.map(Some),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// OAuth client-credentials grant against the pod server's token endpoint.
#[derive(Debug)]
pub struct ClientCredentialsTokenSource {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsTokenSource {
    /// # Arguments
    /// * `token_url` - Token endpoint (e.g., "http://localhost:3000/.oidc/token")
    /// * `client_id` / `client_secret` - Credentials issued for the agent's account
    pub fn new(
        http: Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cached: Mutex::new(None),
        }
    }

    /// Current access token, fetching a new one when the cached token is
    /// missing or about to expire.
    pub async fn token(&self) -> Result<String, PodError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<CachedToken, PodError> {
        debug!(token_url = %self.token_url, "Requesting access token");
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", "webid")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(PodError::Authentication(format!(
                "token endpoint returned HTTP {}: {}",
                status.as_u16(),
                error_msg
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| PodError::Authentication(format!("invalid token response: {}", e)))?;
        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME));

        Ok(CachedToken {
            value: token.access_token,
            refresh_at: Instant::now() + lifetime.saturating_sub(REFRESH_MARGIN),
        })
    }
}
