// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Reqwest Pod Client
//!
//! Network implementation of the [`PodClient`] port. Attaches the agent's
//! bearer token to every request and hands back every response untouched,
//! including 401/403, so callers see access denials as they happened.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Anti-corruption layer between the services and the pod server

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use std::time::Duration;
use tracing::trace;

use crate::domain::config::PodshareConfig;
use crate::domain::error::PodError;
use crate::domain::pod::{Method, PodClient, PodRequest, PodResponse};
use crate::infrastructure::credentials::Credentials;

pub struct ReqwestPodClient {
    client: Client,
    credentials: Credentials,
}

impl ReqwestPodClient {
    /// Create a client with the given request timeout.
    ///
    /// # Arguments
    /// * `credentials` - Identity attached to every request
    /// * `timeout` - Per-request timeout
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self, PodError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PodError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            credentials,
        })
    }

    /// Reuse an existing reqwest client.
    pub fn with_client(client: Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Build the client described by a configuration file.
    pub fn from_config(config: &PodshareConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_seconds))
            .build()?;
        let credentials = Credentials::from_config(config, client.clone())?;
        Ok(Self::with_client(client, credentials))
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl PodClient for ReqwestPodClient {
    async fn execute(&self, request: PodRequest) -> Result<PodResponse, PodError> {
        trace!(method = %request.method, url = %request.url, "Pod request");

        let mut builder = self
            .client
            .request(Self::method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = self.credentials.bearer_token().await? {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;

        trace!(status, "Pod response");
        Ok(PodResponse::new(status, headers, body))
    }
}
