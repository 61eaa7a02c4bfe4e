// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Directory Application Service
//!
//! Maintains the shared agent registry document. Registration never
//! rewrites the document: the container and the document are created with
//! `If-None-Match: *` (losing that race is fine) and each entry is appended
//! with an insert-only PATCH, so concurrent registrations are never lost.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use crate::domain::directory::{
    directory_preamble, insert_entry_patch, parse_directory, DirectoryEntry,
    DEFAULT_DIRECTORY_PATH,
};
use crate::domain::error::PodError;
use crate::domain::pod::{
    PodClient, PodRequest, HEADER_ACCEPT, HEADER_IF_NONE_MATCH, HEADER_LINK, SPARQL_UPDATE,
    TEXT_TURTLE,
};
use crate::domain::vocab::LDP_BASIC_CONTAINER;

/// Directory document location for a server root.
pub fn directory_url(server_url: &str) -> Result<String, PodError> {
    let mut root = server_url.to_string();
    if !root.ends_with('/') {
        root.push('/');
    }
    let root = Url::parse(&root)
        .map_err(|e| PodError::InvalidInput(format!("invalid server URL '{}': {}", server_url, e)))?;
    root.join(DEFAULT_DIRECTORY_PATH)
        .map(|url| url.to_string())
        .map_err(|e| PodError::InvalidInput(e.to_string()))
}

/// `If-None-Match: *` creation outcome: created now or already there.
pub(crate) fn created_or_exists(status: u16) -> bool {
    (200..300).contains(&status) || status == 409 || status == 412
}

/// PUT that creates an empty basic container unless one already exists.
pub(crate) fn create_container_request(container_url: &str) -> PodRequest {
    PodRequest::put(container_url)
        .header(HEADER_IF_NONE_MATCH, "*")
        .header(
            HEADER_LINK,
            format!("<{}>; rel=\"type\"", LDP_BASIC_CONTAINER),
        )
        .body(TEXT_TURTLE, "")
}

// ============================================================================
// Service Trait
// ============================================================================

#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Append `entry` to the directory, creating the directory on first use
    async fn register(&self, directory_url: &str, entry: &DirectoryEntry) -> Result<(), PodError>;

    /// Every named entry; a missing directory yields an empty list
    async fn list(&self, directory_url: &str) -> Result<Vec<DirectoryEntry>, PodError>;

    /// First entry whose name matches, ignoring case
    async fn find_by_name(
        &self,
        directory_url: &str,
        name: &str,
    ) -> Result<Option<DirectoryEntry>, PodError> {
        Ok(self
            .list(directory_url)
            .await?
            .into_iter()
            .find(|entry| entry.name_matches(name)))
    }

    /// Every entry declaring `capability`, ignoring case
    async fn find_by_capability(
        &self,
        directory_url: &str,
        capability: &str,
    ) -> Result<Vec<DirectoryEntry>, PodError> {
        Ok(self
            .list(directory_url)
            .await?
            .into_iter()
            .filter(|entry| entry.has_capability(capability))
            .collect())
    }
}

// ============================================================================
// Standard Implementation
// ============================================================================

pub struct StandardDirectoryService {
    client: Arc<dyn PodClient>,
}

impl StandardDirectoryService {
    pub fn new(client: Arc<dyn PodClient>) -> Self {
        Self { client }
    }

    async fn ensure_directory_exists(&self, directory_url: &str) -> Result<(), PodError> {
        let container_url = match directory_url.rfind('/') {
            Some(index) => &directory_url[..=index],
            None => {
                return Err(PodError::InvalidInput(format!(
                    "invalid directory URL '{}'",
                    directory_url
                )))
            }
        };

        let response = self
            .client
            .execute(create_container_request(container_url))
            .await?;
        if !created_or_exists(response.status) {
            return Err(PodError::from_response(
                "Create directory container",
                container_url,
                &response,
            ));
        }

        let response = self
            .client
            .execute(
                PodRequest::put(directory_url)
                    .header(HEADER_IF_NONE_MATCH, "*")
                    .body(TEXT_TURTLE, directory_preamble()),
            )
            .await?;
        if !created_or_exists(response.status) {
            return Err(PodError::from_response(
                "Create directory document",
                directory_url,
                &response,
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl DirectoryService for StandardDirectoryService {
    async fn register(&self, directory_url: &str, entry: &DirectoryEntry) -> Result<(), PodError> {
        entry.validate()?;
        self.ensure_directory_exists(directory_url).await?;

        let response = self
            .client
            .execute(PodRequest::patch(directory_url).body(SPARQL_UPDATE, insert_entry_patch(entry)?))
            .await?;
        if !response.is_success() {
            return Err(PodError::from_response("Register agent", directory_url, &response));
        }

        info!(
            directory = %directory_url,
            agent = %entry.web_id,
            name = %entry.name,
            "Registered agent"
        );
        Ok(())
    }

    async fn list(&self, directory_url: &str) -> Result<Vec<DirectoryEntry>, PodError> {
        let response = self
            .client
            .execute(PodRequest::get(directory_url).header(HEADER_ACCEPT, TEXT_TURTLE))
            .await?;
        match response.status {
            404 => {
                debug!(directory = %directory_url, "Directory does not exist yet");
                Ok(Vec::new())
            }
            _ if response.is_success() => Ok(parse_directory(&response.body, directory_url)),
            _ => Err(PodError::from_response("List agents", directory_url, &response)),
        }
    }
}
