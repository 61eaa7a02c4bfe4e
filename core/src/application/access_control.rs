// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Access Control Application Service
//!
//! Grants and revokes one agent's access to one resource by rewriting the
//! resource's authorization document:
//! - locate the document through the resource's `rel="acl"` link
//! - fetch it fresh on every call (absent documents count as empty)
//! - rewrite it with the codec in `domain::acl`
//! - overwrite it in full
//!
//! Concurrent grant/revoke on the same resource by different callers is
//! last-writer-wins; the store offers no compare-and-swap for this flow.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::acl::{self, AccessMode, AuthorizationRule};
use crate::domain::error::PodError;
use crate::domain::pod::{PodClient, PodRequest, HEADER_ACCEPT, TEXT_TURTLE};
use crate::domain::sharing::GrantReceipt;
use crate::domain::turtle::{check_iri, resolve_iri};

const ACL_SUFFIX: &str = ".acl";

// ============================================================================
// Service Trait
// ============================================================================

#[async_trait]
pub trait AccessControlService: Send + Sync {
    /// Location of the authorization document governing `resource_url`
    async fn resolve_authorization_url(&self, resource_url: &str) -> Result<String, PodError>;

    /// Add a rule giving `agent` the `modes` on `resource_url`
    async fn grant(
        &self,
        resource_url: &str,
        agent: &str,
        modes: &[AccessMode],
    ) -> Result<GrantReceipt, PodError>;

    /// Remove every rule for `agent`. Returns whether the document changed.
    async fn revoke(&self, resource_url: &str, agent: &str) -> Result<bool, PodError>;

    /// Agent rules currently governing `resource_url`
    async fn rules(&self, resource_url: &str) -> Result<Vec<AuthorizationRule>, PodError>;
}

// ============================================================================
// Standard Implementation
// ============================================================================

pub struct StandardAccessControlService {
    client: Arc<dyn PodClient>,
}

impl StandardAccessControlService {
    pub fn new(client: Arc<dyn PodClient>) -> Self {
        Self { client }
    }

    /// Current document body, `None` when it does not exist yet.
    async fn fetch_document(&self, acl_url: &str) -> Result<Option<String>, PodError> {
        let response = self
            .client
            .execute(PodRequest::get(acl_url).header(HEADER_ACCEPT, TEXT_TURTLE))
            .await?;
        match response.status {
            404 => Ok(None),
            _ if response.is_success() => Ok(Some(response.body)),
            _ => Err(PodError::from_response(
                "Fetch authorization document",
                acl_url,
                &response,
            )),
        }
    }

    async fn write_document(&self, acl_url: &str, document: String) -> Result<(), PodError> {
        let response = self
            .client
            .execute(PodRequest::put(acl_url).body(TEXT_TURTLE, document))
            .await?;
        if response.is_success() {
            return Ok(());
        }
        Err(PodError::AccessControl {
            url: acl_url.to_string(),
            status: response.status,
            body: response.body,
        })
    }
}

#[async_trait]
impl AccessControlService for StandardAccessControlService {
    async fn resolve_authorization_url(&self, resource_url: &str) -> Result<String, PodError> {
        check_iri("resource", resource_url)?;

        let response = self.client.execute(PodRequest::head(resource_url)).await?;
        let acl_url = match response.links("acl").into_iter().next() {
            Some(target) => resolve_iri(resource_url, &target),
            None => format!("{}{}", resource_url, ACL_SUFFIX),
        };

        debug!(resource = %resource_url, acl = %acl_url, "Resolved authorization document");
        Ok(acl_url)
    }

    async fn grant(
        &self,
        resource_url: &str,
        agent: &str,
        modes: &[AccessMode],
    ) -> Result<GrantReceipt, PodError> {
        check_iri("resource", resource_url)?;
        check_iri("agent", agent)?;
        if modes.is_empty() {
            return Err(PodError::InvalidInput(
                "at least one access mode is required".to_string(),
            ));
        }

        let acl_url = self.resolve_authorization_url(resource_url).await?;
        let existing = self.fetch_document(&acl_url).await?.unwrap_or_default();

        let rule = AuthorizationRule::for_agent(agent, resource_url, modes);
        let updated = acl::add_rule(&existing, &rule)?;
        self.write_document(&acl_url, updated).await?;

        info!(
            resource = %resource_url,
            agent = %agent,
            modes = ?rule.modes,
            "Granted access"
        );

        Ok(GrantReceipt {
            resource_url: resource_url.to_string(),
            agent: agent.to_string(),
            modes: rule.modes,
            authorization_url: acl_url,
        })
    }

    async fn revoke(&self, resource_url: &str, agent: &str) -> Result<bool, PodError> {
        check_iri("resource", resource_url)?;
        check_iri("agent", agent)?;

        let acl_url = self.resolve_authorization_url(resource_url).await?;
        let Some(existing) = self.fetch_document(&acl_url).await? else {
            debug!(resource = %resource_url, "No authorization document, nothing to revoke");
            return Ok(false);
        };

        let updated = acl::remove_rule_at(&existing, &acl_url, agent);
        if updated == existing {
            debug!(resource = %resource_url, agent = %agent, "No rules for agent, nothing to revoke");
            return Ok(false);
        }
        self.write_document(&acl_url, updated).await?;

        info!(resource = %resource_url, agent = %agent, "Revoked access");
        Ok(true)
    }

    async fn rules(&self, resource_url: &str) -> Result<Vec<AuthorizationRule>, PodError> {
        let acl_url = self.resolve_authorization_url(resource_url).await?;
        let Some(document) = self.fetch_document(&acl_url).await? else {
            return Ok(Vec::new());
        };
        Ok(acl::parse_rules_at(&document, &acl_url))
    }
}
