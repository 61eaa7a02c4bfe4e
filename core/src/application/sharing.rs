// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Sharing Application Service
//!
//! Two-stage share: grant access, then announce it to the recipient.
//!
//! # Architecture
//!
//! - **Layer:** Application
//! - **Purpose:** Compose access control, notifications and discovery
//!
//! The grant is fail-fast: if it fails nothing was shared and the error is
//! returned. The announcement is best-effort: its outcome is recorded in
//! [`ShareOutcome::notification`] and the grant is never rolled back.

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::access_control::AccessControlService;
use crate::application::directory::DirectoryService;
use crate::application::notifications::NotificationService;
use crate::application::pod_structure::inbox_url;
use crate::domain::acl::AccessMode;
use crate::domain::error::PodError;
use crate::domain::sharing::ShareOutcome;

pub struct SharingService {
    access_control: Arc<dyn AccessControlService>,
    notifications: Arc<dyn NotificationService>,
    directory: Arc<dyn DirectoryService>,
}

impl SharingService {
    pub fn new(
        access_control: Arc<dyn AccessControlService>,
        notifications: Arc<dyn NotificationService>,
        directory: Arc<dyn DirectoryService>,
    ) -> Self {
        Self {
            access_control,
            notifications,
            directory,
        }
    }

    /// Grant `recipient` access to `resource_url` and notify them at
    /// `recipient_inbox`.
    ///
    /// # Arguments
    /// * `resource_url` - Resource being shared
    /// * `recipient` - WebID receiving access
    /// * `recipient_inbox` - Inbox container the announcement goes to
    /// * `modes` - Access modes to grant
    /// * `sender` - WebID of the sharing agent, recorded as the announcement actor
    pub async fn share(
        &self,
        resource_url: &str,
        recipient: &str,
        recipient_inbox: &str,
        modes: &[AccessMode],
        sender: &str,
    ) -> Result<ShareOutcome, PodError> {
        let grant = self
            .access_control
            .grant(resource_url, recipient, modes)
            .await?;

        let notification = self
            .notifications
            .send(recipient_inbox, sender, recipient, resource_url, &grant.modes)
            .await;

        match &notification {
            Ok(location) => info!(
                resource = %resource_url,
                agent = %recipient,
                notification = %location,
                "Shared resource"
            ),
            Err(e) => warn!(
                resource = %resource_url,
                agent = %recipient,
                inbox = %recipient_inbox,
                error = %e,
                "Access granted but notification delivery failed"
            ),
        }

        Ok(ShareOutcome {
            grant,
            notification,
        })
    }

    /// Look `recipient_name` up in the directory, then [`share`](Self::share)
    /// with the entry's WebID and the inbox in its pod. Fails with
    /// [`PodError::AgentNotFound`] before any access change when no entry
    /// matches.
    pub async fn share_by_name(
        &self,
        resource_url: &str,
        recipient_name: &str,
        modes: &[AccessMode],
        sender: &str,
        directory_url: &str,
    ) -> Result<ShareOutcome, PodError> {
        let entry = self
            .directory
            .find_by_name(directory_url, recipient_name)
            .await?
            .ok_or_else(|| PodError::AgentNotFound(recipient_name.to_string()))?;

        let inbox = inbox_url(&entry.pod_url);
        self.share(resource_url, &entry.web_id, &inbox, modes, sender)
            .await
    }
}
