// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Notification Application Service
//!
//! Delivers and consumes sharing announcements through inbox containers.
//! Inboxes are polled; there is no push channel.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::acl::AccessMode;
use crate::domain::error::PodError;
use crate::domain::notification::{announcement, SharingNotification};
use crate::domain::pod::{PodClient, PodRequest, HEADER_ACCEPT, HEADER_SLUG, TEXT_TURTLE};
use crate::domain::turtle::{self, resolve_iri};
use crate::domain::vocab::LDP_CONTAINS;

// ============================================================================
// Service Trait
// ============================================================================

#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Create an announcement in `inbox_url` and return its location
    async fn send(
        &self,
        inbox_url: &str,
        sender: &str,
        recipient: &str,
        resource_url: &str,
        modes: &[AccessMode],
    ) -> Result<String, PodError>;

    /// Every readable announcement in the inbox, in container order
    async fn list(&self, inbox_url: &str) -> Result<Vec<SharingNotification>, PodError>;

    /// Delete one announcement; an already-deleted one counts as success
    async fn delete(&self, notification_url: &str) -> Result<(), PodError>;
}

// ============================================================================
// Standard Implementation
// ============================================================================

pub struct StandardNotificationService {
    client: Arc<dyn PodClient>,
}

impl StandardNotificationService {
    pub fn new(client: Arc<dyn PodClient>) -> Self {
        Self { client }
    }

    async fn fetch_notification(&self, url: &str) -> Option<SharingNotification> {
        let response = match self
            .client
            .execute(PodRequest::get(url).header(HEADER_ACCEPT, TEXT_TURTLE))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!(notification = %url, error = %e, "Skipping unreachable notification");
                return None;
            }
        };
        if !response.is_success() {
            debug!(notification = %url, status = response.status, "Skipping unreadable notification");
            return None;
        }

        let notification = SharingNotification::from_turtle(&response.body, url);
        if notification.is_none() {
            debug!(notification = %url, "Skipping malformed notification");
        }
        notification
    }
}

fn slug() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("notification-{}-{}", Utc::now().timestamp_millis(), &id[..8])
}

/// Members of an LDP container listing, in document order.
pub fn container_members(listing: &str, container_url: &str) -> Vec<String> {
    let (triples, errors) = turtle::parse_lenient(listing, container_url);
    if !errors.is_empty() {
        warn!(container = %container_url, skipped = errors.len(), "Container listing partially malformed");
    }
    triples
        .into_iter()
        .filter(|triple| triple.predicate == LDP_CONTAINS)
        .filter_map(|triple| triple.object.as_iri().map(str::to_string))
        .collect()
}

#[async_trait]
impl NotificationService for StandardNotificationService {
    async fn send(
        &self,
        inbox_url: &str,
        sender: &str,
        recipient: &str,
        resource_url: &str,
        modes: &[AccessMode],
    ) -> Result<String, PodError> {
        let body = announcement(sender, recipient, resource_url, modes, Utc::now())?;
        let request = PodRequest::post(inbox_url)
            .header(HEADER_SLUG, slug())
            .body(TEXT_TURTLE, body);

        let response = self.client.execute(request).await?;
        if !response.is_success() {
            return Err(PodError::from_response("Send notification", inbox_url, &response));
        }

        let location = match response.location() {
            Some(location) => resolve_iri(inbox_url, location),
            None => {
                warn!(inbox = %inbox_url, "Store returned no Location for notification");
                inbox_url.to_string()
            }
        };

        info!(inbox = %inbox_url, notification = %location, resource = %resource_url, "Sent notification");
        Ok(location)
    }

    async fn list(&self, inbox_url: &str) -> Result<Vec<SharingNotification>, PodError> {
        let response = self
            .client
            .execute(PodRequest::get(inbox_url).header(HEADER_ACCEPT, TEXT_TURTLE))
            .await?;
        if !response.is_success() {
            return Err(PodError::from_response("Read inbox", inbox_url, &response));
        }

        let mut notifications = Vec::new();
        for member in container_members(&response.body, inbox_url) {
            if let Some(notification) = self.fetch_notification(&member).await {
                notifications.push(notification);
            }
        }

        debug!(inbox = %inbox_url, count = notifications.len(), "Listed notifications");
        Ok(notifications)
    }

    async fn delete(&self, notification_url: &str) -> Result<(), PodError> {
        let response = self
            .client
            .execute(PodRequest::delete(notification_url))
            .await?;
        match response.status {
            404 => {
                debug!(notification = %notification_url, "Notification already deleted");
                Ok(())
            }
            _ if response.is_success() => {
                info!(notification = %notification_url, "Deleted notification");
                Ok(())
            }
            _ => Err(PodError::from_response(
                "Delete notification",
                notification_url,
                &response,
            )),
        }
    }
}
