// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Outcome types for the two-stage share operation.
//!
//! The grant is the durable effect and must have succeeded for an outcome to
//! exist at all; the notification is advisory, so its failure is carried as
//! data instead of an error.

use serde::{Deserialize, Serialize};

use crate::domain::acl::AccessMode;
use crate::domain::error::PodError;

/// Proof that an access grant was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantReceipt {
    pub resource_url: String,
    pub agent: String,
    pub modes: Vec<AccessMode>,
    pub authorization_url: String,
}

#[derive(Debug)]
pub struct ShareOutcome {
    pub grant: GrantReceipt,
    /// Store-assigned notification location, or why delivery failed.
    pub notification: Result<String, PodError>,
}

impl ShareOutcome {
    pub fn notified(&self) -> bool {
        self.notification.is_ok()
    }

    pub fn into_result(self) -> ShareResult {
        match self.notification {
            Ok(url) => ShareResult {
                granted: true,
                notified: true,
                notification_url: Some(url),
                error: None,
            },
            Err(err) => ShareResult {
                granted: true,
                notified: false,
                notification_url: None,
                error: Some(format!("Notification failed: {}", err)),
            },
        }
    }
}

/// Flat record of one share, as reported to callers and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResult {
    pub granted: bool,
    pub notified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt() -> GrantReceipt {
        GrantReceipt {
            resource_url: "http://pod/alpha/shared/data.ttl".to_string(),
            agent: "http://pod/beta/profile/card#me".to_string(),
            modes: vec![AccessMode::Read],
            authorization_url: "http://pod/alpha/shared/data.ttl.acl".to_string(),
        }
    }

    #[test]
    fn test_successful_outcome() {
        let outcome = ShareOutcome {
            grant: receipt(),
            notification: Ok("http://pod/beta/inbox/n1".to_string()),
        };
        assert!(outcome.notified());
        let result = outcome.into_result();
        assert!(result.granted && result.notified);
        assert_eq!(result.notification_url.as_deref(), Some("http://pod/beta/inbox/n1"));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["notificationUrl"], "http://pod/beta/inbox/n1");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failed_notification_keeps_grant() {
        let outcome = ShareOutcome {
            grant: receipt(),
            notification: Err(PodError::Remote {
                operation: "POST".to_string(),
                url: "http://pod/beta/inbox/".to_string(),
                status: 500,
                body: "down".to_string(),
            }),
        };
        let result = outcome.into_result();
        assert!(result.granted);
        assert!(!result.notified);
        assert!(result.notification_url.is_none());
        assert!(result.error.unwrap().starts_with("Notification failed: POST failed"));
    }
}
