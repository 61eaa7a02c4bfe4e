// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Error taxonomy shared by every pod operation.
//!
//! Expected outcomes such as "not found" on delete/revoke or "already exists" on
//! idempotent creation never surface here; callers handle those statuses
//! before converting a response into an error.

use thiserror::Error;

use crate::domain::pod::PodResponse;

#[derive(Debug, Error)]
pub enum PodError {
    /// 401/403 from the store. Propagated as-is, never retried.
    #[error("Access denied to {url} (HTTP {status}): {body}")]
    AccessDenied { url: String, status: u16, body: String },

    #[error("Failed to update authorization document {url} (HTTP {status}): {body}")]
    AccessControl { url: String, status: u16, body: String },

    #[error("{operation} failed for {url} (HTTP {status}): {body}")]
    Remote {
        operation: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout while communicating with the pod server")]
    Timeout,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PodError {
    /// Classify a non-success response. 401/403 become [`PodError::AccessDenied`],
    /// anything else [`PodError::Remote`].
    pub fn from_response(operation: &str, url: &str, response: &PodResponse) -> Self {
        match response.status {
            401 | 403 => PodError::AccessDenied {
                url: url.to_string(),
                status: response.status,
                body: response.body.clone(),
            },
            status => PodError::Remote {
                operation: operation.to_string(),
                url: url.to_string(),
                status,
                body: response.body.clone(),
            },
        }
    }

    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            PodError::AccessDenied { status, .. }
            | PodError::AccessControl { status, .. }
            | PodError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, PodError::AccessDenied { .. })
    }
}

impl From<reqwest::Error> for PodError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PodError::Timeout
        } else if err.is_decode() {
            PodError::Serialization(err.to_string())
        } else {
            PodError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PodError {
    fn from(err: serde_json::Error) -> Self {
        PodError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> PodResponse {
        PodResponse::new(status, Vec::new(), body.to_string())
    }

    #[test]
    fn test_from_response_classifies_denials() {
        let err = PodError::from_response("GET", "http://pod/r", &response(403, "nope"));
        assert!(err.is_access_denied());
        assert_eq!(err.status(), Some(403));

        let err = PodError::from_response("GET", "http://pod/r", &response(401, ""));
        assert!(err.is_access_denied());
    }

    #[test]
    fn test_from_response_keeps_status_and_body() {
        let err = PodError::from_response("PUT", "http://pod/r", &response(500, "boom"));
        match err {
            PodError::Remote {
                operation,
                status,
                body,
                ..
            } => {
                assert_eq!(operation, "PUT");
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = PodError::AgentNotFound("Gamma".to_string());
        assert_eq!(err.to_string(), "Agent not found: Gamma");
        assert_eq!(PodError::Timeout.status(), None);
    }
}
