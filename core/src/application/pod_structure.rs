// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Pod layout bootstrap: the standard containers every agent pod carries
//! and the inbox authorization document.

use std::sync::Arc;
use tracing::info;

use crate::application::directory::{create_container_request, created_or_exists};
use crate::domain::acl::inbox_acl;
use crate::domain::error::PodError;
use crate::domain::pod::{PodClient, PodRequest, TEXT_TURTLE};

/// Containers created under a pod root, in creation order.
pub const STANDARD_CONTAINERS: [&str; 4] = ["memory/", "shared/", "conversations/", "inbox/"];

pub const INBOX_CONTAINER: &str = "inbox/";

fn pod_root(pod_url: &str) -> String {
    if pod_url.ends_with('/') {
        pod_url.to_string()
    } else {
        format!("{}/", pod_url)
    }
}

/// Inbox container of the pod rooted at `pod_url`.
pub fn inbox_url(pod_url: &str) -> String {
    format!("{}{}", pod_root(pod_url), INBOX_CONTAINER)
}

/// Result of [`PodStructureService::create_containers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodLayout {
    pub containers: Vec<String>,
    pub inbox_url: String,
    /// Authorization document written for the inbox, if an owner was given
    pub inbox_acl_url: Option<String>,
}

pub struct PodStructureService {
    client: Arc<dyn PodClient>,
}

impl PodStructureService {
    pub fn new(client: Arc<dyn PodClient>) -> Self {
        Self { client }
    }

    /// Create the standard containers under `pod_url`. Existing containers
    /// are left untouched. With an `owner`, the inbox gets an authorization
    /// document letting the owner control it and any authenticated agent
    /// append to it.
    pub async fn create_containers(
        &self,
        pod_url: &str,
        owner: Option<&str>,
    ) -> Result<PodLayout, PodError> {
        let root = pod_root(pod_url);
        let mut containers = Vec::with_capacity(STANDARD_CONTAINERS.len());

        for name in STANDARD_CONTAINERS {
            let container_url = format!("{}{}", root, name);
            let response = self
                .client
                .execute(create_container_request(&container_url))
                .await?;
            if !created_or_exists(response.status) {
                return Err(PodError::from_response(
                    "Create container",
                    &container_url,
                    &response,
                ));
            }
            containers.push(container_url);
        }

        let inbox = inbox_url(&root);
        let inbox_acl_url = match owner {
            Some(owner) => {
                let acl_url = format!("{}.acl", inbox);
                let response = self
                    .client
                    .execute(PodRequest::put(&acl_url).body(TEXT_TURTLE, inbox_acl(&inbox, owner)))
                    .await?;
                if !response.is_success() {
                    return Err(PodError::AccessControl {
                        url: acl_url,
                        status: response.status,
                        body: response.body,
                    });
                }
                Some(acl_url)
            }
            None => None,
        };

        info!(pod = %root, containers = containers.len(), "Pod structure ready");
        Ok(PodLayout {
            containers,
            inbox_url: inbox,
            inbox_acl_url,
        })
    }
}
