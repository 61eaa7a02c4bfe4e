// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `podshare setup-pod`: create the standard containers in the agent's pod.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use crate::output::{print_json, success};
use crate::session::PodSession;

#[derive(Args)]
pub struct SetupPodCommand {
    /// Pod root (default: the configured agent's pod)
    #[arg(long, value_name = "URL")]
    pub pod: Option<String>,

    /// Skip writing the inbox authorization document
    #[arg(long)]
    pub skip_inbox_acl: bool,
}

pub async fn execute(cmd: SetupPodCommand, session: &PodSession) -> Result<()> {
    let agent = session.config.require_agent()?;
    let pod_url = cmd.pod.unwrap_or_else(|| agent.pod_url.clone());
    let owner = (!cmd.skip_inbox_acl).then_some(agent.webid.as_str());

    let layout = session
        .pod_structure
        .create_containers(&pod_url, owner)
        .await
        .with_context(|| format!("Failed to set up pod {}", pod_url))?;

    success(format!("Pod ready at {}", pod_url));
    print_json(&json!({
        "containers": layout.containers,
        "inbox": layout.inbox_url,
        "inboxAcl": layout.inbox_acl_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{server, session, BETA};
    use podshare_core::application::pod_structure::STANDARD_CONTAINERS;

    const BETA_POD: &str = "http://localhost:3000/beta/";

    #[tokio::test]
    async fn test_setup_creates_containers_and_inbox_acl() {
        let pod = server();
        let beta = session(&pod, "Beta", BETA);
        let setup = || SetupPodCommand {
            pod: None,
            skip_inbox_acl: false,
        };

        execute(setup(), &beta).await.unwrap();
        for container in STANDARD_CONTAINERS {
            assert!(pod.contains(&format!("{BETA_POD}{container}")));
        }
        assert!(pod.contains(&format!("{BETA_POD}inbox/.acl")));

        // rerunning leaves existing containers alone
        execute(setup(), &beta).await.unwrap();
    }

    #[tokio::test]
    async fn test_setup_can_skip_inbox_acl() {
        let pod = server();
        let beta = session(&pod, "Beta", BETA);

        execute(
            SetupPodCommand {
                pod: Some(BETA_POD.trim_end_matches('/').to_string()),
                skip_inbox_acl: true,
            },
            &beta,
        )
        .await
        .unwrap();
        assert!(pod.contains(&format!("{BETA_POD}inbox/")));
        assert!(!pod.contains(&format!("{BETA_POD}inbox/.acl")));
    }

    #[tokio::test]
    async fn test_setup_in_foreign_pod_fails() {
        let pod = server();
        let beta = session(&pod, "Beta", BETA);
        let result = execute(
            SetupPodCommand {
                pod: Some("http://localhost:3000/alpha/".to_string()),
                skip_inbox_acl: false,
            },
            &beta,
        )
        .await;
        assert!(result.is_err());
    }
}
