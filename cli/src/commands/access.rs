// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Access control commands
//!
//! Commands: grant, revoke, rules

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use podshare_core::application::access_control::AccessControlService;
use podshare_core::domain::acl::parse_modes;

use crate::output::{print_json, success, warning};
use crate::session::PodSession;

#[derive(Args)]
pub struct GrantCommand {
    /// Resource to grant access to
    #[arg(value_name = "RESOURCE_URL")]
    pub resource: String,

    /// WebID of the agent receiving access
    #[arg(value_name = "WEBID")]
    pub agent: String,

    /// Comma-separated access modes (read, write, append, control)
    #[arg(short, long, default_value = "read")]
    pub modes: String,
}

#[derive(Args)]
pub struct RevokeCommand {
    #[arg(value_name = "RESOURCE_URL")]
    pub resource: String,

    /// WebID whose rules are removed
    #[arg(value_name = "WEBID")]
    pub agent: String,
}

#[derive(Args)]
pub struct RulesCommand {
    #[arg(value_name = "RESOURCE_URL")]
    pub resource: String,
}

pub async fn grant(cmd: GrantCommand, session: &PodSession) -> Result<()> {
    let modes = parse_modes(&cmd.modes)?;
    let receipt = session
        .access_control
        .grant(&cmd.resource, &cmd.agent, &modes)
        .await
        .with_context(|| format!("Failed to grant access to {}", cmd.resource))?;

    success(format!("Granted {} access", cmd.agent));
    print_json(&receipt)
}

pub async fn revoke(cmd: RevokeCommand, session: &PodSession) -> Result<()> {
    let revoked = session
        .access_control
        .revoke(&cmd.resource, &cmd.agent)
        .await
        .with_context(|| format!("Failed to revoke access to {}", cmd.resource))?;

    if revoked {
        success(format!("Revoked access for {}", cmd.agent));
    } else {
        warning(format!("{} had no rules on this resource", cmd.agent));
    }
    print_json(&json!({
        "resourceUrl": cmd.resource,
        "agent": cmd.agent,
        "revoked": revoked,
    }))
}

pub async fn rules(cmd: RulesCommand, session: &PodSession) -> Result<()> {
    let rules = session
        .access_control
        .rules(&cmd.resource)
        .await
        .with_context(|| format!("Failed to read rules for {}", cmd.resource))?;
    print_json(&rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{server, session, ALPHA, BETA, NOTES};
    use podshare_core::domain::acl::AccessMode;

    fn grant_command(agent: &str, modes: &str) -> GrantCommand {
        GrantCommand {
            resource: NOTES.to_string(),
            agent: agent.to_string(),
            modes: modes.to_string(),
        }
    }

    #[tokio::test]
    async fn test_grant_rules_and_revoke() {
        let pod = server();
        let alpha = session(&pod, "Alpha", ALPHA);

        grant(grant_command(BETA, "read,write"), &alpha).await.unwrap();
        let granted = alpha.access_control.rules(NOTES).await.unwrap();
        assert_eq!(granted.len(), 1);
        assert_eq!(granted[0].agent, BETA);
        assert_eq!(granted[0].modes, vec![AccessMode::Read, AccessMode::Write]);

        rules(RulesCommand { resource: NOTES.to_string() }, &alpha)
            .await
            .unwrap();

        let revoke_beta = || RevokeCommand {
            resource: NOTES.to_string(),
            agent: BETA.to_string(),
        };
        revoke(revoke_beta(), &alpha).await.unwrap();
        assert!(alpha.access_control.rules(NOTES).await.unwrap().is_empty());

        // nothing left to remove is reported, not failed
        revoke(revoke_beta(), &alpha).await.unwrap();
    }

    #[tokio::test]
    async fn test_grant_rejects_bad_input_before_any_request() {
        let pod = server();
        let alpha = session(&pod, "Alpha", ALPHA);

        assert!(grant(grant_command(BETA, "read,delete"), &alpha).await.is_err());
        assert!(grant(grant_command("http://evil.test/a> <#x", "read"), &alpha)
            .await
            .is_err());
        assert!(pod.requests().is_empty());
    }

    #[tokio::test]
    async fn test_grant_on_foreign_resource_fails() {
        let pod = server();
        let beta = session(&pod, "Beta", BETA);
        let err = grant(grant_command(BETA, "read"), &beta).await.unwrap_err();
        assert!(err.to_string().contains(NOTES));
    }
}
