// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `podshare share`: grant access and announce it to the recipient.

use anyhow::{bail, Context, Result};
use clap::Args;

use podshare_core::domain::acl::parse_modes;

use crate::output::{print_json, success, warning};
use crate::session::PodSession;

#[derive(Args)]
pub struct ShareCommand {
    /// Resource to share
    #[arg(value_name = "RESOURCE_URL")]
    pub resource: String,

    /// Recipient name, resolved through the directory
    #[arg(long = "with", value_name = "NAME", conflicts_with_all = ["to", "inbox"])]
    pub with: Option<String>,

    /// Recipient WebID
    #[arg(long, value_name = "WEBID", requires = "inbox")]
    pub to: Option<String>,

    /// Recipient inbox container
    #[arg(long, value_name = "URL", requires = "to")]
    pub inbox: Option<String>,

    /// Comma-separated access modes (read, write, append, control)
    #[arg(short, long, default_value = "read")]
    pub modes: String,
}

pub async fn execute(cmd: ShareCommand, session: &PodSession) -> Result<()> {
    let modes = parse_modes(&cmd.modes)?;
    let sender = session.webid()?;

    let outcome = match (&cmd.with, &cmd.to, &cmd.inbox) {
        (Some(name), _, _) => {
            let directory_url = session.directory_url()?;
            session
                .sharing
                .share_by_name(&cmd.resource, name, &modes, sender, &directory_url)
                .await
        }
        (None, Some(recipient), Some(inbox)) => {
            session
                .sharing
                .share(&cmd.resource, recipient, inbox, &modes, sender)
                .await
        }
        _ => bail!("either --with NAME or --to WEBID --inbox URL is required"),
    }
    .with_context(|| format!("Failed to share {}", cmd.resource))?;

    let recipient = outcome.grant.agent.clone();
    let result = outcome.into_result();
    if result.notified {
        success(format!("Shared with {}", recipient));
    } else {
        warning(format!(
            "Access granted to {} but the notification was not delivered",
            recipient
        ));
    }
    print_json(&result)
}
