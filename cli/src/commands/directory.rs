// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Directory commands
//!
//! Commands: discover, register

use anyhow::{Context, Result};
use clap::Args;

use podshare_core::application::directory::DirectoryService;

use crate::output::{print_json, success, warning};
use crate::session::PodSession;

#[derive(Args)]
pub struct DiscoverCommand {
    /// Exact agent name, ignoring case
    #[arg(long, conflicts_with = "capability")]
    pub name: Option<String>,

    /// Declared capability, ignoring case
    #[arg(long)]
    pub capability: Option<String>,
}

#[derive(Args)]
pub struct RegisterCommand {
    /// Extra capability to advertise (repeatable)
    #[arg(long = "capability", value_name = "CAPABILITY")]
    pub capabilities: Vec<String>,
}

pub async fn discover(cmd: DiscoverCommand, session: &PodSession) -> Result<()> {
    let directory_url = session.directory_url()?;

    let entries = if let Some(name) = &cmd.name {
        let found = session.directory.find_by_name(&directory_url, name).await?;
        if found.is_none() {
            warning(format!("No agent named '{}'", name));
        }
        found.into_iter().collect()
    } else if let Some(capability) = &cmd.capability {
        session
            .directory
            .find_by_capability(&directory_url, capability)
            .await?
    } else {
        session.directory.list(&directory_url).await?
    };

    print_json(&entries)
}

pub async fn register(cmd: RegisterCommand, session: &PodSession) -> Result<()> {
    let directory_url = session.directory_url()?;
    let mut entry = session.config.require_agent()?.directory_entry();
    for capability in cmd.capabilities {
        if !entry.has_capability(&capability) {
            entry = entry.with_capability(capability);
        }
    }

    session
        .directory
        .register(&directory_url, &entry)
        .await
        .with_context(|| format!("Failed to register in {}", directory_url))?;

    success(format!("Registered {} in the directory", entry.name));
    print_json(&entry)
}
