// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Inbox commands
//!
//! Commands: list, delete

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::json;

use podshare_core::application::notifications::NotificationService;
use podshare_core::application::pod_structure::inbox_url;
use podshare_core::domain::notification::SharingNotification;

use crate::output::{print_json, success};
use crate::session::PodSession;

#[derive(Subcommand)]
pub enum InboxCommand {
    /// List sharing notifications
    List {
        /// Inbox to read (default: the configured agent's inbox)
        #[arg(long, value_name = "URL")]
        inbox: Option<String>,

        /// Sort oldest first by publication time
        #[arg(long)]
        sorted: bool,
    },

    /// Delete a notification
    Delete {
        #[arg(value_name = "NOTIFICATION_URL")]
        notification: String,
    },
}

pub async fn handle_command(command: InboxCommand, session: &PodSession) -> Result<()> {
    match command {
        InboxCommand::List { inbox, sorted } => list(inbox, sorted, session).await,
        InboxCommand::Delete { notification } => delete(notification, session).await,
    }
}

async fn list(inbox: Option<String>, sorted: bool, session: &PodSession) -> Result<()> {
    let inbox = match inbox {
        Some(inbox) => inbox,
        None => inbox_url(&session.config.require_agent()?.pod_url),
    };

    let mut notifications = session
        .notifications
        .list(&inbox)
        .await
        .with_context(|| format!("Failed to read inbox {}", inbox))?;
    if sorted {
        SharingNotification::sort_chronologically(&mut notifications);
    }
    print_json(&notifications)
}

async fn delete(notification: String, session: &PodSession) -> Result<()> {
    session
        .notifications
        .delete(&notification)
        .await
        .with_context(|| format!("Failed to delete {}", notification))?;

    success("Notification deleted");
    print_json(&json!({ "deleted": notification }))
}
