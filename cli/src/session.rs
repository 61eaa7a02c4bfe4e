// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Pod session for one CLI invocation
//!
//! Loads the configuration once, builds the authenticated client and wires
//! the services on top of it. Every command receives the session explicitly.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use podshare_core::{
    application::{
        access_control::StandardAccessControlService, directory::StandardDirectoryService,
        notifications::StandardNotificationService, pod_structure::PodStructureService,
        sharing::SharingService,
    },
    domain::{config::PodshareConfig, pod::PodClient},
    infrastructure::http::ReqwestPodClient,
};

pub struct PodSession {
    pub config: PodshareConfig,
    pub access_control: Arc<StandardAccessControlService>,
    pub notifications: Arc<StandardNotificationService>,
    pub directory: Arc<StandardDirectoryService>,
    pub pod_structure: PodStructureService,
    pub sharing: SharingService,
}

impl PodSession {
    /// Discover, validate and connect.
    pub fn open(config_path: Option<PathBuf>) -> Result<Self> {
        let config =
            PodshareConfig::load_or_default(config_path).context("Failed to load configuration")?;
        config
            .validate()
            .context("Configuration validation failed")?;
        let client: Arc<dyn PodClient> =
            Arc::new(ReqwestPodClient::from_config(&config).context("Failed to create pod client")?);
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: PodshareConfig, client: Arc<dyn PodClient>) -> Self {
        let access_control = Arc::new(StandardAccessControlService::new(client.clone()));
        let notifications = Arc::new(StandardNotificationService::new(client.clone()));
        let directory = Arc::new(StandardDirectoryService::new(client.clone()));
        let sharing = SharingService::new(
            access_control.clone(),
            notifications.clone(),
            directory.clone(),
        );

        Self {
            config,
            access_control,
            notifications,
            directory,
            pod_structure: PodStructureService::new(client),
            sharing,
        }
    }

    pub fn directory_url(&self) -> Result<String> {
        self.config.directory_url()
    }

    /// WebID of the configured agent; required by commands that act as it.
    pub fn webid(&self) -> Result<&str> {
        Ok(self.config.require_agent()?.webid.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podshare_core::application::directory::DirectoryService;
    use podshare_core::domain::acl::AccessMode;
    use podshare_core::domain::config::AgentConfig;
    use podshare_core::infrastructure::memory_pod::MemoryPod;

    const ALPHA: &str = "http://localhost:3000/alpha/profile/card#me";
    const BETA: &str = "http://localhost:3000/beta/profile/card#me";

    fn config_for(name: &str, webid: &str) -> PodshareConfig {
        let slug = name.to_lowercase();
        PodshareConfig {
            agent: Some(AgentConfig {
                name: name.to_string(),
                webid: webid.to_string(),
                pod_url: format!("http://localhost:3000/{slug}/"),
                capabilities: vec!["research".to_string()],
            }),
            ..PodshareConfig::default()
        }
    }

    #[tokio::test]
    async fn test_sessions_share_through_directory() {
        let pod = MemoryPod::new();
        pod.create_pod("http://localhost:3000/alpha/", ALPHA);
        pod.create_pod("http://localhost:3000/beta/", BETA);
        pod.make_public("http://localhost:3000/directory/");
        pod.insert(
            "http://localhost:3000/alpha/shared/notes.ttl",
            "text/turtle",
            "<> a <urn:notes>.",
        );

        let alpha = PodSession::with_client(config_for("Alpha", ALPHA), pod.agent(ALPHA));
        let beta = PodSession::with_client(config_for("Beta", BETA), pod.agent(BETA));

        let beta_agent = beta.config.require_agent().unwrap();
        beta.pod_structure
            .create_containers(&beta_agent.pod_url, Some(BETA))
            .await
            .unwrap();
        beta.directory
            .register(&beta.directory_url().unwrap(), &beta_agent.directory_entry())
            .await
            .unwrap();

        let outcome = alpha
            .sharing
            .share_by_name(
                "http://localhost:3000/alpha/shared/notes.ttl",
                "beta",
                &[AccessMode::Read],
                alpha.webid().unwrap(),
                &alpha.directory_url().unwrap(),
            )
            .await
            .unwrap();
        assert!(outcome.notified());
    }

    #[test]
    fn test_webid_requires_agent() {
        let session = PodSession::with_client(PodshareConfig::default(), MemoryPod::new().agent(ALPHA));
        assert!(session.webid().is_err());
    }
}
