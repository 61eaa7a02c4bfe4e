// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the podshare CLI

pub mod access;
pub mod config;
pub mod directory;
pub mod inbox;
pub mod pod;
pub mod share;

pub use self::access::{GrantCommand, RevokeCommand, RulesCommand};
pub use self::config::ConfigCommand;
pub use self::directory::{DiscoverCommand, RegisterCommand};
pub use self::inbox::InboxCommand;
pub use self::pod::SetupPodCommand;
pub use self::share::ShareCommand;

#[cfg(test)]
pub(crate) mod fixtures {
    use podshare_core::domain::config::{AgentConfig, PodshareConfig};
    use podshare_core::domain::pod::TEXT_TURTLE;
    use podshare_core::infrastructure::memory_pod::MemoryPod;

    use crate::session::PodSession;

    pub const ALPHA: &str = "http://localhost:3000/alpha/profile/card#me";
    pub const BETA: &str = "http://localhost:3000/beta/profile/card#me";
    pub const BETA_INBOX: &str = "http://localhost:3000/beta/inbox/";
    pub const NOTES: &str = "http://localhost:3000/alpha/shared/notes.ttl";

    /// Alpha and Beta pods, a note owned by Alpha and a public directory.
    pub fn server() -> MemoryPod {
        let pod = MemoryPod::new();
        pod.create_pod("http://localhost:3000/alpha/", ALPHA);
        pod.create_pod("http://localhost:3000/beta/", BETA);
        pod.make_public("http://localhost:3000/directory/");
        pod.insert(NOTES, TEXT_TURTLE, "<> a <urn:notes>.");
        pod
    }

    /// Session acting as `webid`, configured as agent `name`.
    pub fn session(pod: &MemoryPod, name: &str, webid: &str) -> PodSession {
        let slug = name.to_lowercase();
        let config = PodshareConfig {
            agent: Some(AgentConfig {
                name: name.to_string(),
                webid: webid.to_string(),
                pod_url: format!("http://localhost:3000/{slug}/"),
                capabilities: vec!["research".to_string()],
            }),
            ..PodshareConfig::default()
        };
        PodSession::with_client(config, pod.agent(webid))
    }

    /// Session with no agent section, still authenticated as `webid`.
    pub fn anonymous_config_session(pod: &MemoryPod, webid: &str) -> PodSession {
        PodSession::with_client(PodshareConfig::default(), pod.agent(webid))
    }
}
