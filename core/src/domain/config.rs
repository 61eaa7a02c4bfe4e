// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Client Configuration Types
//
// Defines the YAML configuration for a podshare client:
// - Pod server location and directory document path
// - Identity of the acting agent (name, WebID, pod, capabilities)
// - Credentials used to authenticate requests
// - HTTP and logging settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::domain::directory::{DirectoryEntry, DEFAULT_DIRECTORY_PATH};

pub const CONFIG_PATH_ENV: &str = "PODSHARE_CONFIG_PATH";
pub const SERVER_URL_ENV: &str = "SOLID_SERVER_URL";
pub const CLIENT_ID_ENV: &str = "PODSHARE_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "PODSHARE_CLIENT_SECRET";
pub const TOKEN_ENV: &str = "PODSHARE_TOKEN";

const REDACTED: &str = "********";

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodshareConfig {
    /// Root URL of the pod server (e.g. "http://localhost:3000/")
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// The agent this client acts as
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentConfig>,

    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub http: HttpConfig,

    /// Directory document path relative to the server root
    #[serde(default = "default_directory_path")]
    pub directory_path: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub webid: String,
    pub pod_url: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl AgentConfig {
    pub fn directory_entry(&self) -> DirectoryEntry {
        DirectoryEntry {
            web_id: self.webid.clone(),
            name: self.name.clone(),
            pod_url: self.pod_url.clone(),
            capabilities: self.capabilities.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialsConfig {
    #[default]
    Anonymous,
    Bearer {
        token: String,
    },
    ClientCredentials {
        client_id: String,
        client_secret: String,
        /// Defaults to `<server_url>/.oidc/token`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token_url: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("text" or "json")
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_server_url() -> String {
    "http://localhost:3000/".to_string()
}

fn default_directory_path() -> String {
    DEFAULT_DIRECTORY_PATH.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for PodshareConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            agent: None,
            credentials: CredentialsConfig::default(),
            http: HttpConfig::default(),
            directory_path: default_directory_path(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PodshareConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Discover configuration file using precedence order
    /// 1. PODSHARE_CONFIG_PATH environment variable
    /// 2. ./podshare.yaml (working directory)
    /// 3. ~/.podshare/config.yaml (user home)
    /// 4. /etc/podshare/config.yaml (system)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./podshare.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".podshare").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        let system_config = PathBuf::from("/etc/podshare/config.yaml");
        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(SERVER_URL_ENV) {
            tracing::info!("Environment override: {}={}", SERVER_URL_ENV, url);
            self.server_url = url;
        }

        match (lookup(CLIENT_ID_ENV), lookup(CLIENT_SECRET_ENV)) {
            (Some(client_id), Some(client_secret)) => {
                tracing::info!("Environment override: client credentials from {}", CLIENT_ID_ENV);
                let token_url = match &self.credentials {
                    CredentialsConfig::ClientCredentials { token_url, .. } => token_url.clone(),
                    _ => None,
                };
                self.credentials = CredentialsConfig::ClientCredentials {
                    client_id,
                    client_secret,
                    token_url,
                };
            }
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!(
                    "Only one of {} and {} is set. Ignoring both.",
                    CLIENT_ID_ENV,
                    CLIENT_SECRET_ENV
                );
            }
            (None, None) => {}
        }

        if let Some(token) = lookup(TOKEN_ENV) {
            tracing::info!("Environment override: bearer token from {}", TOKEN_ENV);
            self.credentials = CredentialsConfig::Bearer { token };
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let server = Url::parse(&self.server_url)
            .map_err(|e| anyhow::anyhow!("Invalid server_url '{}': {}", self.server_url, e))?;
        if !matches!(server.scheme(), "http" | "https") {
            anyhow::bail!("server_url must use http or https: '{}'", self.server_url);
        }

        if self.directory_path.trim().is_empty() {
            anyhow::bail!("directory_path cannot be empty");
        }

        if self.http.timeout_seconds == 0 {
            anyhow::bail!("http.timeout_seconds must be greater than zero");
        }

        if let Some(agent) = &self.agent {
            if agent.name.trim().is_empty() {
                anyhow::bail!("agent.name cannot be empty");
            }
            Url::parse(&agent.webid)
                .map_err(|e| anyhow::anyhow!("Invalid agent.webid '{}': {}", agent.webid, e))?;
            if !agent.pod_url.ends_with('/') {
                anyhow::bail!("agent.pod_url must end with '/': '{}'", agent.pod_url);
            }
            Url::parse(&agent.pod_url)
                .map_err(|e| anyhow::anyhow!("Invalid agent.pod_url '{}': {}", agent.pod_url, e))?;
        }

        match &self.credentials {
            CredentialsConfig::Anonymous => {}
            CredentialsConfig::Bearer { token } => {
                if token.is_empty() {
                    anyhow::bail!("credentials.token cannot be empty");
                }
            }
            CredentialsConfig::ClientCredentials {
                client_id,
                client_secret,
                token_url,
            } => {
                if client_id.is_empty() || client_secret.is_empty() {
                    anyhow::bail!("credentials.client_id and credentials.client_secret are required");
                }
                if let Some(token_url) = token_url {
                    Url::parse(token_url)
                        .map_err(|e| anyhow::anyhow!("Invalid credentials.token_url '{}': {}", token_url, e))?;
                }
            }
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging.format must be 'text' or 'json', got '{}'", self.logging.format);
        }

        Ok(())
    }

    /// Server root with a guaranteed trailing slash.
    pub fn server_root(&self) -> anyhow::Result<Url> {
        let mut root = self.server_url.clone();
        if !root.ends_with('/') {
            root.push('/');
        }
        Url::parse(&root).map_err(|e| anyhow::anyhow!("Invalid server_url '{}': {}", self.server_url, e))
    }

    pub fn directory_url(&self) -> anyhow::Result<String> {
        Ok(self.server_root()?.join(&self.directory_path)?.to_string())
    }

    /// Token endpoint for client credentials, defaulting to the server's
    /// `.oidc/token`.
    pub fn token_url(&self) -> anyhow::Result<String> {
        if let CredentialsConfig::ClientCredentials {
            token_url: Some(url),
            ..
        } = &self.credentials
        {
            return Ok(url.clone());
        }
        Ok(self.server_root()?.join(".oidc/token")?.to_string())
    }

    pub fn require_agent(&self) -> anyhow::Result<&AgentConfig> {
        self.agent
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("No agent configured. Add an `agent` section to the configuration file."))
    }

    /// Copy safe to print: secrets replaced.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.credentials = match &self.credentials {
            CredentialsConfig::Anonymous => CredentialsConfig::Anonymous,
            CredentialsConfig::Bearer { .. } => CredentialsConfig::Bearer {
                token: REDACTED.to_string(),
            },
            CredentialsConfig::ClientCredentials {
                client_id,
                token_url,
                ..
            } => CredentialsConfig::ClientCredentials {
                client_id: client_id.clone(),
                client_secret: REDACTED.to_string(),
                token_url: token_url.clone(),
            },
        };
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    const YAML: &str = r#"
server_url: "http://localhost:3000"
agent:
  name: Alpha
  webid: "http://localhost:3000/alpha/profile/card#me"
  pod_url: "http://localhost:3000/alpha/"
  capabilities: [research, summarize]
credentials:
  type: client_credentials
  client_id: alpha-id
  client_secret: alpha-secret
http:
  timeout_seconds: 10
logging:
  level: debug
  format: json
"#;

    #[test]
    fn test_default_config() {
        let config = PodshareConfig::default();
        assert_eq!(config.server_url, "http://localhost:3000/");
        assert_eq!(config.directory_path, "directory/agents.ttl");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.credentials, CredentialsConfig::Anonymous);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let config = PodshareConfig::from_yaml_str(YAML).unwrap();
        let agent = config.agent.as_ref().unwrap();
        assert_eq!(agent.name, "Alpha");
        assert_eq!(agent.capabilities, vec!["research", "summarize"]);
        assert_eq!(config.http.timeout_seconds, 10);
        assert_eq!(config.logging.format, "json");
        assert!(config.validate().is_ok());

        assert_eq!(
            config.directory_url().unwrap(),
            "http://localhost:3000/directory/agents.ttl"
        );
        assert_eq!(config.token_url().unwrap(), "http://localhost:3000/.oidc/token");
        assert_eq!(agent.directory_entry().web_id, agent.webid);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();
        let config = PodshareConfig::load_or_default(Some(file.path().to_path_buf())).unwrap();
        assert!(config.agent.is_some());
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(PodshareConfig::load_or_default(Some(missing)).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (SERVER_URL_ENV, "https://pods.example.org/"),
            (CLIENT_ID_ENV, "id"),
            (CLIENT_SECRET_ENV, "secret"),
        ]);
        let mut config = PodshareConfig::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.server_url, "https://pods.example.org/");
        assert_eq!(
            config.credentials,
            CredentialsConfig::ClientCredentials {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
                token_url: None,
            }
        );

        let env: HashMap<&str, &str> = HashMap::from([(TOKEN_ENV, "tok")]);
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.credentials, CredentialsConfig::Bearer { token: "tok".to_string() });
    }

    #[test]
    fn test_validation_failures() {
        let mut config = PodshareConfig::from_yaml_str(YAML).unwrap();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = PodshareConfig::from_yaml_str(YAML).unwrap();
        if let Some(agent) = config.agent.as_mut() {
            agent.pod_url = "http://localhost:3000/alpha".to_string();
        }
        assert!(config.validate().is_err());

        let mut config = PodshareConfig::default();
        config.server_url = "ftp://example.org/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redacted_hides_secrets() {
        let config = PodshareConfig::from_yaml_str(YAML).unwrap().redacted();
        let yaml = config.to_yaml_string().unwrap();
        assert!(!yaml.contains("alpha-secret"));
        assert!(yaml.contains("alpha-id"));
    }
}
