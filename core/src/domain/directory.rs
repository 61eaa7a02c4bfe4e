// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Agent directory records and their document representation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::error::PodError;
use crate::domain::notification::escape_literal;
use crate::domain::turtle::{self, check_iri};
use crate::domain::vocab::{FOAF_AGENT, FOAF_NAME, REGISTRY, REGISTRY_AGENT, REGISTRY_CAPABILITY, SOLID_ACCOUNT};

/// Location of the directory document relative to the server root.
pub const DEFAULT_DIRECTORY_PATH: &str = "directory/agents.ttl";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub web_id: String,
    pub name: String,
    pub pod_url: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl DirectoryEntry {
    pub fn new(web_id: impl Into<String>, name: impl Into<String>, pod_url: impl Into<String>) -> Self {
        Self {
            web_id: web_id.into(),
            name: name.into(),
            pod_url: pod_url.into(),
            capabilities: Vec::new(),
        }
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    pub fn validate(&self) -> Result<(), PodError> {
        if self.name.trim().is_empty() {
            return Err(PodError::InvalidInput("agent name must not be empty".to_string()));
        }
        check_iri("webId", &self.web_id)?;
        check_iri("podUrl", &self.pod_url)
    }

    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        let wanted = capability.to_lowercase();
        self.capabilities.iter().any(|c| c.to_lowercase() == wanted)
    }

    /// Triples describing this entry, in the form used inside `INSERT DATA`.
    pub fn to_triples(&self) -> Result<String, PodError> {
        self.validate()?;
        let mut triples = format!(
            "<{}>\n    a <{}>, <{}> ;\n    <{}> \"{}\" ;\n    <{}> <{}>",
            self.web_id,
            REGISTRY_AGENT,
            FOAF_AGENT,
            FOAF_NAME,
            escape_literal(&self.name),
            SOLID_ACCOUNT,
            self.pod_url
        );
        for capability in &self.capabilities {
            triples.push_str(&format!(
                " ;\n    <{}> \"{}\"",
                REGISTRY_CAPABILITY,
                escape_literal(capability)
            ));
        }
        triples.push_str(" .");
        Ok(triples)
    }
}

/// Initial content of the directory document: namespace declarations only.
pub fn directory_preamble() -> String {
    format!(
        "@prefix foaf: <http://xmlns.com/foaf/0.1/>.\n@prefix interition: <{}>.\n@prefix solid: <http://www.w3.org/ns/solid/terms#>.\n\n",
        REGISTRY
    )
}

/// Incremental update appending one entry.
pub fn insert_entry_patch(entry: &DirectoryEntry) -> Result<String, PodError> {
    Ok(format!("INSERT DATA {{ {} }}", entry.to_triples()?))
}

/// Read every named entry from a directory document. Malformed statements
/// are skipped; subjects without a name are discarded.
pub fn parse_directory(document: &str, base: &str) -> Vec<DirectoryEntry> {
    let (triples, errors) = turtle::parse_lenient(document, base);
    if !errors.is_empty() {
        tracing::debug!(skipped = errors.len(), "Skipped malformed directory statements");
    }

    let mut order: Vec<String> = Vec::new();
    let mut entries: HashMap<String, DirectoryEntry> = HashMap::new();

    for triple in &triples {
        let subject = triple.subject.value().to_string();
        let entry = entries.entry(subject.clone()).or_insert_with(|| {
            order.push(subject.clone());
            DirectoryEntry::new(subject.clone(), "", "")
        });
        let value = triple.object.value();
        match triple.predicate.as_str() {
            FOAF_NAME => entry.name = value.to_string(),
            SOLID_ACCOUNT => entry.pod_url = value.to_string(),
            REGISTRY_CAPABILITY => entry.capabilities.push(value.to_string()),
            _ => {}
        }
    }

    order
        .into_iter()
        .filter_map(|subject| entries.remove(&subject))
        .filter(|entry| !entry.name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTORY: &str = "http://localhost:3000/directory/agents.ttl";

    fn alpha() -> DirectoryEntry {
        DirectoryEntry::new(
            "http://localhost:3000/alpha/profile/card#me",
            "Alpha",
            "http://localhost:3000/alpha/",
        )
        .with_capability("research")
        .with_capability("summarize")
    }

    #[test]
    fn test_entry_triples_parse_back() {
        let document = format!("{}{}\n", directory_preamble(), alpha().to_triples().unwrap());
        assert_eq!(parse_directory(&document, DIRECTORY), vec![alpha()]);
    }

    #[test]
    fn test_insert_patch_wraps_triples() {
        let patch = insert_entry_patch(&alpha()).unwrap();
        assert!(patch.starts_with("INSERT DATA { <http://localhost:3000/alpha/profile/card#me>"));
        assert!(patch.ends_with(" . }"));
    }

    #[test]
    fn test_preamble_only_document_is_empty() {
        assert!(parse_directory(&directory_preamble(), DIRECTORY).is_empty());
        assert!(parse_directory("", DIRECTORY).is_empty());
    }

    #[test]
    fn test_malformed_statements_are_skipped() {
        let beta = DirectoryEntry::new(
            "http://localhost:3000/beta/profile/card#me",
            "Beta",
            "http://localhost:3000/beta/",
        );
        let document = format!(
            "{}{}\n<http://localhost:3000/broken#me> <{}> .\n{}\n<http://localhost:3000/nameless#me> <{}> <http://localhost:3000/nameless/> .\n",
            directory_preamble(),
            alpha().to_triples().unwrap(),
            FOAF_NAME,
            beta.to_triples().unwrap(),
            SOLID_ACCOUNT
        );
        assert_eq!(parse_directory(&document, DIRECTORY), vec![alpha(), beta]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let entry = alpha();
        assert!(entry.name_matches("ALPHA"));
        assert!(!entry.name_matches("alph"));
        assert!(entry.has_capability("Research"));
        assert!(!entry.has_capability("code"));
    }

    #[test]
    fn test_validate() {
        assert!(alpha().validate().is_ok());
        assert!(DirectoryEntry::new("not-a-url", "X", "http://pod/").validate().is_err());
        assert!(DirectoryEntry::new("http://a/#me", " ", "http://pod/").validate().is_err());
    }

    #[test]
    fn test_entry_with_forged_webid_is_not_rendered() {
        let forged = DirectoryEntry::new(
            "http://evil.test/me> <http://xmlns.com/foaf/0.1/name> \"Beta\" . <http://evil.test/x",
            "Mallory",
            "http://evil.test/",
        );
        assert!(matches!(forged.validate(), Err(PodError::InvalidInput(_))));
        assert!(forged.to_triples().is_err());
        assert!(insert_entry_patch(&forged).is_err());

        let spaced_pod = DirectoryEntry::new("http://evil.test/me", "Mallory", "http://evil.test/a b/");
        assert!(spaced_pod.to_triples().is_err());
    }
}
