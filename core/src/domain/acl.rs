// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Authorization Document Codec
//!
//! Pure, I/O-free handling of Web Access Control documents. Documents are
//! split into top-level statements, each authorization block is kept as
//! its original source text, and mutations operate on that block list before
//! rendering it back deterministically. New blocks are always emitted from
//! a fixed template.
//!
//! # Architecture
//!
//! - **Layer:** Domain
//! - **Purpose:** Parse, extend and prune authorization documents
//! - **Related:** `application::access_control` performs the fetch/overwrite cycle

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::PodError;
use crate::domain::turtle::{self, check_iri, strip_fragment, StatementKind, Term, Triple};
use crate::domain::vocab::{ACL, ACL_ACCESS_TO, ACL_AGENT, ACL_DEFAULT, ACL_MODE};

/// Base used when a document is parsed without knowing its own location.
/// Fragment identifiers resolve against it and become rule anchors.
pub const DOCUMENT_BASE: &str = "urn:podshare:authorization-document";

const ACL_PREFIX_DIRECTIVE: &str = "@prefix acl: <http://www.w3.org/ns/auth/acl#>.";
const FOAF_PREFIX_DIRECTIVE: &str = "@prefix foaf: <http://xmlns.com/foaf/0.1/>.";

// ============================================================================
// Access modes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessMode {
    Read,
    Write,
    Append,
    Control,
}

impl AccessMode {
    pub const ALL: [AccessMode; 4] = [
        AccessMode::Read,
        AccessMode::Write,
        AccessMode::Append,
        AccessMode::Control,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Read => "Read",
            AccessMode::Write => "Write",
            AccessMode::Append => "Append",
            AccessMode::Control => "Control",
        }
    }

    pub fn iri(&self) -> String {
        format!("{}{}", ACL, self.as_str())
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        iri.strip_prefix(ACL)?.parse().ok()
    }

    /// Whether holding `self` is sufficient for an operation needing `required`.
    /// Write covers Append.
    pub fn grants(&self, required: AccessMode) -> bool {
        *self == required || (*self == AccessMode::Write && required == AccessMode::Append)
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = PodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name.strip_prefix("acl:").unwrap_or(name);
        AccessMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| PodError::InvalidInput(format!("unknown access mode '{}'", s)))
    }
}

/// Parse a comma-separated mode list such as `"Read,Write"`. Duplicates are
/// dropped; an empty list is rejected.
pub fn parse_modes(list: &str) -> Result<Vec<AccessMode>, PodError> {
    let mut modes = Vec::new();
    for part in list.split(',').filter(|part| !part.trim().is_empty()) {
        let mode: AccessMode = part.parse()?;
        if !modes.contains(&mode) {
            modes.push(mode);
        }
    }
    if modes.is_empty() {
        return Err(PodError::InvalidInput(
            "at least one access mode is required".to_string(),
        ));
    }
    Ok(modes)
}

// ============================================================================
// Rules
// ============================================================================

/// Deterministic rule identifier for an agent: `agent-` followed by the agent
/// identifier with every non-alphanumeric character replaced by `_`.
///
/// Distinct identifiers that differ only in replaced characters share an id.
pub fn rule_id(agent: &str) -> String {
    let normalized: String = agent
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("agent-{}", normalized)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRule {
    pub rule_id: String,
    pub agent: String,
    pub resource: String,
    pub modes: Vec<AccessMode>,
}

impl AuthorizationRule {
    pub fn for_agent(agent: &str, resource: &str, modes: &[AccessMode]) -> Self {
        let mut unique = Vec::with_capacity(modes.len());
        for mode in modes {
            if !unique.contains(mode) {
                unique.push(*mode);
            }
        }
        Self {
            rule_id: rule_id(agent),
            agent: agent.to_string(),
            resource: resource.to_string(),
            modes: unique,
        }
    }

    /// Render the rule as a standalone block using the `acl:` prefix. Fails
    /// when the agent or resource cannot be written as an IRI reference.
    pub fn to_block(&self) -> Result<String, PodError> {
        check_iri("agent", &self.agent)?;
        check_iri("resource", &self.resource)?;
        let modes = self
            .modes
            .iter()
            .map(|mode| format!("acl:{}", mode))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!(
            "<#{}>\n    a acl:Authorization;\n    acl:agent <{}>;\n    acl:accessTo <{}>;\n    acl:mode {}.",
            self.rule_id, self.agent, self.resource, modes
        ))
    }
}

// ============================================================================
// Structured document
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBlock {
    /// Fragment of the block's subject when it is local to the document.
    pub anchor: Option<String>,
    pub text: String,
    pub rules: Vec<AuthorizationRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Directive(String),
    Block(RuleBlock),
}

/// An authorization document as an ordered list of directives and blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationDocument {
    entries: Vec<Entry>,
}

impl Default for AuthorizationDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorizationDocument {
    /// A fresh document holding only the namespace preamble.
    pub fn new() -> Self {
        Self {
            entries: vec![
                Entry::Directive(ACL_PREFIX_DIRECTIVE.to_string()),
                Entry::Directive(FOAF_PREFIX_DIRECTIVE.to_string()),
            ],
        }
    }

    pub fn parse(document: &str) -> Result<Self, turtle::TurtleError> {
        Self::parse_at(document, DOCUMENT_BASE)
    }

    /// Parse the document stored at `document_url`. Relative IRIs resolve
    /// against it unless an `@base` directive says otherwise; a block is
    /// anchored when its subject is a fragment of either.
    pub fn parse_at(document: &str, document_url: &str) -> Result<Self, turtle::TurtleError> {
        let mut entries = Vec::new();
        for statement in turtle::statements(document, document_url)? {
            let text = document[statement.span.clone()].to_string();
            let documents = [statement.base.as_str(), document_url];
            match statement.kind {
                StatementKind::Directive => entries.push(Entry::Directive(text)),
                StatementKind::Triples { subject } => {
                    let anchor = local_anchor(&subject, &documents);
                    let rules = rules_from_triples(&statement.triples, |subject| {
                        local_anchor(subject, &documents)
                    });
                    entries.push(Entry::Block(RuleBlock {
                        anchor,
                        text,
                        rules,
                    }));
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn blocks(&self) -> impl Iterator<Item = &RuleBlock> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Block(block) => Some(block),
            Entry::Directive(_) => None,
        })
    }

    pub fn rules(&self) -> Vec<AuthorizationRule> {
        self.blocks()
            .flat_map(|block| block.rules.iter().cloned())
            .collect()
    }

    fn declares_acl_prefix(&self) -> bool {
        self.entries.iter().any(|entry| match entry {
            Entry::Directive(text) => {
                let compact: String = text.split_whitespace().collect();
                compact.contains(&format!("acl:<{}>", ACL))
            }
            Entry::Block(_) => false,
        })
    }

    /// Append a block for `rule`. Existing blocks are never touched, and a
    /// missing `acl:` prefix declaration is added to the preamble.
    pub fn push_rule(&mut self, rule: &AuthorizationRule) -> Result<(), PodError> {
        let text = rule.to_block()?;
        if !self.declares_acl_prefix() {
            self.entries
                .insert(0, Entry::Directive(ACL_PREFIX_DIRECTIVE.to_string()));
        }
        self.entries.push(Entry::Block(RuleBlock {
            anchor: Some(rule.rule_id.clone()),
            text,
            rules: vec![rule.clone()],
        }));
        Ok(())
    }

    /// Remove every block anchored at the agent's rule id. Returns how many
    /// blocks were removed.
    pub fn remove_agent(&mut self, agent: &str) -> usize {
        let target = rule_id(agent);
        let before = self.entries.len();
        self.entries.retain(|entry| match entry {
            Entry::Block(block) => block.anchor.as_deref() != Some(target.as_str()),
            Entry::Directive(_) => true,
        });
        before - self.entries.len()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut previous_was_directive = None;
        for entry in &self.entries {
            let (text, is_directive) = match entry {
                Entry::Directive(text) => (text.as_str(), true),
                Entry::Block(block) => (block.text.as_str(), false),
            };
            match previous_was_directive {
                None => {}
                Some(true) if is_directive => out.push('\n'),
                Some(_) => out.push_str("\n\n"),
            }
            out.push_str(text);
            previous_was_directive = Some(is_directive);
        }
        out.push('\n');
        out
    }
}

/// Fragment of `subject` when it names a node inside one of `documents`.
fn local_anchor(subject: &Term, documents: &[&str]) -> Option<String> {
    let (document, fragment) = subject.as_iri()?.split_once('#')?;
    documents
        .iter()
        .any(|candidate| strip_fragment(candidate) == document)
        .then(|| fragment.to_string())
}

fn rules_from_triples(
    triples: &[Triple],
    anchor_of: impl Fn(&Term) -> Option<String>,
) -> Vec<AuthorizationRule> {
    let mut by_subject: HashMap<&Term, (Vec<&str>, Vec<&str>, Vec<AccessMode>)> = HashMap::new();
    let mut order = Vec::new();
    for triple in triples {
        let slot = by_subject.entry(&triple.subject).or_insert_with(|| {
            order.push(&triple.subject);
            (Vec::new(), Vec::new(), Vec::new())
        });
        match (triple.predicate.as_str(), &triple.object) {
            (ACL_AGENT, Term::Iri(agent)) => slot.0.push(agent.as_str()),
            (ACL_ACCESS_TO, Term::Iri(resource)) => slot.1.push(resource.as_str()),
            (ACL_DEFAULT, Term::Iri(resource)) => slot.1.push(resource.as_str()),
            (ACL_MODE, Term::Iri(mode)) => {
                if let Some(mode) = AccessMode::from_iri(mode) {
                    if !slot.2.contains(&mode) {
                        slot.2.push(mode);
                    }
                }
            }
            _ => {}
        }
    }

    let mut rules = Vec::new();
    for subject in order {
        let Some((agents, resources, modes)) = by_subject.get(subject) else {
            continue;
        };
        let Some(resource) = resources.first() else {
            continue;
        };
        for agent in agents {
            rules.push(AuthorizationRule {
                rule_id: anchor_of(subject).unwrap_or_else(|| subject.value().to_string()),
                agent: agent.to_string(),
                resource: resource.to_string(),
                modes: modes.clone(),
            });
        }
    }
    rules
}

// ============================================================================
// Text-level operations
// ============================================================================

/// Every agent rule in `document`. Best effort: malformed statements are
/// skipped and an unparsable document yields no rules.
pub fn parse_rules(document: &str) -> Vec<AuthorizationRule> {
    parse_rules_at(document, DOCUMENT_BASE)
}

/// [`parse_rules`] for a document stored at `document_url`.
pub fn parse_rules_at(document: &str, document_url: &str) -> Vec<AuthorizationRule> {
    if let Ok(parsed) = AuthorizationDocument::parse_at(document, document_url) {
        return parsed.rules();
    }
    let (triples, _) = turtle::parse_lenient(document, document_url);
    rules_from_triples(&triples, |subject| local_anchor(subject, &[document_url]))
}

/// Append a block for `rule`, creating the preamble when `document` is empty.
/// Existing blocks are kept verbatim; granting the same agent twice yields two
/// blocks. Fails only when the rule itself cannot be rendered.
pub fn add_rule(document: &str, rule: &AuthorizationRule) -> Result<String, PodError> {
    if document.trim().is_empty() {
        let mut fresh = AuthorizationDocument::new();
        fresh.push_rule(rule)?;
        return Ok(fresh.render());
    }
    match AuthorizationDocument::parse(document) {
        Ok(mut parsed) => {
            parsed.push_rule(rule)?;
            Ok(parsed.render())
        }
        Err(_) => {
            let block = rule.to_block()?;
            let mut out = document.to_string();
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&block);
            out.push('\n');
            Ok(out)
        }
    }
}

/// Remove every block whose id matches `agent`'s rule id. Returns the input
/// unchanged when nothing matches or the document cannot be parsed.
pub fn remove_rule(document: &str, agent: &str) -> String {
    remove_rule_at(document, DOCUMENT_BASE, agent)
}

/// [`remove_rule`] for a document stored at `document_url`, so that blocks
/// naming their subject with the document's absolute location match too.
pub fn remove_rule_at(document: &str, document_url: &str, agent: &str) -> String {
    let Ok(mut parsed) = AuthorizationDocument::parse_at(document, document_url) else {
        return document.to_string();
    };
    if parsed.remove_agent(agent) == 0 {
        return document.to_string();
    }
    parsed.render()
}

/// Authorization document for a freshly created inbox: the owner keeps full
/// control and any authenticated agent may append notifications.
pub fn inbox_acl(inbox_url: &str, owner: &str) -> String {
    format!(
        "{ACL_PREFIX_DIRECTIVE}\n{FOAF_PREFIX_DIRECTIVE}\n\n\
<#owner>\n    a acl:Authorization;\n    acl:agent <{owner}>;\n    acl:accessTo <{inbox_url}>;\n    acl:default <{inbox_url}>;\n    acl:mode acl:Read, acl:Write, acl:Control.\n\n\
<#authenticated-append>\n    a acl:Authorization;\n    acl:agentClass acl:AuthenticatedAgent;\n    acl:accessTo <{inbox_url}>;\n    acl:default <{inbox_url}>;\n    acl:mode acl:Append.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "http://localhost:3000/alpha/profile/card#me";
    const BETA: &str = "http://localhost:3000/beta/profile/card#me";
    const GAMMA: &str = "http://localhost:3000/gamma/profile/card#me";
    const RESOURCE: &str = "http://localhost:3000/alpha/shared/data.ttl";

    fn owner_document() -> String {
        format!(
            "@prefix acl: <http://www.w3.org/ns/auth/acl#>.\n@prefix foaf: <http://xmlns.com/foaf/0.1/>.\n\n\
<#owner>\n    a acl:Authorization;\n    acl:agent <{OWNER}>;\n    acl:accessTo <{RESOURCE}>;\n    acl:mode acl:Read, acl:Write, acl:Control.\n"
        )
    }

    #[test]
    fn test_rule_id_normalization() {
        assert_eq!(
            rule_id("http://localhost:3000/beta/profile/card#me"),
            "agent-http___localhost_3000_beta_profile_card_me"
        );
        assert_eq!(rule_id("a-b"), rule_id("a.b"));
    }

    #[test]
    fn test_access_mode_parsing() {
        assert_eq!("read".parse::<AccessMode>().unwrap(), AccessMode::Read);
        assert_eq!("acl:Control".parse::<AccessMode>().unwrap(), AccessMode::Control);
        assert!("Delete".parse::<AccessMode>().is_err());
        assert_eq!(
            parse_modes("Read, write,READ").unwrap(),
            vec![AccessMode::Read, AccessMode::Write]
        );
        assert!(parse_modes(" , ").is_err());
        assert!(AccessMode::Write.grants(AccessMode::Append));
        assert!(!AccessMode::Append.grants(AccessMode::Write));
    }

    #[test]
    fn test_parse_owner_document() {
        let rules = parse_rules(&owner_document());
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].rule_id, "owner");
        assert_eq!(rules[0].agent, OWNER);
        assert_eq!(rules[0].resource, RESOURCE);
        assert_eq!(
            rules[0].modes,
            vec![AccessMode::Read, AccessMode::Write, AccessMode::Control]
        );
    }

    #[test]
    fn test_parse_garbage_yields_nothing() {
        assert!(parse_rules("this is { not turtle").is_empty());
        assert!(parse_rules("").is_empty());
    }

    #[test]
    fn test_add_rule_to_empty_document_synthesizes_preamble() {
        let rule = AuthorizationRule::for_agent(BETA, RESOURCE, &[AccessMode::Read]);
        let document = add_rule("", &rule).unwrap();
        assert!(document.starts_with(ACL_PREFIX_DIRECTIVE));
        assert!(document.contains(FOAF_PREFIX_DIRECTIVE));
        assert!(document.contains(&format!("<#{}>", rule.rule_id)));
        assert_eq!(parse_rules(&document), vec![rule]);
    }

    #[test]
    fn test_add_rule_keeps_existing_blocks_verbatim() {
        let original = owner_document();
        let rule = AuthorizationRule::for_agent(BETA, RESOURCE, &[AccessMode::Read, AccessMode::Write]);
        let document = add_rule(&original, &rule).unwrap();

        assert!(document.starts_with(original.trim_end()));
        let rules = parse_rules(&document);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].rule_id, "owner");
        assert_eq!(rules[1], rule);
        assert!(document.contains("acl:mode acl:Read, acl:Write."));
    }

    #[test]
    fn test_add_rule_adds_missing_acl_prefix() {
        let document = format!(
            "<#owner> <http://www.w3.org/ns/auth/acl#agent> <{OWNER}>;\n    <http://www.w3.org/ns/auth/acl#accessTo> <{RESOURCE}>;\n    <http://www.w3.org/ns/auth/acl#mode> <http://www.w3.org/ns/auth/acl#Control>.\n"
        );
        let rule = AuthorizationRule::for_agent(BETA, RESOURCE, &[AccessMode::Read]);
        let updated = add_rule(&document, &rule).unwrap();
        assert!(updated.starts_with(ACL_PREFIX_DIRECTIVE));
        assert_eq!(parse_rules(&updated).len(), 2);
    }

    #[test]
    fn test_add_rule_to_unparsable_document_appends_text() {
        let broken = "@prefix acl: <http://www.w3.org/ns/auth/acl#>.\n<#x> acl:agent";
        let rule = AuthorizationRule::for_agent(BETA, RESOURCE, &[AccessMode::Read]);
        let updated = add_rule(broken, &rule).unwrap();
        assert!(updated.starts_with(broken));
        assert!(updated.ends_with(&format!("{}\n", rule.to_block().unwrap())));
    }

    #[test]
    fn test_repeated_grants_then_single_revoke_clears_all() {
        let rule = AuthorizationRule::for_agent(BETA, RESOURCE, &[AccessMode::Read]);
        let mut document = owner_document();
        for _ in 0..3 {
            document = add_rule(&document, &rule).unwrap();
        }
        assert_eq!(
            parse_rules(&document)
                .iter()
                .filter(|r| r.agent == BETA)
                .count(),
            3
        );

        let revoked = remove_rule(&document, BETA);
        let rules = parse_rules(&revoked);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].rule_id, "owner");
    }

    #[test]
    fn test_remove_preserves_order_of_survivors() {
        let mut document = owner_document();
        document = add_rule(&document, &AuthorizationRule::for_agent(BETA, RESOURCE, &[AccessMode::Read])).unwrap();
        document = add_rule(&document, &AuthorizationRule::for_agent(GAMMA, RESOURCE, &[AccessMode::Write])).unwrap();
        let revoked = remove_rule(&document, BETA);
        let agents: Vec<String> = parse_rules(&revoked).into_iter().map(|r| r.agent).collect();
        assert_eq!(agents, vec![OWNER.to_string(), GAMMA.to_string()]);
    }

    #[test]
    fn test_remove_without_match_returns_input() {
        let original = owner_document();
        assert_eq!(remove_rule(&original, GAMMA), original);
        assert_eq!(remove_rule("not { turtle", GAMMA), "not { turtle");
    }

    #[test]
    fn test_owner_block_survives_revoke_of_owner_agent_id() {
        // the owner block is anchored at #owner, not at the owner's derived id
        let original = owner_document();
        assert_eq!(remove_rule(&original, OWNER), original);
    }

    #[test]
    fn test_agent_that_breaks_out_of_iri_is_rejected() {
        let agent = "http://evil.test/a>; acl:accessTo <http://localhost:3000/alpha/shared/data.ttl>; acl:mode acl:Read. <#pwn> a acl:Authorization; acl:agent <http://evil.test/b>; acl:accessTo <http://localhost:3000/alpha/shared/data.ttl>; acl:mode acl:Control. <#z> acl:agent <http://evil.test/c";
        let rule = AuthorizationRule::for_agent(agent, RESOURCE, &[AccessMode::Read]);
        let original = owner_document();

        assert!(matches!(add_rule(&original, &rule), Err(PodError::InvalidInput(_))));
        assert!(matches!(add_rule("", &rule), Err(PodError::InvalidInput(_))));
        assert!(matches!(add_rule("not { turtle", &rule), Err(PodError::InvalidInput(_))));

        let spaced = AuthorizationRule::for_agent("http://evil.test/a b", RESOURCE, &[AccessMode::Read]);
        assert!(spaced.to_block().is_err());
        let bad_resource = AuthorizationRule::for_agent(BETA, "http://x/>", &[AccessMode::Read]);
        assert!(bad_resource.to_block().is_err());
    }

    #[test]
    fn test_revoke_matches_absolute_subject_of_stored_document() {
        let acl_url = format!("{RESOURCE}.acl");
        let document = format!(
            "{}\n<{acl_url}#{}>\n    a acl:Authorization;\n    acl:agent <{BETA}>;\n    acl:accessTo <{RESOURCE}>;\n    acl:mode acl:Read.\n",
            owner_document(),
            rule_id(BETA)
        );
        let before = parse_rules_at(&document, &acl_url);
        assert_eq!(before[1].rule_id, rule_id(BETA));

        let revoked = remove_rule_at(&document, &acl_url, BETA);
        assert_ne!(revoked, document);
        let agents: Vec<String> = parse_rules_at(&revoked, &acl_url)
            .into_iter()
            .map(|rule| rule.agent)
            .collect();
        assert_eq!(agents, vec![OWNER.to_string()]);
    }

    #[test]
    fn test_revoke_matches_blocks_under_base_directive() {
        let acl_url = format!("{RESOURCE}.acl");
        let rule = AuthorizationRule::for_agent(BETA, RESOURCE, &[AccessMode::Read]);
        let document = format!("@base <{acl_url}>.\n{}", owner_document());
        let granted = add_rule(&document, &rule).unwrap();
        assert_eq!(parse_rules(&granted)[1].rule_id, rule.rule_id);

        for revoked in [remove_rule(&granted, BETA), remove_rule_at(&granted, &acl_url, BETA)] {
            assert_ne!(revoked, granted);
            assert!(parse_rules(&revoked).iter().all(|r| r.agent != BETA));
        }
    }

    #[test]
    fn test_lenient_rules_anchor_against_document_url() {
        let acl_url = format!("{RESOURCE}.acl");
        let document = format!("{}\n<#broken> acl:agent .\n", owner_document());
        let rules = parse_rules_at(&document, &acl_url);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].rule_id, "owner");
    }

    #[test]
    fn test_inbox_acl_parses() {
        let inbox = "http://localhost:3000/alpha/inbox/";
        let document = inbox_acl(inbox, OWNER);
        let rules = parse_rules(&document);
        // the authenticated-agent block has no acl:agent and is not an agent rule
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].agent, OWNER);
        assert_eq!(rules[0].resource, inbox);
        assert!(turtle::parse(&document, inbox).is_ok());
    }
}
