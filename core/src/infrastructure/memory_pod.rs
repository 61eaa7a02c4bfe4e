// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! In-Memory Pod Server
//!
//! A small stand-in for a Linked-Data storage server, shared by any number of
//! agent-bound clients. It reproduces the parts of the server contract the
//! sharing protocol relies on:
//!
//! - per-resource authorization documents at `<resource>.acl`, advertised via
//!   `Link: <...>; rel="acl"`, with container `acl:default` inheritance
//! - pod owners always hold full control over their pod
//! - `If-None-Match: *` creation (409 for containers, 412 for documents)
//! - POST into containers with a store-assigned `Location`
//! - insert-only `PATCH` with `INSERT DATA { ... }`
//! - container listings with `ldp:contains`
//!
//! Failures can be injected per URL to exercise error paths.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::acl::AccessMode;
use crate::domain::error::PodError;
use crate::domain::pod::{
    Method, PodClient, PodRequest, PodResponse, HEADER_CONTENT_TYPE, HEADER_IF_NONE_MATCH,
    HEADER_LINK, HEADER_LOCATION, HEADER_SLUG, SPARQL_UPDATE, TEXT_TURTLE,
};
use crate::domain::turtle::{self, Term};
use crate::domain::vocab::{
    ACL_ACCESS_TO, ACL_AGENT, ACL_AGENT_CLASS, ACL_AUTHENTICATED_AGENT, ACL_DEFAULT, ACL_MODE,
    FOAF_AGENT,
};

const ACL_SUFFIX: &str = ".acl";

#[derive(Debug, Clone)]
struct StoredResource {
    content_type: String,
    body: String,
}

/// A request as seen by the in-memory server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub agent: Option<String>,
    pub method: Method,
    pub url: String,
}

#[derive(Debug, Default)]
struct PodState {
    resources: BTreeMap<String, StoredResource>,
    /// (pod root, owner WebID)
    owners: Vec<(String, String)>,
    public_prefixes: Vec<String>,
    failures: HashMap<String, u16>,
    method_failures: HashMap<(Method, String), u16>,
    suppress_location: bool,
    sequence: u64,
    requests: Vec<RecordedRequest>,
}

/// Shared server state. Cloning yields another handle to the same server.
#[derive(Debug, Clone, Default)]
pub struct MemoryPod {
    state: Arc<Mutex<PodState>>,
}

impl MemoryPod {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, PodState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create a pod root container owned by `owner`.
    pub fn create_pod(&self, pod_url: &str, owner: &str) {
        let mut state = self.state();
        state.owners.push((pod_url.to_string(), owner.to_string()));
        state.store(pod_url, TEXT_TURTLE, String::new());
    }

    /// Everything under `prefix` is readable by anyone and writable by any
    /// authenticated agent.
    pub fn make_public(&self, prefix: &str) {
        self.state().public_prefixes.push(prefix.to_string());
    }

    /// Store a resource directly, bypassing access control.
    pub fn insert(&self, url: &str, content_type: &str, body: &str) {
        self.state().store(url, content_type, body.to_string());
    }

    pub fn body(&self, url: &str) -> Option<String> {
        self.state()
            .resources
            .get(url)
            .map(|resource| resource.body.clone())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.state().resources.contains_key(url)
    }

    /// Answer every request to `url` with `status`.
    pub fn fail_with(&self, url: &str, status: u16) {
        self.state().failures.insert(url.to_string(), status);
    }

    /// Answer `method` requests to `url` with `status`.
    pub fn fail_method(&self, method: Method, url: &str, status: u16) {
        self.state()
            .method_failures
            .insert((method, url.to_string()), status);
    }

    pub fn clear_failures(&self) {
        let mut state = self.state();
        state.failures.clear();
        state.method_failures.clear();
    }

    /// Omit the `Location` header from POST responses.
    pub fn suppress_location(&self, suppress: bool) {
        self.state().suppress_location = suppress;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    /// A client acting as `agent`; `None` sends unauthenticated requests.
    pub fn client(&self, agent: Option<&str>) -> MemoryPodClient {
        MemoryPodClient {
            pod: self.clone(),
            agent: agent.map(str::to_string),
        }
    }

    pub fn agent(&self, webid: &str) -> Arc<dyn PodClient> {
        Arc::new(self.client(Some(webid)))
    }
}

/// Client bound to one agent identity on a [`MemoryPod`].
#[derive(Debug, Clone)]
pub struct MemoryPodClient {
    pod: MemoryPod,
    agent: Option<String>,
}

#[async_trait]
impl PodClient for MemoryPodClient {
    async fn execute(&self, request: PodRequest) -> Result<PodResponse, PodError> {
        let mut state = self.pod.state();
        state.requests.push(RecordedRequest {
            agent: self.agent.clone(),
            method: request.method,
            url: request.url.clone(),
        });
        Ok(state.handle(self.agent.as_deref(), request))
    }
}

// ============================================================================
// Request handling
// ============================================================================

fn respond(status: u16) -> PodResponse {
    PodResponse::new(status, Vec::new(), String::new())
}

fn respond_with(status: u16, body: &str) -> PodResponse {
    PodResponse::new(status, Vec::new(), body.to_string())
}

fn is_container(url: &str) -> bool {
    url.ends_with('/')
}

fn parent(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    let index = trimmed.rfind('/')?;
    let parent = &trimmed[..=index];
    if parent.ends_with("//") {
        None
    } else {
        Some(parent.to_string())
    }
}

impl PodState {
    fn store(&mut self, url: &str, content_type: &str, body: String) {
        let mut current = parent(url);
        while let Some(container) = current {
            self.resources
                .entry(container.clone())
                .or_insert_with(|| StoredResource {
                    content_type: TEXT_TURTLE.to_string(),
                    body: String::new(),
                });
            current = parent(&container);
        }
        self.resources.insert(
            url.to_string(),
            StoredResource {
                content_type: content_type.to_string(),
                body,
            },
        );
    }

    fn owner_of(&self, url: &str) -> Option<&str> {
        self.owners
            .iter()
            .filter(|(root, _)| url.starts_with(root.as_str()))
            .max_by_key(|(root, _)| root.len())
            .map(|(_, owner)| owner.as_str())
    }

    fn allowed(&self, agent: Option<&str>, url: &str, required: AccessMode) -> bool {
        let (target, required) = match url.strip_suffix(ACL_SUFFIX) {
            Some(governed) => (governed, AccessMode::Control),
            None => (url, required),
        };

        if agent.is_some() && self.owner_of(target) == agent {
            return true;
        }
        if self
            .public_prefixes
            .iter()
            .any(|prefix| target.starts_with(prefix.as_str()))
            && (required == AccessMode::Read
                || (agent.is_some() && required != AccessMode::Control))
        {
            return true;
        }
        self.acl_permits(agent, target, required)
    }

    /// Evaluate the nearest authorization document: the resource's own, else
    /// the closest ancestor container's `acl:default` rules.
    fn acl_permits(&self, agent: Option<&str>, target: &str, required: AccessMode) -> bool {
        let own = format!("{}{}", target, ACL_SUFFIX);
        if let Some(document) = self.resources.get(&own) {
            return authorizations(&document.body, &own)
                .iter()
                .any(|auth| auth.access_to.contains(target) && auth.permits(agent, required));
        }

        let mut current = parent(target);
        while let Some(container) = current {
            let acl = format!("{}{}", container, ACL_SUFFIX);
            if let Some(document) = self.resources.get(&acl) {
                return authorizations(&document.body, &acl).iter().any(|auth| {
                    auth.defaults.contains(container.as_str()) && auth.permits(agent, required)
                });
            }
            current = parent(&container);
        }
        false
    }

    fn denied(&self, agent: Option<&str>) -> PodResponse {
        match agent {
            None => respond_with(401, "Unauthorized"),
            Some(_) => respond_with(403, "Forbidden"),
        }
    }

    fn handle(&mut self, agent: Option<&str>, request: PodRequest) -> PodResponse {
        let url = request.url.clone();
        if let Some(status) = self
            .method_failures
            .get(&(request.method, url.clone()))
            .or_else(|| self.failures.get(&url))
        {
            return respond_with(*status, "injected failure");
        }

        match request.method {
            Method::Get | Method::Head => self.read(agent, &url, request.method == Method::Head),
            Method::Put => self.put(agent, &url, &request),
            Method::Post => self.post(agent, &url, &request),
            Method::Patch => self.patch(agent, &url, &request),
            Method::Delete => self.delete(agent, &url),
        }
    }

    fn read(&self, agent: Option<&str>, url: &str, head: bool) -> PodResponse {
        if !self.allowed(agent, url, AccessMode::Read) {
            return self.denied(agent);
        }
        let Some(resource) = self.resources.get(url) else {
            return respond_with(404, "Not Found");
        };

        let body = if is_container(url) {
            self.listing(url)
        } else {
            resource.body.clone()
        };
        let mut headers = vec![(
            HEADER_CONTENT_TYPE.to_string(),
            resource.content_type.clone(),
        )];
        if !url.ends_with(ACL_SUFFIX) {
            headers.push((
                HEADER_LINK.to_string(),
                format!("<{}{}>; rel=\"acl\"", url, ACL_SUFFIX),
            ));
        }
        PodResponse::new(200, headers, if head { String::new() } else { body })
    }

    fn listing(&self, container: &str) -> String {
        let members: Vec<String> = self
            .resources
            .keys()
            .filter_map(|key| {
                let rest = key.strip_prefix(container)?;
                let direct = !rest.is_empty()
                    && !rest.trim_end_matches('/').contains('/')
                    && !rest.ends_with(ACL_SUFFIX);
                direct.then(|| format!("<{}>", rest))
            })
            .collect();

        let mut body = String::from("@prefix ldp: <http://www.w3.org/ns/ldp#>.\n\n<> a ldp:Container, ldp:BasicContainer");
        if !members.is_empty() {
            body.push_str(";\n    ldp:contains ");
            body.push_str(&members.join(", "));
        }
        body.push_str(".\n");
        body
    }

    fn put(&mut self, agent: Option<&str>, url: &str, request: &PodRequest) -> PodResponse {
        if !self.allowed(agent, url, AccessMode::Write) {
            return self.denied(agent);
        }
        let exists = self.resources.contains_key(url);
        if exists && request.header_value(HEADER_IF_NONE_MATCH) == Some("*") {
            return if is_container(url) {
                respond_with(409, "Container already exists")
            } else {
                respond_with(412, "Precondition Failed")
            };
        }
        if is_container(url) && exists {
            return respond_with(409, "Cannot overwrite a container");
        }

        let content_type = request
            .header_value(HEADER_CONTENT_TYPE)
            .unwrap_or(TEXT_TURTLE)
            .to_string();
        let body = if is_container(url) {
            String::new()
        } else {
            request.body.clone().unwrap_or_default()
        };
        self.store(url, &content_type, body);
        respond(if exists { 205 } else { 201 })
    }

    fn post(&mut self, agent: Option<&str>, url: &str, request: &PodRequest) -> PodResponse {
        if !is_container(url) {
            return respond_with(405, "POST is only supported on containers");
        }
        if !self.allowed(agent, url, AccessMode::Append) {
            return self.denied(agent);
        }
        if !self.resources.contains_key(url) {
            return respond_with(404, "Not Found");
        }

        self.sequence += 1;
        let slug: String = request
            .header_value(HEADER_SLUG)
            .unwrap_or("resource")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            .collect();
        let slug = if slug.is_empty() { "resource".to_string() } else { slug };
        let mut location = format!("{}{}", url, slug);
        if self.resources.contains_key(&location) {
            location = format!("{}{}-{}", url, slug, self.sequence);
        }

        let content_type = request
            .header_value(HEADER_CONTENT_TYPE)
            .unwrap_or(TEXT_TURTLE)
            .to_string();
        self.store(&location, &content_type, request.body.clone().unwrap_or_default());

        let headers = if self.suppress_location {
            Vec::new()
        } else {
            vec![(HEADER_LOCATION.to_string(), location)]
        };
        PodResponse::new(201, headers, String::new())
    }

    fn patch(&mut self, agent: Option<&str>, url: &str, request: &PodRequest) -> PodResponse {
        let exists = self.resources.contains_key(url);
        let required = if exists { AccessMode::Append } else { AccessMode::Write };
        if !self.allowed(agent, url, required) {
            return self.denied(agent);
        }
        if request.header_value(HEADER_CONTENT_TYPE) != Some(SPARQL_UPDATE) {
            return respond_with(415, "Unsupported Media Type");
        }
        let Some(inserted) = request.body.as_deref().and_then(insert_data) else {
            return respond_with(400, "Only INSERT DATA updates are supported");
        };
        if turtle::parse(inserted, url).is_err() {
            return respond_with(400, "Malformed INSERT DATA block");
        }

        let mut body = self
            .resources
            .get(url)
            .map(|resource| resource.body.clone())
            .unwrap_or_default();
        if !body.is_empty() && !body.ends_with('\n') {
            body.push('\n');
        }
        body.push_str(inserted.trim());
        body.push('\n');
        self.store(url, TEXT_TURTLE, body);
        respond(if exists { 205 } else { 201 })
    }

    fn delete(&mut self, agent: Option<&str>, url: &str) -> PodResponse {
        if !self.allowed(agent, url, AccessMode::Write) {
            return self.denied(agent);
        }
        if !self.resources.contains_key(url) {
            return respond_with(404, "Not Found");
        }
        if is_container(url)
            && self
                .resources
                .keys()
                .any(|key| key != url && key.starts_with(url) && !key.ends_with(ACL_SUFFIX))
        {
            return respond_with(409, "Container is not empty");
        }
        self.resources.remove(url);
        self.resources.remove(&format!("{}{}", url, ACL_SUFFIX));
        respond(205)
    }
}

/// Body of an `INSERT DATA { ... }` update.
fn insert_data(update: &str) -> Option<&str> {
    let rest = update.trim().strip_prefix("INSERT DATA")?.trim_start();
    let inner = rest.strip_prefix('{')?.trim_end().strip_suffix('}')?;
    Some(inner)
}

// ============================================================================
// Authorization evaluation
// ============================================================================

#[derive(Debug, Default)]
struct Authorization {
    agents: HashSet<String>,
    classes: HashSet<String>,
    access_to: HashSet<String>,
    defaults: HashSet<String>,
    modes: Vec<AccessMode>,
}

impl Authorization {
    fn permits(&self, agent: Option<&str>, required: AccessMode) -> bool {
        let applies = agent.is_some_and(|agent| self.agents.contains(agent))
            || self.classes.contains(FOAF_AGENT)
            || (agent.is_some() && self.classes.contains(ACL_AUTHENTICATED_AGENT));
        applies && self.modes.iter().any(|mode| mode.grants(required))
    }
}

fn authorizations(document: &str, base: &str) -> Vec<Authorization> {
    let (triples, _) = turtle::parse_lenient(document, base);
    let mut by_subject: HashMap<Term, Authorization> = HashMap::new();
    for triple in triples {
        let Term::Iri(object) = &triple.object else {
            continue;
        };
        let auth = by_subject.entry(triple.subject.clone()).or_default();
        match triple.predicate.as_str() {
            ACL_AGENT => {
                auth.agents.insert(object.clone());
            }
            ACL_AGENT_CLASS => {
                auth.classes.insert(object.clone());
            }
            ACL_ACCESS_TO => {
                auth.access_to.insert(object.clone());
            }
            ACL_DEFAULT => {
                auth.defaults.insert(object.clone());
            }
            ACL_MODE => {
                if let Some(mode) = AccessMode::from_iri(object) {
                    auth.modes.push(mode);
                }
            }
            _ => {}
        }
    }
    by_subject.into_values().collect()
}
