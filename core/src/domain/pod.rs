// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Pod HTTP Port
//!
//! Boundary between the sharing protocol and the storage server. Every
//! service in the application layer talks to the store through
//! [`PodClient`]; the identity attached to requests belongs to the client
//! implementation, never to the services.
//!
//! # Architecture
//!
//! - **Layer:** Domain
//! - **Purpose:** Define the request/response contract for the document store
//! - **Implementations:** `ReqwestPodClient` (network), `MemoryPod` (tests)

use async_trait::async_trait;
use std::fmt;

use crate::domain::error::PodError;

pub const TEXT_TURTLE: &str = "text/turtle";
pub const SPARQL_UPDATE: &str = "application/sparql-update";

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_IF_NONE_MATCH: &str = "If-None-Match";
pub const HEADER_SLUG: &str = "Slug";
pub const HEADER_LINK: &str = "Link";
pub const HEADER_LOCATION: &str = "Location";
pub const HEADER_ACCEPT: &str = "Accept";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Put,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl PodRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new(Method::Head, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a text body with its content type.
    pub fn body(mut self, content_type: &str, body: impl Into<String>) -> Self {
        self.headers
            .push((HEADER_CONTENT_TYPE.to_string(), content_type.to_string()));
        self.body = Some(body.into());
        self
    }

    /// Case-insensitive request header lookup.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodResponse {
    pub status: u16,
    /// Header names are stored lower-cased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl PodResponse {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: String) -> Self {
        Self {
            status,
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of a header, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value of a repeatable header such as `Link`.
    pub fn header_values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .filter(move |(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.header(HEADER_LOCATION)
    }

    /// Targets of every `Link` entry carrying `rel`, across all `Link` headers.
    pub fn links(&self, rel: &str) -> Vec<String> {
        self.header_values(HEADER_LINK)
            .flat_map(|value| link_targets(value, rel))
            .collect()
    }
}

/// Authenticated access to the document store.
///
/// Implementations attach the agent's proof of identity and return every
/// response, successful or not; interpreting statuses is left to the caller.
/// Only transport failures become errors here.
#[async_trait]
pub trait PodClient: Send + Sync {
    async fn execute(&self, request: PodRequest) -> Result<PodResponse, PodError>;
}

/// Parse an RFC 8288 `Link` header value and return the target of every link
/// whose `rel` parameter contains `rel`.
///
/// ```
/// use podshare_core::domain::pod::link_targets;
///
/// let header = r#"<data.ttl.acl>; rel="acl", <http://www.w3.org/ns/ldp#Resource>; rel="type""#;
/// assert_eq!(link_targets(header, "acl"), vec!["data.ttl.acl".to_string()]);
/// ```
pub fn link_targets(header: &str, rel: &str) -> Vec<String> {
    let mut targets = Vec::new();
    let mut rest = header;

    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let target = &rest[open + 1..open + close];
        rest = &rest[open + close + 1..];

        // Parameters run until the next link, which starts after a ',' outside quotes.
        let mut in_quotes = false;
        let mut end = rest.len();
        for (index, c) in rest.char_indices() {
            match c {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => {
                    end = index;
                    break;
                }
                _ => {}
            }
        }
        let params = &rest[..end];
        rest = &rest[end..];

        let matches = params.split(';').any(|param| {
            let Some((name, value)) = param.split_once('=') else {
                return false;
            };
            name.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|candidate| candidate.eq_ignore_ascii_case(rel))
        });
        if matches {
            targets.push(target.to_string());
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_targets_multiple_links() {
        let header = r#"<http://www.w3.org/ns/ldp#Resource>; rel="type", <http://pod/r.acl>; rel="acl""#;
        assert_eq!(link_targets(header, "acl"), vec!["http://pod/r.acl"]);
        assert_eq!(
            link_targets(header, "type"),
            vec!["http://www.w3.org/ns/ldp#Resource"]
        );
    }

    #[test]
    fn test_link_targets_unquoted_and_rel_lists() {
        assert_eq!(link_targets("<a.acl>; rel=acl", "acl"), vec!["a.acl"]);
        assert_eq!(
            link_targets(r#"<meta>; rel="describedby acl""#, "acl"),
            vec!["meta"]
        );
        assert!(link_targets(r#"<x>; rel="aclx""#, "acl").is_empty());
        assert!(link_targets("", "acl").is_empty());
    }

    #[test]
    fn test_link_targets_comma_inside_quotes() {
        let header = r#"<a>; title="x, y"; rel="acl", <b>; rel="type""#;
        assert_eq!(link_targets(header, "acl"), vec!["a"]);
    }

    #[test]
    fn test_response_headers_are_case_insensitive() {
        let response = PodResponse::new(
            201,
            vec![
                ("Location".to_string(), "http://pod/inbox/n1".to_string()),
                ("Link".to_string(), r#"<n1.acl>; rel="acl""#.to_string()),
            ],
            String::new(),
        );
        assert!(response.is_success());
        assert_eq!(response.location(), Some("http://pod/inbox/n1"));
        assert_eq!(response.header("LINK"), Some(r#"<n1.acl>; rel="acl""#));
        assert_eq!(response.links("acl"), vec!["n1.acl"]);
    }

    #[test]
    fn test_request_builder() {
        let request = PodRequest::put("http://pod/doc")
            .header(HEADER_IF_NONE_MATCH, "*")
            .body(TEXT_TURTLE, "<> a <x>.");
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.header_value("if-none-match"), Some("*"));
        assert_eq!(request.header_value("content-type"), Some(TEXT_TURTLE));
        assert_eq!(request.body.as_deref(), Some("<> a <x>."));
    }
}
