// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Vocabulary IRIs used by the sharing protocol documents.

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";

pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

/// Web Access Control
pub const ACL: &str = "http://www.w3.org/ns/auth/acl#";
pub const ACL_AUTHORIZATION: &str = "http://www.w3.org/ns/auth/acl#Authorization";
pub const ACL_AGENT: &str = "http://www.w3.org/ns/auth/acl#agent";
pub const ACL_AGENT_CLASS: &str = "http://www.w3.org/ns/auth/acl#agentClass";
pub const ACL_ACCESS_TO: &str = "http://www.w3.org/ns/auth/acl#accessTo";
pub const ACL_DEFAULT: &str = "http://www.w3.org/ns/auth/acl#default";
pub const ACL_MODE: &str = "http://www.w3.org/ns/auth/acl#mode";
pub const ACL_AUTHENTICATED_AGENT: &str = "http://www.w3.org/ns/auth/acl#AuthenticatedAgent";

pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
pub const FOAF_NAME: &str = "http://xmlns.com/foaf/0.1/name";
pub const FOAF_AGENT: &str = "http://xmlns.com/foaf/0.1/Agent";

pub const SOLID: &str = "http://www.w3.org/ns/solid/terms#";
pub const SOLID_ACCOUNT: &str = "http://www.w3.org/ns/solid/terms#account";
pub const SOLID_ACCESS_MODES: &str = "http://www.w3.org/ns/solid/terms#accessModes";

/// ActivityStreams 2.0
pub const AS: &str = "https://www.w3.org/ns/activitystreams#";
pub const AS_ANNOUNCE: &str = "https://www.w3.org/ns/activitystreams#Announce";
pub const AS_ACTOR: &str = "https://www.w3.org/ns/activitystreams#actor";
pub const AS_TARGET: &str = "https://www.w3.org/ns/activitystreams#target";
pub const AS_OBJECT: &str = "https://www.w3.org/ns/activitystreams#object";
pub const AS_SUMMARY: &str = "https://www.w3.org/ns/activitystreams#summary";
pub const AS_PUBLISHED: &str = "https://www.w3.org/ns/activitystreams#published";

/// Linked Data Platform
pub const LDP_CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";
pub const LDP_BASIC_CONTAINER: &str = "http://www.w3.org/ns/ldp#BasicContainer";

/// Agent registry vocabulary used by the shared directory document.
pub const REGISTRY: &str = "https://vocab.interition.org/agents#";
pub const REGISTRY_AGENT: &str = "https://vocab.interition.org/agents#Agent";
pub const REGISTRY_CAPABILITY: &str = "https://vocab.interition.org/agents#capability";
