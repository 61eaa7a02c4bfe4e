// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Sharing notifications: the announcement template written into inboxes and
//! the reader that turns a stored announcement back into a value.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::acl::AccessMode;
use crate::domain::error::PodError;
use crate::domain::turtle::{self, check_iri, Term};
use crate::domain::vocab::{
    AS_ACTOR, AS_OBJECT, AS_PUBLISHED, AS_SUMMARY, AS_TARGET, SOLID_ACCESS_MODES,
};

/// A sharing announcement read back from an inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharingNotification {
    /// Location of the notification resource, as assigned by the store.
    pub id: String,
    pub actor: String,
    pub target: String,
    pub resource_url: String,
    pub modes: Vec<AccessMode>,
    /// `as:published` as written by the sender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    /// `published` when it is an RFC 3339 timestamp
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl SharingNotification {
    /// Parse a stored announcement. Returns `None` when the document does not
    /// parse or lacks an actor or object.
    pub fn from_turtle(document: &str, url: &str) -> Option<Self> {
        let triples = turtle::parse(document, url).ok()?;

        let mut actor = None;
        let mut target = None;
        let mut resource_url = None;
        let mut published = None;
        let mut summary = None;
        let mut modes = Vec::new();

        for triple in &triples {
            let value = triple.object.value();
            match triple.predicate.as_str() {
                AS_ACTOR => actor = Some(value.to_string()),
                AS_TARGET => target = Some(value.to_string()),
                AS_OBJECT => resource_url = Some(value.to_string()),
                AS_SUMMARY => summary = Some(value.to_string()),
                AS_PUBLISHED => published = Some(value.to_string()),
                SOLID_ACCESS_MODES => {
                    let name = match &triple.object {
                        Term::Iri(iri) => AccessMode::from_iri(iri),
                        _ => value.parse().ok(),
                    };
                    if let Some(mode) = name {
                        if !modes.contains(&mode) {
                            modes.push(mode);
                        }
                    }
                }
                _ => {}
            }
        }

        let actor = actor.filter(|actor| !actor.is_empty())?;
        let published_at = published
            .as_deref()
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|timestamp| timestamp.with_timezone(&Utc));
        let resource_url = resource_url.filter(|resource| !resource.is_empty())?;

        Some(Self {
            id: url.to_string(),
            actor,
            target: target.unwrap_or_default(),
            resource_url,
            modes,
            published,
            published_at,
            summary: summary.filter(|summary| !summary.is_empty()),
        })
    }

    /// Sort oldest first. Notifications without a timestamp go last and keep
    /// their relative order.
    pub fn sort_chronologically(notifications: &mut [SharingNotification]) {
        notifications.sort_by(|a, b| match (a.published_at, b.published_at) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }
}

/// Announcement document for a new share. Fails when one of the identifiers
/// cannot be written as an IRI reference.
pub fn announcement(
    sender: &str,
    recipient: &str,
    resource_url: &str,
    modes: &[AccessMode],
    published_at: DateTime<Utc>,
) -> Result<String, PodError> {
    check_iri("sender", sender)?;
    check_iri("recipient", recipient)?;
    check_iri("resource", resource_url)?;
    let mode_list = modes
        .iter()
        .map(|mode| format!("\"{}\"", mode))
        .collect::<Vec<_>>()
        .join(", ");
    let summary = escape_literal(&format!("Resource shared: {}", resource_url));
    let published = published_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut body = format!(
        "@prefix as: <https://www.w3.org/ns/activitystreams#>.\n\
@prefix solid: <http://www.w3.org/ns/solid/terms#>.\n\
\n\
<> a as:Announce;\n    as:actor <{sender}>;\n    as:target <{recipient}>;\n    as:object <{resource_url}>;\n    as:summary \"{summary}\";\n    as:published \"{published}\"^^<http://www.w3.org/2001/XMLSchema#dateTime>"
    );
    if !mode_list.is_empty() {
        body.push_str(&format!(";\n    solid:accessModes {}", mode_list));
    }
    body.push_str(".\n");
    Ok(body)
}

/// Escape a value for use inside a double-quoted Turtle literal.
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ALPHA: &str = "http://localhost:3000/alpha/profile/card#me";
    const BETA: &str = "http://localhost:3000/beta/profile/card#me";
    const RESOURCE: &str = "http://localhost:3000/alpha/shared/data.ttl";
    const LOCATION: &str = "http://localhost:3000/beta/inbox/notification-1";

    #[test]
    fn test_announcement_round_trip() {
        let published = Utc.with_ymd_and_hms(2026, 2, 21, 10, 30, 0).unwrap();
        let body = announcement(
            ALPHA,
            BETA,
            RESOURCE,
            &[AccessMode::Read, AccessMode::Write],
            published,
        )
        .unwrap();
        assert!(body.contains("\"2026-02-21T10:30:00.000Z\"^^<http://www.w3.org/2001/XMLSchema#dateTime>"));

        let notification = SharingNotification::from_turtle(&body, LOCATION).unwrap();
        assert_eq!(notification.id, LOCATION);
        assert_eq!(notification.actor, ALPHA);
        assert_eq!(notification.target, BETA);
        assert_eq!(notification.resource_url, RESOURCE);
        assert_eq!(notification.modes, vec![AccessMode::Read, AccessMode::Write]);
        assert_eq!(notification.published_at, Some(published));
        assert_eq!(
            notification.summary.as_deref(),
            Some(format!("Resource shared: {}", RESOURCE).as_str())
        );
    }

    #[test]
    fn test_missing_actor_is_rejected() {
        let body = format!(
            "@prefix as: <https://www.w3.org/ns/activitystreams#>.\n<> as:object <{RESOURCE}>."
        );
        assert!(SharingNotification::from_turtle(&body, LOCATION).is_none());
        assert!(SharingNotification::from_turtle("garbage {", LOCATION).is_none());
    }

    #[test]
    fn test_missing_timestamp_is_tolerated() {
        let body = format!(
            "@prefix as: <https://www.w3.org/ns/activitystreams#>.\n<> as:actor <{ALPHA}>; as:object <{RESOURCE}>; as:published \"yesterday\"."
        );
        let notification = SharingNotification::from_turtle(&body, LOCATION).unwrap();
        assert_eq!(notification.published_at, None);
        assert_eq!(notification.published.as_deref(), Some("yesterday"));
        assert_eq!(notification.target, "");
        assert!(notification.modes.is_empty());
    }

    #[test]
    fn test_sort_chronologically_puts_undated_last() {
        let at = |hour| Some(Utc.with_ymd_and_hms(2026, 1, 1, hour, 0, 0).unwrap());
        let make = |id: &str, published_at| SharingNotification {
            id: id.to_string(),
            actor: ALPHA.to_string(),
            target: BETA.to_string(),
            resource_url: RESOURCE.to_string(),
            modes: vec![AccessMode::Read],
            published: None,
            published_at,
            summary: None,
        };
        let mut notifications = vec![make("late", at(9)), make("undated", None), make("early", at(8))];
        SharingNotification::sort_chronologically(&mut notifications);
        let ids: Vec<&str> = notifications.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late", "undated"]);
    }

    #[test]
    fn test_date_only_published_value_is_kept() {
        let body = format!(
            "@prefix as: <https://www.w3.org/ns/activitystreams#>.\n\
@prefix xsd: <http://www.w3.org/2001/XMLSchema#>.\n\
<> as:actor <{ALPHA}>; as:object <{RESOURCE}>; as:published \"2026-02-21\"^^xsd:date."
        );
        let notification = SharingNotification::from_turtle(&body, LOCATION).unwrap();
        assert_eq!(notification.published.as_deref(), Some("2026-02-21"));
        assert_eq!(notification.published_at, None);

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["published"], "2026-02-21");
        assert!(json["publishedAt"].is_null());
    }

    #[test]
    fn test_announcement_rejects_identifiers_that_break_iris() {
        let published = Utc.with_ymd_and_hms(2026, 2, 21, 10, 30, 0).unwrap();
        let forged = "http://evil.test/me> ; <https://www.w3.org/ns/activitystreams#actor> <http://localhost:3000/alpha/profile/card#me";
        for (sender, recipient, resource) in [
            (forged, BETA, RESOURCE),
            (ALPHA, forged, RESOURCE),
            (ALPHA, BETA, "http://localhost:3000/alpha/a b.ttl"),
        ] {
            assert!(matches!(
                announcement(sender, recipient, resource, &[AccessMode::Read], published),
                Err(PodError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("a \"b\"\n\\"), "a \\\"b\\\"\\n\\\\");
    }
}
