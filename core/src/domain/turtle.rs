// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Turtle Graph Documents
//!
//! Reads the graph documents exchanged with the pod server: authorization
//! documents, container listings, inbox notifications and the agent directory.
//! Parsing is delegated to `oxttl`; this module only splits a document into
//! its top-level statements so the authorization codec can keep blocks as
//! source text, and converts parsed triples into owned terms.
//!
//! Emission never goes through the parser. Documents are written from fixed
//! templates, and every IRI placed into a template passes [`check_iri`] first.
//!
//! # Architecture
//!
//! - **Layer:** Domain
//! - **Purpose:** Statement splitting, triple ingestion, IRI checks
//!
//! Three entry points:
//! - [`parse`] - strict, fails on the first malformed statement
//! - [`parse_lenient`] - skips malformed statements and keeps the rest
//! - [`statements`] - statement-level view with source spans, used to split
//!   authorization documents into rule blocks

use std::ops::Range;

use oxttl::TurtleParser;
use thiserror::Error;
use url::Url;

use crate::domain::error::PodError;
use crate::domain::vocab::XSD_STRING;

/// An RDF term as it appears in subject or object position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    BlankNode(String),
    Literal {
        value: String,
        /// `None` for simple and language-tagged strings
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl Term {
    /// Lexical value: the IRI, the blank node label, or the literal text.
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(value) | Term::BlankNode(value) => value,
            Term::Literal { value, .. } => value,
        }
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl From<oxrdf::Term> for Term {
    fn from(term: oxrdf::Term) -> Self {
        match term {
            oxrdf::Term::NamedNode(node) => Term::Iri(node.into_string()),
            oxrdf::Term::BlankNode(node) => Term::BlankNode(node.as_str().to_string()),
            oxrdf::Term::Literal(literal) => {
                let language = literal.language().map(str::to_string);
                let datatype = literal.datatype().as_str();
                let datatype = (language.is_none() && datatype != XSD_STRING)
                    .then(|| datatype.to_string());
                Term::Literal {
                    value: literal.value().to_string(),
                    datatype,
                    language,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

impl From<oxrdf::Triple> for Triple {
    fn from(triple: oxrdf::Triple) -> Self {
        Self {
            subject: oxrdf::Term::from(triple.subject).into(),
            predicate: triple.predicate.into_string(),
            object: triple.object.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("turtle syntax error in statement at byte {offset}: {message}")]
pub struct TurtleError {
    /// Start of the offending statement
    pub offset: usize,
    pub message: String,
}

impl TurtleError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// `@prefix`, `@base`, `PREFIX` or `BASE`
    Directive,
    /// A subject followed by its predicate-object list
    Triples { subject: Term },
}

/// One top-level statement with the byte range it occupies in the source.
#[derive(Debug, Clone)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Range<usize>,
    /// Base in effect for the statement, after any preceding `@base`.
    pub base: String,
    pub triples: Vec<Triple>,
}

/// Parse a whole document, failing on the first malformed statement.
pub fn parse(input: &str, base: &str) -> Result<Vec<Triple>, TurtleError> {
    Ok(statements(input, base)?
        .into_iter()
        .flat_map(|statement| statement.triples)
        .collect())
}

/// Parse a document statement by statement, skipping any statement that does
/// not parse. Returns the triples of every well-formed statement together with
/// the errors that were skipped.
pub fn parse_lenient(input: &str, base: &str) -> (Vec<Triple>, Vec<TurtleError>) {
    let mut reader = StatementReader::new(base);
    let mut triples = Vec::new();
    let mut errors = Vec::new();
    for span in split_statements(input) {
        match reader.read(input, span) {
            Ok(statement) => triples.extend(statement.triples),
            Err(err) => errors.push(err),
        }
    }
    (triples, errors)
}

/// Split a document into its top-level statements.
pub fn statements(input: &str, base: &str) -> Result<Vec<Statement>, TurtleError> {
    let mut reader = StatementReader::new(base);
    split_statements(input)
        .into_iter()
        .map(|span| reader.read(input, span))
        .collect()
}

/// Resolve an IRI reference against a base IRI.
///
/// Empty and fragment-only references are resolved textually so that they work
/// against any base, including ones `url` cannot use as a base.
pub fn resolve_iri(base: &str, reference: &str) -> String {
    let base_without_fragment = strip_fragment(base);
    if reference.is_empty() {
        return base_without_fragment.to_string();
    }
    if let Some(fragment) = reference.strip_prefix('#') {
        return format!("{}#{}", base_without_fragment, fragment);
    }
    if has_scheme(reference) {
        return reference.to_string();
    }
    match Url::parse(base).and_then(|base| base.join(reference)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => reference.to_string(),
    }
}

pub fn strip_fragment(iri: &str) -> &str {
    iri.split_once('#').map_or(iri, |(document, _)| document)
}

/// Check that `value` is an absolute IRI that can be placed between `<` and
/// `>` in a template as-is.
pub fn check_iri(field: &str, value: &str) -> Result<(), PodError> {
    if let Some(c) = value.chars().find(|c| {
        c.is_whitespace()
            || c.is_control()
            || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
    }) {
        return Err(PodError::InvalidInput(format!(
            "{} '{}' contains '{}', which is not allowed in an IRI",
            field,
            value.escape_debug(),
            c.escape_debug()
        )));
    }
    Url::parse(value).map(|_| ()).map_err(|e| {
        PodError::InvalidInput(format!("{} '{}' is not an absolute URL: {}", field, value, e))
    })
}

fn has_scheme(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// ============================================================================
// Statement reader
// ============================================================================

/// Parses statements one at a time, carrying the directives seen so far so
/// that each statement is read with the prefixes and base in scope for it.
struct StatementReader {
    directives: String,
    base: String,
}

impl StatementReader {
    fn new(base: &str) -> Self {
        Self {
            directives: String::new(),
            base: base.to_string(),
        }
    }

    fn read(&mut self, input: &str, span: Range<usize>) -> Result<Statement, TurtleError> {
        let text = &input[span.clone()];
        let base = self.base.clone();

        if is_directive(text) {
            self.parse(text, span.start)?;
            if let Some(reference) = base_reference(text) {
                self.base = resolve_iri(&self.base, reference);
            }
            self.directives.push_str(text);
            self.directives.push('\n');
            return Ok(Statement {
                kind: StatementKind::Directive,
                span,
                base,
                triples: Vec::new(),
            });
        }

        let triples = self.parse(text, span.start)?;
        let subject = statement_subject(&triples)
            .ok_or_else(|| TurtleError::new(span.start, "statement has no triples"))?;
        Ok(Statement {
            kind: StatementKind::Triples { subject },
            span,
            base,
            triples,
        })
    }

    fn parse(&self, text: &str, offset: usize) -> Result<Vec<Triple>, TurtleError> {
        let source = format!("{}{}", self.directives, text);
        // Resolution of relative IRIs follows any @base in `directives`.
        let parser = TurtleParser::new()
            .with_base_iri(strip_fragment(&self.base))
            .map_err(|e| TurtleError::new(offset, format!("invalid base '{}': {}", self.base, e)))?;
        parser
            .for_slice(source.as_bytes())
            .map(|triple| {
                triple
                    .map(Triple::from)
                    .map_err(|e| TurtleError::new(offset, e.to_string()))
            })
            .collect()
    }
}

/// The term a statement is about: the first subject that is not itself the
/// object of a nested triple.
fn statement_subject(triples: &[Triple]) -> Option<Term> {
    triples
        .iter()
        .map(|triple| &triple.subject)
        .find(|subject| !triples.iter().any(|triple| &triple.object == *subject))
        .or_else(|| triples.first().map(|triple| &triple.subject))
        .cloned()
}

fn is_directive(text: &str) -> bool {
    text.starts_with("@prefix")
        || text.starts_with("@base")
        || starts_with_keyword(text, "PREFIX")
        || starts_with_keyword(text, "BASE")
}

/// IRI reference of a base directive.
fn base_reference(text: &str) -> Option<&str> {
    if !(text.starts_with("@base") || starts_with_keyword(text, "BASE")) {
        return None;
    }
    let (_, rest) = text.split_once('<')?;
    rest.split_once('>').map(|(reference, _)| reference)
}

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
        && text[keyword.len()..]
            .chars()
            .next()
            .is_some_and(char::is_whitespace)
}

// ============================================================================
// Splitter
// ============================================================================

/// Byte ranges of the top-level statements of `input`, without surrounding
/// whitespace and comments. Terminating dots are included. Text left after
/// the last terminator becomes a final, unterminated statement.
fn split_statements(input: &str) -> Vec<Range<usize>> {
    let bytes = input.as_bytes();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if start.is_none() {
            if b.is_ascii_whitespace() {
                i += 1;
                continue;
            }
            if b == b'#' {
                i = skip_comment(bytes, i);
                continue;
            }
            start = Some(i);
            depth = 0;
            // SPARQL-style directives carry no terminating dot
            let rest = &input[i..];
            if starts_with_keyword(rest, "PREFIX") || starts_with_keyword(rest, "BASE") {
                let end = rest.find('<').map_or(bytes.len(), |open| skip_iri(bytes, i + open));
                spans.push(i..end);
                start = None;
                i = end;
                continue;
            }
        }
        match b {
            b'#' => i = skip_comment(bytes, i),
            b'<' => i = skip_iri(bytes, i),
            b'"' | b'\'' => i = skip_string(bytes, i),
            b'[' | b'(' => {
                depth += 1;
                i += 1;
            }
            b']' | b')' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            b'.' if depth == 0 && ends_statement(bytes, i) => {
                if let Some(begin) = start.take() {
                    spans.push(begin..i + 1);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    if let Some(begin) = start {
        let end = begin + input[begin..].trim_end().len();
        spans.push(begin..end);
    }
    spans
}

/// A dot inside a prefixed name or a decimal has name characters on both sides.
fn ends_statement(bytes: &[u8], dot: usize) -> bool {
    let name_char = |b: u8| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'%') || b >= 0x80;
    let before = dot.checked_sub(1).map(|i| bytes[i]);
    let after = bytes.get(dot + 1).copied();
    !(before.is_some_and(name_char) && after.is_some_and(name_char))
}

fn skip_comment(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n' || b == b'\r')
        .map_or(bytes.len(), |offset| from + offset + 1)
}

fn skip_iri(bytes: &[u8], from: usize) -> usize {
    bytes[from + 1..]
        .iter()
        .position(|&b| b == b'>')
        .map_or(bytes.len(), |offset| from + offset + 2)
}

fn skip_string(bytes: &[u8], from: usize) -> usize {
    let quote = bytes[from];
    let long = bytes.get(from + 1) == Some(&quote) && bytes.get(from + 2) == Some(&quote);
    let mut i = if long { from + 3 } else { from + 1 };
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => {
                if !long {
                    return i + 1;
                }
                if bytes.get(i + 1) == Some(&quote) && bytes.get(i + 2) == Some(&quote) {
                    return i + 3;
                }
                i += 1;
            }
            // short strings cannot span lines; the statement is malformed
            b'\n' | b'\r' if !long => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}
