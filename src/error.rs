//! Error types for template compilation, template loading and searching.
//!
//! Rendering itself never fails: a missing placeholder value degrades to an
//! empty substitution.

use std::path::PathBuf;
use thiserror::Error;

/// A malformed `${...}` marker in a template source.
///
/// Offsets are byte offsets into the source string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated placeholder starting at byte {offset}")]
    Unterminated { offset: usize },

    #[error("empty placeholder name at byte {offset}")]
    EmptyName { offset: usize },

    #[error("unexpected '{{' inside placeholder at byte {offset}")]
    NestedBrace { offset: usize },
}

/// Failure to obtain the raw template source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("read template {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no <script data-template=\"{0}\"> element found")]
    ScriptNotFound(String),

    #[error("<script data-template=\"{0}\"> is not closed")]
    ScriptUnclosed(String),
}

/// Failure of a single search request.
///
/// Every variant is a transport-level failure from the page's point of view;
/// a business failure (`retval: false`) is a successful response.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("read canned response {}: {source}", .path.display())]
    CannedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse canned response {}: {source}", .path.display())]
    CannedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
