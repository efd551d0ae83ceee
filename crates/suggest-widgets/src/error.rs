#![forbid(unsafe_code)]

//! Error types.
//!
//! Only programmer misuse surfaces as an [`AutocompleteError`]: a source that
//! does not produce a sequence, a bad remote field name, or attaching to the
//! wrong element. Short queries and empty result sets are not errors; they
//! close the list. Transport failures are reported by the host as a
//! [`TransportError`] and are logged, never retried.

use core::fmt;

use suggest_core::ElementId;

/// Configuration and misuse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutocompleteError {
    /// A source returned something other than an ordered sequence.
    NotASequence { query: String },
    /// An element of the result sequence is neither a string nor a value/label object.
    InvalidSuggestion { index: usize },
    /// The remote query field name is empty or contains whitespace.
    InvalidFieldName(String),
    /// Only single-line text inputs can be attached.
    UnsupportedElement(ElementId),
    /// The element already has a widget attached.
    AlreadyAttached(ElementId),
    /// Declarative settings could not be parsed.
    Config(String),
}

impl fmt::Display for AutocompleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotASequence { query } => {
                write!(f, "suggestions for {query:?} must be an ordered sequence")
            }
            Self::InvalidSuggestion { index } => {
                write!(f, "suggestion at index {index} is not a string or value/label pair")
            }
            Self::InvalidFieldName(name) => write!(f, "invalid remote field name: {name:?}"),
            Self::UnsupportedElement(element) => write!(
                f,
                "cannot attach autocompletion to element {element}: not a text input"
            ),
            Self::AlreadyAttached(element) => {
                write!(f, "element {element} already has autocompletion attached")
            }
            Self::Config(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for AutocompleteError {}

impl From<serde_json::Error> for AutocompleteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A remote request failed in transport (network error, non-2xx, abort).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Host-provided description.
    pub message: String,
}

impl TransportError {
    /// Failure without a response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Failure with an HTTP status.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "request failed with status {status}: {}", self.message),
            None => write!(f, "request failed: {}", self.message),
        }
    }
}

impl std::error::Error for TransportError {}
