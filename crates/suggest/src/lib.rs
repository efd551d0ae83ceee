#![forbid(unsafe_code)]

//! Autocomplete widget public facade.
//!
//! Re-exports the event vocabulary from `suggest-core` and the widget,
//! registry and collaborator traits from `suggest-widgets`, and offers a
//! prelude for embedding hosts.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use suggest_core::{ElementId, Event, KeyCode, KeyEvent, KeyEventKind, Target};

// --- Widget re-exports -----------------------------------------------------

pub use suggest_widgets::{
    Autocomplete, AutocompleteError, CloseReason, Command, HookContext, Hooks, Host, HttpClient,
    InstanceId, Method, Notification, NotificationKind, Options, Presentation, Registry,
    RemoteRequest, RemoteSource, RenderedItem, RequestToken, Settings, SettingsFile, Source,
    SourceKind, Suggestion, Ticket, TransportError, UiBinding, Verdict, escape_html,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for hosts embedding the widget.
#[derive(Debug)]
pub enum Error {
    /// Misconfiguration or misuse reported by a widget.
    Widget(AutocompleteError),
    /// Failure in the host's own transport layer.
    Transport(TransportError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Widget(err) => write!(f, "{err}"),
            Self::Transport(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Widget(err) => Some(err),
            Self::Transport(err) => Some(err),
        }
    }
}

impl From<AutocompleteError> for Error {
    fn from(err: AutocompleteError) -> Self {
        Self::Widget(err)
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

/// Standard result type for host-facing APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Command, ElementId, Error, Event, Host, HttpClient, KeyCode, NotificationKind, Registry,
        Result, Settings, Suggestion, UiBinding, Verdict,
    };

    pub use crate::{core, widgets};
}

pub use suggest_core as core;
pub use suggest_widgets as widgets;
