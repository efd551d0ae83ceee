#![forbid(unsafe_code)]

//! Autocomplete widget core.
//!
//! This crate turns keystrokes on a text input into suggestion searches and
//! drives the dropdown that presents them:
//!
//! - [`gate`]: decides whether an input event should search now, later, or
//!   close the list
//! - [`debounce`]: single-slot, host-ticked delay before a search fires
//! - [`fetch`]: one-entry result cache and remote request supersession
//! - [`source`]: static list, callback, and remote endpoint sources
//! - [`render`] and [`highlight`]: bounded, highlighted presentation list
//! - [`nav`]: keyboard/pointer navigation state machine
//! - [`registry`]: owned arena of attached widgets, keyed by element
//!
//! Everything that touches the page goes through the [`UiBinding`] and
//! [`HttpClient`] traits, bundled per call in a [`Host`].
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = Registry::new();
//! let settings = Settings::new()
//!     .with_list(["apple", "apricot", "banana"])
//!     .with_min_length(1);
//! let mut host = Host::new(&mut dom, &mut http);
//! registry.attach(&mut host, input, settings)?;
//!
//! // In the host's event loop:
//! registry.dispatch(&mut host, input, &Event::key(KeyCode::Char('a')))?;
//! registry.tick(&mut host, elapsed)?;
//! ```

pub mod binding;
pub mod config;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod gate;
pub mod highlight;
pub mod nav;
pub mod notify;
pub mod registry;
pub mod render;
pub mod source;
pub mod suggestion;
pub mod widget;

pub use binding::{
    Host, HttpClient, RemoteRequest, RequestToken, Ticket, UiBinding, escape_html,
};
pub use config::{Method, Options, Presentation, Settings, SettingsFile};
pub use error::{AutocompleteError, TransportError};
pub use highlight::LabelSpan;
pub use nav::NavState;
pub use notify::{CloseReason, HookContext, Hooks, Notification, NotificationKind, Verdict};
pub use registry::{InstanceId, Registry};
pub use render::RenderedItem;
pub use source::{RemoteSource, Source, SourceKind};
pub use suggestion::Suggestion;
pub use widget::{Autocomplete, Command};

/// Standard result type for widget operations.
pub type Result<T> = std::result::Result<T, AutocompleteError>;
