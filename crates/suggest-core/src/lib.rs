#![forbid(unsafe_code)]

//! Core: canonical input events, element identity, and logging macros.
//!
//! Nothing in this crate knows about suggestion sources or rendering. It
//! describes what the host pushes into a widget (key, focus, click and tick
//! events addressed to an input element or one of its rendered items) so the
//! widget crate can stay independent of any particular DOM binding.

pub mod element;
pub mod event;
pub mod logging;

pub use element::{ElementId, Target};
pub use event::{Event, KeyCode, KeyEvent, KeyEventKind};

// Same paths as the no-op macros, which `#[macro_export]` places at the root.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
