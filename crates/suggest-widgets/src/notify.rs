#![forbid(unsafe_code)]

//! Lifecycle notifications with preventable defaults.
//!
//! Before taking a default action the widget calls
//! [`Hooks::notify`] and inspects the returned [`Verdict`]. `Create`, `Open`
//! and `Focus` are informational: their verdict is ignored.

use core::fmt;

use suggest_core::ElementId;

use crate::registry::InstanceId;
use crate::suggestion::Suggestion;

/// Whether the default action may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    #[default]
    Allowed,
    Suppressed,
}

impl Verdict {
    #[must_use]
    pub const fn is_suppressed(self) -> bool {
        matches!(self, Self::Suppressed)
    }
}

impl From<bool> for Verdict {
    /// `true` allows, `false` suppresses.
    fn from(allow: bool) -> Self {
        if allow { Self::Allowed } else { Self::Suppressed }
    }
}

/// Why the list is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    Escape,
    Up,
    Tab,
    OutsideClick,
    Programmatic,
    BelowMinLength,
    EmptyResults,
    Selected,
    ConfigurationError,
    Destroyed,
}

impl CloseReason {
    /// Forced closes happen even when the close hook suppresses them.
    #[must_use]
    pub const fn is_forced(self) -> bool {
        matches!(
            self,
            Self::EmptyResults | Self::Selected | Self::ConfigurationError | Self::Destroyed
        )
    }
}

/// Notification kinds, used to register hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Create,
    Change,
    Search,
    Response,
    Open,
    Focus,
    Select,
    Close,
}

impl NotificationKind {
    #[must_use]
    pub const fn is_cancelable(self) -> bool {
        !matches!(self, Self::Create | Self::Open | Self::Focus)
    }
}

/// A notification and its payload.
#[derive(Debug)]
pub enum Notification<'a> {
    /// Widget attached to its element.
    Create,
    /// Input value changed; suppressing skips the search gate.
    Change { value: &'a str },
    /// A search is about to run.
    Search { query: &'a str },
    /// Raw results arrived; hooks may rewrite them in place.
    Response {
        query: &'a str,
        results: &'a mut Vec<Suggestion>,
    },
    /// The list was rendered with `count` items.
    Open { count: usize },
    /// Item `index` received focus.
    Focus { index: usize },
    /// An item is being selected; suppressing keeps the input value.
    Select { value: &'a str, label: &'a str },
    /// The list is being closed.
    Close { reason: CloseReason },
}

impl Notification<'_> {
    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Create => NotificationKind::Create,
            Self::Change { .. } => NotificationKind::Change,
            Self::Search { .. } => NotificationKind::Search,
            Self::Response { .. } => NotificationKind::Response,
            Self::Open { .. } => NotificationKind::Open,
            Self::Focus { .. } => NotificationKind::Focus,
            Self::Select { .. } => NotificationKind::Select,
            Self::Close { .. } => NotificationKind::Close,
        }
    }
}

/// Instance-scoped data handed to every hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookContext {
    pub instance: InstanceId,
    pub element: ElementId,
}

type HookFn = Box<dyn FnMut(&HookContext, &mut Notification<'_>) -> Verdict>;

/// Registered notification hooks.
///
/// Several hooks may listen to the same kind; they run in registration order
/// and any one of them can suppress the default.
#[derive(Default)]
pub struct Hooks {
    handlers: Vec<(NotificationKind, HookFn)>,
}

impl Hooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook (builder).
    #[must_use]
    pub fn on(
        mut self,
        kind: NotificationKind,
        hook: impl FnMut(&HookContext, &mut Notification<'_>) -> Verdict + 'static,
    ) -> Self {
        self.handlers.push((kind, Box::new(hook)));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every hook registered for this notification's kind.
    pub fn notify(&mut self, ctx: &HookContext, notification: &mut Notification<'_>) -> Verdict {
        let kind = notification.kind();
        let mut verdict = Verdict::Allowed;
        for (registered, hook) in &mut self.handlers {
            if *registered == kind && hook(ctx, notification).is_suppressed() {
                verdict = Verdict::Suppressed;
            }
        }
        if kind.is_cancelable() {
            verdict
        } else {
            Verdict::Allowed
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|(kind, _)| kind))
            .finish()
    }
}
