#![forbid(unsafe_code)]

//! Query gate: whether an input event should search, and when.
//!
//! Gating happens in two steps so the widget can fire its cancelable `change`
//! notification in between:
//!
//! 1. [`classify`] sorts the event into ignore / unchanged / changed / focused.
//! 2. [`decide`] applies the minimum length and the delay policy.
//!
//! | Stage | Length ok | Open | Decision |
//! |-------|-----------|------|----------|
//! | Focused | yes | any | `OpenImmediate` |
//! | Changed | yes | any | `OpenDelayed(delay)` (`OpenImmediate` when delay is 0) |
//! | any | no | yes | `Close` |
//! | any | no | no | `Noop` |

use core::time::Duration;

use suggest_core::KeyCode;

use crate::config::Options;

/// What caused the gate to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The input gained focus.
    Focus,
    /// A key was pressed on the input.
    Keystroke(KeyCode),
    /// The value may have changed without a key (paste, IME).
    Input,
}

/// First gate step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Navigation key: route to the navigation state machine.
    Ignore,
    /// The value did not change; nothing to do.
    Unchanged,
    /// The value differs from the last observed one.
    Changed,
    /// Focus: search without delay.
    Focused,
}

/// Second gate step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Below the minimum length and already closed.
    Noop,
    /// Below the minimum length while open.
    Close,
    OpenImmediate,
    OpenDelayed(Duration),
}

#[must_use]
pub fn classify(trigger: Trigger, value: &str, previous: &str) -> Stage {
    match trigger {
        Trigger::Keystroke(code) if code.is_navigation() => Stage::Ignore,
        Trigger::Focus => Stage::Focused,
        Trigger::Keystroke(_) | Trigger::Input if value != previous => Stage::Changed,
        Trigger::Keystroke(_) | Trigger::Input => Stage::Unchanged,
    }
}

#[must_use]
pub fn decide(query: &str, is_open: bool, allow_delay: bool, options: &Options) -> GateDecision {
    if !options.passes_min_length(query) {
        return if is_open {
            GateDecision::Close
        } else {
            GateDecision::Noop
        };
    }
    if allow_delay && !options.delay.is_zero() {
        GateDecision::OpenDelayed(options.delay)
    } else {
        GateDecision::OpenImmediate
    }
}
