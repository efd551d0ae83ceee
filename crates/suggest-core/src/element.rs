#![forbid(unsafe_code)]

//! Opaque element identity.
//!
//! The widget never owns DOM nodes. The host hands out a stable [`ElementId`]
//! per input element and translates it back to its own node type at the
//! binding boundary.

use core::fmt;

/// Opaque identifier for an element owned by the host.
///
/// The raw value has no meaning inside this crate; it is only a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Create an `ElementId` from a raw host value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying raw value.
    #[inline]
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<u32> for ElementId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::from_raw(u64::from(raw))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an event landed, relative to one attached widget.
///
/// Items are addressed by their position in the currently rendered list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// The text input itself.
    #[default]
    Input,
    /// The rendered suggestion at this index.
    Item(usize),
}

impl Target {
    /// Index of the targeted item, if the target is an item.
    #[must_use]
    pub const fn item(self) -> Option<usize> {
        match self {
            Self::Item(index) => Some(index),
            Self::Input => None,
        }
    }
}
