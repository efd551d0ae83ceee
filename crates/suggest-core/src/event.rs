#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The host translates its native events into these types and pushes them
//! into the widget. All events derive `Clone`, `PartialEq`, and `Eq` for use in
//! tests and pattern matching.
//!
//! # Design Notes
//!
//! - Every event is addressed to one attached input; [`Target`] says whether it
//!   landed on the input or on a rendered suggestion.
//! - `KeyEventKind` defaults to `Press`. Hosts that only observe key-up should
//!   report it as `Press`; `Release` events are ignored by the widget.
//! - Time is host-driven: [`Event::Tick`] carries the elapsed duration since
//!   the previous tick. The widget never reads a wall clock.

use core::time::Duration;

use crate::element::Target;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// The input's value may have changed without a keystroke
    /// (paste, drag-and-drop, IME commit).
    Input,

    /// Focus landed on the input or on a rendered item.
    Focus(Target),

    /// Pointer click on the input or on a rendered item.
    Click(Target),

    /// Host clock advanced by the given duration.
    Tick(Duration),
}

impl Event {
    /// Key press on the input.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Key press on a rendered item.
    #[must_use]
    pub const fn key_on_item(code: KeyCode, index: usize) -> Self {
        Self::Key(KeyEvent::new(code).with_target(Target::Item(index)))
    }

    /// Host clock advanced by `ms` milliseconds.
    #[must_use]
    pub const fn tick_ms(ms: u64) -> Self {
        Self::Tick(Duration::from_millis(ms))
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,

    /// Where keyboard focus was when the key was pressed.
    pub target: Target,
}

impl KeyEvent {
    /// Create a new key press on the input.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            kind: KeyEventKind::Press,
            target: Target::Input,
        }
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Create a key event addressed to a specific target.
    #[must_use]
    pub const fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Delete key.
    Delete,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Function key (F1-F24).
    F(u8),

    /// Any key the host could not map (modifier-only presses, media keys).
    Unidentified,
}

impl KeyCode {
    /// Keys that drive list navigation instead of triggering a search.
    #[must_use]
    pub const fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::Enter | Self::Escape | Self::Up | Self::Down | Self::Tab
        )
    }

    /// Map a legacy DOM `keyCode`/`which` value.
    #[must_use]
    pub fn from_dom_key_code(code: u32) -> Self {
        match code {
            8 => Self::Backspace,
            9 => Self::Tab,
            13 => Self::Enter,
            27 => Self::Escape,
            33 => Self::PageUp,
            34 => Self::PageDown,
            35 => Self::End,
            36 => Self::Home,
            37 => Self::Left,
            38 => Self::Up,
            39 => Self::Right,
            40 => Self::Down,
            46 => Self::Delete,
            112..=135 => Self::F((code - 111) as u8),
            48..=57 | 65..=90 => char::from_u32(code)
                .map(|c| Self::Char(c.to_ascii_lowercase()))
                .unwrap_or(Self::Unidentified),
            _ => Self::Unidentified,
        }
    }

    /// Map a DOM `KeyboardEvent.key` string.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Tab" => Self::Tab,
            "Delete" | "Del" => Self::Delete,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => key
                        .strip_prefix('F')
                        .and_then(|n| n.parse::<u8>().ok())
                        .filter(|n| (1..=24).contains(n))
                        .map_or(Self::Unidentified, Self::F),
                }
            }
        }
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}
