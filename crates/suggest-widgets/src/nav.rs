#![forbid(unsafe_code)]

//! Keyboard navigation across the input and the rendered list.
//!
//! [`NavState::on_key`] is a pure transition function: it inspects the
//! current state and returns a [`NavAction`] for the widget to carry out.
//!
//! | State | Key | Action |
//! |-------|-----|--------|
//! | any | Escape | close, drop scheduled and in-flight searches |
//! | `ItemFocused(i)` | Enter | select `i` |
//! | `Closed` / `InputFocused` | Down, length ok | open if closed, focus item 0 |
//! | `InputFocused` | Up | close |
//! | `ItemFocused(0)` | Up | focus input |
//! | `ItemFocused(last)` | Down | focus input |
//! | `ItemFocused(i)` | Down / Up | focus `i + 1` / `i - 1` |
//! | `ItemFocused(i)` | Tab | close |

use suggest_core::KeyCode;

use crate::notify::CloseReason;

/// Where focus is, and whether the list is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavState {
    #[default]
    Closed,
    /// List shown, focus on the input.
    InputFocused,
    /// List shown, focus on item `i`.
    ItemFocused(usize),
}

impl NavState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// `None` when closed, `-1` for the input, `i` for item `i`.
    #[must_use]
    pub fn focused_index(self) -> Option<isize> {
        match self {
            Self::Closed => None,
            Self::InputFocused => Some(-1),
            Self::ItemFocused(i) => isize::try_from(i).ok(),
        }
    }

    /// Transition for a navigation key.
    ///
    /// `count` is the number of rendered items and `meets_min` whether the
    /// current input value passes the minimum length.
    #[must_use]
    pub fn on_key(self, key: NavKey, count: usize, meets_min: bool) -> NavAction {
        match (self, key) {
            (_, NavKey::Escape) => NavAction::Close(CloseReason::Escape),

            (Self::ItemFocused(i), NavKey::Enter) => NavAction::Select(i),
            (_, NavKey::Enter) => NavAction::None,

            (Self::Closed, NavKey::Down) if meets_min => NavAction::OpenAndFocusFirst,
            (Self::InputFocused, NavKey::Down) if meets_min && count > 0 => {
                NavAction::FocusItem(0)
            }
            (Self::Closed | Self::InputFocused, NavKey::Down) => NavAction::None,

            (Self::InputFocused, NavKey::Up) => NavAction::Close(CloseReason::Up),
            (Self::Closed, NavKey::Up) => NavAction::None,

            (Self::ItemFocused(0), NavKey::Up) => NavAction::FocusInput,
            (Self::ItemFocused(i), NavKey::Up) => NavAction::FocusItem(i - 1),
            (Self::ItemFocused(i), NavKey::Down) if i + 1 >= count => NavAction::FocusInput,
            (Self::ItemFocused(i), NavKey::Down) => NavAction::FocusItem(i + 1),

            (Self::ItemFocused(_), NavKey::Tab) => NavAction::Close(CloseReason::Tab),
            (Self::Closed | Self::InputFocused, NavKey::Tab) => NavAction::None,
        }
    }
}

/// Keys the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Enter,
    Escape,
    Up,
    Down,
    Tab,
}

impl NavKey {
    #[must_use]
    pub const fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Escape => Some(Self::Escape),
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::Tab => Some(Self::Tab),
            _ => None,
        }
    }
}

/// What the widget should do in response to a navigation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    None,
    Close(CloseReason),
    Select(usize),
    FocusInput,
    FocusItem(usize),
    /// Search immediately, then focus the first item once rendered.
    OpenAndFocusFirst,
}
