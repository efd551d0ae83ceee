#![forbid(unsafe_code)]

//! Suggestion values and decoding of remote result bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AutocompleteError;

/// A candidate completion.
///
/// `value` is written back into the input on select; `label` is displayed
/// and defaults to the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Suggestion {
    /// Bare string used as both value and label.
    Text(String),
    /// Distinct value and display label.
    Pair {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl Suggestion {
    /// Bare string suggestion.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Value/label pair.
    pub fn pair(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Pair {
            value: value.into(),
            label: Some(label.into()),
        }
    }

    /// The text written back into the input.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Text(value) | Self::Pair { value, .. } => value,
        }
    }

    /// The text displayed in the list.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Text(value) => value,
            Self::Pair { value, label } => label.as_deref().unwrap_or(value),
        }
    }
}

impl From<&str> for Suggestion {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Suggestion {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<(&str, &str)> for Suggestion {
    fn from((value, label): (&str, &str)) -> Self {
        Self::pair(value, label)
    }
}

/// Decode a remote response body into an ordered result set.
///
/// The body must be a JSON array whose elements are strings or
/// `{ "value": .., "label": .. }` objects. Anything else is a configuration
/// error on the endpoint's side.
pub fn decode_results(body: &str, query: &str) -> Result<Vec<Suggestion>, AutocompleteError> {
    let not_a_sequence = || AutocompleteError::NotASequence {
        query: query.to_owned(),
    };
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(body) else {
        return Err(not_a_sequence());
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|_| AutocompleteError::InvalidSuggestion { index })
        })
        .collect()
}
