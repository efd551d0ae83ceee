#![forbid(unsafe_code)]

//! Suggestion sources.
//!
//! A [`Source`] is chosen once when settings are built and dispatched with an
//! exhaustive `match`; the shape of declarative configuration is only
//! inspected while parsing [`SettingsFile`](crate::SettingsFile).

use core::fmt;

use crate::suggestion::Suggestion;

/// Synchronous suggestion callback.
pub type SourceFn = Box<dyn FnMut(&str) -> Vec<Suggestion>>;

/// Remote endpoint description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSource {
    /// URL or path the host's HTTP client resolves.
    pub endpoint: String,
}

impl RemoteSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

/// Where suggestions come from.
pub enum Source {
    /// In-memory ordered list, filtered by label prefix.
    List(Vec<Suggestion>),
    /// Called with the query; its return value is the result set.
    Callback(SourceFn),
    /// Fetched asynchronously through the host's [`HttpClient`](crate::HttpClient).
    Remote(RemoteSource),
}

/// Discriminant of a [`Source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    List,
    Callback,
    Remote,
}

/// Outcome of handing a query to a source.
#[derive(Debug)]
pub(crate) enum Dispatch {
    /// Results are available now.
    Ready(Vec<Suggestion>),
    /// A remote request has to be issued.
    Remote(RemoteSource),
}

impl Source {
    /// Static list source.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Suggestion>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Callback source.
    pub fn callback(f: impl FnMut(&str) -> Vec<Suggestion> + 'static) -> Self {
        Self::Callback(Box::new(f))
    }

    /// Remote endpoint source.
    pub fn remote(endpoint: impl Into<String>) -> Self {
        Self::Remote(RemoteSource::new(endpoint))
    }

    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::List(_) => SourceKind::List,
            Self::Callback(_) => SourceKind::Callback,
            Self::Remote(_) => SourceKind::Remote,
        }
    }

    pub(crate) fn dispatch(&mut self, query: &str) -> Dispatch {
        match self {
            Self::List(items) => Dispatch::Ready(filter_prefix(items, query)),
            Self::Callback(f) => Dispatch::Ready(f(query)),
            Self::Remote(remote) => Dispatch::Remote(remote.clone()),
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(items) => f.debug_tuple("List").field(&items.len()).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
            Self::Remote(remote) => f.debug_tuple("Remote").field(&remote.endpoint).finish(),
        }
    }
}

/// Keep items whose label starts with `query` (case-sensitive), in source order.
#[must_use]
pub fn filter_prefix(items: &[Suggestion], query: &str) -> Vec<Suggestion> {
    items
        .iter()
        .filter(|item| item.label().starts_with(query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[Suggestion]) -> Vec<&str> {
        items.iter().map(Suggestion::label).collect()
    }

    #[test]
    fn list_filters_by_prefix_in_order() {
        let mut source = Source::list(["apple", "apricot", "banana"]);
        let Dispatch::Ready(results) = source.dispatch("ap") else {
            panic!("list sources resolve synchronously");
        };
        assert_eq!(labels(&results), ["apple", "apricot"]);
    }

    #[test]
    fn list_prefix_is_case_sensitive() {
        let items = vec![Suggestion::text("Apple"), Suggestion::text("apple")];
        assert_eq!(labels(&filter_prefix(&items, "ap")), ["apple"]);
    }

    #[test]
    fn list_matches_labels_not_values() {
        let items = vec![Suggestion::pair("se", "Sweden"), Suggestion::pair("sw", "Switzerland")];
        assert_eq!(labels(&filter_prefix(&items, "Swe")), ["Sweden"]);
        assert!(filter_prefix(&items, "se").is_empty());
    }

    #[test]
    fn callback_receives_query() {
        let mut source = Source::callback(|q| vec![Suggestion::text(format!("{q}!"))]);
        assert_eq!(source.kind(), SourceKind::Callback);
        let Dispatch::Ready(results) = source.dispatch("hi") else {
            panic!("callbacks resolve synchronously");
        };
        assert_eq!(labels(&results), ["hi!"]);
    }

    #[test]
    fn remote_defers_to_host() {
        let mut source = Source::remote("/search");
        assert_eq!(source.kind(), SourceKind::Remote);
        assert!(matches!(
            source.dispatch("x"),
            Dispatch::Remote(RemoteSource { ref endpoint }) if endpoint == "/search"
        ));
    }
}
