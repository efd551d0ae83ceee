#![forbid(unsafe_code)]

//! Widget settings.
//!
//! [`Settings`] is built once per attach with `with_*` builders and is never
//! mutated afterwards. [`SettingsFile`] is the declarative (JSON) form for
//! everything that is not a closure; the source shape is detected only there.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AutocompleteError;
use crate::notify::{HookContext, Hooks, Notification, NotificationKind, Verdict};
use crate::source::{RemoteSource, Source};
use crate::suggestion::Suggestion;

/// HTTP method for remote requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Presentation options, forwarded verbatim to [`UiBinding::decorate`](crate::UiBinding::decorate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Presentation {
    /// Wrap the input in a positioned container.
    pub wrap: bool,
    /// Raw id of the element the result list is appended to instead of
    /// being inserted after the input.
    pub append_to: Option<u64>,
    pub class_prefix: String,
    pub class_wrapper: String,
    /// `None` leaves the input's classes alone.
    pub class_input: Option<String>,
    pub class_result_list: String,
    pub class_result_item: String,
    pub class_result_link: String,
}

impl Presentation {
    /// Prefixed class name for one of the suffix fields.
    #[must_use]
    pub fn class(&self, suffix: &str) -> String {
        format!("{}{}", self.class_prefix, suffix)
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            wrap: true,
            append_to: None,
            class_prefix: "autocomplete".to_owned(),
            class_wrapper: String::new(),
            class_input: Some("__input".to_owned()),
            class_result_list: "__results".to_owned(),
            class_result_item: "__item".to_owned(),
            class_result_link: "__link".to_owned(),
        }
    }
}

/// Plain (non-closure) options captured at attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Query parameter name for remote requests.
    pub field_name: String,
    pub method: Method,
    /// Minimum query length in characters; 0 disables the gate.
    pub min_length: usize,
    /// Cap on rendered suggestions; 0 means unlimited.
    pub max_results: usize,
    /// Debounce before searching on a genuine value change.
    pub delay: Duration,
    pub highlight: bool,
    pub presentation: Presentation,
}

impl Options {
    pub const DEFAULT_FIELD_NAME: &'static str = "q";
    pub const DEFAULT_MIN_LENGTH: usize = 2;
    pub const DEFAULT_MAX_RESULTS: usize = 10;
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    /// Whether `query` is long enough to search.
    #[must_use]
    pub fn passes_min_length(&self, query: &str) -> bool {
        self.min_length == 0 || query.chars().count() >= self.min_length
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            field_name: Self::DEFAULT_FIELD_NAME.to_owned(),
            method: Method::Get,
            min_length: Self::DEFAULT_MIN_LENGTH,
            max_results: Self::DEFAULT_MAX_RESULTS,
            delay: Self::DEFAULT_DELAY,
            highlight: true,
            presentation: Presentation::default(),
        }
    }
}

/// Complete configuration for one widget instance.
#[derive(Default)]
pub struct Settings {
    pub(crate) source: Source,
    pub(crate) options: Options,
    pub(crate) hooks: Hooks,
}

impl Settings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source (builder).
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// Use a static list (builder).
    #[must_use]
    pub fn with_list<I, S>(self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Suggestion>,
    {
        self.with_source(Source::list(items))
    }

    /// Use a synchronous callback (builder).
    #[must_use]
    pub fn with_callback(self, f: impl FnMut(&str) -> Vec<Suggestion> + 'static) -> Self {
        self.with_source(Source::callback(f))
    }

    /// Use a remote endpoint (builder).
    #[must_use]
    pub fn with_remote(self, endpoint: impl Into<String>) -> Self {
        self.with_source(Source::remote(endpoint))
    }

    #[must_use]
    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.options.field_name = name.into();
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.options.method = method;
        self
    }

    #[must_use]
    pub fn with_min_length(mut self, n: usize) -> Self {
        self.options.min_length = n;
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.options.max_results = n;
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.options.delay = delay;
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.options.highlight = highlight;
        self
    }

    #[must_use]
    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.options.presentation = presentation;
        self
    }

    /// Replace all hooks (builder).
    #[must_use]
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Add one hook (builder).
    #[must_use]
    pub fn on(
        mut self,
        kind: NotificationKind,
        hook: impl FnMut(&HookContext, &mut Notification<'_>) -> Verdict + 'static,
    ) -> Self {
        self.hooks = self.hooks.on(kind, hook);
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Check invariants that cannot be expressed in the types.
    pub fn validate(&self) -> Result<(), AutocompleteError> {
        if matches!(self.source, Source::Remote(_)) {
            let name = &self.options.field_name;
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(AutocompleteError::InvalidFieldName(name.clone()));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("source", &self.source)
            .field("options", &self.options)
            .field("hooks", &self.hooks)
            .finish()
    }
}

/// Declarative source: a JSON array is a list, a JSON string an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceSpec {
    List(Vec<Suggestion>),
    Endpoint(String),
}

/// Serializable settings.
///
/// ```
/// use suggest_widgets::SettingsFile;
///
/// let file = SettingsFile::from_json(r#"{ "url": "/search", "minLength": 3 }"#).unwrap();
/// let settings = file.into_settings().unwrap();
/// assert_eq!(settings.options().min_length, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsFile {
    pub source: Option<SourceSpec>,
    /// Remote endpoint; takes precedence over `source`.
    pub url: Option<String>,
    pub field_name: Option<String>,
    #[serde(rename = "type")]
    pub method: Option<Method>,
    pub min_length: Option<usize>,
    pub max_results: Option<usize>,
    /// Milliseconds.
    pub delay: Option<u64>,
    pub highlight: Option<bool>,
    #[serde(flatten)]
    pub presentation: Presentation,
}

impl SettingsFile {
    pub fn from_json(json: &str) -> Result<Self, AutocompleteError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into validated [`Settings`] without hooks.
    pub fn into_settings(self) -> Result<Settings, AutocompleteError> {
        let source = match (self.url, self.source) {
            (Some(url), _) | (None, Some(SourceSpec::Endpoint(url))) => {
                Source::Remote(RemoteSource::new(url))
            }
            (None, Some(SourceSpec::List(items))) => Source::List(items),
            (None, None) => Source::default(),
        };
        let defaults = Options::default();
        let settings = Settings {
            source,
            options: Options {
                field_name: self.field_name.unwrap_or(defaults.field_name),
                method: self.method.unwrap_or(defaults.method),
                min_length: self.min_length.unwrap_or(defaults.min_length),
                max_results: self.max_results.unwrap_or(defaults.max_results),
                delay: self.delay.map_or(defaults.delay, Duration::from_millis),
                highlight: self.highlight.unwrap_or(defaults.highlight),
                presentation: self.presentation,
            },
            hooks: Hooks::new(),
        };
        settings.validate()?;
        Ok(settings)
    }
}
