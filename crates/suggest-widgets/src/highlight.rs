#![forbid(unsafe_code)]

//! Highlighting of query words inside suggestion labels.
//!
//! The input text is split on whitespace and every word becomes one branch of
//! a single case-insensitive alternation, longest word first so that `"app"`
//! wins over `"a"` at the same position. Words are escaped before they reach
//! the regex, so user input can never change the pattern's meaning.

use regex::Regex;
use suggest_core::warn;

/// A run of label text, highlighted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpan {
    pub text: String,
    pub highlighted: bool,
}

impl LabelSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
        }
    }

    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
        }
    }
}

/// Compiled matcher for one input value.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    /// Build a matcher for the words of `input`. Blank input highlights nothing.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut words: Vec<&str> = input.split_whitespace().collect();
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words.dedup();
        if words.is_empty() {
            return Self { pattern: None };
        }
        let alternation = words
            .iter()
            .map(|word| regex::escape(word))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = match Regex::new(&format!("(?i)(?:{alternation})")) {
            Ok(regex) => Some(regex),
            Err(_err) => {
                warn!(error = %_err, "highlight pattern rejected; rendering plain labels");
                None
            }
        };
        Self { pattern }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// Split `label` into plain and highlighted runs.
    #[must_use]
    pub fn spans(&self, label: &str) -> Vec<LabelSpan> {
        let Some(pattern) = &self.pattern else {
            return vec![LabelSpan::plain(label)];
        };
        let mut spans = Vec::new();
        let mut last = 0;
        for found in pattern.find_iter(label) {
            if found.start() > last {
                spans.push(LabelSpan::plain(&label[last..found.start()]));
            }
            spans.push(LabelSpan::highlighted(found.as_str()));
            last = found.end();
        }
        if last < label.len() || spans.is_empty() {
            spans.push(LabelSpan::plain(&label[last..]));
        }
        spans
    }
}

/// Join spans into markup, escaping every run and wrapping matches in `<mark>`.
#[must_use]
pub fn to_markup(spans: &[LabelSpan], escape: impl Fn(&str) -> String) -> String {
    let mut out = String::new();
    for span in spans {
        let text = escape(&span.text);
        if span.highlighted {
            out.push_str("<mark>");
            out.push_str(&text);
            out.push_str("</mark>");
        } else {
            out.push_str(&text);
        }
    }
    out
}
