#![forbid(unsafe_code)]

//! Presentation list: bounded, ordered, optionally highlighted.

use crate::config::Options;
use crate::highlight::{Highlighter, LabelSpan, to_markup};
use crate::suggestion::Suggestion;

/// One row of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    /// Written into the input on select.
    pub value: String,
    /// Display text before highlighting.
    pub label: String,
    pub spans: Vec<LabelSpan>,
    /// Escaped label with `<mark>` around highlighted runs.
    pub markup: String,
}

/// Turn raw results into rows.
///
/// Truncates to `max_results` (0 = unlimited) keeping source order, and
/// highlights the words of `input` when enabled.
pub fn present(
    results: &[Suggestion],
    input: &str,
    options: &Options,
    escape: impl Fn(&str) -> String,
) -> Vec<RenderedItem> {
    let limit = match options.max_results {
        0 => results.len(),
        n => n.min(results.len()),
    };
    let highlighter = options.highlight.then(|| Highlighter::new(input));
    results[..limit]
        .iter()
        .map(|suggestion| {
            let label = suggestion.label();
            let spans = match &highlighter {
                Some(h) => h.spans(label),
                None => vec![LabelSpan::plain(label)],
            };
            let markup = to_markup(&spans, &escape);
            RenderedItem {
                value: suggestion.value().to_owned(),
                label: label.to_owned(),
                spans,
                markup,
            }
        })
        .collect()
}
