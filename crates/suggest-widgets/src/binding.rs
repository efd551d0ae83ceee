#![forbid(unsafe_code)]

//! Collaborator interfaces: the page and the network.
//!
//! The widget never creates DOM nodes or sockets. It asks a [`UiBinding`] to
//! read and write the input and to show the rendered list, and an
//! [`HttpClient`] to issue and cancel remote requests. Completions come back
//! through [`Registry::complete_request`](crate::Registry::complete_request)
//! carrying the [`Ticket`] that was handed out at issue time.

use suggest_core::ElementId;
use url::form_urlencoded;

use crate::config::{Method, Presentation};
use crate::registry::InstanceId;
use crate::render::RenderedItem;

/// Page-side operations the widget needs.
pub trait UiBinding {
    /// Only single-line text inputs can be attached.
    fn is_text_input(&self, element: ElementId) -> bool;

    /// Current input value.
    fn value(&self, element: ElementId) -> String;

    /// Overwrite the input value.
    fn set_value(&mut self, element: ElementId, value: &str);

    /// Set (`Some`) or remove (`None`) a data attribute on the input.
    fn set_data(&mut self, element: ElementId, key: &str, value: Option<&str>);

    /// Remember the element's original state so [`restore`](Self::restore) can put it back.
    fn snapshot(&mut self, element: ElementId);

    /// Replace the element with its snapshot, dropping all augmentation.
    fn restore(&mut self, element: ElementId);

    /// Apply wrapper, classes and list placement.
    fn decorate(&mut self, element: ElementId, presentation: &Presentation);

    /// Start forwarding key, focus and click events for this element.
    fn subscribe(&mut self, element: ElementId);

    /// Stop forwarding events for this element.
    fn unsubscribe(&mut self, element: ElementId);

    /// Replace the rendered list wholesale.
    fn render_list(&mut self, element: ElementId, items: &[RenderedItem]);

    /// Remove every rendered item.
    fn clear_list(&mut self, element: ElementId);

    fn show_list(&mut self, element: ElementId);

    fn hide_list(&mut self, element: ElementId);

    fn focus_input(&mut self, element: ElementId);

    fn focus_item(&mut self, element: ElementId, index: usize);

    /// Escape text for insertion into markup.
    fn escape_html(&self, text: &str) -> String {
        escape_html(text)
    }
}

/// Escape `& < > " '` for HTML text and attribute contexts.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Host-assigned handle for an in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(pub u64);

/// Identity of one remote request: the issuing instance and its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub instance: InstanceId,
    pub seq: u64,
}

/// A request the widget wants issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteRequest<'a> {
    /// Hand this back with the completion.
    pub ticket: Ticket,
    pub endpoint: &'a str,
    pub method: Method,
    pub field_name: &'a str,
    pub query: &'a str,
}

impl RemoteRequest<'_> {
    /// `field_name=query`, form-urlencoded.
    #[must_use]
    pub fn encoded_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(self.field_name, self.query)
            .finish()
    }

    /// Endpoint with the query appended, for GET requests.
    #[must_use]
    pub fn url(&self) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.endpoint, separator, self.encoded_query())
    }
}

/// Network-side operations the widget needs.
pub trait HttpClient {
    /// Issue a request; the host later completes it with the request's ticket.
    fn issue(&mut self, request: &RemoteRequest<'_>) -> RequestToken;

    /// Best-effort cancellation. A completion that still arrives is discarded.
    fn cancel(&mut self, token: RequestToken);
}

/// Both collaborators, borrowed for one call into the widget.
pub struct Host<'a> {
    pub ui: &'a mut dyn UiBinding,
    pub http: &'a mut dyn HttpClient,
}

impl<'a> Host<'a> {
    pub fn new(ui: &'a mut dyn UiBinding, http: &'a mut dyn HttpClient) -> Self {
        Self { ui, http }
    }
}
