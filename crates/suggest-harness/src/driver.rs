#![forbid(unsafe_code)]

//! Scripted user sessions against a [`Registry`].
//!
//! The driver owns the registry and both fakes and plays the host: it edits
//! the fake input, pushes the matching events, advances time and completes
//! remote requests.

use core::time::Duration;

use suggest_core::{ElementId, Event, KeyCode, KeyEvent, Target};
use suggest_widgets::{
    Autocomplete, Command, Host, InstanceId, Registry, Result, Settings, TransportError,
};

use crate::dom::{DomFocus, FakeDom};
use crate::http::{FakeHttp, IssuedRequest};

#[derive(Debug, Default)]
pub struct Driver {
    pub registry: Registry,
    pub dom: FakeDom,
    pub http: FakeHttp,
    now: Duration,
}

impl Driver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty text input and attach a widget to it.
    pub fn attach_input(&mut self, raw: u64, settings: Settings) -> Result<ElementId> {
        let element = self.dom.add_text_input(raw, "");
        self.attach(element, settings)?;
        Ok(element)
    }

    pub fn attach(&mut self, element: ElementId, settings: Settings) -> Result<InstanceId> {
        let mut host = Host::new(&mut self.dom, &mut self.http);
        self.registry.attach(&mut host, element, settings)
    }

    pub fn destroy(&mut self, element: ElementId) -> Result<bool> {
        let mut host = Host::new(&mut self.dom, &mut self.http);
        self.registry.destroy(&mut host, element)
    }

    /// Push one event to the widget on `element`.
    pub fn send(&mut self, element: ElementId, event: &Event) -> Result<()> {
        let mut host = Host::new(&mut self.dom, &mut self.http);
        self.registry.dispatch(&mut host, element, event)
    }

    /// Type `text` one character at a time: each character edits the value
    /// and then fires its key event.
    pub fn type_str(&mut self, element: ElementId, text: &str) -> Result<()> {
        for ch in text.chars() {
            let mut value = self.dom.input_value(element).to_owned();
            value.push(ch);
            self.dom.fill(element, &value);
            self.send(element, &Event::key(KeyCode::Char(ch)))?;
        }
        Ok(())
    }

    pub fn backspace(&mut self, element: ElementId) -> Result<()> {
        let mut value = self.dom.input_value(element).to_owned();
        value.pop();
        self.dom.fill(element, &value);
        self.send(element, &Event::key(KeyCode::Backspace))
    }

    /// Replace the value without a key (paste).
    pub fn paste(&mut self, element: ElementId, value: &str) -> Result<()> {
        self.dom.fill(element, value);
        self.send(element, &Event::Input)
    }

    /// Press a key on whatever the page has focused: one of this widget's
    /// items, or else the input.
    pub fn press(&mut self, element: ElementId, code: KeyCode) -> Result<()> {
        let target = match self.dom.focus() {
            Some(DomFocus::Item(owner, index)) if owner == element => Target::Item(index),
            _ => Target::Input,
        };
        self.send(element, &Event::Key(KeyEvent::new(code).with_target(target)))
    }

    /// Press a key with focus on rendered item `index`.
    pub fn press_on_item(&mut self, element: ElementId, code: KeyCode, index: usize) -> Result<()> {
        self.send(
            element,
            &Event::Key(KeyEvent::new(code).with_target(Target::Item(index))),
        )
    }

    pub fn focus(&mut self, element: ElementId) -> Result<()> {
        self.send(element, &Event::Focus(Target::Input))
    }

    pub fn focus_item(&mut self, element: ElementId, index: usize) -> Result<()> {
        self.send(element, &Event::Focus(Target::Item(index)))
    }

    pub fn click_item(&mut self, element: ElementId, index: usize) -> Result<()> {
        self.send(element, &Event::Click(Target::Item(index)))?;
        self.outside_click(Some(element));
        Ok(())
    }

    /// A click anywhere on the page; `origin` is the widget it landed in, if any.
    pub fn outside_click(&mut self, origin: Option<ElementId>) {
        let mut host = Host::new(&mut self.dom, &mut self.http);
        self.registry.outside_click(&mut host, origin);
    }

    pub fn trigger(&mut self, element: ElementId, command: Command) -> Result<()> {
        let mut host = Host::new(&mut self.dom, &mut self.http);
        self.registry.trigger(&mut host, element, command)
    }

    pub fn close(&mut self, element: ElementId) {
        let mut host = Host::new(&mut self.dom, &mut self.http);
        self.registry.close(&mut host, element);
    }

    /// Advance the host clock.
    pub fn advance(&mut self, elapsed: Duration) -> Result<()> {
        self.now = self.now.saturating_add(elapsed);
        let mut host = Host::new(&mut self.dom, &mut self.http);
        self.registry.tick(&mut host, elapsed)
    }

    pub fn advance_ms(&mut self, ms: u64) -> Result<()> {
        self.advance(Duration::from_millis(ms))
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Complete an issued request with a response body.
    pub fn respond(&mut self, request: &IssuedRequest, body: &str) -> Result<()> {
        let mut host = Host::new(&mut self.dom, &mut self.http);
        self.registry
            .complete_request(&mut host, request.ticket, Ok(body.to_owned()))
    }

    /// Complete an issued request with a JSON array of strings.
    pub fn respond_with(&mut self, request: &IssuedRequest, items: &[&str]) -> Result<()> {
        let body = serde_json::Value::from(items.to_vec()).to_string();
        self.respond(request, &body)
    }

    /// Fail an issued request in transport.
    pub fn fail(&mut self, request: &IssuedRequest, error: TransportError) -> Result<()> {
        let mut host = Host::new(&mut self.dom, &mut self.http);
        self.registry
            .complete_request(&mut host, request.ticket, Err(error))
    }

    /// Clone of the most recent request for `query`.
    #[must_use]
    pub fn request_for(&self, query: &str) -> Option<IssuedRequest> {
        self.http.latest_for(query).cloned()
    }

    #[must_use]
    pub fn widget(&self, element: ElementId) -> Option<&Autocomplete> {
        self.registry.widget(element)
    }

    #[must_use]
    pub fn is_open(&self, element: ElementId) -> bool {
        self.widget(element).is_some_and(Autocomplete::is_open)
    }

    #[must_use]
    pub fn focused_index(&self, element: ElementId) -> Option<isize> {
        self.widget(element).and_then(Autocomplete::focused_index)
    }

    /// Values of the widget's rendered list.
    #[must_use]
    pub fn rendered_values(&self, element: ElementId) -> Vec<String> {
        self.widget(element)
            .map(|w| w.rendered().iter().map(|item| item.value.clone()).collect())
            .unwrap_or_default()
    }
}
