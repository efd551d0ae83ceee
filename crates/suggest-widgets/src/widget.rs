#![forbid(unsafe_code)]

//! One autocomplete instance bound to one text input.
//!
//! The widget owns its settings, the debounce slot, the fetch state and the
//! navigation state. It never holds on to the host: every entry point borrows
//! a [`Host`] for the duration of the call.
//!
//! # Pipeline
//!
//! ```text
//! event -> gate -> (debounce) -> search -> source -> (remote completion)
//!       -> response hook -> cache -> render -> navigate -> select / close
//! ```

use core::time::Duration;

use suggest_core::{ElementId, Event, KeyEventKind, Target};
use suggest_core::{debug, debug_span, error, trace, warn};

use crate::Result;
use crate::binding::{Host, RemoteRequest, Ticket};
use crate::config::{Options, Settings};
use crate::debounce::Debounce;
use crate::error::TransportError;
use crate::fetch::FetchController;
use crate::gate::{self, GateDecision, Stage, Trigger};
use crate::nav::{NavAction, NavKey, NavState};
use crate::notify::{CloseReason, HookContext, Hooks, Notification};
use crate::registry::InstanceId;
use crate::render::{self, RenderedItem};
use crate::source::{Dispatch, Source, SourceKind};
use crate::suggestion::{Suggestion, decode_results};

/// Programmatic commands, the equivalent of triggering the widget's custom event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Search immediately for the current input value.
    Open,
    Close,
}

/// Autocomplete state for one input element.
#[derive(Debug)]
pub struct Autocomplete {
    id: InstanceId,
    element: ElementId,
    options: Options,
    source: Source,
    hooks: Hooks,
    previous_value: String,
    fetch: FetchController,
    pending_timer: Option<Debounce>,
    nav: NavState,
    rendered: Vec<RenderedItem>,
    selected_label: Option<String>,
    focus_first_on_render: bool,
    /// Set after select moves focus back to the input, so the resulting
    /// focus event does not reopen the list.
    refocused: bool,
}

impl Autocomplete {
    pub(crate) fn new(
        id: InstanceId,
        element: ElementId,
        settings: Settings,
        initial_value: String,
    ) -> Self {
        let Settings {
            source,
            options,
            hooks,
        } = settings;
        Self {
            id,
            element,
            options,
            source,
            hooks,
            previous_value: initial_value,
            fetch: FetchController::new(),
            pending_timer: None,
            nav: NavState::Closed,
            rendered: Vec::new(),
            selected_label: None,
            focus_first_on_render: false,
            refocused: false,
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    #[must_use]
    pub fn nav(&self) -> NavState {
        self.nav
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.nav.is_open()
    }

    /// `None` when closed, `-1` for the input, `i` for item `i`.
    #[must_use]
    pub fn focused_index(&self) -> Option<isize> {
        self.nav.focused_index()
    }

    #[must_use]
    pub fn rendered(&self) -> &[RenderedItem] {
        &self.rendered
    }

    /// Label of the last selected suggestion.
    #[must_use]
    pub fn selected_label(&self) -> Option<&str> {
        self.selected_label.as_deref()
    }

    #[must_use]
    pub fn cached_query(&self) -> Option<&str> {
        self.fetch.cached_query()
    }

    #[must_use]
    pub fn previous_value(&self) -> &str {
        &self.previous_value
    }

    /// Remaining debounce time, if a search is scheduled.
    #[must_use]
    pub fn pending_delay(&self) -> Option<Duration> {
        self.pending_timer.as_ref().map(Debounce::remaining)
    }

    #[must_use]
    pub fn has_pending_request(&self) -> bool {
        self.fetch.is_pending()
    }

    fn context(&self) -> HookContext {
        HookContext {
            instance: self.id,
            element: self.element,
        }
    }

    pub(crate) fn notify_created(&mut self) {
        let ctx = self.context();
        self.hooks.notify(&ctx, &mut Notification::Create);
    }

    // --- Events ---

    /// Route one host event.
    pub fn handle_event(&mut self, host: &mut Host<'_>, event: &Event) -> Result<()> {
        let refocused = core::mem::take(&mut self.refocused);
        match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return Ok(());
                }
                self.sync_focus(key.target);
                match NavKey::from_key_code(key.code) {
                    Some(nav_key) => self.navigate(host, nav_key),
                    None => self.on_input(host, Trigger::Keystroke(key.code)),
                }
            }
            Event::Input => self.on_input(host, Trigger::Input),
            Event::Focus(Target::Input) => {
                if self.nav.is_open() {
                    self.nav = NavState::InputFocused;
                    Ok(())
                } else if refocused {
                    Ok(())
                } else {
                    self.on_input(host, Trigger::Focus)
                }
            }
            Event::Focus(Target::Item(index)) => {
                if self.nav.is_open() && *index < self.rendered.len() {
                    self.nav = NavState::ItemFocused(*index);
                    self.notify_focus(*index);
                }
                Ok(())
            }
            Event::Click(Target::Item(index)) => {
                if self.nav.is_open() {
                    self.select(host, *index);
                }
                Ok(())
            }
            Event::Click(Target::Input) => Ok(()),
            Event::Tick(elapsed) => self.tick(host, *elapsed),
        }
    }

    /// Key events carry the element they were fired on; focus follows it.
    fn sync_focus(&mut self, target: Target) {
        if !self.nav.is_open() {
            return;
        }
        match target {
            Target::Input => self.nav = NavState::InputFocused,
            Target::Item(index) if index < self.rendered.len() => {
                self.nav = NavState::ItemFocused(index);
            }
            Target::Item(_) => {}
        }
    }

    fn on_input(&mut self, host: &mut Host<'_>, trigger: Trigger) -> Result<()> {
        let value = host.ui.value(self.element);
        let stage = gate::classify(trigger, &value, &self.previous_value);
        let allow_delay = match stage {
            Stage::Ignore | Stage::Unchanged => return Ok(()),
            Stage::Changed => {
                self.previous_value.clone_from(&value);
                self.focus_first_on_render = false;
                let ctx = self.context();
                let verdict = self
                    .hooks
                    .notify(&ctx, &mut Notification::Change { value: &value });
                if verdict.is_suppressed() {
                    // The scheduled search is for a value that no longer exists.
                    self.cancel_pending(host);
                    return Ok(());
                }
                true
            }
            Stage::Focused => false,
        };

        let decision = gate::decide(&value, self.nav.is_open(), allow_delay, &self.options);
        trace!(element = %self.element, ?decision, "gate decision");
        match decision {
            GateDecision::Noop => {
                self.cancel_pending(host);
                Ok(())
            }
            GateDecision::Close => {
                self.cancel_pending(host);
                self.close_with(host, CloseReason::BelowMinLength);
                Ok(())
            }
            GateDecision::OpenImmediate => self.search(host, &value),
            GateDecision::OpenDelayed(delay) => {
                self.cancel_pending(host);
                self.pending_timer = Some(Debounce::new(value, delay));
                Ok(())
            }
        }
    }

    /// Advance the debounce timer; runs the scheduled search once it is due.
    pub fn tick(&mut self, host: &mut Host<'_>, elapsed: Duration) -> Result<()> {
        let due = match &mut self.pending_timer {
            Some(timer) => timer.tick(elapsed),
            None => return Ok(()),
        };
        if !due {
            return Ok(());
        }
        match self.pending_timer.take() {
            Some(timer) => self.search(host, timer.query()),
            None => Ok(()),
        }
    }

    // --- Search ---

    /// Run one logical search for `query`.
    ///
    /// Supersedes any scheduled search and any in-flight request. A repeat of
    /// the cached query renders the cached results without touching the source.
    pub fn search(&mut self, host: &mut Host<'_>, query: &str) -> Result<()> {
        let span = debug_span!("search", element = %self.element, query = %query);
        let _guard = span.enter();

        if !self.options.passes_min_length(query) {
            self.focus_first_on_render = false;
            return Ok(());
        }
        let ctx = self.context();
        if self
            .hooks
            .notify(&ctx, &mut Notification::Search { query })
            .is_suppressed()
        {
            self.focus_first_on_render = false;
            return Ok(());
        }
        self.cancel_pending(host);

        if let Some(cached) = self.fetch.cached(query) {
            debug!(count = cached.len(), "cache hit");
            let results = cached.to_vec();
            self.render(host, &results);
            return Ok(());
        }

        self.fetch.invalidate();
        match self.source.dispatch(query) {
            Dispatch::Ready(results) => {
                debug!(count = results.len(), "source resolved");
                self.deliver(host, query, results);
            }
            Dispatch::Remote(remote) => {
                let seq = self.fetch.next_seq();
                let request = RemoteRequest {
                    ticket: Ticket {
                        instance: self.id,
                        seq,
                    },
                    endpoint: &remote.endpoint,
                    method: self.options.method,
                    field_name: &self.options.field_name,
                    query,
                };
                let token = host.http.issue(&request);
                debug!(seq, endpoint = %remote.endpoint, "remote request issued");
                self.fetch.track(seq, token, query);
            }
        }
        if !self.fetch.is_pending() {
            self.focus_first_on_render = false;
        }
        Ok(())
    }

    /// Search immediately for the current input value.
    pub fn open(&mut self, host: &mut Host<'_>) -> Result<()> {
        let value = host.ui.value(self.element);
        self.search(host, &value)
    }

    pub fn trigger(&mut self, host: &mut Host<'_>, command: Command) -> Result<()> {
        match command {
            Command::Open => self.open(host),
            Command::Close => {
                self.close(host);
                Ok(())
            }
        }
    }

    /// Deliver the host's outcome for remote request `seq`.
    ///
    /// Completions for anything but the pending request are dropped. A body
    /// that is not a suggestion array closes the widget and is returned as an
    /// error.
    pub fn complete_request(
        &mut self,
        host: &mut Host<'_>,
        seq: u64,
        outcome: core::result::Result<String, TransportError>,
    ) -> Result<()> {
        let Some(pending) = self.fetch.accept(seq) else {
            debug!(element = %self.element, seq, "stale completion dropped");
            return Ok(());
        };
        let body = match outcome {
            Ok(body) => body,
            Err(_err) => {
                warn!(element = %self.element, query = %pending.query, error = %_err, "remote request failed");
                self.focus_first_on_render = false;
                return Ok(());
            }
        };
        match decode_results(&body, &pending.query) {
            Ok(results) => {
                self.deliver(host, &pending.query, results);
                Ok(())
            }
            Err(err) => {
                error!(element = %self.element, error = %err, "remote response rejected");
                self.focus_first_on_render = false;
                self.close_with(host, CloseReason::ConfigurationError);
                Err(err)
            }
        }
    }

    /// Response hook, cache, render.
    fn deliver(&mut self, host: &mut Host<'_>, query: &str, mut results: Vec<Suggestion>) {
        let ctx = self.context();
        let verdict = self.hooks.notify(
            &ctx,
            &mut Notification::Response {
                query,
                results: &mut results,
            },
        );
        if verdict.is_suppressed() {
            self.focus_first_on_render = false;
            return;
        }
        self.fetch.record(query, results.clone());
        self.render(host, &results);
    }

    fn render(&mut self, host: &mut Host<'_>, results: &[Suggestion]) {
        if results.is_empty() {
            self.focus_first_on_render = false;
            self.close_with(host, CloseReason::EmptyResults);
            return;
        }
        let input = host.ui.value(self.element);
        let items = {
            let ui = &*host.ui;
            render::present(results, &input, &self.options, |text| ui.escape_html(text))
        };
        host.ui.render_list(self.element, &items);
        host.ui.show_list(self.element);
        self.rendered = items;
        self.nav = NavState::InputFocused;

        let count = self.rendered.len();
        let ctx = self.context();
        self.hooks.notify(&ctx, &mut Notification::Open { count });

        if core::mem::take(&mut self.focus_first_on_render) {
            self.focus_item(host, 0);
        }
    }

    // --- Navigation ---

    fn navigate(&mut self, host: &mut Host<'_>, key: NavKey) -> Result<()> {
        let value = host.ui.value(self.element);
        let meets_min = self.options.passes_min_length(&value);
        match self.nav.on_key(key, self.rendered.len(), meets_min) {
            NavAction::None => {}
            NavAction::Close(reason) => self.close_with(host, reason),
            NavAction::Select(index) => self.select(host, index),
            NavAction::FocusInput => {
                self.nav = NavState::InputFocused;
                host.ui.focus_input(self.element);
            }
            NavAction::FocusItem(index) => self.focus_item(host, index),
            NavAction::OpenAndFocusFirst => {
                self.focus_first_on_render = true;
                self.search(host, &value)?;
            }
        }
        Ok(())
    }

    fn focus_item(&mut self, host: &mut Host<'_>, index: usize) {
        self.nav = NavState::ItemFocused(index);
        host.ui.focus_item(self.element, index);
        self.notify_focus(index);
    }

    fn notify_focus(&mut self, index: usize) {
        let ctx = self.context();
        self.hooks.notify(&ctx, &mut Notification::Focus { index });
    }

    /// Write item `index` back into the input, then close and refocus it.
    fn select(&mut self, host: &mut Host<'_>, index: usize) {
        let Some(item) = self.rendered.get(index).cloned() else {
            return;
        };
        let ctx = self.context();
        let verdict = self.hooks.notify(
            &ctx,
            &mut Notification::Select {
                value: &item.value,
                label: &item.label,
            },
        );
        if !verdict.is_suppressed() {
            host.ui.set_value(self.element, &item.value);
            host.ui.set_data(self.element, "label", Some(&item.label));
            self.previous_value = item.value;
            self.selected_label = Some(item.label);
        }
        self.close_with(host, CloseReason::Selected);
        host.ui.focus_input(self.element);
        self.refocused = true;
    }

    // --- Close ---

    /// Programmatic close.
    pub fn close(&mut self, host: &mut Host<'_>) {
        self.close_with(host, CloseReason::Programmatic);
    }

    /// Close the list for `reason`.
    ///
    /// User-initiated closes can be suppressed by the close hook; forced ones
    /// cannot. Closing also drops any scheduled search and in-flight request.
    pub fn close_with(&mut self, host: &mut Host<'_>, reason: CloseReason) {
        if !self.nav.is_open() {
            self.cancel_pending(host);
            self.focus_first_on_render = false;
            return;
        }
        let ctx = self.context();
        let verdict = self
            .hooks
            .notify(&ctx, &mut Notification::Close { reason });
        if verdict.is_suppressed() && !reason.is_forced() {
            trace!(element = %self.element, ?reason, "close suppressed");
            return;
        }
        self.cancel_pending(host);
        host.ui.hide_list(self.element);
        host.ui.clear_list(self.element);
        self.rendered.clear();
        self.nav = NavState::Closed;
        self.focus_first_on_render = false;
    }

    /// Drop the scheduled search and cancel the in-flight request.
    fn cancel_pending(&mut self, host: &mut Host<'_>) {
        self.pending_timer = None;
        if let Some(pending) = self.fetch.cancel() {
            trace!(seq = pending.seq, query = %pending.query, "request superseded");
            host.http.cancel(pending.token);
        }
    }

    /// Cancel all work, close, and hand the element back untouched.
    pub(crate) fn teardown(&mut self, host: &mut Host<'_>) {
        self.close_with(host, CloseReason::Destroyed);
        host.ui.unsubscribe(self.element);
        host.ui.restore(self.element);
    }
}
