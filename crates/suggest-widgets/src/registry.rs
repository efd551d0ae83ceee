#![forbid(unsafe_code)]

//! Owned arena of attached widgets.
//!
//! Instances live in generational slots. An [`InstanceId`] stays valid until
//! its instance is destroyed; after that the slot's generation moves on and
//! the old id (and any remote completion still carrying it) resolves to
//! nothing.

use core::fmt;
use core::time::Duration;
use std::collections::HashMap;

use suggest_core::{ElementId, Event};
use suggest_core::{debug, info};

use crate::Result;
use crate::binding::{Host, Ticket};
use crate::config::Settings;
use crate::error::{AutocompleteError, TransportError};
use crate::notify::CloseReason;
use crate::widget::{Autocomplete, Command};

/// Generational handle to an attached instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId {
    index: usize,
    generation: u32,
}

impl InstanceId {
    #[must_use]
    pub const fn from_parts(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    widget: Option<Autocomplete>,
}

/// All attached widgets, indexed by handle and by element.
#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Slot>,
    free: Vec<usize>,
    by_element: HashMap<ElementId, InstanceId>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach autocompletion to a text input.
    ///
    /// # Errors
    ///
    /// [`AutocompleteError::UnsupportedElement`] if the element is not a
    /// single-line text input, [`AutocompleteError::AlreadyAttached`] if it
    /// already has a widget, and [`AutocompleteError::InvalidFieldName`] for a
    /// remote source with an unusable query field.
    pub fn attach(
        &mut self,
        host: &mut Host<'_>,
        element: ElementId,
        settings: Settings,
    ) -> Result<InstanceId> {
        if !host.ui.is_text_input(element) {
            return Err(AutocompleteError::UnsupportedElement(element));
        }
        if self.by_element.contains_key(&element) {
            return Err(AutocompleteError::AlreadyAttached(element));
        }
        settings.validate()?;

        host.ui.snapshot(element);
        host.ui.decorate(element, &settings.options().presentation);
        host.ui.subscribe(element);

        let id = self.allocate();
        let initial_value = host.ui.value(element);
        let mut widget = Autocomplete::new(id, element, settings, initial_value);
        info!(%element, instance = %id, source = ?widget.source_kind(), "autocomplete attached");
        widget.notify_created();

        self.slots[id.index].widget = Some(widget);
        self.by_element.insert(element, id);
        Ok(id)
    }

    fn allocate(&mut self) -> InstanceId {
        match self.free.pop() {
            Some(index) => InstanceId::from_parts(index, self.slots[index].generation),
            None => {
                self.slots.push(Slot::default());
                InstanceId::from_parts(self.slots.len() - 1, 0)
            }
        }
    }

    /// Handle of the widget attached to `element`.
    #[must_use]
    pub fn lookup(&self, element: ElementId) -> Option<InstanceId> {
        self.by_element.get(&element).copied()
    }

    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&Autocomplete> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.widget.as_ref())
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut Autocomplete> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.widget.as_mut())
    }

    /// Widget attached to `element`.
    #[must_use]
    pub fn widget(&self, element: ElementId) -> Option<&Autocomplete> {
        self.lookup(element).and_then(|id| self.get(id))
    }

    fn widget_mut(&mut self, element: ElementId) -> Option<&mut Autocomplete> {
        let id = self.lookup(element)?;
        self.get_mut(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_element.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_element.is_empty()
    }

    /// Live widgets in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Autocomplete> {
        self.slots.iter().filter_map(|slot| slot.widget.as_ref())
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Autocomplete> {
        self.slots.iter_mut().filter_map(|slot| slot.widget.as_mut())
    }

    /// Route an event to the widget on `element`. Unknown elements are ignored.
    pub fn dispatch(&mut self, host: &mut Host<'_>, element: ElementId, event: &Event) -> Result<()> {
        match self.widget_mut(element) {
            Some(widget) => widget.handle_event(host, event),
            None => Ok(()),
        }
    }

    /// Programmatic close. Unknown elements are ignored.
    pub fn close(&mut self, host: &mut Host<'_>, element: ElementId) {
        if let Some(widget) = self.widget_mut(element) {
            widget.close(host);
        }
    }

    /// Run a [`Command`] on the widget attached to `element`.
    pub fn trigger(
        &mut self,
        host: &mut Host<'_>,
        element: ElementId,
        command: Command,
    ) -> Result<()> {
        match self.widget_mut(element) {
            Some(widget) => widget.trigger(host, command),
            None => Ok(()),
        }
    }

    /// Detach the widget and restore the element.
    ///
    /// Returns `false` if nothing was attached.
    pub fn destroy(&mut self, host: &mut Host<'_>, element: ElementId) -> Result<bool> {
        let Some(id) = self.by_element.remove(&element) else {
            return Ok(false);
        };
        let Some(slot) = self.slots.get_mut(id.index) else {
            return Ok(false);
        };
        let Some(mut widget) = slot.widget.take() else {
            return Ok(false);
        };
        widget.teardown(host);
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        info!(%element, instance = %id, "autocomplete destroyed");
        Ok(true)
    }

    /// A click landed somewhere on the page.
    ///
    /// Every open widget closes except the one that owns `origin`.
    pub fn outside_click(&mut self, host: &mut Host<'_>, origin: Option<ElementId>) {
        for widget in self.iter_mut() {
            if widget.is_open() && Some(widget.element()) != origin {
                widget.close_with(host, CloseReason::OutsideClick);
            }
        }
    }

    /// Advance every widget's debounce timer.
    ///
    /// All widgets are ticked; the first error is returned.
    pub fn tick(&mut self, host: &mut Host<'_>, elapsed: Duration) -> Result<()> {
        let mut first_error = None;
        for widget in self.iter_mut() {
            if let Err(err) = widget.tick(host, elapsed) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Deliver a remote completion. Tickets of destroyed instances are dropped.
    pub fn complete_request(
        &mut self,
        host: &mut Host<'_>,
        ticket: Ticket,
        outcome: core::result::Result<String, TransportError>,
    ) -> Result<()> {
        match self.get_mut(ticket.instance) {
            Some(widget) => widget.complete_request(host, ticket.seq, outcome),
            None => {
                debug!(instance = %ticket.instance, seq = ticket.seq, "completion for detached instance dropped");
                Ok(())
            }
        }
    }
}
