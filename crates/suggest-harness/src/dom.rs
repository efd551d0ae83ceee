#![forbid(unsafe_code)]

//! In-memory page: text inputs, their data attributes, and rendered lists.

use std::collections::{BTreeMap, HashMap};

use suggest_core::ElementId;
use suggest_widgets::{Presentation, RenderedItem, UiBinding};

/// One recorded binding call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomOp {
    Snapshot(ElementId),
    Restore(ElementId),
    Decorate(ElementId),
    Subscribe(ElementId),
    Unsubscribe(ElementId),
    SetValue(ElementId, String),
    SetData(ElementId, String, Option<String>),
    /// Values of the rendered items.
    RenderList(ElementId, Vec<String>),
    ClearList(ElementId),
    ShowList(ElementId),
    HideList(ElementId),
    FocusInput(ElementId),
    FocusItem(ElementId, usize),
}

/// Where the page's focus is, as far as the binding was told.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomFocus {
    Input(ElementId),
    Item(ElementId, usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ElementState {
    value: String,
    data: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct FakeElement {
    text_input: bool,
    state: ElementState,
    snapshot: Option<ElementState>,
    decoration: Option<Presentation>,
    subscribed: bool,
    list: Vec<RenderedItem>,
    list_visible: bool,
}

impl FakeElement {
    fn new(text_input: bool, value: &str) -> Self {
        Self {
            text_input,
            state: ElementState {
                value: value.to_owned(),
                data: BTreeMap::new(),
            },
            snapshot: None,
            decoration: None,
            subscribed: false,
            list: Vec::new(),
            list_visible: false,
        }
    }
}

/// Recording [`UiBinding`] over an in-memory element table.
///
/// Unknown elements read as empty non-inputs and writes to them are dropped.
#[derive(Debug, Default)]
pub struct FakeDom {
    elements: HashMap<ElementId, FakeElement>,
    ops: Vec<DomOp>,
    focus: Option<DomFocus>,
}

impl FakeDom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-line text input.
    pub fn add_text_input(&mut self, raw: u64, value: &str) -> ElementId {
        let id = ElementId::from_raw(raw);
        self.elements.insert(id, FakeElement::new(true, value));
        id
    }

    /// Add an element that is not a text input (textarea, select, ...).
    pub fn add_element(&mut self, raw: u64) -> ElementId {
        let id = ElementId::from_raw(raw);
        self.elements.insert(id, FakeElement::new(false, ""));
        id
    }

    /// Change the value the way the user would, without recording an op.
    pub fn fill(&mut self, element: ElementId, value: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.state.value = value.to_owned();
        }
    }

    #[must_use]
    pub fn input_value(&self, element: ElementId) -> &str {
        self.elements
            .get(&element)
            .map_or("", |el| el.state.value.as_str())
    }

    #[must_use]
    pub fn data(&self, element: ElementId, key: &str) -> Option<&str> {
        self.elements
            .get(&element)
            .and_then(|el| el.state.data.get(key))
            .map(String::as_str)
    }

    /// Items currently in the list, visible or not.
    #[must_use]
    pub fn list(&self, element: ElementId) -> &[RenderedItem] {
        self.elements
            .get(&element)
            .map_or(&[][..], |el| el.list.as_slice())
    }

    /// Values of the visible list; empty when hidden.
    #[must_use]
    pub fn visible_values(&self, element: ElementId) -> Vec<String> {
        match self.elements.get(&element) {
            Some(el) if el.list_visible => el.list.iter().map(|item| item.value.clone()).collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_list_visible(&self, element: ElementId) -> bool {
        self.elements.get(&element).is_some_and(|el| el.list_visible)
    }

    #[must_use]
    pub fn is_subscribed(&self, element: ElementId) -> bool {
        self.elements.get(&element).is_some_and(|el| el.subscribed)
    }

    #[must_use]
    pub fn decoration(&self, element: ElementId) -> Option<&Presentation> {
        self.elements
            .get(&element)
            .and_then(|el| el.decoration.as_ref())
    }

    #[must_use]
    pub fn focus(&self) -> Option<DomFocus> {
        self.focus
    }

    #[must_use]
    pub fn ops(&self) -> &[DomOp] {
        &self.ops
    }

    /// Drain the recorded ops.
    pub fn take_ops(&mut self) -> Vec<DomOp> {
        std::mem::take(&mut self.ops)
    }
}

impl UiBinding for FakeDom {
    fn is_text_input(&self, element: ElementId) -> bool {
        self.elements.get(&element).is_some_and(|el| el.text_input)
    }

    fn value(&self, element: ElementId) -> String {
        self.input_value(element).to_owned()
    }

    fn set_value(&mut self, element: ElementId, value: &str) {
        self.ops.push(DomOp::SetValue(element, value.to_owned()));
        self.fill(element, value);
    }

    fn set_data(&mut self, element: ElementId, key: &str, value: Option<&str>) {
        self.ops.push(DomOp::SetData(
            element,
            key.to_owned(),
            value.map(str::to_owned),
        ));
        if let Some(el) = self.elements.get_mut(&element) {
            match value {
                Some(v) => el.state.data.insert(key.to_owned(), v.to_owned()),
                None => el.state.data.remove(key),
            };
        }
    }

    fn snapshot(&mut self, element: ElementId) {
        self.ops.push(DomOp::Snapshot(element));
        if let Some(el) = self.elements.get_mut(&element) {
            el.snapshot = Some(el.state.clone());
        }
    }

    fn restore(&mut self, element: ElementId) {
        self.ops.push(DomOp::Restore(element));
        if let Some(el) = self.elements.get_mut(&element) {
            if let Some(snapshot) = el.snapshot.take() {
                el.state = snapshot;
            }
            el.decoration = None;
            el.list.clear();
            el.list_visible = false;
        }
    }

    fn decorate(&mut self, element: ElementId, presentation: &Presentation) {
        self.ops.push(DomOp::Decorate(element));
        if let Some(el) = self.elements.get_mut(&element) {
            el.decoration = Some(presentation.clone());
        }
    }

    fn subscribe(&mut self, element: ElementId) {
        self.ops.push(DomOp::Subscribe(element));
        if let Some(el) = self.elements.get_mut(&element) {
            el.subscribed = true;
        }
    }

    fn unsubscribe(&mut self, element: ElementId) {
        self.ops.push(DomOp::Unsubscribe(element));
        if let Some(el) = self.elements.get_mut(&element) {
            el.subscribed = false;
        }
    }

    fn render_list(&mut self, element: ElementId, items: &[RenderedItem]) {
        self.ops.push(DomOp::RenderList(
            element,
            items.iter().map(|item| item.value.clone()).collect(),
        ));
        if let Some(el) = self.elements.get_mut(&element) {
            el.list = items.to_vec();
        }
    }

    fn clear_list(&mut self, element: ElementId) {
        self.ops.push(DomOp::ClearList(element));
        if let Some(el) = self.elements.get_mut(&element) {
            el.list.clear();
        }
        // Focus on a removed item falls back to the page.
        if matches!(self.focus, Some(DomFocus::Item(owner, _)) if owner == element) {
            self.focus = None;
        }
    }

    fn show_list(&mut self, element: ElementId) {
        self.ops.push(DomOp::ShowList(element));
        if let Some(el) = self.elements.get_mut(&element) {
            el.list_visible = true;
        }
    }

    fn hide_list(&mut self, element: ElementId) {
        self.ops.push(DomOp::HideList(element));
        if let Some(el) = self.elements.get_mut(&element) {
            el.list_visible = false;
        }
    }

    fn focus_input(&mut self, element: ElementId) {
        self.ops.push(DomOp::FocusInput(element));
        self.focus = Some(DomFocus::Input(element));
    }

    fn focus_item(&mut self, element: ElementId, index: usize) {
        self.ops.push(DomOp::FocusItem(element, index));
        self.focus = Some(DomFocus::Item(element, index));
    }
}
