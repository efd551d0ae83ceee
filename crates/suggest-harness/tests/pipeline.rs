#![forbid(unsafe_code)]

//! End-to-end scenarios: keystrokes in, rendered list and write-back out.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use suggest_core::{Event, KeyCode, KeyEvent, KeyEventKind};
use suggest_harness::{DomFocus, Driver};
use suggest_widgets::{
    AutocompleteError, CloseReason, Command, Method, Notification, NotificationKind, Settings,
    Suggestion, TransportError, Verdict,
};

fn fruit() -> Settings {
    Settings::new()
        .with_list(["apple", "apricot", "banana"])
        .with_min_length(1)
}

fn immediate(settings: Settings) -> Settings {
    settings.with_delay(Duration::ZERO)
}

fn remote() -> Settings {
    Settings::new().with_remote("/search").with_min_length(1)
}

// ============================================================================
// Query gate and debounce
// ============================================================================

#[test]
fn list_source_renders_prefix_matches() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, fruit()).unwrap();

    driver.type_str(input, "ap").unwrap();
    driver.advance_ms(500).unwrap();

    assert_eq!(driver.rendered_values(input), ["apple", "apricot"]);
    assert_eq!(driver.dom.visible_values(input), ["apple", "apricot"]);
    assert_eq!(driver.focused_index(input), Some(-1));
}

#[test]
fn search_waits_for_the_full_delay() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, fruit()).unwrap();

    driver.type_str(input, "ap").unwrap();
    driver.advance_ms(499).unwrap();
    assert!(!driver.is_open(input));
    assert_eq!(
        driver.widget(input).unwrap().pending_delay(),
        Some(Duration::from_millis(1))
    );

    driver.advance_ms(1).unwrap();
    assert!(driver.is_open(input));
}

#[test]
fn each_keystroke_restarts_the_delay() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, fruit()).unwrap();

    driver.type_str(input, "a").unwrap();
    driver.advance_ms(400).unwrap();
    driver.type_str(input, "p").unwrap();
    driver.advance_ms(400).unwrap();
    assert!(!driver.is_open(input));

    driver.advance_ms(100).unwrap();
    assert_eq!(driver.rendered_values(input), ["apple", "apricot"]);
}

#[test]
fn zero_delay_searches_on_the_keystroke() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(fruit())).unwrap();

    driver.type_str(input, "b").unwrap();
    assert_eq!(driver.rendered_values(input), ["banana"]);
}

#[test]
fn focus_searches_without_delay() {
    let mut driver = Driver::new();
    let input = driver.dom.add_text_input(1, "ban");
    driver.attach(input, fruit()).unwrap();

    driver.focus(input).unwrap();
    assert_eq!(driver.rendered_values(input), ["banana"]);
}

#[test]
fn unchanged_value_does_nothing() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, fruit()).unwrap();

    driver.type_str(input, "ap").unwrap();
    driver.advance_ms(500).unwrap();
    driver.dom.take_ops();

    // Arrow left/right and modifier keys leave the value alone.
    driver.press(input, KeyCode::Left).unwrap();
    driver.press(input, KeyCode::Right).unwrap();
    driver.advance_ms(1_000).unwrap();

    assert!(driver.dom.ops().is_empty());
    assert!(driver.is_open(input));
}

#[test]
fn below_min_length_never_searches() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let settings = Settings::new()
        .with_callback(move |_| {
            counter.set(counter.get() + 1);
            vec![Suggestion::text("x")]
        })
        .with_min_length(3)
        .with_delay(Duration::ZERO);

    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();
    driver.type_str(input, "ab").unwrap();
    driver.focus(input).unwrap();

    assert_eq!(calls.get(), 0);
    assert!(!driver.is_open(input));
}

#[test]
fn dropping_below_min_length_closes() {
    let mut driver = Driver::new();
    let settings = immediate(fruit()).with_min_length(2);
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "ap").unwrap();
    assert!(driver.is_open(input));

    driver.backspace(input).unwrap();
    assert!(!driver.is_open(input));
    assert!(!driver.dom.is_list_visible(input));
}

#[test]
fn change_hook_can_veto_the_search() {
    let settings = fruit().on(NotificationKind::Change, |_, _| Verdict::Suppressed);
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "ap").unwrap();
    assert_eq!(driver.widget(input).unwrap().pending_delay(), None);
    assert_eq!(driver.widget(input).unwrap().previous_value(), "ap");
}

#[test]
fn vetoed_change_drops_the_scheduled_search() {
    let settings = fruit().on(NotificationKind::Change, |_, notification| {
        let vetoed = matches!(notification, Notification::Change { value } if *value == "ap");
        Verdict::from(!vetoed)
    });
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "a").unwrap();
    assert!(driver.widget(input).unwrap().pending_delay().is_some());

    driver.type_str(input, "p").unwrap();
    assert_eq!(driver.widget(input).unwrap().pending_delay(), None);

    driver.advance_ms(500).unwrap();
    assert!(!driver.is_open(input));
    assert_eq!(driver.widget(input).unwrap().cached_query(), None);
}

#[test]
fn paste_goes_through_the_gate() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(fruit())).unwrap();

    driver.paste(input, "apr").unwrap();
    assert_eq!(driver.rendered_values(input), ["apricot"]);
}

#[test]
fn key_release_is_ignored() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(fruit())).unwrap();
    driver.type_str(input, "a").unwrap();

    let release = KeyEvent::new(KeyCode::Escape).with_kind(KeyEventKind::Release);
    driver.send(input, &Event::Key(release)).unwrap();
    assert!(driver.is_open(input));
}

// ============================================================================
// Fetch controller
// ============================================================================

#[test]
fn callback_returning_nothing_closes() {
    let settings = Settings::new()
        .with_callback(|q| {
            if q == "a" {
                vec![Suggestion::text("alpha")]
            } else {
                Vec::new()
            }
        })
        .with_min_length(1)
        .with_delay(Duration::ZERO);
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "a").unwrap();
    assert!(driver.is_open(input));

    driver.type_str(input, "z").unwrap();
    assert!(!driver.is_open(input));
    assert!(driver.dom.visible_values(input).is_empty());
}

#[test]
fn repeat_query_is_served_from_cache() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let settings = Settings::new()
        .with_callback(move |q| {
            counter.set(counter.get() + 1);
            vec![Suggestion::text(format!("{q}1")), Suggestion::text(format!("{q}2"))]
        })
        .with_min_length(2)
        .with_delay(Duration::ZERO);
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "ap").unwrap();
    let first = driver.rendered_values(input);
    assert_eq!(calls.get(), 1);

    driver.press(input, KeyCode::Escape).unwrap();
    assert!(!driver.is_open(input));

    driver.focus(input).unwrap();
    assert_eq!(calls.get(), 1);
    assert_eq!(driver.rendered_values(input), first);
    assert_eq!(driver.widget(input).unwrap().cached_query(), Some("ap"));
}

#[test]
fn remote_typing_inside_the_window_issues_one_request() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, remote()).unwrap();

    driver.type_str(input, "a").unwrap();
    driver.advance_ms(100).unwrap();
    driver.type_str(input, "b").unwrap();
    driver.advance_ms(500).unwrap();

    assert_eq!(driver.http.queries(), ["ab"]);
    let request = driver.request_for("ab").unwrap();
    assert_eq!(request.url, "/search?q=ab");
    assert_eq!(request.method, Method::Get);

    driver.respond_with(&request, &["abc", "abd"]).unwrap();
    assert_eq!(driver.rendered_values(input), ["abc", "abd"]);
}

#[test]
fn superseded_response_is_discarded() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(remote())).unwrap();

    driver.type_str(input, "a").unwrap();
    let first = driver.request_for("a").unwrap();
    driver.type_str(input, "b").unwrap();
    let second = driver.request_for("ab").unwrap();

    assert!(driver.http.is_canceled(first.token));
    assert_eq!(driver.http.in_flight().count(), 1);

    // The slower, older response arrives last and must not win.
    driver.respond_with(&second, &["abc"]).unwrap();
    driver.respond_with(&first, &["apple"]).unwrap();
    assert_eq!(driver.rendered_values(input), ["abc"]);
}

#[test]
fn closing_below_min_length_cancels_the_request() {
    let settings = immediate(remote()).with_min_length(2);
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "ab").unwrap();
    let request = driver.request_for("ab").unwrap();
    driver.backspace(input).unwrap();

    assert!(driver.http.is_canceled(request.token));
    driver.respond_with(&request, &["abc"]).unwrap();
    assert!(!driver.is_open(input));
}

#[test]
fn remote_request_uses_configured_field_and_method() {
    let settings = immediate(remote())
        .with_field_name("term")
        .with_method(Method::Post)
        .with_min_length(3);
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "a b").unwrap();
    let request = driver.request_for("a b").unwrap();
    assert_eq!(request.field_name, "term");
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "/search?term=a+b");
}

#[test]
fn non_array_body_closes_and_errors() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(remote())).unwrap();

    driver.type_str(input, "a").unwrap();
    let request = driver.request_for("a").unwrap();
    driver.respond_with(&request, &["abc"]).unwrap();
    assert!(driver.is_open(input));

    driver.type_str(input, "b").unwrap();
    let request = driver.request_for("ab").unwrap();
    let err = driver.respond(&request, r#"{"results": []}"#).unwrap_err();

    assert_eq!(
        err,
        AutocompleteError::NotASequence {
            query: "ab".to_owned()
        }
    );
    assert!(!driver.is_open(input));
}

#[test]
fn malformed_element_is_rejected() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(remote())).unwrap();

    driver.type_str(input, "a").unwrap();
    let request = driver.request_for("a").unwrap();
    let err = driver.respond(&request, r#"["ok", 7]"#).unwrap_err();
    assert_eq!(err, AutocompleteError::InvalidSuggestion { index: 1 });
}

#[test]
fn transport_failure_renders_nothing() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(remote())).unwrap();

    driver.type_str(input, "a").unwrap();
    let request = driver.request_for("a").unwrap();
    driver
        .fail(&request, TransportError::with_status(500, "boom"))
        .unwrap();

    assert!(!driver.is_open(input));
    assert!(!driver.widget(input).unwrap().has_pending_request());
}

#[test]
fn value_label_pairs_from_remote() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(remote())).unwrap();

    driver.type_str(input, "s").unwrap();
    let request = driver.request_for("s").unwrap();
    driver
        .respond(&request, r#"[{"value": "se", "label": "Sweden"}, "Spain"]"#)
        .unwrap();

    let rendered = driver.widget(input).unwrap().rendered();
    assert_eq!(rendered[0].value, "se");
    assert_eq!(rendered[0].label, "Sweden");
    assert_eq!(rendered[1].value, "Spain");
}

// ============================================================================
// Renderer
// ============================================================================

#[test]
fn rendering_is_bounded_by_max_results() {
    let settings = Settings::new()
        .with_list(["a1", "a2", "a3", "a4", "a5"])
        .with_min_length(1)
        .with_max_results(2)
        .with_delay(Duration::ZERO);
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "a").unwrap();
    assert_eq!(driver.rendered_values(input), ["a1", "a2"]);
}

#[test]
fn labels_are_highlighted_and_escaped() {
    let settings = Settings::new()
        .with_list(["apple <green>", "banana"])
        .with_min_length(1)
        .with_delay(Duration::ZERO);
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "ap").unwrap();
    let markup: Vec<_> = driver
        .dom
        .list(input)
        .iter()
        .map(|item| item.markup.clone())
        .collect();
    assert_eq!(markup, ["<mark>ap</mark>ple &lt;green&gt;"]);
}

#[test]
fn highlighting_can_be_disabled() {
    let mut driver = Driver::new();
    let input = driver
        .attach_input(1, immediate(fruit()).with_highlight(false))
        .unwrap();

    driver.type_str(input, "ap").unwrap();
    assert_eq!(driver.dom.list(input)[0].markup, "apple");
}

#[test]
fn response_hook_rewrites_results() {
    let settings = immediate(fruit()).on(NotificationKind::Response, |_, n| {
        if let Notification::Response { results, .. } = n {
            results.retain(|s| s.value() != "apricot");
        }
        Verdict::Allowed
    });
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "ap").unwrap();
    assert_eq!(driver.rendered_values(input), ["apple"]);
}

#[test]
fn suppressed_response_neither_caches_nor_renders() {
    let settings =
        immediate(fruit()).on(NotificationKind::Response, |_, _| Verdict::Suppressed);
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "ap").unwrap();
    assert!(!driver.is_open(input));
    assert_eq!(driver.widget(input).unwrap().cached_query(), None);
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn arrow_keys_cycle_through_items_and_input() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(fruit())).unwrap();
    driver.type_str(input, "a").unwrap();
    assert_eq!(driver.rendered_values(input).len(), 2);

    let mut seen = Vec::new();
    for _ in 0..4 {
        driver.press(input, KeyCode::Down).unwrap();
        seen.push(driver.focused_index(input));
    }
    assert_eq!(seen, [Some(0), Some(1), Some(-1), Some(0)]);

    driver.press(input, KeyCode::Up).unwrap();
    assert_eq!(driver.focused_index(input), Some(-1));
    assert_eq!(driver.dom.focus(), Some(DomFocus::Input(input)));

    driver.press(input, KeyCode::Up).unwrap();
    assert_eq!(driver.focused_index(input), None);
}

#[test]
fn down_opens_a_closed_widget_on_the_first_item() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, fruit()).unwrap();

    driver.type_str(input, "ap").unwrap();
    assert!(!driver.is_open(input));

    driver.press(input, KeyCode::Down).unwrap();
    assert_eq!(driver.focused_index(input), Some(0));
    assert_eq!(driver.dom.focus(), Some(DomFocus::Item(input, 0)));
    assert_eq!(driver.widget(input).unwrap().pending_delay(), None);
}

#[test]
fn down_on_remote_focuses_first_item_when_results_arrive() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, remote()).unwrap();

    driver.type_str(input, "ab").unwrap();
    driver.press(input, KeyCode::Down).unwrap();
    let request = driver.request_for("ab").unwrap();
    driver.respond_with(&request, &["abc", "abd"]).unwrap();

    assert_eq!(driver.focused_index(input), Some(0));
}

#[test]
fn typing_after_down_keeps_focus_on_the_input() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, remote()).unwrap();
    driver.type_str(input, "ab").unwrap();
    driver.press(input, KeyCode::Down).unwrap();
    let first = driver.request_for("ab").unwrap();

    driver.type_str(input, "c").unwrap();
    assert!(driver.http.is_canceled(first.token));
    driver.advance_ms(500).unwrap();
    let request = driver.request_for("abc").unwrap();
    driver.respond_with(&request, &["abcd", "abce"]).unwrap();

    assert!(driver.is_open(input));
    assert_eq!(driver.focused_index(input), Some(-1));
    assert_ne!(driver.dom.focus(), Some(DomFocus::Item(input, 0)));
}

#[test]
fn vetoed_down_search_does_not_move_focus_later() {
    let vetoes = Rc::new(Cell::new(1u32));
    let remaining = Rc::clone(&vetoes);
    let settings = fruit().on(NotificationKind::Search, move |_, _| {
        let left = remaining.get();
        remaining.set(left.saturating_sub(1));
        Verdict::from(left == 0)
    });
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "ap").unwrap();
    driver.press(input, KeyCode::Down).unwrap();
    assert!(!driver.is_open(input));

    driver.advance_ms(500).unwrap();
    assert_eq!(driver.rendered_values(input), ["apple", "apricot"]);
    assert_eq!(driver.focused_index(input), Some(-1));
}

#[test]
fn enter_on_an_item_selects_it() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(fruit())).unwrap();
    driver.type_str(input, "ap").unwrap();

    driver.press(input, KeyCode::Down).unwrap();
    driver.press(input, KeyCode::Down).unwrap();
    driver.press(input, KeyCode::Enter).unwrap();

    let widget = driver.widget(input).unwrap();
    assert_eq!(driver.dom.input_value(input), "apricot");
    assert_eq!(driver.dom.data(input, "label"), Some("apricot"));
    assert_eq!(widget.selected_label(), Some("apricot"));
    assert_eq!(widget.previous_value(), "apricot");
    assert!(!widget.is_open());
    assert_eq!(driver.dom.focus(), Some(DomFocus::Input(input)));
}

#[test]
fn refocus_after_select_does_not_reopen() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(fruit())).unwrap();
    driver.type_str(input, "ap").unwrap();
    driver.click_item(input, 0).unwrap();

    // The host echoes the programmatic focus back.
    driver.focus(input).unwrap();
    assert!(!driver.is_open(input));

    // A later, genuine focus searches again.
    driver.focus(input).unwrap();
    assert!(driver.is_open(input));
}

#[test]
fn enter_on_the_input_does_nothing() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(fruit())).unwrap();
    driver.type_str(input, "ap").unwrap();

    driver.press(input, KeyCode::Enter).unwrap();
    assert!(driver.is_open(input));
    assert_eq!(driver.dom.input_value(input), "ap");
}

#[test]
fn clicking_an_item_selects_it() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(fruit())).unwrap();
    driver.type_str(input, "ap").unwrap();

    driver.click_item(input, 1).unwrap();
    assert_eq!(driver.dom.input_value(input), "apricot");
    assert!(!driver.is_open(input));
}

#[test]
fn suppressed_select_keeps_the_value_but_closes() {
    let settings = immediate(fruit()).on(NotificationKind::Select, |_, _| Verdict::Suppressed);
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();
    driver.type_str(input, "ap").unwrap();

    driver.click_item(input, 0).unwrap();
    assert_eq!(driver.dom.input_value(input), "ap");
    assert_eq!(driver.widget(input).unwrap().selected_label(), None);
    assert!(!driver.is_open(input));
}

#[test]
fn escape_and_tab_close() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(fruit())).unwrap();
    driver.type_str(input, "ap").unwrap();

    driver.press(input, KeyCode::Escape).unwrap();
    assert!(!driver.is_open(input));

    driver.focus(input).unwrap();
    driver.press(input, KeyCode::Down).unwrap();
    driver.press(input, KeyCode::Tab).unwrap();
    assert!(!driver.is_open(input));
    assert_eq!(driver.focused_index(input), None);
}

#[test]
fn escape_while_closed_drops_the_scheduled_search() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, fruit()).unwrap();
    driver.type_str(input, "ap").unwrap();
    assert!(driver.widget(input).unwrap().pending_delay().is_some());

    driver.press(input, KeyCode::Escape).unwrap();
    assert_eq!(driver.widget(input).unwrap().pending_delay(), None);

    driver.advance_ms(500).unwrap();
    assert!(!driver.is_open(input));
    assert!(driver.rendered_values(input).is_empty());
}

#[test]
fn escape_while_waiting_for_results_cancels_the_request() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, remote()).unwrap();
    driver.type_str(input, "ab").unwrap();
    driver.press(input, KeyCode::Down).unwrap();
    let request = driver.request_for("ab").unwrap();

    driver.press(input, KeyCode::Escape).unwrap();
    assert!(driver.http.is_canceled(request.token));

    driver.respond_with(&request, &["abc", "abd"]).unwrap();
    assert!(!driver.is_open(input));
    assert_eq!(driver.focused_index(input), None);
    assert_ne!(driver.dom.focus(), Some(DomFocus::Item(input, 0)));
}

#[test]
fn programmatic_close_while_waiting_cancels_the_request() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, remote()).unwrap();
    driver.type_str(input, "ab").unwrap();
    driver.press(input, KeyCode::Down).unwrap();
    let request = driver.request_for("ab").unwrap();

    driver.close(input);
    assert!(driver.http.is_canceled(request.token));
    assert!(!driver.widget(input).unwrap().has_pending_request());
}

#[test]
fn pointer_focus_on_an_item_syncs_state() {
    let focused = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&focused);
    let settings = immediate(fruit()).on(NotificationKind::Focus, move |_, n| {
        if let Notification::Focus { index } = n {
            log.borrow_mut().push(*index);
        }
        Verdict::Allowed
    });
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();
    driver.type_str(input, "ap").unwrap();

    driver.focus_item(input, 1).unwrap();
    assert_eq!(driver.focused_index(input), Some(1));

    // Past the end of the list: ignored.
    driver.focus_item(input, 9).unwrap();
    assert_eq!(driver.focused_index(input), Some(1));
    assert_eq!(*focused.borrow(), [1]);
}

#[test]
fn suppressed_close_keeps_user_closes_open() {
    let settings = immediate(Settings::new().with_list(["apple"]).with_min_length(1))
        .on(NotificationKind::Close, |_, _| Verdict::Suppressed);
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();
    driver.type_str(input, "a").unwrap();

    driver.press(input, KeyCode::Escape).unwrap();
    driver.outside_click(None);
    driver.close(input);
    assert!(driver.is_open(input));

    // Empty results close regardless.
    driver.type_str(input, "x").unwrap();
    assert!(!driver.is_open(input));
}

#[test]
fn close_reasons_reach_the_hook() {
    let reasons = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&reasons);
    let settings = immediate(fruit()).on(NotificationKind::Close, move |_, n| {
        if let Notification::Close { reason } = n {
            log.borrow_mut().push(*reason);
        }
        Verdict::Allowed
    });
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "a").unwrap();
    driver.press(input, KeyCode::Escape).unwrap();
    driver.focus(input).unwrap();
    driver.press(input, KeyCode::Up).unwrap();
    driver.focus(input).unwrap();
    driver.outside_click(None);
    driver.focus(input).unwrap();
    driver.click_item(input, 0).unwrap();

    assert_eq!(
        *reasons.borrow(),
        [
            CloseReason::Escape,
            CloseReason::Up,
            CloseReason::OutsideClick,
            CloseReason::Selected,
        ]
    );
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn outside_click_spares_the_originating_widget() {
    let mut driver = Driver::new();
    let first = driver.attach_input(1, immediate(fruit())).unwrap();
    let second = driver.attach_input(2, immediate(fruit())).unwrap();
    driver.type_str(first, "a").unwrap();
    driver.type_str(second, "b").unwrap();

    driver.outside_click(Some(first));
    assert!(driver.is_open(first));
    assert!(!driver.is_open(second));

    driver.outside_click(None);
    assert!(!driver.is_open(first));
}

#[test]
fn attach_rejects_non_text_inputs() {
    let mut driver = Driver::new();
    let textarea = driver.dom.add_element(7);
    let err = driver.attach(textarea, fruit()).unwrap_err();
    assert_eq!(err, AutocompleteError::UnsupportedElement(textarea));
    assert!(driver.registry.is_empty());
}

#[test]
fn attach_twice_is_an_error() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, fruit()).unwrap();
    let err = driver.attach(input, fruit()).unwrap_err();
    assert_eq!(err, AutocompleteError::AlreadyAttached(input));
    assert_eq!(driver.registry.len(), 1);
}

#[test]
fn attach_rejects_blank_remote_field_name() {
    let mut driver = Driver::new();
    let input = driver.dom.add_text_input(1, "");
    let err = driver
        .attach(input, remote().with_field_name(" "))
        .unwrap_err();
    assert_eq!(err, AutocompleteError::InvalidFieldName(" ".to_owned()));
}

#[test]
fn attach_decorates_and_subscribes() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, fruit()).unwrap();

    assert!(driver.dom.is_subscribed(input));
    let decoration = driver.dom.decoration(input).unwrap();
    assert!(decoration.wrap);
    assert_eq!(decoration.class_prefix, "autocomplete");
    assert_eq!(driver.registry.lookup(input).map(|id| id.index()), Some(0));
}

#[test]
fn destroy_restores_the_element() {
    let mut driver = Driver::new();
    let input = driver.dom.add_text_input(1, "original");
    driver.attach(input, immediate(fruit())).unwrap();
    driver.paste(input, "ap").unwrap();
    driver.click_item(input, 0).unwrap();

    assert!(driver.destroy(input).unwrap());
    assert_eq!(driver.dom.input_value(input), "original");
    assert_eq!(driver.dom.data(input, "label"), None);
    assert!(!driver.dom.is_subscribed(input));
    assert!(driver.dom.decoration(input).is_none());
    assert!(driver.registry.is_empty());

    assert!(!driver.destroy(input).unwrap());
}

#[test]
fn destroy_cancels_in_flight_work_and_drops_late_completions() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, immediate(remote())).unwrap();
    driver.type_str(input, "a").unwrap();
    let request = driver.request_for("a").unwrap();

    driver.destroy(input).unwrap();
    assert!(driver.http.is_canceled(request.token));

    // Same element, same slot, new generation.
    let id = driver.attach(input, immediate(remote())).unwrap();
    assert_ne!(id, request.ticket.instance);
    driver.respond_with(&request, &["abc"]).unwrap();
    assert!(!driver.is_open(input));
}

#[test]
fn unknown_elements_are_ignored() {
    let mut driver = Driver::new();
    let ghost = driver.dom.add_text_input(5, "ap");
    driver.send(ghost, &Event::key(KeyCode::Down)).unwrap();
    driver.close(ghost);
    driver.trigger(ghost, Command::Open).unwrap();
    assert!(driver.registry.is_empty());
}

#[test]
fn commands_open_and_close() {
    let mut driver = Driver::new();
    let input = driver.attach_input(1, fruit()).unwrap();
    driver.dom.fill(input, "ban");

    driver.trigger(input, Command::Open).unwrap();
    assert_eq!(driver.rendered_values(input), ["banana"]);

    driver.trigger(input, Command::Close).unwrap();
    assert!(!driver.is_open(input));
}

#[test]
fn notifications_follow_the_pipeline() {
    let kinds = [
        NotificationKind::Create,
        NotificationKind::Change,
        NotificationKind::Search,
        NotificationKind::Response,
        NotificationKind::Open,
        NotificationKind::Focus,
        NotificationKind::Select,
        NotificationKind::Close,
    ];
    let seen = Rc::new(RefCell::new(Vec::new()));
    let settings = kinds.into_iter().fold(immediate(fruit()), |settings, kind| {
        let log = Rc::clone(&seen);
        settings.on(kind, move |_, n| {
            log.borrow_mut().push(n.kind());
            Verdict::Allowed
        })
    });
    let mut driver = Driver::new();
    let input = driver.attach_input(1, settings).unwrap();

    driver.type_str(input, "b").unwrap();
    driver.press(input, KeyCode::Down).unwrap();
    driver.press(input, KeyCode::Enter).unwrap();

    assert_eq!(*seen.borrow(), kinds);
}

#[test]
fn hooks_see_their_instance() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let settings = fruit().on(NotificationKind::Create, move |ctx, _| {
        log.borrow_mut().push(ctx.element);
        Verdict::Allowed
    });
    let mut driver = Driver::new();
    let input = driver.attach_input(3, settings).unwrap();
    assert_eq!(*seen.borrow(), [input]);
}
