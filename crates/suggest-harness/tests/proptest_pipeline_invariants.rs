#![forbid(unsafe_code)]

//! Property tests for the search pipeline.
//!
//! Each property builds a fresh [`Driver`] per case, so cases are independent.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use suggest_core::KeyCode;
use suggest_harness::Driver;
use suggest_widgets::{Settings, Suggestion};

fn immediate() -> Settings {
    Settings::new().with_delay(Duration::ZERO)
}

proptest! {
    /// The source is never asked for a query shorter than `min_length`, and
    /// the final value is always searched when it qualifies.
    #[test]
    fn length_gate_holds(text in "[a-c ]{0,8}", min_length in 0usize..5) {
        let queries = Rc::new(RefCell::new(Vec::<String>::new()));
        let log = Rc::clone(&queries);
        let settings = immediate()
            .with_min_length(min_length)
            .with_callback(move |q| {
                log.borrow_mut().push(q.to_owned());
                vec![Suggestion::text(q)]
            });
        let mut driver = Driver::new();
        let input = driver.attach_input(1, settings).unwrap();
        driver.type_str(input, &text).unwrap();

        let queries = queries.borrow();
        for query in queries.iter() {
            prop_assert!(query.chars().count() >= min_length);
        }
        if !text.is_empty() && text.chars().count() >= min_length {
            prop_assert_eq!(queries.last().map(String::as_str), Some(text.as_str()));
        }
    }

    /// Rendering never exceeds `max_results` and preserves source order.
    #[test]
    fn rendering_is_bounded(
        items in prop::collection::vec("a[a-z]{0,4}", 0..12),
        max_results in 0usize..6,
    ) {
        let settings = immediate()
            .with_min_length(1)
            .with_max_results(max_results)
            .with_list(items.clone());
        let mut driver = Driver::new();
        let input = driver.attach_input(1, settings).unwrap();
        driver.type_str(input, "a").unwrap();

        let limit = if max_results == 0 { items.len() } else { max_results.min(items.len()) };
        prop_assert_eq!(driver.rendered_values(input), items[..limit].to_vec());
        prop_assert_eq!(driver.is_open(input), limit > 0);
    }

    /// At most one request is in flight, and only the latest query can render,
    /// whatever order the responses arrive in.
    #[test]
    fn latest_request_wins(text in "[a-d]{1,8}", reverse in any::<bool>()) {
        let settings = immediate().with_min_length(1).with_remote("/s");
        let mut driver = Driver::new();
        let input = driver.attach_input(1, settings).unwrap();

        for ch in text.chars() {
            driver.type_str(input, &ch.to_string()).unwrap();
            prop_assert!(driver.http.in_flight().count() <= 1);
        }

        let mut issued = driver.http.issued().to_vec();
        if reverse {
            issued.reverse();
        }
        for request in &issued {
            driver.respond_with(request, &[request.query.as_str()]).unwrap();
        }
        prop_assert_eq!(driver.rendered_values(input), vec![text]);
    }

    /// Down walks every item and then returns to the input.
    #[test]
    fn navigation_cycles(count in 1usize..6, presses in 0usize..20) {
        let items: Vec<String> = (0..count).map(|i| format!("a{i}")).collect();
        let settings = immediate().with_min_length(1).with_list(items);
        let mut driver = Driver::new();
        let input = driver.attach_input(1, settings).unwrap();
        driver.type_str(input, "a").unwrap();

        for _ in 0..presses {
            driver.press(input, KeyCode::Down).unwrap();
        }

        let position = presses % (count + 1);
        let expected = if position == 0 { -1 } else { position as isize - 1 };
        prop_assert_eq!(driver.focused_index(input), Some(expected));
    }

    /// Closing and searching the same query again reproduces the same list.
    #[test]
    fn replay_is_idempotent(items in prop::collection::vec("[ab][a-z]{0,3}", 1..8)) {
        let settings = immediate().with_min_length(1).with_list(items);
        let mut driver = Driver::new();
        let input = driver.attach_input(1, settings).unwrap();
        driver.type_str(input, "a").unwrap();
        let first = driver.rendered_values(input);

        driver.press(input, KeyCode::Escape).unwrap();
        driver.focus(input).unwrap();
        prop_assert_eq!(driver.rendered_values(input), first);
    }
}
