#![forbid(unsafe_code)]

//! Deterministic test doubles for the suggest widget.
//!
//! - [`FakeDom`]: in-memory [`UiBinding`](suggest_widgets::UiBinding) that
//!   records every call
//! - [`FakeHttp`]: [`HttpClient`](suggest_widgets::HttpClient) that keeps
//!   requests in flight until the test completes or fails them
//! - [`Driver`]: plays the host, turning "type", "press", "advance" and
//!   "respond" into events, ticks and completions
//!
//! # Quick Start
//!
//! ```
//! use suggest_harness::Driver;
//! use suggest_widgets::Settings;
//!
//! let mut driver = Driver::new();
//! let input = driver
//!     .attach_input(1, Settings::new().with_list(["apple", "apricot", "banana"]).with_min_length(1))
//!     .unwrap();
//! driver.type_str(input, "ap").unwrap();
//! driver.advance_ms(500).unwrap();
//! assert_eq!(driver.rendered_values(input), ["apple", "apricot"]);
//! ```

pub mod dom;
pub mod driver;
pub mod http;

pub use dom::{DomFocus, DomOp, FakeDom};
pub use driver::Driver;
pub use http::{FakeHttp, IssuedRequest};
