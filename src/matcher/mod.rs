//! # Matcher Module
//!
//! Decides whether a single [`Route`](crate::route::Route) fits a
//! [`Request`](crate::request::Request), and if so which values it yields.
//!
//! Matching is a pure function of the route and the request: the outcome is
//! returned as a [`MatchOutcome`] instead of being stored on the route, so one
//! route can be tested from many threads at once.
//!
//! ## Rules
//!
//! 1. **Routable** - generation-only routes never match
//! 2. **Path** - the whole path must fit the compiled template
//! 3. **Method** - checked only when the route restricts methods
//! 4. **Secure** - `HTTPS=on` or `SERVER_PORT=443` counts as HTTPS
//! 5. **Custom** - the route's [`MatchHook`](crate::route::MatchHook), if any
//!
//! Choosing between several routes that could fit the same path is the
//! caller's job; [`crate::router::Router`] tries them in table order.
//!
//! ## Example
//!
//! ```rust
//! use routemap::{matcher, request::Request, route::Route};
//! use serde_json::json;
//!
//! let route = Route::new("edit", r"/blog/{id:(\d+)}/edit");
//! let outcome = matcher::match_route(&route, &Request::new("/blog/42/edit")).unwrap();
//! assert_eq!(outcome.values().unwrap()["id"], json!(42));
//! ```

mod core;

pub use core::{is_match, match_route, FailedRule, MatchOutcome};
