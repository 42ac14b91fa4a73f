//! # routemap
//!
//! **routemap** is a web routing library: it matches incoming request paths
//! against a collection of named route templates, extracts the parameters,
//! and generates paths back from route names and values.
//!
//! ## Overview
//!
//! Routes are described with path templates such as `/blog/{id}{format}`.
//! Each placeholder captures a path segment, optionally constrained by a
//! regular-expression subpattern ("token"). On top of the path, a route can
//! restrict the request method, require (or forbid) HTTPS, and run a custom
//! match hook that sees the full server environment.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`pattern`]** - Template parsing and compilation to anchored regexes
//! - **[`route`]** - The route definition, its builders and its hooks
//! - **[`matcher`]** - Matching one route against one request
//! - **[`generator`]** - Turning a route and values back into a path
//! - **[`map`]** - The mutable collection of routes, with nested scopes
//! - **[`router`]** - A frozen, shareable table that resolves requests
//! - **[`request`]** - The request path plus its server environment
//! - **[`runtime_config`]** - Environment variable configuration
//! - **[`error`]** - The [`RouteError`] type
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App
//!     participant Router
//!     participant Route
//!     participant Pattern as pattern::compile
//!
//!     App->>Router: route(&request)
//!     loop table order
//!         Router->>Route: match_route(route, request)
//!         Route->>Pattern: pattern() (compiled once, cached)
//!         Pattern-->>Route: anchored regex
//!         Route-->>Router: Matched(values) / Failed(rule)
//!     end
//!     Router-->>App: Resolution
//! ```
//!
//! ## Template Syntax
//!
//! | Template                 | Meaning                                           |
//! |--------------------------|---------------------------------------------------|
//! | `{id}`                   | Required parameter, `([^/]+)` unless a token says otherwise |
//! | `{id:(\d+)}`             | Required parameter with an inline subpattern      |
//! | `{:id}` / `{:id:(\d+)}`  | Legacy spelling of the two forms above            |
//! | `{/year,month,day}`      | Sequential optional parameters, each after a `/`  |
//!
//! A route can also carry a wildcard name: whatever follows the template is
//! split on `/` and returned under that name as an array.
//!
//! ## Quick Start
//!
//! ```rust
//! use routemap::{Request, Resolution, RouteMap, Router, RuntimeConfig, Values};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), routemap::RouteError> {
//! let mut map = RouteMap::new();
//! map.attach("blog.", "/blog", |blog| {
//!     blog.add_tokens([("id", r"(\d+)"), ("format", r"(\.[^/]+)?")])
//!         .add_defaults([("format", ".html")]);
//!     blog.route("browse", "/")?;
//!     blog.route("read", "/{id}{format}")?.allow(["GET"]);
//!     Ok(())
//! })?;
//!
//! let router = Router::with_config(map, RuntimeConfig::default());
//!
//! let request = Request::new("/blog/42.json").with_method("GET");
//! let Resolution::Matched(found) = router.route(&request)? else {
//!     panic!("expected a match");
//! };
//! assert_eq!(found.name(), "blog.read");
//! assert_eq!(found.get("id"), Some(&json!(42)));
//! assert_eq!(found.get("format"), Some(&json!(".json")));
//!
//! let data: Values = [("id".to_string(), json!(7))].into_iter().collect();
//! assert_eq!(router.generate("blog.read", &data)?, "/blog/7.html");
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! All diagnostics go through [`tracing`]. Install any subscriber to see them:
//! route resolution logs at `debug`/`info`, slow or failed resolutions at
//! `warn`, and pattern compilation at `debug`.

use std::collections::HashMap;

pub mod error;
pub mod generator;
pub mod map;
pub mod matcher;
pub mod pattern;
pub mod request;
pub mod route;
pub mod router;
pub mod runtime_config;

/// Parameter values keyed by name.
///
/// Used for route defaults, matched values and generation input. Matched
/// captures are strings, or unsigned integers when they are all digits;
/// wildcard values are arrays.
pub type Values = HashMap<String, serde_json::Value>;

pub use error::RouteError;
pub use map::{RouteMap, Scope};
pub use matcher::{FailedRule, MatchOutcome};
pub use request::Request;
pub use route::{GenerateHook, MatchHook, Route, Secure};
pub use router::{FailedRoute, Resolution, RouteMatch, Router};
pub use runtime_config::RuntimeConfig;
