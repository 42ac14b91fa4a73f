//! # Router Module
//!
//! Resolves incoming requests against a frozen route table and generates
//! paths for named routes.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Freezing a [`RouteMap`](crate::map::RouteMap) into a shareable table
//! - Trying each route in table order until one matches
//! - Reporting the closest miss when nothing matches (404 vs 405)
//! - Generating paths by route name
//!
//! ## Architecture
//!
//! Routes are built up in a mutable `RouteMap`, then handed to
//! [`Router::new`]. The router wraps the routes in `Arc`s and stores the table
//! in an `ArcSwap`, so resolution takes no locks and [`Router::reload`] can
//! replace the whole table while requests are in flight.
//!
//! ## Example
//!
//! ```rust
//! use routemap::map::RouteMap;
//! use routemap::request::Request;
//! use routemap::router::{Resolution, Router};
//! use routemap::runtime_config::RuntimeConfig;
//!
//! # fn main() -> Result<(), routemap::error::RouteError> {
//! let mut map = RouteMap::new();
//! map.route("pet.read", "/pets/{id}")?
//!     .add_tokens([("id", r"(\d+)")])
//!     .allow(["GET"]);
//!
//! let router = Router::with_config(map, RuntimeConfig::default());
//! let request = Request::new("/pets/123").with_method("GET");
//!
//! if let Resolution::Matched(found) = router.route(&request)? {
//!     assert_eq!(found.name(), "pet.read");
//!     assert_eq!(found.get("id"), Some(&serde_json::json!(123)));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Performance
//!
//! Matching is O(n) in the number of routes. Each route's regex is compiled
//! once and cached on the route; set `ROUTEMAP_PRECOMPILE=on` to pay that
//! cost when the table is loaded instead of on the first request.

mod core;
#[cfg(test)]
mod tests;

pub use core::{FailedRoute, Resolution, RouteMatch, RouteTable, Router};
