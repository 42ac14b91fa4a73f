//! # Map Module
//!
//! [`RouteMap`] is the route collection: it registers named routes, groups
//! them with [`attach`](RouteMap::attach) scopes and orders them for matching.
//!
//! ## Scopes
//!
//! ```rust
//! use routemap::map::RouteMap;
//!
//! let mut map = RouteMap::new();
//! map.route("before", "/foo")?;
//!
//! map.attach("blog.", "/blog", |blog| {
//!     blog.add_tokens([("id", r"(\d+)")]).allow(["GET"]);
//!     blog.route("read", "/{id}")?;
//!     blog.attach("admin.", "/admin", |admin| {
//!         admin.set_secure(true);
//!         admin.route("edit", "/{id}/edit")?;
//!         Ok(())
//!     })
//! })?;
//!
//! assert_eq!(map.get("blog.read").unwrap().path(), "/blog/{id}");
//! assert_eq!(map.get("blog.admin.edit").unwrap().path(), "/blog/admin/{id}/edit");
//! # Ok::<(), routemap::RouteError>(())
//! ```
//!
//! ## Ordering
//!
//! Without [`sort`](RouteMap::sort) routes are tried in registration order.
//! After sorting, routes with more literal path text come first.
//!
//! ## Snapshots
//!
//! [`get_routes`](RouteMap::get_routes) and [`set_routes`](RouteMap::set_routes)
//! move the whole registry in and out, so a caller can cache a built map with
//! serde and restore it later. Hooks are not serialized.

mod core;
mod scope;

pub use core::RouteMap;
pub use scope::Scope;
