//! # Generator Module
//!
//! Reverse routing: renders a concrete path from a [`Route`](crate::route::Route)
//! and a map of values.
//!
//! ## Steps
//!
//! 1. Merge the route defaults with the caller's data (caller wins)
//! 2. Run the route's [`GenerateHook`](crate::route::GenerateHook), if any
//! 3. Substitute every `{name}` that has a scalar (or null) value
//! 4. Expand the first `{/a,b,c}` group left to right, stopping at the first
//!    missing name
//! 5. Append one segment per element of the wildcard array
//!
//! Values are raw-URL encoded: only `A-Z a-z 0-9 - _ . ~` pass through
//! unchanged, spaces become `%20`. Use [`generate_raw`] to skip encoding.
//!
//! Numbers render in their JSON form and booleans as `true` / `false`, so
//! `{"on": true}` fills `{on}` with `true` rather than `1`. Pass strings when
//! a different spelling is needed.
//!
//! Generation does not check the result against the route's match
//! expression; the two operations only share the template.

mod core;
#[cfg(test)]
mod tests;

pub use core::{generate, generate_raw};
