//! # Route Module
//!
//! The [`Route`] entity: a name, a path template and the constraints the
//! matcher and generator apply to it.
//!
//! ## Fields
//!
//! - **tokens** - per-placeholder regex subpatterns (capturing groups)
//! - **defaults** - values present in every match and merged under generation data
//! - **allows** - accepted request methods (empty = any)
//! - **secure** - [`Secure::Https`], [`Secure::Plain`] or [`Secure::Any`]
//! - **wildcard** - placeholder that collects the remaining path segments
//! - **routable** - `false` for routes used only to generate paths
//! - **auth / handler / extras** - collaborator metadata, carried but not interpreted
//! - **hooks** - [`MatchHook`] and [`GenerateHook`] capabilities
//!
//! Routes are usually created through [`crate::map::RouteMap`], which applies
//! scope prefixes and inherited settings via [`RouteTemplate`].

mod core;
mod hooks;
#[cfg(test)]
mod tests;

pub use core::{Route, RouteTemplate, Secure};
pub use hooks::{GenerateHook, MatchHook};
