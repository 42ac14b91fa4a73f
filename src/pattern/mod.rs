//! # Pattern Module
//!
//! Turns route templates into the two forms the rest of the crate works with:
//!
//! 1. **Generation template**: the template with inline syntax desugared, so every
//!    placeholder reads `{name}` and an optional group reads `{/a,b}`.
//! 2. **Match expression**: an anchored [`regex::Regex`] with one named capture per
//!    placeholder.
//!
//! ## Placeholder Grammar
//!
//! | Form | Meaning |
//! |------|---------|
//! | `{name}` | Token subpattern, or `([^/]+)` when none is registered |
//! | `{name:(sub)}` | Registers `(sub)` as the token for `name` |
//! | `{:name}`, `{:name:(sub)}` | Legacy spelling of the two forms above |
//! | `{/a,b,c}` | Sequentially optional `/a/b/c` suffix |
//!
//! Token subpatterns must be capturing groups (start with `(`). The leading
//! parenthesis is rewritten to `(?P<name>` when the expression is assembled.
//!
//! ## Example
//!
//! ```rust
//! use routemap::pattern::compile;
//! use std::collections::HashMap;
//!
//! let mut tokens = HashMap::new();
//! tokens.insert("id".to_string(), r"(\d+)".to_string());
//!
//! let pattern = compile("/blog/{id}/edit", &tokens, None).unwrap();
//! assert!(pattern.regex().is_match("/blog/42/edit"));
//! assert!(!pattern.regex().is_match("/blog/abc/edit"));
//! ```

mod core;

pub(crate) use core::{scan, Segment};
pub use core::{
    compile, parse_template, remove_params, CompiledPattern, DEFAULT_SUBPATTERN,
    MAX_INLINE_OPTIONAL,
};
