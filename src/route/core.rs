use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

use super::hooks::{GenerateHook, MatchHook};
use crate::error::RouteError;
use crate::pattern::{self, CompiledPattern};
use crate::Values;

/// Scheme requirement for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Secure {
    /// Either scheme is accepted
    #[default]
    Any,
    /// Only HTTPS requests match
    Https,
    /// Only plain HTTP requests match
    Plain,
}

impl From<bool> for Secure {
    fn from(secure: bool) -> Self {
        if secure {
            Secure::Https
        } else {
            Secure::Plain
        }
    }
}

impl From<Option<bool>> for Secure {
    fn from(secure: Option<bool>) -> Self {
        secure.map_or(Secure::Any, Secure::from)
    }
}

/// Write-once cache for the compiled match expression.
///
/// Cloning a route shares the already compiled pattern; a route that was
/// never matched clones into an empty cell.
#[derive(Debug, Default)]
struct PatternCell(OnceLock<Arc<CompiledPattern>>);

impl Clone for PatternCell {
    fn clone(&self) -> Self {
        match self.0.get() {
            Some(compiled) => Self(OnceLock::from(Arc::clone(compiled))),
            None => Self::default(),
        }
    }
}

fn default_routable() -> bool {
    true
}

/// A named, parameterized route.
///
/// Holds the template and everything the matcher and generator need to
/// interpret it. Match results are never written back into the route; see
/// [`crate::matcher::match_route`].
///
/// The serialized form covers every data field. Hooks and the compiled
/// pattern cache are skipped and must be re-attached after a restore.
#[derive(Clone, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    name: String,
    path: String,
    #[serde(default)]
    tokens: HashMap<String, String>,
    #[serde(default)]
    defaults: Values,
    #[serde(default)]
    allows: BTreeSet<String>,
    #[serde(default)]
    secure: Secure,
    #[serde(default)]
    wildcard: Option<String>,
    #[serde(default = "default_routable")]
    routable: bool,
    #[serde(default)]
    auth: Option<Value>,
    #[serde(default)]
    handler: Option<String>,
    #[serde(default)]
    extras: Values,
    #[serde(skip)]
    match_hook: Option<Arc<dyn MatchHook>>,
    #[serde(skip)]
    generate_hook: Option<Arc<dyn GenerateHook>>,
    #[serde(skip)]
    compiled: PatternCell,
}

impl Route {
    /// Create a route from a name and a path template.
    ///
    /// Inline placeholder syntax (`{id:(\d+)}`, `{:id}`) is desugared here: the
    /// stored path only holds plain `{id}` placeholders and the inline
    /// subpatterns land in the token map. Subpatterns are not validated until
    /// the first match attempt.
    pub fn new(name: impl Into<String>, path: &str) -> Self {
        let (path, tokens) = pattern::parse_template(path);
        Self {
            name: name.into(),
            path,
            tokens,
            defaults: Values::new(),
            allows: BTreeSet::new(),
            secure: Secure::Any,
            wildcard: None,
            routable: true,
            auth: None,
            handler: None,
            extras: Values::new(),
            match_hook: None,
            generate_hook: None,
            compiled: PatternCell::default(),
        }
    }

    /// Create a route that inherits everything declared on a template.
    ///
    /// The template's name prefix is applied to non-empty names and its path
    /// prefix to every path that is not a full URI. Inline subpatterns win
    /// over inherited tokens.
    pub fn from_template(template: &RouteTemplate, name: &str, path: &str) -> Self {
        let name = if name.is_empty() {
            String::new()
        } else {
            format!("{}{}", template.name_prefix, name)
        };
        let path = if path.contains("://") {
            path.to_string()
        } else {
            format!("{}{}", template.path_prefix, path)
        };

        let mut route = Route::new(name, &path);
        let inline = std::mem::take(&mut route.tokens);
        route.tokens = template.tokens.clone();
        route.tokens.extend(inline);
        route.defaults = template.defaults.clone();
        route.allows = template.allows.clone();
        route.secure = template.secure;
        route.wildcard = template.wildcard.clone();
        route.routable = template.routable;
        route.auth = template.auth.clone();
        route.handler = template.handler.clone();
        route.extras = template.extras.clone();
        route
    }

    /// Route name; empty for unnamed routes
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generation template, with inline syntax already desugared
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Placeholder subpatterns
    #[must_use]
    pub fn tokens(&self) -> &HashMap<String, String> {
        &self.tokens
    }

    /// Values seeded before matching and merged under generation data
    #[must_use]
    pub fn defaults(&self) -> &Values {
        &self.defaults
    }

    /// Accepted request methods; empty means any
    #[must_use]
    pub fn allows(&self) -> &BTreeSet<String> {
        &self.allows
    }

    #[must_use]
    pub fn secure(&self) -> Secure {
        self.secure
    }

    /// Name of the trailing multi-segment placeholder
    #[must_use]
    pub fn wildcard(&self) -> Option<&str> {
        self.wildcard.as_deref()
    }

    /// False for generation-only routes
    #[must_use]
    pub fn is_routable(&self) -> bool {
        self.routable
    }

    #[must_use]
    pub fn auth(&self) -> Option<&Value> {
        self.auth.as_ref()
    }

    #[must_use]
    pub fn handler(&self) -> Option<&str> {
        self.handler.as_deref()
    }

    #[must_use]
    pub fn extras(&self) -> &Values {
        &self.extras
    }

    #[must_use]
    pub fn match_hook(&self) -> Option<&dyn MatchHook> {
        self.match_hook.as_deref()
    }

    #[must_use]
    pub fn generate_hook(&self) -> Option<&dyn GenerateHook> {
        self.generate_hook.as_deref()
    }

    /// Length of the template's literal text, used to order routes.
    #[must_use]
    pub fn specificity(&self) -> usize {
        pattern::remove_params(&self.path).len()
    }

    /// Merge subpatterns into the token map
    pub fn add_tokens<I, K, V>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tokens
            .extend(tokens.into_iter().map(|(k, v)| (k.into(), v.into())));
        self.compiled = PatternCell::default();
        self
    }

    /// Add accepted request methods
    pub fn allow<I, M>(&mut self, methods: I) -> &mut Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        self.allows.extend(methods.into_iter().map(Into::into));
        self
    }

    /// Merge default values
    pub fn add_defaults<I, K, V>(&mut self, defaults: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.defaults
            .extend(defaults.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn set_secure(&mut self, secure: impl Into<Secure>) -> &mut Self {
        self.secure = secure.into();
        self
    }

    pub fn set_wildcard(&mut self, name: impl Into<String>) -> &mut Self {
        self.wildcard = Some(name.into());
        self.compiled = PatternCell::default();
        self
    }

    pub fn set_routable(&mut self, routable: bool) -> &mut Self {
        self.routable = routable;
        self
    }

    pub fn set_auth(&mut self, auth: impl Into<Value>) -> &mut Self {
        self.auth = Some(auth.into());
        self
    }

    pub fn set_handler(&mut self, handler: impl Into<String>) -> &mut Self {
        self.handler = Some(handler.into());
        self
    }

    /// Merge free-form metadata
    pub fn add_extras<I, K, V>(&mut self, extras: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.extras
            .extend(extras.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn set_match_hook(&mut self, hook: impl MatchHook + 'static) -> &mut Self {
        self.match_hook = Some(Arc::new(hook));
        self
    }

    pub fn set_generate_hook(&mut self, hook: impl GenerateHook + 'static) -> &mut Self {
        self.generate_hook = Some(Arc::new(hook));
        self
    }

    /// Compiled match expression, built on first use and cached.
    ///
    /// A failed compilation is not cached, so every match attempt against a
    /// misconfigured route reports the error again.
    ///
    /// # Errors
    ///
    /// [`RouteError::BadSubpattern`] or [`RouteError::InvalidRegex`] when the
    /// template and tokens do not form a valid expression.
    pub fn pattern(&self) -> Result<Arc<CompiledPattern>, RouteError> {
        if let Some(compiled) = self.compiled.0.get() {
            return Ok(Arc::clone(compiled));
        }

        let compiled = Arc::new(pattern::compile(
            &self.path,
            &self.tokens,
            self.wildcard.as_deref(),
        )?);
        debug!(
            route_name = %self.name,
            path = %self.path,
            regex = %compiled.regex().as_str(),
            "Route pattern cached"
        );
        Ok(Arc::clone(self.compiled.0.get_or_init(|| compiled)))
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("tokens", &self.tokens)
            .field("defaults", &self.defaults)
            .field("allows", &self.allows)
            .field("secure", &self.secure)
            .field("wildcard", &self.wildcard)
            .field("routable", &self.routable)
            .field("auth", &self.auth)
            .field("handler", &self.handler)
            .field("extras", &self.extras)
            .field("match_hook", &self.match_hook.is_some())
            .field("generate_hook", &self.generate_hook.is_some())
            .finish()
    }
}

/// Routes compare equal when their data fields match; hooks and the pattern
/// cache are ignored.
impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.path == other.path
            && self.tokens == other.tokens
            && self.defaults == other.defaults
            && self.allows == other.allows
            && self.secure == other.secure
            && self.wildcard == other.wildcard
            && self.routable == other.routable
            && self.auth == other.auth
            && self.handler == other.handler
            && self.extras == other.extras
    }
}

/// Settings shared by every route declared in an attach scope.
///
/// Child templates are derived by value from their parent, so a scope can
/// never change what its parent or siblings declare.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTemplate {
    pub(crate) name_prefix: String,
    pub(crate) path_prefix: String,
    pub(crate) tokens: HashMap<String, String>,
    pub(crate) defaults: Values,
    pub(crate) allows: BTreeSet<String>,
    pub(crate) secure: Secure,
    pub(crate) wildcard: Option<String>,
    pub(crate) routable: bool,
    pub(crate) auth: Option<Value>,
    pub(crate) handler: Option<String>,
    pub(crate) extras: Values,
}

impl Default for RouteTemplate {
    fn default() -> Self {
        Self {
            name_prefix: String::new(),
            path_prefix: String::new(),
            tokens: HashMap::new(),
            defaults: Values::new(),
            allows: BTreeSet::new(),
            secure: Secure::Any,
            wildcard: None,
            routable: true,
            auth: None,
            handler: None,
            extras: Values::new(),
        }
    }
}

impl RouteTemplate {
    /// A child template with both prefixes extended
    #[must_use]
    pub fn child(&self, name_prefix: &str, path_prefix: &str) -> Self {
        let mut child = self.clone();
        child.name_prefix.push_str(name_prefix);
        child.path_prefix.push_str(path_prefix);
        child
    }

    #[must_use]
    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    #[must_use]
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }
}
