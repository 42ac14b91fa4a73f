use serde_json::Value;

use super::core::RouteMap;
use crate::error::RouteError;
use crate::route::{Route, RouteTemplate, Secure};

/// Handle onto a [`RouteMap`] inside an [`attach`](RouteMap::attach) block.
///
/// Each scope owns its own [`RouteTemplate`], derived by value from the
/// enclosing one. Settings only affect routes declared later in this scope
/// and in scopes nested inside it.
///
/// The setters share their names with the [`Route`] builders: `add_*` merges
/// into a collection, `allow` extends the method set, `set_*` replaces.
pub struct Scope<'m> {
    map: &'m mut RouteMap,
    template: RouteTemplate,
}

impl<'m> Scope<'m> {
    pub(crate) fn new(map: &'m mut RouteMap, template: RouteTemplate) -> Self {
        Self { map, template }
    }

    /// The settings routes in this scope inherit
    #[must_use]
    pub fn template(&self) -> &RouteTemplate {
        &self.template
    }

    /// Create and register a route with this scope's prefixes and settings.
    ///
    /// # Errors
    ///
    /// [`RouteError::RouteAlreadyExists`] if the prefixed name is taken.
    pub fn route(&mut self, name: &str, path: &str) -> Result<&mut Route, RouteError> {
        self.map.add(Route::from_template(&self.template, name, path))
    }

    /// Open a nested scope; prefixes are appended to this scope's prefixes.
    ///
    /// # Errors
    ///
    /// Whatever the callback returns.
    pub fn attach<F>(&mut self, name_prefix: &str, path_prefix: &str, build: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<(), RouteError>,
    {
        let template = self.template.child(name_prefix, path_prefix);
        let mut scope = Scope::new(&mut *self.map, template);
        build(&mut scope)
    }

    /// Merge token subpatterns
    pub fn add_tokens<I, K, V>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.template
            .tokens
            .extend(tokens.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add accepted request methods
    pub fn allow<I, M>(&mut self, methods: I) -> &mut Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        self.template
            .allows
            .extend(methods.into_iter().map(Into::into));
        self
    }

    /// Merge default values
    pub fn add_defaults<I, K, V>(&mut self, defaults: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.template
            .defaults
            .extend(defaults.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn set_secure(&mut self, secure: impl Into<Secure>) -> &mut Self {
        self.template.secure = secure.into();
        self
    }

    pub fn set_wildcard(&mut self, name: impl Into<String>) -> &mut Self {
        self.template.wildcard = Some(name.into());
        self
    }

    pub fn set_routable(&mut self, routable: bool) -> &mut Self {
        self.template.routable = routable;
        self
    }

    pub fn set_auth(&mut self, auth: impl Into<Value>) -> &mut Self {
        self.template.auth = Some(auth.into());
        self
    }

    pub fn set_handler(&mut self, handler: impl Into<String>) -> &mut Self {
        self.template.handler = Some(handler.into());
        self
    }

    /// Merge free-form metadata
    pub fn add_extras<I, K, V>(&mut self, extras: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.template
            .extras
            .extend(extras.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}
