use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, info};

use super::scope::Scope;
use crate::error::RouteError;
use crate::pattern;
use crate::route::{Route, RouteTemplate};

/// Ordered registry of routes.
///
/// Routes keep their registration order until [`RouteMap::sort`] is called.
/// Named routes are indexed for lookup; unnamed routes (empty name) are kept
/// in order but can never be found by name and never collide.
#[derive(Debug, Clone, Default)]
pub struct RouteMap {
    routes: Vec<Route>,
    index: HashMap<String, usize>,
}

impl RouteMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a route at the top level.
    ///
    /// The returned reference allows chained configuration:
    ///
    /// ```rust
    /// use routemap::map::RouteMap;
    ///
    /// let mut map = RouteMap::new();
    /// map.route("Account", "/api/account/{/t}")?
    ///     .set_auth(4)
    ///     .allow(["GET"])
    ///     .set_wildcard("other");
    /// # Ok::<(), routemap::RouteError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`RouteError::RouteAlreadyExists`] if `name` is non-empty and taken.
    pub fn route(&mut self, name: &str, path: &str) -> Result<&mut Route, RouteError> {
        self.add(Route::from_template(&RouteTemplate::default(), name, path))
    }

    /// Register an already built route.
    ///
    /// # Errors
    ///
    /// [`RouteError::RouteAlreadyExists`] if the route's name is non-empty
    /// and taken.
    pub fn add(&mut self, route: Route) -> Result<&mut Route, RouteError> {
        if !route.name().is_empty() {
            if self.index.contains_key(route.name()) {
                return Err(RouteError::RouteAlreadyExists {
                    name: route.name().to_string(),
                });
            }
            self.index.insert(route.name().to_string(), self.routes.len());
        }

        debug!(
            route_name = %route.name(),
            path = %route.path(),
            position = self.routes.len(),
            "Route registered"
        );
        self.routes.push(route);
        let last = self.routes.len() - 1;
        Ok(&mut self.routes[last])
    }

    /// Declare a group of routes sharing a name prefix, a path prefix and
    /// any settings made on the [`Scope`].
    ///
    /// Scopes nest: prefixes concatenate and settings are inherited unless
    /// the inner scope overrides them. Nothing declared inside the callback
    /// leaks to routes declared after it.
    ///
    /// # Errors
    ///
    /// Whatever the callback returns, typically
    /// [`RouteError::RouteAlreadyExists`].
    pub fn attach<F>(&mut self, name_prefix: &str, path_prefix: &str, build: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<(), RouteError>,
    {
        let template = RouteTemplate::default().child(name_prefix, path_prefix);
        let mut scope = Scope::new(self, template);
        build(&mut scope)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.index.get(name).map(|&i| &self.routes[i])
    }

    #[must_use]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Route> {
        let i = *self.index.get(name)?;
        Some(&mut self.routes[i])
    }

    /// Every route, in current order
    #[must_use]
    pub fn get_routes(&self) -> &[Route] {
        &self.routes
    }

    /// Replace the whole registry, e.g. with a snapshot restored from cache.
    ///
    /// The map is left untouched if the snapshot holds a duplicate name.
    ///
    /// # Errors
    ///
    /// [`RouteError::RouteAlreadyExists`] on a duplicate non-empty name.
    pub fn set_routes(&mut self, routes: Vec<Route>) -> Result<(), RouteError> {
        let index = build_index(&routes)?;
        info!(routes_count = routes.len(), "Route map replaced");
        self.routes = routes;
        self.index = index;
        Ok(())
    }

    #[must_use]
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    /// Order routes by literal path length, longest first.
    ///
    /// The sort is stable, so routes of equal specificity keep their
    /// registration order. Sorting makes a specific template such as
    /// `/api/account/override` win over `/api/account/{/t}`.
    pub fn sort(&mut self) {
        self.routes.sort_by_key(|route| Reverse(route.specificity()));
        self.index = self
            .routes
            .iter()
            .enumerate()
            .filter(|(_, route)| !route.name().is_empty())
            .map(|(i, route)| (route.name().to_string(), i))
            .collect();

        let order: Vec<&str> = self.routes.iter().take(10).map(Route::path).collect();
        info!(
            routes_count = self.routes.len(),
            order = ?order,
            "Route map sorted by specificity"
        );
    }

    /// The template's literal text, with every placeholder removed
    #[must_use]
    pub fn remove_param_from_path(&self, path: &str) -> String {
        pattern::remove_params(path)
    }
}

impl<'a> IntoIterator for &'a RouteMap {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

fn build_index(routes: &[Route]) -> Result<HashMap<String, usize>, RouteError> {
    let mut index = HashMap::with_capacity(routes.len());
    for (i, route) in routes.iter().enumerate() {
        if route.name().is_empty() {
            continue;
        }
        if index.insert(route.name().to_string(), i).is_some() {
            return Err(RouteError::RouteAlreadyExists {
                name: route.name().to_string(),
            });
        }
    }
    Ok(index)
}
