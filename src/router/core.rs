//! Router core module - the iterate-until-match loop over a frozen table.

use arc_swap::ArcSwap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::RouteError;
use crate::generator;
use crate::map::RouteMap;
use crate::matcher::{self, FailedRule, MatchOutcome};
use crate::request::Request;
use crate::route::Route;
use crate::runtime_config::RuntimeConfig;
use crate::Values;

/// Result of successfully matching a request to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (Arc to avoid cloning the definition per request)
    pub route: Arc<Route>,
    /// Route defaults overlaid with the values captured from the path
    pub values: Values,
}

impl RouteMatch {
    /// Name of the matched route
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.route.name()
    }

    /// Get a matched value by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// The route that came closest to matching a request that nothing matched.
#[derive(Debug, Clone)]
pub struct FailedRoute {
    pub route: Arc<Route>,
    /// The rule that rejected it
    pub rule: FailedRule,
}

/// Outcome of resolving a request against the whole table.
#[derive(Debug, Clone)]
pub enum Resolution {
    Matched(RouteMatch),
    /// No route fit the request.
    ///
    /// `failed` is the route that passed the most rules, if any route got
    /// past the routable check. A failure on [`FailedRule::Method`] means the
    /// path exists but not for this method, which callers usually answer
    /// with 405 rather than 404.
    NoRouteMatched { failed: Option<FailedRoute> },
}

impl Resolution {
    #[must_use]
    pub fn into_match(self) -> Option<RouteMatch> {
        match self {
            Resolution::Matched(m) => Some(m),
            Resolution::NoRouteMatched { .. } => None,
        }
    }
}

/// Immutable snapshot of a route map, shared by all readers.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Arc<Route>>,
    index: HashMap<String, usize>,
}

impl RouteTable {
    fn from_map(map: RouteMap) -> Self {
        let routes: Vec<Arc<Route>> = map.into_routes().into_iter().map(Arc::new).collect();
        let index = routes
            .iter()
            .enumerate()
            .filter(|(_, route)| !route.name().is_empty())
            .map(|(i, route)| (route.name().to_string(), i))
            .collect();
        Self { routes, index }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Route>> {
        self.index.get(name).map(|&i| &self.routes[i])
    }

    #[must_use]
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }
}

/// Resolves requests against a route table and generates paths by name.
///
/// The table is held in an [`ArcSwap`], so [`Router::reload`] can replace it
/// while other threads keep resolving against the previous snapshot.
#[derive(Debug)]
pub struct Router {
    table: ArcSwap<RouteTable>,
    config: RuntimeConfig,
}

impl Router {
    /// Create a router configured from the environment
    ///
    /// See [`RuntimeConfig::from_env`].
    #[must_use]
    pub fn new(map: RouteMap) -> Self {
        Self::with_config(map, RuntimeConfig::from_env())
    }

    #[must_use]
    pub fn with_config(map: RouteMap, config: RuntimeConfig) -> Self {
        let router = Self {
            table: ArcSwap::from_pointee(RouteTable::default()),
            config,
        };
        router.reload(map);
        router
    }

    /// Swap in a new route map.
    ///
    /// Sorting and precompilation follow the router's [`RuntimeConfig`].
    pub fn reload(&self, mut map: RouteMap) {
        if self.config.sort_routes {
            map.sort();
        }
        let table = RouteTable::from_map(map);

        let routes_summary: Vec<String> = table
            .routes
            .iter()
            .take(10)
            .map(|route| format!("{} {}", route.name(), route.path()))
            .collect();
        info!(
            routes_count = table.routes.len(),
            routes_summary = ?routes_summary,
            sorted = self.config.sort_routes,
            "Routing table loaded"
        );

        self.table.store(Arc::new(table));
        if self.config.precompile {
            let compiled = self.precompile();
            debug!(compiled_count = compiled, "Route patterns precompiled");
        }
    }

    /// Current table snapshot
    #[must_use]
    pub fn table(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    /// Look up a route by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Route>> {
        self.table.load().get(name).cloned()
    }

    /// Compile every routable pattern now instead of on first match.
    ///
    /// Returns the number of patterns compiled. Failures are logged and left
    /// in place; the affected routes still report their error when matched.
    pub fn precompile(&self) -> usize {
        let table = self.table.load();
        let mut compiled = 0;
        for route in table.routes.iter().filter(|r| r.is_routable()) {
            match route.pattern() {
                Ok(_) => compiled += 1,
                Err(err) => warn!(
                    route_name = %route.name(),
                    path = %route.path(),
                    error = %err,
                    "Route pattern failed to compile"
                ),
            }
        }
        compiled
    }

    /// Print all registered routes to stdout
    pub fn dump_routes(&self) {
        let table = self.table.load();
        println!("[routes] count={}", table.routes.len());
        for route in &table.routes {
            let methods: Vec<&str> = route.allows().iter().map(String::as_str).collect();
            println!(
                "[route] {} {} methods={:?} routable={}",
                if route.name().is_empty() { "-" } else { route.name() },
                route.path(),
                methods,
                route.is_routable()
            );
        }
    }

    /// Find the first route in table order that matches the request.
    ///
    /// # Returns
    ///
    /// * `Ok(Resolution::Matched(_))` - the first matching route and its values
    /// * `Ok(Resolution::NoRouteMatched { .. })` - nothing fit (results in 404/405)
    ///
    /// # Errors
    ///
    /// A misconfigured route ([`RouteError::BadSubpattern`],
    /// [`RouteError::InvalidRegex`]) aborts resolution when it is reached.
    pub fn route(&self, request: &Request) -> Result<Resolution, RouteError> {
        debug!(
            method = ?request.method(),
            path = %request.path(),
            "Route match attempt"
        );

        let match_start = Instant::now();
        let table = self.table.load();
        let mut failed: Option<FailedRoute> = None;

        for route in &table.routes {
            match matcher::match_route(route, request)? {
                MatchOutcome::Matched(values) => {
                    let match_duration = match_start.elapsed();
                    if match_duration > self.config.slow_match_threshold {
                        warn!(
                            method = ?request.method(),
                            path = %request.path(),
                            route_name = %route.name(),
                            route_pattern = %route.path(),
                            values = ?values,
                            duration_us = match_duration.as_micros(),
                            "Slow route matching detected"
                        );
                    } else {
                        info!(
                            method = ?request.method(),
                            path = %request.path(),
                            route_name = %route.name(),
                            route_pattern = %route.path(),
                            values = ?values,
                            duration_us = match_duration.as_micros(),
                            "Route matched"
                        );
                    }
                    return Ok(Resolution::Matched(RouteMatch {
                        route: Arc::clone(route),
                        values,
                    }));
                }
                MatchOutcome::Failed(rule) => {
                    let closer = failed
                        .as_ref()
                        .map_or(rule != FailedRule::Routable, |f| rule.score() > f.rule.score());
                    if closer {
                        failed = Some(FailedRoute {
                            route: Arc::clone(route),
                            rule,
                        });
                    }
                }
            }
        }

        warn!(
            method = ?request.method(),
            path = %request.path(),
            closest_route = ?failed.as_ref().map(|f| f.route.name()),
            failed_rule = ?failed.as_ref().map(|f| f.rule),
            duration_us = match_start.elapsed().as_micros(),
            "No route matched"
        );
        Ok(Resolution::NoRouteMatched { failed })
    }

    /// Generate a path for the named route, percent-encoding values.
    ///
    /// # Errors
    ///
    /// [`RouteError::RouteNotFound`] if no route has that name.
    pub fn generate(&self, name: &str, data: &Values) -> Result<String, RouteError> {
        let route = self.named(name)?;
        Ok(generator::generate(&route, data))
    }

    /// Generate a path for the named route without encoding values.
    ///
    /// # Errors
    ///
    /// [`RouteError::RouteNotFound`] if no route has that name.
    pub fn generate_raw(&self, name: &str, data: &Values) -> Result<String, RouteError> {
        let route = self.named(name)?;
        Ok(generator::generate_raw(&route, data))
    }

    fn named(&self, name: &str) -> Result<Arc<Route>, RouteError> {
        self.get(name).ok_or_else(|| RouteError::RouteNotFound {
            name: name.to_string(),
        })
    }
}
