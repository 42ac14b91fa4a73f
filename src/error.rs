use std::fmt;

/// Route configuration and lookup error
///
/// Returned while building a [`RouteMap`](crate::map::RouteMap), on the first
/// match attempt against a misconfigured route, or when generating by an
/// unknown name. A request that simply fits no route is not an error; see
/// [`Resolution::NoRouteMatched`](crate::router::Resolution::NoRouteMatched).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Token subpattern is not wrapped in a capturing group
    ///
    /// Every entry in a route's token map must start with `(` so it can be
    /// turned into a named capture. Detected lazily, at the first match
    /// attempt on the offending route.
    BadSubpattern {
        /// The placeholder name the subpattern is registered under
        token: String,
        /// The rejected subpattern
        subpattern: String,
    },
    /// The assembled match expression was rejected by the regex engine
    InvalidRegex {
        /// The route template the expression was built from
        path: String,
        /// Regex engine diagnostic
        message: String,
    },
    /// A named route was registered twice (after prefix composition)
    RouteAlreadyExists {
        /// The fully prefixed route name
        name: String,
    },
    /// No route is registered under the requested name
    RouteNotFound {
        /// The requested route name
        name: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::BadSubpattern { token, subpattern } => {
                write!(
                    f,
                    "Subpattern for param '{}' must start with an opening parenthesis, \
                    got '{}'",
                    token, subpattern
                )
            }
            RouteError::InvalidRegex { path, message } => {
                write!(
                    f,
                    "Route path '{}' does not compile to a valid expression: {}",
                    path, message
                )
            }
            RouteError::RouteAlreadyExists { name } => {
                write!(f, "Route '{}' already exists", name)
            }
            RouteError::RouteNotFound { name } => {
                write!(f, "No route named '{}'", name)
            }
        }
    }
}

impl std::error::Error for RouteError {}
