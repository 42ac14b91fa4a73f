use regex::Captures;
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

use crate::error::RouteError;
use crate::pattern::CompiledPattern;
use crate::request::Request;
use crate::route::{Route, Secure};
use crate::Values;

/// The rule that rejected a request, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailedRule {
    /// The route is generation-only
    Routable,
    /// The path does not fit the template
    Path,
    /// The request method is not in the route's allow list
    Method,
    /// The request scheme does not satisfy the route's secure setting
    Secure,
    /// The custom match hook returned `false`
    Custom,
}

impl FailedRule {
    /// Number of rules the route passed before this one failed.
    ///
    /// A higher score means the route came closer to matching, which is how
    /// the router picks the route to report after a miss.
    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            FailedRule::Routable => 0,
            FailedRule::Path => 1,
            FailedRule::Method => 2,
            FailedRule::Secure => 3,
            FailedRule::Custom => 4,
        }
    }
}

/// Result of testing one route against one request.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Defaults merged with the captured values
    Matched(Values),
    /// The first rule that rejected the request
    Failed(FailedRule),
}

impl MatchOutcome {
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }

    #[must_use]
    pub fn values(&self) -> Option<&Values> {
        match self {
            MatchOutcome::Matched(values) => Some(values),
            MatchOutcome::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn into_values(self) -> Option<Values> {
        match self {
            MatchOutcome::Matched(values) => Some(values),
            MatchOutcome::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn failed_rule(&self) -> Option<FailedRule> {
        match self {
            MatchOutcome::Matched(_) => None,
            MatchOutcome::Failed(rule) => Some(*rule),
        }
    }
}

/// Test a route against a request.
///
/// Rules run in order and stop at the first failure: routable flag, path,
/// method, secure, custom hook. The route itself is never modified.
///
/// # Errors
///
/// Returns the compilation error of a misconfigured route (see
/// [`Route::pattern`]). A request that simply does not fit is reported as
/// [`MatchOutcome::Failed`], not as an error.
pub fn match_route(route: &Route, request: &Request) -> Result<MatchOutcome, RouteError> {
    if !route.is_routable() {
        return Ok(reject(route, request, FailedRule::Routable));
    }

    let pattern = route.pattern()?;
    let Some(caps) = pattern.regex().captures(request.path()) else {
        return Ok(reject(route, request, FailedRule::Path));
    };
    let mut values = captured_values(route, &pattern, &caps);

    if !route.allows().is_empty() {
        let allowed = request
            .method()
            .is_some_and(|method| route.allows().contains(method));
        if !allowed {
            return Ok(reject(route, request, FailedRule::Method));
        }
    }

    let secure_ok = match route.secure() {
        Secure::Any => true,
        Secure::Https => request.is_https(),
        Secure::Plain => !request.is_https(),
    };
    if !secure_ok {
        return Ok(reject(route, request, FailedRule::Secure));
    }

    if let Some(hook) = route.match_hook() {
        let mut working = values.clone();
        if !hook.is_match(request, &mut working) {
            return Ok(reject(route, request, FailedRule::Custom));
        }
        values = working;
    }

    debug!(
        route_name = %route.name(),
        path = %request.path(),
        values = ?values,
        "Route rules passed"
    );
    Ok(MatchOutcome::Matched(values))
}

/// Boolean form of [`match_route`].
///
/// # Errors
///
/// Same as [`match_route`].
pub fn is_match(route: &Route, request: &Request) -> Result<bool, RouteError> {
    Ok(match_route(route, request)?.is_matched())
}

fn reject(route: &Route, request: &Request, rule: FailedRule) -> MatchOutcome {
    debug!(
        route_name = %route.name(),
        route_path = %route.path(),
        path = %request.path(),
        method = ?request.method(),
        failed_rule = ?rule,
        "Route rejected request"
    );
    MatchOutcome::Failed(rule)
}

/// Defaults overlaid with every non-empty capture.
fn captured_values(route: &Route, pattern: &CompiledPattern, caps: &Captures<'_>) -> Values {
    let mut values = route.defaults().clone();
    let wildcard = pattern.wildcard();

    for name in pattern.regex().capture_names().flatten() {
        if Some(name) == wildcard {
            continue;
        }
        if let Some(m) = caps.name(name).filter(|m| !m.as_str().is_empty()) {
            values.insert(name.to_string(), capture_value(m.as_str()));
        }
    }

    if let Some(name) = wildcard {
        match caps.name(name).map(|m| m.as_str()).filter(|s| !s.is_empty()) {
            Some(rest) => {
                let segments = rest.split('/').map(capture_value).collect();
                values.insert(name.to_string(), Value::Array(segments));
            }
            None => {
                values
                    .entry(name.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
            }
        }
    }

    values
}

/// Percent-decode a capture; all-digit captures become integers.
fn capture_value(raw: &str) -> Value {
    let decoded = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
    if !decoded.is_empty() && decoded.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = decoded.parse::<u64>() {
            return Value::from(n);
        }
    }
    Value::String(decoded.into_owned())
}
