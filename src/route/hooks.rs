use super::Route;
use crate::request::Request;
use crate::Values;

/// Custom match rule, run after the path, method and secure checks pass.
///
/// The hook sees the request and the values captured so far. It may add or
/// change values; the changes are kept only when it returns `true`.
/// Returning `false` rejects the match.
///
/// Closures with the matching signature implement this trait:
///
/// ```rust
/// use routemap::{request::Request, route::Route, Values};
///
/// let mut route = Route::new("zim", "/foo/bar/baz");
/// route.set_match_hook(|_req: &Request, values: &mut Values| {
///     values.insert("zim".into(), "gir".into());
///     true
/// });
/// ```
pub trait MatchHook: Send + Sync {
    fn is_match(&self, request: &Request, values: &mut Values) -> bool;
}

impl<F> MatchHook for F
where
    F: Fn(&Request, &mut Values) -> bool + Send + Sync,
{
    fn is_match(&self, request: &Request, values: &mut Values) -> bool {
        self(request, values)
    }
}

/// Custom generation step, run on the merged data before substitution.
pub trait GenerateHook: Send + Sync {
    fn generate(&self, route: &Route, data: &mut Values);
}

impl<F> GenerateHook for F
where
    F: Fn(&Route, &mut Values) + Send + Sync,
{
    fn generate(&self, route: &Route, data: &mut Values) {
        self(route, data)
    }
}
