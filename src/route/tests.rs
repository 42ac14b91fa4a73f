use super::{Route, RouteTemplate, Secure};
use crate::error::RouteError;
use crate::request::Request;
use crate::Values;
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_new_desugars_inline_tokens() {
    let route = Route::new("blog.edit", "/blog/{:id:(\\d+)}/edit");
    assert_eq!(route.name(), "blog.edit");
    assert_eq!(route.path(), "/blog/{id}/edit");
    assert_eq!(route.tokens()["id"], r"(\d+)");
    assert!(route.is_routable());
    assert_eq!(route.secure(), Secure::Any);
}

#[test]
fn test_secure_from_bool() {
    assert_eq!(Secure::from(true), Secure::Https);
    assert_eq!(Secure::from(false), Secure::Plain);
    assert_eq!(Secure::from(None), Secure::Any);
}

#[test]
fn test_pattern_is_cached() {
    let route = Route::new("", "/items/{id}");
    let first = route.pattern().unwrap();
    let second = route.pattern().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let cloned = route.clone();
    assert!(Arc::ptr_eq(&first, &cloned.pattern().unwrap()));
}

#[test]
fn test_changing_tokens_drops_cache() {
    let mut route = Route::new("", "/items/{id}");
    assert!(route.pattern().unwrap().regex().is_match("/items/abc"));

    route.add_tokens([("id", r"(\d+)")]);
    assert!(!route.pattern().unwrap().regex().is_match("/items/abc"));
}

#[test]
fn test_bad_subpattern_is_lazy() {
    let mut route = Route::new("", "/{controller}");
    route.add_tokens([("controller", "[a-zA-Z][a-zA-Z0-9_-]+")]);

    // construction succeeded; the failure shows up on first use, every time
    assert!(matches!(
        route.pattern(),
        Err(RouteError::BadSubpattern { ref token, .. }) if token == "controller"
    ));
    assert!(route.pattern().is_err());
}

#[test]
fn test_builder_chain() {
    let mut route = Route::new("Account", "/api/account/{/t}");
    route
        .set_auth(4)
        .allow(["GET"])
        .set_wildcard("other")
        .add_defaults([("zim", "gir")])
        .set_handler("AccountController")
        .add_extras([("tag", json!(["a", "b"]))]);

    assert_eq!(route.auth(), Some(&json!(4)));
    assert!(route.allows().contains("GET"));
    assert_eq!(route.wildcard(), Some("other"));
    assert_eq!(route.defaults()["zim"], json!("gir"));
    assert_eq!(route.handler(), Some("AccountController"));
    assert_eq!(route.extras()["tag"], json!(["a", "b"]));
}

#[test]
fn test_specificity_counts_literal_text() {
    assert_eq!(Route::new("", "/api/account/{/t}").specificity(), 13);
    assert_eq!(Route::new("", "api/account/override").specificity(), 20);
}

#[test]
fn test_from_template_applies_prefixes() {
    let template = RouteTemplate::default().child("during.", "/during");
    let route = Route::from_template(&template, "bar", "/bar");
    assert_eq!(route.name(), "during.bar");
    assert_eq!(route.path(), "/during/bar");

    let unnamed = Route::from_template(&template, "", "/baz");
    assert_eq!(unnamed.name(), "");
    assert_eq!(unnamed.path(), "/during/baz");
}

#[test]
fn test_from_template_skips_prefix_for_full_uri() {
    let template = RouteTemplate::default().child("ext.", "/foo/bar");
    let route = Route::from_template(&template, "google-search", "http://google.com/?q={:q}");
    assert_eq!(route.name(), "ext.google-search");
    assert_eq!(route.path(), "http://google.com/?q={q}");
}

#[test]
fn test_equality_ignores_hooks() {
    let plain = Route::new("home", "/");
    let mut hooked = Route::new("home", "/");
    hooked.set_match_hook(|_req: &Request, _values: &mut Values| true);
    assert_eq!(plain, hooked);
    assert!(format!("{:?}", hooked).contains("match_hook: true"));
}

#[test]
fn test_serde_skips_hooks() {
    let mut route = Route::new("page.read", "/page/{id}{format}");
    route
        .add_tokens([("id", r"(\d+)"), ("format", r"(\.[^/]+)?")])
        .add_defaults([("controller", json!("page")), ("format", json!(null))])
        .set_match_hook(|_req: &Request, _values: &mut Values| false);

    let saved = serde_json::to_string(&route).unwrap();
    let restored: Route = serde_json::from_str(&saved).unwrap();

    assert_eq!(restored, route);
    assert!(restored.match_hook().is_none());
}
