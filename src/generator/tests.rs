use super::{generate, generate_raw};
use crate::route::Route;
use crate::Values;
use serde_json::{json, Value};

fn data(pairs: &[(&str, Value)]) -> Values {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_generate() {
    let mut route = Route::new("", "/blog/{:id}/edit");
    route.add_tokens([("id", "([0-9]+)")]);

    let path = generate(&route, &data(&[("id", json!(42)), ("foo", json!("bar"))]));
    assert_eq!(path, "/blog/42/edit");
}

#[test]
fn test_generate_with_closure() {
    let mut route = Route::new("", "/blog/{:id}/edit");
    route.set_generate_hook(|_route: &Route, data: &mut Values| {
        data.insert("id".to_string(), json!(99));
    });

    let path = generate(&route, &data(&[("id", json!(42)), ("foo", json!("bar"))]));
    assert_eq!(path, "/blog/99/edit");
}

#[test]
fn test_generate_hook_can_remove_keys() {
    let mut route = Route::new("", "/blog/{id}/{slug}");
    route.set_generate_hook(|_route: &Route, data: &mut Values| {
        data.remove("slug");
    });

    let path = generate(&route, &data(&[("id", json!(1)), ("slug", json!("hello"))]));
    assert_eq!(path, "/blog/1/{slug}");
}

#[test]
fn test_defaults_fill_missing_values() {
    let mut route = Route::new("", "/{controller}/{action}");
    route.add_defaults([("controller", "page"), ("action", "index")]);

    assert_eq!(generate(&route, &Values::new()), "/page/index");
    assert_eq!(
        generate(&route, &data(&[("action", json!("read"))])),
        "/page/read"
    );
}

#[test]
fn test_unresolved_placeholders_stay() {
    let route = Route::new("", "/users/{user}/posts/{post}");
    let path = generate(&route, &data(&[("user", json!("ann"))]));
    assert_eq!(path, "/users/ann/posts/{post}");
}

#[test]
fn test_null_renders_empty_and_arrays_are_skipped() {
    let route = Route::new("", "/page/{id}{format}/{tags}");
    let path = generate(
        &route,
        &data(&[
            ("id", json!(7)),
            ("format", json!(null)),
            ("tags", json!(["a", "b"])),
        ]),
    );
    assert_eq!(path, "/page/7/{tags}");
}

#[test]
fn test_values_are_raw_url_encoded() {
    let route = Route::new("", "/search/{q}");
    let path = generate(&route, &data(&[("q", json!("a b/c?d"))]));
    assert_eq!(path, "/search/a%20b%2Fc%3Fd");

    let raw = generate_raw(&route, &data(&[("q", json!("a b/c?d"))]));
    assert_eq!(raw, "/search/a b/c?d");
}

#[test]
fn test_generate_on_full_uri() {
    let mut route = Route::new("google-search", "http://google.com/?q={:q}");
    route.set_routable(false);

    let path = generate(&route, &data(&[("q", json!("what's up doc?"))]));
    assert_eq!(path, "http://google.com/?q=what%27s%20up%20doc%3F");
}

#[test]
fn test_optional_params() {
    let route = Route::new("", "/archive{/year,month,day}");

    assert_eq!(generate(&route, &Values::new()), "/archive");
    assert_eq!(
        generate(&route, &data(&[("year", json!(2024))])),
        "/archive/2024"
    );
    assert_eq!(
        generate(
            &route,
            &data(&[("year", json!(2024)), ("month", json!("05")), ("day", json!(17))])
        ),
        "/archive/2024/05/17"
    );
}

#[test]
fn test_optional_params_are_sequential() {
    let route = Route::new("", "/archive{/year,month,day}");

    // month is missing, so day is ignored even though it is present
    let path = generate(&route, &data(&[("year", json!(2024)), ("day", json!(17))]));
    assert_eq!(path, "/archive/2024");

    // the first name is missing, so the whole group renders empty
    let path = generate(&route, &data(&[("month", json!("05")), ("day", json!(17))]));
    assert_eq!(path, "/archive");
}

#[test]
fn test_optional_group_after_format() {
    let route = Route::new("", "/page/{id}{/format}");
    assert_eq!(generate(&route, &data(&[("id", json!(3))])), "/page/3");
    assert_eq!(
        generate(&route, &data(&[("id", json!(3)), ("format", json!("json"))])),
        "/page/3/json"
    );
}

#[test]
fn test_only_first_optional_group_expands() {
    let route = Route::new("", "/a{/x}/b{/y}");
    let path = generate(&route, &data(&[("x", json!(1)), ("y", json!(2))]));
    assert_eq!(path, "/a/1/b{/y}");
}

#[test]
fn test_generate_wildcard() {
    let mut route = Route::new("", "/foo/{bar}/");
    route.set_wildcard("other");

    let path = generate(
        &route,
        &data(&[("bar", json!("baz")), ("other", json!([1, 2, 3]))]),
    );
    assert_eq!(path, "/foo/baz/1/2/3");
}

#[test]
fn test_generate_wildcard_skips_non_scalars() {
    let mut route = Route::new("", "/files");
    route.set_wildcard("rest");

    let path = generate(
        &route,
        &data(&[("rest", json!(["a b", {"x": 1}, null, true]))]),
    );
    assert_eq!(path, "/files/a%20b/true");
}

#[test]
fn test_wildcard_without_data_keeps_path() {
    let mut route = Route::new("", "/files/");
    route.set_wildcard("rest");
    assert_eq!(generate(&route, &Values::new()), "/files/");
}

#[test]
fn test_booleans_render_as_words() {
    let route = Route::new("", "/flag/{on}/{off}");
    let path = generate(&route, &data(&[("on", json!(true)), ("off", json!(false))]));
    assert_eq!(path, "/flag/true/false");
}

#[test]
fn test_placeholder_inside_literal_braces() {
    let route = Route::new("", "/a{x{id}}");
    assert_eq!(generate(&route, &data(&[("id", json!(5))])), "/a{x5}");
}

#[test]
fn test_root_wildcard_keeps_slash() {
    let mut route = Route::new("", "/");
    route.set_wildcard("rest");

    assert_eq!(generate(&route, &data(&[("rest", json!([]))])), "/");
    assert_eq!(
        generate(&route, &data(&[("rest", json!(["a", "b"]))])),
        "/a/b"
    );
}
