use super::{Resolution, Router};
use crate::error::RouteError;
use crate::map::RouteMap;
use crate::matcher::{self, FailedRule};
use crate::request::Request;
use crate::route::Route;
use crate::runtime_config::RuntimeConfig;
use crate::Values;
use serde_json::json;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn blog_map() -> RouteMap {
    let mut map = RouteMap::new();
    map.attach("blog.", "/blog", |blog| {
        blog.add_tokens([("id", r"(\d+)")]);
        blog.route("browse", "/")?.allow(["GET"]);
        blog.route("read", "/{id}")?.allow(["GET"]);
        blog.route("edit", "/{id}")?.allow(["PUT"]).set_secure(true);
        Ok(())
    })
    .unwrap();
    map
}

fn router(map: RouteMap) -> Router {
    Router::with_config(map, RuntimeConfig::default())
}

#[test]
fn test_first_match_wins() {
    let mut map = RouteMap::new();
    map.route("first", "/items/{id}").unwrap();
    map.route("second", "/items/{id}").unwrap();

    let found = router(map)
        .route(&Request::new("/items/1"))
        .unwrap()
        .into_match()
        .unwrap();
    assert_eq!(found.name(), "first");
    assert_eq!(found.get("id"), Some(&json!(1)));
}

#[test]
fn test_no_match_reports_closest_route() {
    let router = router(blog_map());

    // path exists, method does not
    let request = Request::new("/blog/7").with_method("DELETE");
    match router.route(&request).unwrap() {
        Resolution::NoRouteMatched { failed: Some(failed) } => {
            assert_eq!(failed.rule, FailedRule::Method);
            assert_eq!(failed.route.name(), "blog.read");
        }
        other => panic!("unexpected resolution: {other:?}"),
    }

    // right method, not secure: the secure rule is further along
    let request = Request::new("/blog/7").with_method("PUT");
    match router.route(&request).unwrap() {
        Resolution::NoRouteMatched { failed: Some(failed) } => {
            assert_eq!(failed.rule, FailedRule::Secure);
            assert_eq!(failed.route.name(), "blog.edit");
        }
        other => panic!("unexpected resolution: {other:?}"),
    }

    let request = Request::new("/blog/7")
        .with_method("PUT")
        .with_server("HTTPS", "on");
    let found = router.route(&request).unwrap().into_match().unwrap();
    assert_eq!(found.name(), "blog.edit");
}

#[test]
fn test_unroutable_routes_are_not_reported() {
    let mut map = RouteMap::new();
    map.route("external", "http://example.com/{q}")
        .unwrap()
        .set_routable(false);

    match router(map).route(&Request::new("/anything")).unwrap() {
        Resolution::NoRouteMatched { failed } => assert!(failed.is_none()),
        other => panic!("unexpected resolution: {other:?}"),
    }
}

#[test]
fn test_broken_route_aborts_resolution() {
    let mut map = RouteMap::new();
    map.route("broken", "/{id}")
        .unwrap()
        .add_tokens([("id", r"\d+")]);

    let err = router(map).route(&Request::new("/1")).unwrap_err();
    assert!(matches!(err, RouteError::BadSubpattern { .. }));
}

#[test]
fn test_generate_by_name() {
    let router = router(blog_map());

    let data: Values = [("id".to_string(), json!(42))].into_iter().collect();
    assert_eq!(router.generate("blog.read", &data).unwrap(), "/blog/42");
    assert_eq!(
        router.generate("blog.missing", &data).unwrap_err(),
        RouteError::RouteNotFound {
            name: "blog.missing".to_string()
        }
    );

    let data: Values = [("id".to_string(), json!("a b"))].into_iter().collect();
    assert_eq!(router.generate_raw("blog.read", &data).unwrap(), "/blog/a b");
}

#[test]
fn test_sorted_table() {
    let mut map = RouteMap::new();
    map.route("generic", "/users/{name}").unwrap();
    map.route("me", "/users/me").unwrap();

    let config = RuntimeConfig {
        sort_routes: true,
        ..RuntimeConfig::default()
    };
    let router = Router::with_config(map, config);
    let found = router
        .route(&Request::new("/users/me"))
        .unwrap()
        .into_match()
        .unwrap();
    assert_eq!(found.name(), "me");
}

#[test]
fn test_precompile_counts_good_patterns() {
    let mut map = RouteMap::new();
    map.route("ok", "/ok/{id}").unwrap();
    map.route("broken", "/bad/{id}")
        .unwrap()
        .add_tokens([("id", "[0-9]+")]);
    map.route("hidden", "/hidden").unwrap().set_routable(false);

    let router = router(map);
    assert_eq!(router.precompile(), 1);

    let route = router.get("ok").unwrap();
    let first = route.pattern().unwrap();
    assert!(Arc::ptr_eq(&first, &route.pattern().unwrap()));
}

#[test]
fn test_reload_swaps_table() {
    let router = router(blog_map());
    let old = router.table();
    assert_eq!(old.routes().len(), 3);

    let mut map = RouteMap::new();
    map.route("home", "/").unwrap();
    router.reload(map);

    // the old snapshot is still usable
    assert!(old.get("blog.read").is_some());
    assert!(router.get("blog.read").is_none());
    assert_eq!(
        router
            .route(&Request::new("/"))
            .unwrap()
            .into_match()
            .unwrap()
            .name(),
        "home"
    );
}

#[test]
fn test_slow_threshold_does_not_change_result() {
    let config = RuntimeConfig {
        slow_match_threshold: Duration::ZERO,
        ..RuntimeConfig::default()
    };
    let router = Router::with_config(blog_map(), config);
    let request = Request::new("/blog/").with_method("GET");
    let found = router.route(&request).unwrap().into_match().unwrap();
    assert_eq!(found.name(), "blog.browse");
}

#[test]
fn test_concurrent_matches_on_shared_route() {
    let route = Arc::new(Route::new("item", "/items/{id}"));

    let handles: Vec<_> = (0..8u64)
        .map(|i| {
            let route = Arc::clone(&route);
            thread::spawn(move || {
                let request = Request::new(format!("/items/{i}"));
                let values = matcher::match_route(&route, &request)
                    .unwrap()
                    .into_values()
                    .unwrap();
                assert_eq!(values["id"], json!(i));
                route.pattern().unwrap()
            })
        })
        .collect();

    let patterns: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // every thread sees the one cached compilation
    let cached = route.pattern().unwrap();
    assert!(patterns.iter().all(|p| Arc::ptr_eq(p, &cached)));
    assert!(route.defaults().is_empty());
}

#[test]
fn test_reload_while_resolving() {
    fn v2_map() -> RouteMap {
        let mut map = RouteMap::new();
        map.attach("blog.", "/blog", |blog| {
            blog.add_tokens([("id", r"(\d+)")]);
            blog.route("read", "/{id}")?
                .allow(["GET"])
                .set_handler("v2");
            Ok(())
        })
        .unwrap();
        map
    }

    let router = Arc::new(router(blog_map()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                let request = Request::new("/blog/7").with_method("GET");
                for _ in 0..200 {
                    let found = router.route(&request).unwrap().into_match().unwrap();
                    assert_eq!(found.name(), "blog.read");
                    assert_eq!(found.get("id"), Some(&json!(7)));
                }
            })
        })
        .collect();

    let writer = {
        let router = Arc::clone(&router);
        thread::spawn(move || {
            for i in 0..50 {
                if i % 2 == 0 {
                    router.reload(blog_map());
                } else {
                    router.reload(v2_map());
                }
            }
        })
    };

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    // the last reload installed the second map
    let read = router.get("blog.read").unwrap();
    assert_eq!(read.handler(), Some("v2"));
    assert!(router.get("blog.edit").is_none());
}
