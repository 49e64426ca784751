use fastrouter::router::{RouteMatch, Router, RouterBuilder};

use http::Method;

fn verb_zoo() -> Router<&'static str> {
    let mut builder = RouterBuilder::new();
    builder.get("/", "root_handler").unwrap();
    builder.get("/zoo/animals", "get_animals").unwrap();
    builder.post("/zoo/animals", "create_animal").unwrap();
    builder.get("/zoo/animals/:id", "get_animal").unwrap();
    builder.put("/zoo/animals/:id", "update_animal").unwrap();
    builder.patch("/zoo/animals/:id", "patch_animal").unwrap();
    builder.delete("/zoo/animals/:id", "delete_animal").unwrap();
    builder.get("/zoo/animals/:id/*", "animal_files").unwrap();
    builder.get("/zoo/animals/count", "count_animals").unwrap();
    builder.head("/zoo/health", "health_check").unwrap();
    builder.options("/zoo/health", "supported_ops").unwrap();
    builder.add_route("trace", "/zoo/health", "trace_route").unwrap();
    builder.build().unwrap()
}

fn assert_route_match<'r>(
    router: &'r Router<&'static str>,
    method: Method,
    path: &str,
    expected_handler: &str,
) -> Option<RouteMatch<'r, &'static str>> {
    let result = router.route(&method, path);
    match &result {
        Some(RouteMatch { handler, .. }) => {
            println!("✅ {} {} → {}", method, path, handler);
            assert_eq!(
                **handler, expected_handler,
                "Handler mismatch for {} {}: expected '{}', got '{}'",
                method, path, expected_handler, handler
            );
        }
        None => {
            println!("❌ {} {} → no match", method, path);
            assert_eq!(
                expected_handler, "<none>",
                "Expected route to match for {} {}",
                method, path
            );
        }
    }
    result
}

#[test]
fn test_router_get_animals() {
    let router = verb_zoo();
    assert_route_match(&router, Method::GET, "/zoo/animals", "get_animals");
}

#[test]
fn test_router_post_animals() {
    let router = verb_zoo();
    assert_route_match(&router, Method::POST, "/zoo/animals", "create_animal");
}

#[test]
fn test_router_get_animal_by_id() {
    let router = verb_zoo();
    let m = assert_route_match(&router, Method::GET, "/zoo/animals/123", "get_animal").unwrap();
    assert_eq!(m.get_path_param("id"), Some("123"));
}

#[test]
fn test_router_put_animal() {
    let router = verb_zoo();
    assert_route_match(&router, Method::PUT, "/zoo/animals/123", "update_animal");
}

#[test]
fn test_router_patch_animal() {
    let router = verb_zoo();
    assert_route_match(&router, Method::PATCH, "/zoo/animals/123", "patch_animal");
}

#[test]
fn test_router_delete_animal() {
    let router = verb_zoo();
    assert_route_match(&router, Method::DELETE, "/zoo/animals/123", "delete_animal");
}

#[test]
fn test_router_head_health() {
    let router = verb_zoo();
    assert_route_match(&router, Method::HEAD, "/zoo/health", "health_check");
}

#[test]
fn test_router_options_health() {
    let router = verb_zoo();
    assert_route_match(&router, Method::OPTIONS, "/zoo/health", "supported_ops");
}

#[test]
fn test_router_trace_health() {
    let router = verb_zoo();
    assert_route_match(&router, Method::TRACE, "/zoo/health", "trace_route");
}

#[test]
fn test_router_unknown_path() {
    let router = verb_zoo();
    assert_route_match(&router, Method::GET, "/unknown", "<none>");
}

#[test]
fn test_router_unregistered_method() {
    let router = verb_zoo();
    assert_route_match(&router, Method::POST, "/zoo/health", "<none>");
}

#[test]
fn test_router_root_path() {
    let router = verb_zoo();
    let m = assert_route_match(&router, Method::GET, "/", "root_handler").unwrap();
    assert!(m.params.is_empty());
}

#[test]
fn test_router_literal_beats_parameter() {
    let router = verb_zoo();
    let m = assert_route_match(&router, Method::GET, "/zoo/animals/count", "count_animals")
        .unwrap();
    assert!(m.params.is_empty());
}

#[test]
fn test_router_literal_method_miss_falls_back_to_parameter() {
    // No DELETE on the literal, so the parameter route answers
    let router = verb_zoo();
    let m = assert_route_match(&router, Method::DELETE, "/zoo/animals/count", "delete_animal")
        .unwrap();
    assert_eq!(m.get_path_param("id"), Some("count"));
}

#[test]
fn test_router_wildcard_after_parameter() {
    let router = verb_zoo();
    let m = assert_route_match(
        &router,
        Method::GET,
        "/zoo/animals/7/photos/2024/cover.jpg",
        "animal_files",
    )
    .unwrap();
    assert_eq!(m.get_path_param("id"), Some("7"));
    assert_eq!(m.get_path_param("*"), Some("photos/2024/cover.jpg"));
}

#[test]
fn test_router_all_matchers_agree() {
    let router = verb_zoo();
    let requests = [
        (Method::GET, "/"),
        (Method::GET, "/zoo/animals/42"),
        (Method::GET, "/zoo/animals/count"),
        (Method::GET, "/zoo/animals/7/a/b"),
        (Method::GET, "/zoo/animals/7/"),
        (Method::DELETE, "/zoo/animals/count"),
        (Method::GET, "/zoo"),
        (Method::GET, "/zoo/animals/"),
    ];

    for (method, path) in requests {
        let segments = router.match_segments(&method, path);
        let indexed = router.match_indexed(&method, path);
        assert_eq!(segments, indexed, "{method} {path}");

        let fast = router.fast_match(&method, path);
        assert_eq!(fast.as_ref(), indexed.as_ref(), "{method} {path}");
        if let Some(m) = fast {
            router.release(m);
        }
    }
}

#[test]
fn test_router_routes_and_patterns() {
    let router = verb_zoo();
    assert_eq!(router.routes().count(), 12);
    assert_eq!(
        router.path_patterns(),
        vec![
            "/",
            "/zoo/animals",
            "/zoo/animals/:id",
            "/zoo/animals/:id/*",
            "/zoo/animals/count",
            "/zoo/health",
        ]
    );
    assert_eq!(
        router.handler_for(&Method::PATCH, "/zoo/animals/:id"),
        Some(&"patch_animal")
    );
    assert_eq!(router.handler_for(&Method::GET, "/zoo/animals/42"), None);
}
