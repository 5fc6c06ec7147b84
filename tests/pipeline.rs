mod common;

use axum::{
    body::Body,
    http::{header, Method, Request},
};
use common::{TestApp, ORIGIN, TOKEN};
use serde_json::json;
use unity_api::middleware::SECURITY_HEADERS;
use unity_api::RunMode;

fn unauthenticated(method: Method, uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "budget": "100" }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn api_without_a_token_is_401() {
    let app = TestApp::new();
    for uri in ["/api/weddings", "/api/guests", "/api/expenses", "/api/weddings/1"] {
        let res = app.send(unauthenticated(Method::GET, uri, None)).await;
        assert_eq!(res.status, 401, "{}", uri);
        assert_eq!(res.body, json!({ "error": "Unauthorized request" }));
    }
}

#[tokio::test]
async fn wrong_token_or_scheme_is_401() {
    let app = TestApp::new();
    for value in ["Bearer not-the-token", "Basic test-token", TOKEN] {
        let res = app
            .send(unauthenticated(Method::GET, "/api/weddings", Some(value)))
            .await;
        assert_eq!(res.status, 401, "{}", value);
    }
}

#[tokio::test]
async fn rejected_write_has_no_effect() {
    let app = TestApp::new();
    let res = app.send(unauthenticated(Method::POST, "/api/weddings", None)).await;
    assert_eq!(res.status, 401);
    assert_eq!(app.get("/api/weddings").await.body, json!([]));
}

#[tokio::test]
async fn auth_runs_before_the_entity_lookup() {
    let app = TestApp::new();
    let res = app
        .send(unauthenticated(Method::DELETE, "/api/weddings/123456", None))
        .await;
    assert_eq!(res.status, 401);
}

#[tokio::test]
async fn common_routes_are_public() {
    let app = TestApp::new();
    let hello = app.send(unauthenticated(Method::GET, "/", None)).await;
    assert_eq!(hello.status, 200);
    assert_eq!(hello.text, "Hello, world!");

    let health = app.send(unauthenticated(Method::GET, "/health", None)).await;
    assert_eq!(health.body, json!({ "status": "ok" }));

    let ready = app.send(unauthenticated(Method::GET, "/ready", None)).await;
    assert_eq!(ready.status, 200);
    assert_eq!(ready.body["database"], "ok");

    let version = app.send(unauthenticated(Method::GET, "/version", None)).await;
    assert_eq!(version.body["name"], "unity-api");
}

#[tokio::test]
async fn security_headers_are_on_every_response() {
    let app = TestApp::new();
    let ok = app.get("/api/weddings").await;
    let denied = app.send(unauthenticated(Method::GET, "/api/weddings", None)).await;
    let missing = app.get("/api/weddings/404").await;
    for res in [&ok, &denied, &missing] {
        for (name, value) in SECURITY_HEADERS {
            assert_eq!(res.header(name), Some(*value), "{}", name);
        }
    }
}

#[tokio::test]
async fn preflight_from_the_client_origin_needs_no_token() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/weddings")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
        .body(Body::empty())
        .unwrap();
    let res = app.send(request).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.header("access-control-allow-origin"), Some(ORIGIN));
    let methods = res.header("access-control-allow-methods").unwrap_or_default();
    assert!(methods.contains("PATCH"), "{}", methods);
}

#[tokio::test]
async fn other_origins_are_not_allowed() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/api/weddings")
        .header(header::ORIGIN, "http://evil.example")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap();
    let res = app.send(request).await;
    assert_eq!(res.header("access-control-allow-origin"), None);
}

#[tokio::test]
async fn created_location_is_exposed_to_the_client_origin() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/weddings")
        .header(header::ORIGIN, ORIGIN)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "budget": "100" }).to_string()))
        .unwrap();
    let res = app.send(request).await;
    assert_eq!(res.status, 201);
    assert_eq!(res.header("access-control-allow-origin"), Some(ORIGIN));
    let exposed = res.header("access-control-expose-headers").unwrap_or_default();
    assert!(exposed.to_ascii_lowercase().contains("location"));
}

#[tokio::test]
async fn server_errors_hide_detail_in_production() {
    let app = TestApp::with_mode(RunMode::Production);
    let res = app
        .post("/api/guests", json!({ "name": "Tiana", "email": "t@b.com", "eventId": 7 }))
        .await;
    assert_eq!(res.status, 500);
    assert_eq!(res.body, json!({ "error": { "message": "server issue" } }));
}

#[tokio::test]
async fn server_errors_show_detail_in_development() {
    let app = TestApp::with_mode(RunMode::Development);
    let res = app
        .post("/api/expenses", json!({ "vendor": "Cake Castle", "price": "1", "eventId": 7 }))
        .await;
    assert_eq!(res.status, 500);
    let message = res.body["message"].as_str().unwrap();
    assert!(message.contains("foreign key"), "{}", message);
    assert_eq!(res.body["error"]["message"], message);
    assert!(res.body["error"]["detail"].is_string());
}

#[tokio::test]
async fn client_errors_keep_their_shape_in_production() {
    let app = TestApp::with_mode(RunMode::Production);
    let res = app.get("/api/weddings/1").await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body, json!({ "error": { "message": "Event not found" } }));
}

#[tokio::test]
async fn oversized_bodies_are_rejected_with_the_error_envelope() {
    let app = TestApp::new();
    app.seed_weddings().await;
    let note = "x".repeat(unity_api::routes::BODY_LIMIT_BYTES + 1);
    let body = json!({ "vendor": "v", "note": note, "price": "1", "eventId": 1 }).to_string();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/expenses")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    let res = app.send(request).await;
    assert_eq!(res.status, 413);
    assert!(res.header("content-type").unwrap_or_default().starts_with("application/json"));
    assert!(res.body["error"]["message"].is_string(), "{}", res.text);
    assert_eq!(app.get("/api/expenses").await.body, json!([]));
}
