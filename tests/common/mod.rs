//! Shared harness: the full router over an in-memory repository, plus fixtures.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use unity_api::model::{EXPENSES, GUESTS, WEDDINGS};
use unity_api::sql::FieldValue;
use unity_api::{app, AppState, Config, MemoryRepository, Repository, RunMode};

pub const TOKEN: &str = "test-token";
pub const ORIGIN: &str = "http://localhost:3000";

pub fn test_config(mode: RunMode) -> Config {
    Config {
        mode,
        client_origin: HeaderValue::from_static(ORIGIN),
        database_url: "postgres://localhost/unity_test".into(),
        database_max_connections: 1,
        api_token: TOKEN.into(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
    /// Parsed JSON body, `Value::Null` when the body is empty or not JSON.
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<MemoryRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        TestApp::with_mode(RunMode::Test)
    }

    pub fn with_mode(mode: RunMode) -> Self {
        let repo = Arc::new(MemoryRepository::default());
        let state = AppState::new(repo.clone(), test_config(mode));
        TestApp {
            router: app(state),
            repo,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let res = self.router.clone().oneshot(request).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }

    /// Authorized request with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN));
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        self.send(request.unwrap()).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn seed_weddings(&self) {
        for (spending, budget) in [("3400", "54000"), ("32547", "64000")] {
            self.repo
                .insert(
                    &WEDDINGS,
                    &[("spending", money(spending)), ("budget", money(budget))],
                )
                .await
                .unwrap();
        }
    }

    /// Seeds the weddings first; guests reference them.
    pub async fn seed_guests(&self) {
        self.seed_weddings().await;
        for (name, email, event_id) in [
            ("Babba Yaga", "spoopywitch101@gmail.com", 1_i64),
            ("Prince Philip", "OnceUponADream@yahoo.com", 2),
            ("Minnie Mouse", "theMouseofHouse@hotmail.com", 1),
        ] {
            self.repo
                .insert(
                    &GUESTS,
                    &[
                        ("name", text(name)),
                        ("email", text(email)),
                        ("event_id", FieldValue::from(event_id)),
                    ],
                )
                .await
                .unwrap();
        }
    }

    /// Seeds the weddings first; expenses reference them.
    pub async fn seed_expenses(&self) {
        self.seed_weddings().await;
        for (vendor, note, price, event_id) in [
            ("Haku Spring", "Honeymoon", "4300", 2_i64),
            ("Emperor Palace", "Venue", "2000", 1),
            ("High Ho Help", "Valet", "1500", 2),
        ] {
            self.repo
                .insert(
                    &EXPENSES,
                    &[
                        ("vendor", text(vendor)),
                        ("note", text(note)),
                        ("price", money(price)),
                        ("event_id", FieldValue::from(event_id)),
                    ],
                )
                .await
                .unwrap();
        }
    }
}

fn money(s: &str) -> FieldValue {
    FieldValue::from(Decimal::from_str(s).unwrap())
}

fn text(s: &str) -> FieldValue {
    FieldValue::from(s.to_string())
}
