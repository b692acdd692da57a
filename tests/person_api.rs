//! HTTP-level tests for the person API
//!
//! Requests go through the full router (middleware, CORS, normalizer) via
//! `tower::ServiceExt::oneshot`, backed by the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, Method, Request, StatusCode};
use async_trait::async_trait;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use phonebook::http_server::{HttpServer, HttpServerConfig};
use phonebook::person::{Person, PersonId, PersonRepository, StoreError, StoreResult};
use phonebook::store::{DocumentBackend, MemoryBackend};

const UNKNOWN_ID: &str = "5f1d7c2e9a3b4c0012345678";

fn app() -> Router {
    let config = HttpServerConfig {
        static_dir: None,
        ..Default::default()
    };
    let people = PersonRepository::new(Arc::new(MemoryBackend::new()));
    HttpServer::with_config(config, people).router()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Bytes) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes)
}

fn json_of(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

async fn create(app: &Router, name: &str, number: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/persons",
        Some(json!({ "name": name, "number": number })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json_of(&body)
}

async fn count(app: &Router) -> usize {
    let (status, body) = send(app, Method::GET, "/api/persons", None).await;
    assert_eq!(status, StatusCode::OK);
    json_of(&body).as_array().unwrap().len()
}

#[tokio::test]
async fn test_list_empty() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/persons", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!([]));
}

#[tokio::test]
async fn test_create_then_find_round_trips() {
    let app = app();
    let created = create(&app, "Ada Lovelace", "040-1234567").await;

    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);
    assert_eq!(created["name"], "Ada Lovelace");
    assert_eq!(created["number"], "040-1234567");

    let (status, body) = send(&app, Method::GET, &format!("/api/persons/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), created);
}

#[tokio::test]
async fn test_list_keeps_insertion_order() {
    let app = app();
    let first = create(&app, "Arto Hellas", "040-123456").await;
    let second = create(&app, "Dan Abramov", "12-43234345").await;

    let (_, body) = send(&app, Method::GET, "/api/persons", None).await;
    assert_eq!(json_of(&body), json!([first, second]));
}

#[tokio::test]
async fn test_unknown_id_is_404_with_empty_body() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/persons/{}", UNKNOWN_ID),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_delete_twice_is_204_both_times() {
    let app = app();
    let created = create(&app, "Mary Poppendieck", "39-236423122").await;
    let uri = format!("/api/persons/{}", created["id"].as_str().unwrap());

    for _ in 0..2 {
        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
    }

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_id_is_204() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/persons/{}", UNKNOWN_ID),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_changes_number_only() {
    let app = app();
    let created = create(&app, "Ada Lovelace", "040-1234567").await;
    let uri = format!("/api/persons/{}", created["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Someone Else", "number": "040-1111111" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let updated = json_of(&body);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Ada Lovelace");
    assert_eq!(updated["number"], "040-1111111");

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(json_of(&body), updated);
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/persons/{}", UNKNOWN_ID),
        Some(json!({ "number": "040-1111111" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_update_validates_number() {
    let app = app();
    let created = create(&app, "Ada Lovelace", "040-1234567").await;
    let uri = format!("/api/persons/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "number": "1234-5678" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json_of(&body),
        json!({ "error": "Person validation failed: number: `1234-5678` is not a valid phone number" })
    );

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(json_of(&body)["number"], "040-1234567");
}

#[tokio::test]
async fn test_malformed_id_is_400_on_every_verb() {
    let app = app();
    let expected = json!({ "error": "malformed id" });

    let (status, body) = send(&app, Method::GET, "/api/persons/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&body), expected);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/persons/not-an-id",
        Some(json!({ "number": "040-1111111" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&body), expected);

    let (status, body) = send(&app, Method::DELETE, "/api/persons/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&body), expected);
}

#[tokio::test]
async fn test_malformed_id_reported_before_number_validation() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/persons/123",
        Some(json!({ "number": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&body), json!({ "error": "malformed id" }));
}

#[tokio::test]
async fn test_undecodable_id_is_400_on_every_verb() {
    let app = app();
    let expected = json!({ "error": "malformed id" });

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(json!({ "number": "040-1111111" }))),
        (Method::DELETE, None),
    ] {
        let (status, bytes) = send(&app, method.clone(), "/api/persons/%FF", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", method);
        assert_eq!(json_of(&bytes), expected, "{}", method);
    }
}

#[tokio::test]
async fn test_invalid_create_is_400_and_stores_nothing() {
    let app = app();
    create(&app, "Arto Hellas", "040-123456").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/persons",
        Some(json!({ "name": "Ada", "number": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json_of(&body),
        json!({
            "error": "Person validation failed: number: Path `number` (`123`) is shorter than the minimum allowed length (8)."
        })
    );
    assert_eq!(count(&app).await, 1);
}

#[tokio::test]
async fn test_create_missing_fields() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/persons", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json_of(&body),
        json!({
            "error": "Person validation failed: name: Path `name` is required., number: Path `number` is required."
        })
    );
    assert_eq!(count(&app).await, 0);
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/persons")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": \"Ada"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(json_of(&body), json!({ "error": "malformed request body" }));
    assert_eq!(count(&app).await, 0);
}

#[tokio::test]
async fn test_info_counts_people_and_ticks() {
    let app = app();
    create(&app, "Arto Hellas", "040-123456").await;
    create(&app, "Ada Lovelace", "39-445323523").await;

    let (status, first) = send(&app, Method::GET, "/info", None).await;
    assert_eq!(status, StatusCode::OK);
    let first = String::from_utf8(first.to_vec()).unwrap();
    assert!(first.contains("Phonebook has info for 2 people"));

    tokio::time::sleep(Duration::from_millis(10)).await;

    let (_, second) = send(&app, Method::GET, "/info", None).await;
    let second = String::from_utf8(second.to_vec()).unwrap();
    assert!(second.contains("Phonebook has info for 2 people"));
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_info_is_html() {
    let app = app();
    let request = Request::builder().uri("/info").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["status"], "ok");
}

#[tokio::test]
async fn test_unknown_path_without_assets_is_404() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/index.html", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_assets_served_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>phonebook</h1>").unwrap();

    let config = HttpServerConfig {
        static_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let people = PersonRepository::new(Arc::new(MemoryBackend::new()));
    let app = HttpServer::with_config(config, people).router();

    let (status, body) = send(&app, Method::GET, "/index.html", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"<h1>phonebook</h1>");

    let (status, _) = send(&app, Method::GET, "/api/persons", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let app = app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/persons")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

const BACKEND_DETAIL: &str = "disk /var/lib/phonebook unavailable";

/// Backend whose every call fails.
struct UnavailableBackend;

#[async_trait]
impl DocumentBackend for UnavailableBackend {
    async fn all(&self) -> StoreResult<Vec<Person>> {
        Err(StoreError::backend(BACKEND_DETAIL))
    }

    async fn get(&self, _id: PersonId) -> StoreResult<Option<Person>> {
        Err(StoreError::backend(BACKEND_DETAIL))
    }

    async fn insert(&self, _person: Person) -> StoreResult<()> {
        Err(StoreError::backend(BACKEND_DETAIL))
    }

    async fn replace(&self, _person: Person) -> StoreResult<bool> {
        Err(StoreError::backend(BACKEND_DETAIL))
    }

    async fn remove(&self, _id: PersonId) -> StoreResult<bool> {
        Err(StoreError::backend(BACKEND_DETAIL))
    }

    fn kind(&self) -> &'static str {
        "unavailable"
    }
}

#[tokio::test]
async fn test_backend_failure_is_500_without_detail() {
    let config = HttpServerConfig {
        static_dir: None,
        ..Default::default()
    };
    let people = PersonRepository::new(Arc::new(UnavailableBackend));
    let app = HttpServer::with_config(config, people).router();

    let requests = [
        (Method::GET, "/api/persons".to_string(), None),
        (Method::GET, "/info".to_string(), None),
        (Method::GET, format!("/api/persons/{}", UNKNOWN_ID), None),
        (
            Method::POST,
            "/api/persons".to_string(),
            Some(json!({ "name": "Ada Lovelace", "number": "040-1234567" })),
        ),
        (Method::DELETE, format!("/api/persons/{}", UNKNOWN_ID), None),
    ];

    for (method, uri, body) in requests {
        let (status, bytes) = send(&app, method.clone(), &uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(json_of(&bytes), json!({ "error": "internal server error" }));
        assert!(!String::from_utf8_lossy(&bytes).contains(BACKEND_DETAIL));
    }
}
