//! Test harness: an in-memory database plus the full router, driven with
//! `tower::ServiceExt::oneshot` so no port is ever bound.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::str::FromStr;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use gamevault_server::config::ServerConfig;
use gamevault_server::db::MIGRATOR;
use gamevault_server::state::AppState;

/// Open an in-memory database with migrations applied.
///
/// A single connection keeps the in-memory database alive and shared for the
/// whole test.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    MIGRATOR.run(&pool).await.expect("Migrations failed");

    pool
}

/// Build the application router over a test pool.
pub fn test_app(pool: SqlitePool) -> Router {
    let config = ServerConfig {
        database_url: secrecy::SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        upload_dir: std::env::temp_dir().join(format!("gv-test-{}", uuid::Uuid::new_v4())),
        max_upload_bytes: 2 * 1024 * 1024,
        sentry_dsn: None,
    };

    gamevault_server::app(AppState::new(config, pool))
}

/// Convenience: a fresh app and its underlying pool.
pub async fn test_setup() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    let app = test_app(pool.clone());
    (app, pool)
}

/// Send a GET request.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds");

    app.clone().oneshot(request).await.expect("request runs")
}

/// Send a GET request with the admin role header.
pub async fn get_as_admin(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("x-user-role", "admin")
        .body(Body::empty())
        .expect("request builds");

    app.clone().oneshot(request).await.expect("request runs")
}

/// Send a JSON request with the given method.
pub async fn send_json(app: &Router, method: &str, uri: &str, body: &Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds");

    app.clone().oneshot(request).await.expect("request runs")
}

/// Send a JSON request with the admin role header.
pub async fn send_json_as_admin(
    app: &Router,
    method: &str,
    uri: &str,
    body: &Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-user-role", "admin")
        .body(Body::from(body.to_string()))
        .expect("request builds");

    app.clone().oneshot(request).await.expect("request runs")
}

/// Boundary used by the multipart helpers.
pub const BOUNDARY: &str = "gv-test-boundary";

/// Build a multipart body out of text fields.
#[must_use]
pub fn multipart_body(fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

/// Build a multipart body out of text fields plus one file part.
#[must_use]
pub fn multipart_body_with_file(
    fields: &[(&str, &str)],
    file_field: &str,
    filename: &str,
    content: &[u8],
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{file_field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Send a multipart POST carrying the admin role header and, optionally, a
/// request id. The body carries the given text fields and a small image
/// file, matching the game-creation contract.
pub async fn post_multipart_as_admin(
    app: &Router,
    uri: &str,
    fields: &[(&str, &str)],
    request_id: Option<&str>,
) -> Response<Body> {
    let body = multipart_body_with_file(fields, "image", "cover.png", b"png bytes");
    post_multipart_raw_as_admin(app, uri, body.into(), request_id).await
}

/// Send a multipart POST with a prebuilt body and the admin role header.
pub async fn post_multipart_raw_as_admin(
    app: &Router,
    uri: &str,
    body: Body,
    request_id: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("x-user-role", "admin");

    if let Some(id) = request_id {
        builder = builder.header("x-request-id", id);
    }

    let request = builder.body(body).expect("request builds");

    app.clone().oneshot(request).await.expect("request runs")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
