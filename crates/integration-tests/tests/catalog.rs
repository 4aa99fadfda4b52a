//! Catalog administration tests: creation with multipart, the role gate,
//! duplicate suppression, updates, and the delete cascade.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

use gamevault_integration_tests::{
    body_json, get, get_as_admin, post_multipart_as_admin, send_json, send_json_as_admin,
    test_setup,
};

const GAME_FIELDS: &[(&str, &str)] = &[
    ("title", "Hollow Depths"),
    ("description", "A descent into a ruined kingdom."),
    ("price", "29.99"),
    ("genre", "Metroidvania"),
    ("platform", "PC"),
];

#[tokio::test]
async fn test_create_game_then_list_returns_it() {
    let (app, _pool) = test_setup().await;

    let response = post_multipart_as_admin(&app, "/api/games", GAME_FIELDS, None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["title"], json!("Hollow Depths"));

    let response = get(&app, "/api/games").await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let games = listed.as_array().unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0]["title"], json!("Hollow Depths"));
    assert_eq!(games[0]["platform"], json!("PC"));
    assert!(
        games[0]["imagePath"]
            .as_str()
            .unwrap()
            .starts_with("uploads/")
    );

    // Price compared numerically, not textually.
    let price: Decimal = games[0]["price"].as_str().unwrap().parse().unwrap();
    assert_eq!(price, "29.99".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn test_create_game_requires_admin_role() {
    let (app, _pool) = test_setup().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/games")
        .header(
            axum::http::header::CONTENT_TYPE,
            format!(
                "multipart/form-data; boundary={}",
                gamevault_integration_tests::BOUNDARY
            ),
        )
        .body(axum::body::Body::from(
            gamevault_integration_tests::multipart_body(GAME_FIELDS),
        ))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_game_rejects_missing_field_and_duplicate_title() {
    let (app, _pool) = test_setup().await;

    // Missing platform.
    let incomplete: Vec<(&str, &str)> = GAME_FIELDS
        .iter()
        .filter(|(name, _)| *name != "platform")
        .copied()
        .collect();
    let response = post_multipart_as_admin(&app, "/api/games", &incomplete, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Missing image: all text fields present, no file part.
    let response = gamevault_integration_tests::post_multipart_raw_as_admin(
        &app,
        "/api/games",
        axum::body::Body::from(gamevault_integration_tests::multipart_body(GAME_FIELDS)),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("image is required"));

    // First create succeeds, exact-title repeat is rejected.
    let response = post_multipart_as_admin(&app, "/api/games", GAME_FIELDS, None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_multipart_as_admin(&app, "/api/games", GAME_FIELDS, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_duplicate_title_check_is_case_sensitive() {
    let (app, _pool) = test_setup().await;

    let response = post_multipart_as_admin(&app, "/api/games", GAME_FIELDS, None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let shouted: Vec<(&str, &str)> = GAME_FIELDS
        .iter()
        .map(|&(name, value)| {
            if name == "title" {
                (name, "HOLLOW DEPTHS")
            } else {
                (name, value)
            }
        })
        .collect();
    let response = post_multipart_as_admin(&app, "/api/games", &shouted, None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_game_with_request_id_succeeds_and_releases_the_id() {
    let (app, _pool) = test_setup().await;

    let response = post_multipart_as_admin(&app, "/api/games", GAME_FIELDS, Some("req-7")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The id is released once the first request finished; reusing it is a
    // fresh request (which now fails on the duplicate title instead).
    let response = post_multipart_as_admin(&app, "/api/games", GAME_FIELDS, Some("req-7")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("a game with this title already exists"));
}

#[tokio::test]
async fn test_update_game() {
    let (app, _pool) = test_setup().await;

    let response = post_multipart_as_admin(&app, "/api/games", GAME_FIELDS, None).await;
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = send_json_as_admin(
        &app,
        "PUT",
        &format!("/api/games/{id}"),
        &json!({"title": "Hollow Depths II", "price": "39.99", "description": "The sequel."}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], json!("Hollow Depths II"));
    assert_eq!(updated["price"], json!("39.99"));

    // Unknown id.
    let response = send_json_as_admin(
        &app,
        "PUT",
        "/api/games/99999",
        &json!({"title": "x", "price": "1", "description": "y"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_game_cascades_and_report_keeps_the_order() {
    let (app, pool) = test_setup().await;

    let response = post_multipart_as_admin(&app, "/api/games", GAME_FIELDS, None).await;
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    // Buy it, then delete it.
    let response = send_json(
        &app,
        "POST",
        "/api/checkout",
        &json!({
            "items": [{"gameId": id, "quantity": 1, "price": "29.99"}],
            "totalAmount": "29.99",
            "paymentMethodId": 1,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json_as_admin(&app, "DELETE", &format!("/api/games/{id}"), &json!({}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    // The order still shows up in the report, with a placeholder title.
    let response = get_as_admin(&app, "/api/orders").await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    let rows = report.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["gameTitle"], json!("Deleted game"));

    // Deleting again is a 404.
    let response = send_json_as_admin(&app, "DELETE", &format!("/api/games/{id}"), &json!({}))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
