//! Checkout workflow tests: atomicity, inventory movement, and the error
//! taxonomy of `/api/checkout`.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::SqlitePool;

use gamevault_core::{GameId, PaymentMethod, UserId};
use gamevault_integration_tests::{body_json, send_json, test_setup};
use gamevault_server::db::{GameRepository, OrderRepository};
use gamevault_server::models::{CartLine, NewGame, NewOrder};

async fn seed_game(pool: &SqlitePool, title: &str, price: &str, stock: i64) -> GameId {
    let games = GameRepository::new(pool);
    let game = games
        .create(&NewGame {
            title: title.to_owned(),
            description: "test game".to_owned(),
            price: price.parse().unwrap(),
            genre: "Test".to_owned(),
            platform: "PC".to_owned(),
            image_path: None,
        })
        .await
        .unwrap();
    games.set_stock(game.id, stock).await.unwrap();
    game.id
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_checkout_creates_order_items_payment_and_moves_stock() {
    let (app, pool) = test_setup().await;
    let a = seed_game(&pool, "Game A", "19.99", 10).await;
    let b = seed_game(&pool, "Game B", "59.99", 5).await;

    let response = send_json(
        &app,
        "POST",
        "/api/checkout",
        &json!({
            "items": [
                {"gameId": a.as_i64(), "quantity": 2, "price": "19.99"},
                {"gameId": b.as_i64(), "quantity": 1, "price": "59.99"},
            ],
            "totalAmount": "99.97",
            "paymentMethodId": 1,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["orderId"].is_i64());

    assert_eq!(count(&pool, "orders").await, 1);
    assert_eq!(count(&pool, "order_items").await, 2);
    assert_eq!(count(&pool, "payments").await, 1);

    let games = GameRepository::new(&pool);
    assert_eq!(games.stock(a).await.unwrap(), Some(8));
    assert_eq!(games.stock(b).await.unwrap(), Some(4));
}

#[tokio::test]
async fn test_checkout_with_unknown_game_writes_nothing() {
    let (app, pool) = test_setup().await;
    let a = seed_game(&pool, "Game A", "19.99", 10).await;

    let response = send_json(
        &app,
        "POST",
        "/api/checkout",
        &json!({
            "items": [
                {"gameId": a.as_i64(), "quantity": 1, "price": "19.99"},
                {"gameId": 9999, "quantity": 1, "price": "5.00"},
            ],
            "totalAmount": "24.99",
            "paymentMethodId": 1,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));

    assert_eq!(count(&pool, "orders").await, 0);
    assert_eq!(count(&pool, "order_items").await, 0);
    assert_eq!(count(&pool, "payments").await, 0);
    assert_eq!(
        GameRepository::new(&pool).stock(a).await.unwrap(),
        Some(10)
    );
}

#[tokio::test]
async fn test_failed_transaction_rolls_back_the_order_row() {
    let (_, pool) = test_setup().await;

    // A game id that passes no referential check: the item insert violates
    // the foreign key mid-transaction, after the order row went in.
    let order = NewOrder {
        user_id: None,
        total_amount: Decimal::from(10),
        method: PaymentMethod::CreditCard,
        lines: vec![CartLine {
            game_id: GameId::new(424_242),
            quantity: 1,
            unit_price: Decimal::from(10),
        }],
    };

    let result = OrderRepository::new(&pool).create_checkout(&order).await;
    assert!(result.is_err());

    assert_eq!(count(&pool, "orders").await, 0);
    assert_eq!(count(&pool, "order_items").await, 0);
    assert_eq!(count(&pool, "payments").await, 0);
}

#[tokio::test]
async fn test_checkout_validation_errors() {
    let (app, pool) = test_setup().await;
    let a = seed_game(&pool, "Game A", "19.99", 10).await;

    // Empty cart.
    let response = send_json(
        &app,
        "POST",
        "/api/checkout",
        &json!({"items": [], "totalAmount": "0", "paymentMethodId": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Missing payment method.
    let response = send_json(
        &app,
        "POST",
        "/api/checkout",
        &json!({
            "items": [{"gameId": a.as_i64(), "quantity": 1, "price": "19.99"}],
            "totalAmount": "19.99",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Zero quantity.
    let response = send_json(
        &app,
        "POST",
        "/api/checkout",
        &json!({
            "items": [{"gameId": a.as_i64(), "quantity": 0, "price": "19.99"}],
            "totalAmount": "0",
            "paymentMethodId": 1,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(count(&pool, "orders").await, 0);
}

#[tokio::test]
async fn test_checkout_is_not_idempotent() {
    let (app, pool) = test_setup().await;
    let a = seed_game(&pool, "Game A", "19.99", 10).await;

    let body = json!({
        "items": [{"gameId": a.as_i64(), "quantity": 1, "price": "19.99"}],
        "totalAmount": "19.99",
        "paymentMethodId": 2,
    });

    let first = send_json(&app, "POST", "/api/checkout", &body).await;
    let second = send_json(&app, "POST", "/api/checkout", &body).await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(count(&pool, "orders").await, 2);
}

#[tokio::test]
async fn test_stock_can_go_negative() {
    let (app, pool) = test_setup().await;
    let a = seed_game(&pool, "Game A", "19.99", 1).await;

    let response = send_json(
        &app,
        "POST",
        "/api/checkout",
        &json!({
            "items": [{"gameId": a.as_i64(), "quantity": 3, "price": "19.99"}],
            "totalAmount": "59.97",
            "paymentMethodId": 1,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        GameRepository::new(&pool).stock(a).await.unwrap(),
        Some(-2)
    );
}

#[tokio::test]
async fn test_checkout_records_the_user_when_given() {
    let (app, pool) = test_setup().await;
    let a = seed_game(&pool, "Game A", "19.99", 10).await;

    // Guest checkout leaves user_id NULL; a known id is recorded as-is.
    let user: UserId = {
        use gamevault_server::services::AuthService;
        AuthService::new(&pool)
            .register("buyer", "buyer@example.com", "long enough password", "customer")
            .await
            .unwrap()
            .id
    };

    let response = send_json(
        &app,
        "POST",
        "/api/checkout",
        &json!({
            "items": [{"gameId": a.as_i64(), "quantity": 1, "price": "19.99"}],
            "totalAmount": "19.99",
            "paymentMethodId": 1,
            "userId": user.as_i64(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored: Option<i64> = sqlx::query_scalar("SELECT user_id FROM orders LIMIT 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, Some(user.as_i64()));
}
