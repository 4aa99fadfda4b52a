//! Authentication route handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::services::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

fn required<'a>(value: Option<&'a String>, field: &str) -> Result<&'a str, AppError> {
    value
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let email = required(body.email.as_ref(), "email")?;
    let password = required(body.password.as_ref(), "password")?;
    let role = required(body.role.as_ref(), "role")?;

    let user = AuthService::new(state.pool())
        .login(email, password, role)
        .await?;

    Ok(Json(json!({
        "success": true,
        "userType": user.role.as_str(),
        "userId": user.id.as_i64(),
    })))
}

/// `POST /api/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let username = required(body.username.as_ref(), "username")?;
    let email = required(body.email.as_ref(), "email")?;
    let password = required(body.password.as_ref(), "password")?;
    let role = required(body.role.as_ref(), "role")?;

    AuthService::new(state.pool())
        .register(username, email, password, role)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({"success": true}))))
}
