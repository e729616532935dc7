use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::auth::{hash_password, issue_token, require_user_id, verify_password};
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::repository::users;
use crate::schemas::{validate_input, LoginInput, RegisterInput};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct AuthResponse {
    user: User,
    token: String,
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/auth/register", axum::routing::post(register))
        .route("/auth/login", axum::routing::post(login))
        .route("/auth/me", axum::routing::get(me))
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterInput>,
) -> AppResult<impl IntoResponse> {
    validate_input(&payload)?;

    let password_hash = hash_password(&payload.password)?;
    let user = users::create(&state.db_pool, &payload.email, &password_hash, &payload.name).await?;
    let token = issue_token(&state.config, &user)?;

    tracing::info!(user_id = %user.id, "Landlord registered");
    Ok((
        axum::http::StatusCode::CREATED,
        Json(AuthResponse { user, token }),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginInput>,
) -> AppResult<Json<AuthResponse>> {
    validate_input(&payload)?;

    let user = users::get_by_email(&state.db_pool, &payload.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    let token = issue_token(&state.config, &user)?;
    Ok(Json(AuthResponse { user, token }))
}

async fn me(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Json<User>> {
    let user_id = require_user_id(&state, &headers)?;
    let user = users::get_by_id(&state.db_pool, user_id).await?;
    Ok(Json(user))
}
