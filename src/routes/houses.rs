use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

use crate::auth::require_user_id;
use crate::error::{AppError, AppResult};
use crate::models::HouseWithFlats;
use crate::repository::houses;
use crate::schemas::{validate_input, CreateFlatInput, CreateHouseInput};
use crate::state::AppState;

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route(
            "/houses",
            axum::routing::post(create_house).get(list_houses),
        )
        .route("/houses/flats", axum::routing::post(create_flat))
}

async fn create_house(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateHouseInput>,
) -> AppResult<impl IntoResponse> {
    let user_id = require_user_id(&state, &headers)?;
    validate_input(&payload)?;

    let house = houses::create_house(&state.db_pool, user_id, &payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(house)))
}

async fn list_houses(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<HouseWithFlats>>> {
    let user_id = require_user_id(&state, &headers)?;
    let listing = houses::list_with_flats(&state.db_pool, user_id).await?;
    Ok(Json(listing))
}

async fn create_flat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateFlatInput>,
) -> AppResult<impl IntoResponse> {
    let user_id = require_user_id(&state, &headers)?;
    validate_input(&payload)?;

    let house = houses::get_house(&state.db_pool, payload.house_id).await?;
    if house.user_id != user_id {
        return Err(AppError::NotFound("house not found".to_string()));
    }

    let flat = houses::create_flat(&state.db_pool, &payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(flat)))
}
