use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use crate::auth::require_user_id;
use crate::error::AppResult;
use crate::repository::{rents, tenants};
use crate::schemas::{validate_input, CreateRentInput, IdPath};
use crate::state::AppState;

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/rents", axum::routing::post(create_rent))
        .route("/rents/{id}", axum::routing::delete(delete_rent))
}

async fn create_rent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateRentInput>,
) -> AppResult<impl IntoResponse> {
    let user_id = require_user_id(&state, &headers)?;
    validate_input(&payload)?;

    // 404s when the tenant belongs to another landlord.
    tenants::get(&state.db_pool, payload.tenant_id, user_id).await?;

    // For regular records the server owns the arithmetic; the client's
    // total is only trusted for advance payments.
    let total_paid = if payload.is_advance {
        payload.total_paid
    } else {
        payload.basic_rent
            + payload.gas_bill
            + payload.electricity_bill
            + payload.utility_bill
            + payload.water_charges
    };

    let record = rents::NewRentPayment {
        tenant_id: payload.tenant_id,
        month: payload.month.clone(),
        year: payload.year,
        basic_rent: payload.basic_rent,
        gas_bill: payload.gas_bill,
        electricity_bill: payload.electricity_bill,
        utility_bill: payload.utility_bill,
        water_charges: payload.water_charges,
        total_paid,
        is_advance: payload.is_advance,
        payment_date: payload.payment_date.unwrap_or_else(Utc::now),
    };
    let created = rents::create(&state.db_pool, &record).await?;

    Ok((axum::http::StatusCode::CREATED, Json(created)))
}

async fn delete_rent(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    require_user_id(&state, &headers)?;
    rents::delete(&state.db_pool, path.id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
