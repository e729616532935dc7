use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::auth::require_user_id;
use crate::error::{AppError, AppResult};
use crate::models::{RentPayment, Tenant};
use crate::repository::{houses, rents, tenants};
use crate::schemas::{
    validate_input, CreateTenantInput, IdPath, UpdateTenantInput, UpdateTenantStatusInput,
};
use crate::state::AppState;

/// Tenant decorated with the coarse headline figures the listing screen
/// shows. The precise per-period due accounting lives in the dashboard
/// engine; this one only multiplies months by base rent.
#[derive(Debug, Serialize)]
struct TenantSummary {
    #[serde(flatten)]
    tenant: Tenant,
    due_amount: f64,
    total_paid: f64,
    house_name: String,
    flat_number: String,
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route(
            "/tenants",
            axum::routing::post(create_tenant).get(list_tenants),
        )
        .route(
            "/tenants/{id}",
            axum::routing::get(get_tenant)
                .put(update_tenant)
                .delete(delete_tenant),
        )
        .route("/tenants/{id}/status", axum::routing::put(update_status))
        .route("/tenants/{id}/rents", axum::routing::get(list_tenant_rents))
}

async fn create_tenant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateTenantInput>,
) -> AppResult<impl IntoResponse> {
    let user_id = require_user_id(&state, &headers)?;
    validate_input(&payload)?;

    let house = houses::get_house(&state.db_pool, payload.house_id).await?;
    if house.user_id != user_id {
        return Err(AppError::NotFound("house not found".to_string()));
    }
    let flat = houses::get_flat(&state.db_pool, payload.flat_id).await?;
    if flat.house_id != house.id {
        return Err(AppError::BadRequest(
            "flat does not belong to the given house".to_string(),
        ));
    }

    let join_date = payload.join_date.unwrap_or_else(Utc::now);
    let tenant = tenants::create(&state.db_pool, user_id, join_date, &payload).await?;

    // The one-time upfront payment is booked as a flagged record so it
    // never enters period-by-period due accounting.
    if tenant.advance_amount > 0.0 {
        let record = rents::NewRentPayment::advance(tenant.id, tenant.advance_amount, join_date);
        rents::create(&state.db_pool, &record).await?;
    }

    tracing::info!(tenant_id = %tenant.id, user_id = %user_id, "Tenant created");
    Ok((axum::http::StatusCode::CREATED, Json(tenant)))
}

async fn list_tenants(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<TenantSummary>>> {
    let user_id = require_user_id(&state, &headers)?;

    let now = Utc::now();
    let mut summaries = Vec::new();
    for tenant in tenants::list(&state.db_pool, user_id).await? {
        let payments = rents::list_for_tenant(&state.db_pool, tenant.id).await?;
        let total_paid: f64 = payments.iter().map(|payment| payment.total_paid).sum();

        let house_name = houses::get_house(&state.db_pool, tenant.house_id)
            .await
            .map(|house| house.name)
            .unwrap_or_else(|_| "Unknown".to_string());
        let flat = houses::get_flat(&state.db_pool, tenant.flat_id).await.ok();
        let flat_number = flat
            .as_ref()
            .map(|flat| flat.number.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        let months = if tenant.is_active {
            let years = now.year() - tenant.join_date.year();
            years * 12 + now.month() as i32 - tenant.join_date.month() as i32 + 1
        } else {
            0
        };
        let expected = months.max(0) as f64 * flat.map(|flat| flat.basic_rent).unwrap_or(0.0);
        let due_amount = (expected - total_paid).max(0.0);

        summaries.push(TenantSummary {
            tenant,
            due_amount,
            total_paid,
            house_name,
            flat_number,
        });
    }

    Ok(Json(summaries))
}

async fn get_tenant(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    headers: HeaderMap,
) -> AppResult<Json<Tenant>> {
    let user_id = require_user_id(&state, &headers)?;
    let tenant = tenants::get(&state.db_pool, path.id, user_id).await?;
    Ok(Json(tenant))
}

async fn update_tenant(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    headers: HeaderMap,
    Json(payload): Json<UpdateTenantInput>,
) -> AppResult<Json<Tenant>> {
    let user_id = require_user_id(&state, &headers)?;
    validate_input(&payload)?;

    let tenant = tenants::update(&state.db_pool, path.id, user_id, &payload).await?;
    Ok(Json(tenant))
}

async fn update_status(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    headers: HeaderMap,
    Json(payload): Json<UpdateTenantStatusInput>,
) -> AppResult<Json<Tenant>> {
    let user_id = require_user_id(&state, &headers)?;
    let tenant =
        tenants::update_status(&state.db_pool, path.id, user_id, payload.is_active).await?;
    Ok(Json(tenant))
}

async fn delete_tenant(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let user_id = require_user_id(&state, &headers)?;
    tenants::delete(&state.db_pool, path.id, user_id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

async fn list_tenant_rents(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<RentPayment>>> {
    let user_id = require_user_id(&state, &headers)?;

    // Ownership check before exposing the payment history.
    let tenant = tenants::get(&state.db_pool, path.id, user_id).await?;
    let payments = rents::list_for_tenant(&state.db_pool, tenant.id).await?;
    Ok(Json(payments))
}
