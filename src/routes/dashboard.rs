use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;

use crate::auth::require_user_id;
use crate::error::AppResult;
use crate::repository::ledger::PgRentLedger;
use crate::services::dashboard::{compute_dashboard, DashboardStats};
use crate::state::AppState;

pub fn router() -> axum::Router<AppState> {
    axum::Router::new().route("/dashboard", axum::routing::get(get_stats))
}

async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<DashboardStats>> {
    let user_id = require_user_id(&state, &headers)?;

    let ledger = PgRentLedger::new(&state.db_pool);
    let stats = compute_dashboard(&ledger, user_id, Utc::now().date_naive()).await?;

    Ok(Json(stats))
}
