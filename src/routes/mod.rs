use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod houses;
pub mod rents;
pub mod tenants;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(houses::router())
        .merge(tenants::router())
        .merge(rents::router())
}
