use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::db;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db_pool: PgPool,
}

impl AppState {
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let db_pool = db::connect(&config).await?;
        db::bootstrap_schema(&db_pool).await?;

        Ok(Self {
            config: Arc::new(config),
            db_pool,
        })
    }
}
