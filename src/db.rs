use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::error::AppError;

pub async fn connect(config: &AppConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_pool_max_connections)
        .min_connections(config.db_pool_min_connections)
        .acquire_timeout(Duration::from_secs(config.db_pool_acquire_timeout_seconds))
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Retrieval(format!("failed to connect to database: {error}")))?;

    tracing::info!(
        max_connections = config.db_pool_max_connections,
        "Database pool ready"
    );
    Ok(pool)
}

/// Creates the tables on startup if they do not exist yet.
pub async fn bootstrap_schema(pool: &PgPool) -> Result<(), AppError> {
    const STATEMENTS: &[&str] = &[
        "CREATE TABLE IF NOT EXISTS users (
            id uuid PRIMARY KEY,
            email text NOT NULL UNIQUE,
            password_hash text NOT NULL DEFAULT '',
            name text NOT NULL DEFAULT '',
            created_at timestamptz NOT NULL DEFAULT now(),
            updated_at timestamptz NOT NULL DEFAULT now()
        )",
        "CREATE TABLE IF NOT EXISTS houses (
            id uuid PRIMARY KEY,
            user_id uuid NOT NULL,
            name text NOT NULL,
            created_at timestamptz NOT NULL DEFAULT now(),
            updated_at timestamptz NOT NULL DEFAULT now()
        )",
        "CREATE TABLE IF NOT EXISTS flats (
            id uuid PRIMARY KEY,
            house_id uuid NOT NULL,
            number text NOT NULL,
            basic_rent double precision NOT NULL DEFAULT 0,
            gas_bill double precision NOT NULL DEFAULT 0,
            utility_bill double precision NOT NULL DEFAULT 0,
            water_charges double precision NOT NULL DEFAULT 0,
            created_at timestamptz NOT NULL DEFAULT now(),
            updated_at timestamptz NOT NULL DEFAULT now()
        )",
        "CREATE TABLE IF NOT EXISTS tenants (
            id uuid PRIMARY KEY,
            user_id uuid NOT NULL,
            house_id uuid NOT NULL,
            flat_id uuid NOT NULL,
            name text NOT NULL,
            phone text NOT NULL DEFAULT '',
            nid_number text NOT NULL DEFAULT '',
            is_active boolean NOT NULL DEFAULT true,
            join_date timestamptz NOT NULL DEFAULT now(),
            advance_amount double precision NOT NULL DEFAULT 0,
            created_at timestamptz NOT NULL DEFAULT now(),
            updated_at timestamptz NOT NULL DEFAULT now()
        )",
        "CREATE TABLE IF NOT EXISTS rent_payments (
            id uuid PRIMARY KEY,
            tenant_id uuid NOT NULL,
            month text NOT NULL,
            year integer NOT NULL,
            basic_rent double precision NOT NULL DEFAULT 0,
            gas_bill double precision NOT NULL DEFAULT 0,
            electricity_bill double precision NOT NULL DEFAULT 0,
            utility_bill double precision NOT NULL DEFAULT 0,
            water_charges double precision NOT NULL DEFAULT 0,
            total_paid double precision NOT NULL DEFAULT 0,
            is_advance boolean NOT NULL DEFAULT false,
            payment_date timestamptz NOT NULL DEFAULT now(),
            created_at timestamptz NOT NULL DEFAULT now(),
            updated_at timestamptz NOT NULL DEFAULT now()
        )",
        "CREATE INDEX IF NOT EXISTS idx_tenants_user_id ON tenants (user_id)",
        "CREATE INDEX IF NOT EXISTS idx_flats_house_id ON flats (house_id)",
        "CREATE INDEX IF NOT EXISTS idx_rent_payments_tenant_id ON rent_payments (tenant_id)",
    ];

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Database schema bootstrapped");
    Ok(())
}
