use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Tenant;
use crate::schemas::{CreateTenantInput, UpdateTenantInput};

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    join_date: DateTime<Utc>,
    input: &CreateTenantInput,
) -> AppResult<Tenant> {
    let tenant = sqlx::query_as::<_, Tenant>(
        "INSERT INTO tenants
             (id, user_id, house_id, flat_id, name, phone, nid_number, is_active, join_date, advance_amount)
         VALUES ($1, $2, $3, $4, $5, $6, $7, true, $8, $9)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(input.house_id)
    .bind(input.flat_id)
    .bind(&input.name)
    .bind(&input.phone)
    .bind(&input.nid_number)
    .bind(join_date)
    .bind(input.advance_amount)
    .fetch_one(pool)
    .await?;
    Ok(tenant)
}

pub async fn list(pool: &PgPool, user_id: Uuid) -> AppResult<Vec<Tenant>> {
    let tenants = sqlx::query_as::<_, Tenant>(
        "SELECT * FROM tenants WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(tenants)
}

pub async fn get(pool: &PgPool, id: Uuid, user_id: Uuid) -> AppResult<Tenant> {
    let tenant = sqlx::query_as::<_, Tenant>(
        "SELECT * FROM tenants WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(tenant)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    input: &UpdateTenantInput,
) -> AppResult<Tenant> {
    let tenant = sqlx::query_as::<_, Tenant>(
        "UPDATE tenants
         SET house_id = $3,
             flat_id = $4,
             name = $5,
             phone = $6,
             nid_number = $7,
             is_active = $8,
             join_date = COALESCE($9, join_date),
             advance_amount = $10,
             updated_at = now()
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(input.house_id)
    .bind(input.flat_id)
    .bind(&input.name)
    .bind(&input.phone)
    .bind(&input.nid_number)
    .bind(input.is_active)
    .bind(input.join_date)
    .bind(input.advance_amount)
    .fetch_one(pool)
    .await?;
    Ok(tenant)
}

pub async fn update_status(pool: &PgPool, id: Uuid, user_id: Uuid, is_active: bool) -> AppResult<Tenant> {
    let tenant = sqlx::query_as::<_, Tenant>(
        "UPDATE tenants
         SET is_active = $3, updated_at = now()
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(is_active)
    .fetch_one(pool)
    .await?;
    Ok(tenant)
}

pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> AppResult<()> {
    sqlx::query("DELETE FROM tenants WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
