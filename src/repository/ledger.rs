use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::RentPayment;

/// An active tenancy joined with its flat's fixed charge components, the
/// shape the dashboard engine walks month by month.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TenancyCharge {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub flat_number: String,
    pub join_date: DateTime<Utc>,
    pub basic_rent: f64,
    pub gas_bill: f64,
    pub utility_bill: f64,
    pub water_charges: f64,
}

impl TenancyCharge {
    /// Fixed components expected every billing period. Electricity is not
    /// part of this; it varies per period and is only known once a payment
    /// record for that period exists.
    pub fn flat_total(&self) -> f64 {
        self.basic_rent + self.gas_bill + self.utility_bill + self.water_charges
    }
}

/// Read path the dashboard engine depends on. Passed in explicitly so the
/// aggregation can be unit-tested against an in-memory implementation.
#[async_trait]
pub trait RentLedger: Send + Sync {
    async fn active_tenancies(&self, landlord_id: Uuid) -> AppResult<Vec<TenancyCharge>>;

    /// Records must come back ordered by payment date: the engine takes the
    /// first record of a period as the source of its electricity charge.
    async fn payments_for_tenant(&self, tenant_id: Uuid) -> AppResult<Vec<RentPayment>>;

    /// Sum and count of payment records for the landlord's tenants whose
    /// period matches `month` / `year`. Tenancy activity is deliberately not
    /// filtered here; a payment from a since-departed tenant still counts.
    async fn collected_for_period(
        &self,
        landlord_id: Uuid,
        month: &str,
        year: i32,
    ) -> AppResult<(f64, i64)>;

    async fn flat_count(&self, landlord_id: Uuid) -> AppResult<i64>;

    async fn occupied_count(&self, landlord_id: Uuid) -> AppResult<i64>;
}

pub struct PgRentLedger<'a> {
    pool: &'a PgPool,
}

impl<'a> PgRentLedger<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentLedger for PgRentLedger<'_> {
    async fn active_tenancies(&self, landlord_id: Uuid) -> AppResult<Vec<TenancyCharge>> {
        let tenancies = sqlx::query_as::<_, TenancyCharge>(
            "SELECT t.id AS tenant_id,
                    t.name AS tenant_name,
                    f.number AS flat_number,
                    t.join_date,
                    f.basic_rent,
                    f.gas_bill,
                    f.utility_bill,
                    f.water_charges
             FROM tenants t
             JOIN flats f ON f.id = t.flat_id
             WHERE t.user_id = $1 AND t.is_active = true
             ORDER BY t.created_at",
        )
        .bind(landlord_id)
        .fetch_all(self.pool)
        .await?;
        Ok(tenancies)
    }

    async fn payments_for_tenant(&self, tenant_id: Uuid) -> AppResult<Vec<RentPayment>> {
        crate::repository::rents::list_for_tenant(self.pool, tenant_id).await
    }

    async fn collected_for_period(
        &self,
        landlord_id: Uuid,
        month: &str,
        year: i32,
    ) -> AppResult<(f64, i64)> {
        let row = sqlx::query_as::<_, (f64, i64)>(
            "SELECT COALESCE(SUM(r.total_paid), 0), COUNT(*)
             FROM rent_payments r
             JOIN tenants t ON t.id = r.tenant_id
             WHERE t.user_id = $1 AND r.month = $2 AND r.year = $3",
        )
        .bind(landlord_id)
        .bind(month)
        .bind(year)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }

    async fn flat_count(&self, landlord_id: Uuid) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)
             FROM flats f
             JOIN houses h ON h.id = f.house_id
             WHERE h.user_id = $1",
        )
        .bind(landlord_id)
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }

    async fn occupied_count(&self, landlord_id: Uuid) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tenants WHERE user_id = $1 AND is_active = true",
        )
        .bind(landlord_id)
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }
}
