use chrono::{DateTime, Datelike, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{RentPayment, ADVANCE_MONTH_LABEL};

pub struct NewRentPayment {
    pub tenant_id: Uuid,
    pub month: String,
    pub year: i32,
    pub basic_rent: f64,
    pub gas_bill: f64,
    pub electricity_bill: f64,
    pub utility_bill: f64,
    pub water_charges: f64,
    pub total_paid: f64,
    pub is_advance: bool,
    pub payment_date: DateTime<Utc>,
}

impl NewRentPayment {
    /// The upfront record written at move-in when a tenant pays an advance.
    pub fn advance(tenant_id: Uuid, amount: f64, join_date: DateTime<Utc>) -> Self {
        Self {
            tenant_id,
            month: ADVANCE_MONTH_LABEL.to_string(),
            year: join_date.year(),
            basic_rent: 0.0,
            gas_bill: 0.0,
            electricity_bill: 0.0,
            utility_bill: 0.0,
            water_charges: 0.0,
            total_paid: amount,
            is_advance: true,
            payment_date: Utc::now(),
        }
    }
}

pub async fn create(pool: &PgPool, payment: &NewRentPayment) -> AppResult<RentPayment> {
    let created = sqlx::query_as::<_, RentPayment>(
        "INSERT INTO rent_payments
             (id, tenant_id, month, year, basic_rent, gas_bill, electricity_bill,
              utility_bill, water_charges, total_paid, is_advance, payment_date)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payment.tenant_id)
    .bind(&payment.month)
    .bind(payment.year)
    .bind(payment.basic_rent)
    .bind(payment.gas_bill)
    .bind(payment.electricity_bill)
    .bind(payment.utility_bill)
    .bind(payment.water_charges)
    .bind(payment.total_paid)
    .bind(payment.is_advance)
    .bind(payment.payment_date)
    .fetch_one(pool)
    .await?;
    Ok(created)
}

pub async fn list_for_tenant(pool: &PgPool, tenant_id: Uuid) -> AppResult<Vec<RentPayment>> {
    let payments = sqlx::query_as::<_, RentPayment>(
        "SELECT * FROM rent_payments WHERE tenant_id = $1 ORDER BY payment_date",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;
    Ok(payments)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> AppResult<()> {
    sqlx::query("DELETE FROM rent_payments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
