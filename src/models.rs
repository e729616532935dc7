use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Month label used on advance payment records instead of a calendar month.
pub const ADVANCE_MONTH_LABEL: &str = "Advance";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct House {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// House with its flats nested, as returned by the house listing.
#[derive(Debug, Clone, Serialize)]
pub struct HouseWithFlats {
    #[serde(flatten)]
    pub house: House,
    pub flats: Vec<Flat>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Flat {
    pub id: Uuid,
    pub house_id: Uuid,
    pub number: String,
    pub basic_rent: f64,
    pub gas_bill: f64,
    pub utility_bill: f64,
    pub water_charges: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tenant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub house_id: Uuid,
    pub flat_id: Uuid,
    pub name: String,
    pub phone: String,
    pub nid_number: String,
    pub is_active: bool,
    pub join_date: DateTime<Utc>,
    pub advance_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One rent payment, keyed by (tenant, month name, year). Advance records
/// carry [`ADVANCE_MONTH_LABEL`] as their month and never enter the
/// period-by-period due accounting.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RentPayment {
    pub id: Uuid,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
