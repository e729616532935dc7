use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

pub fn validate_input<T: Validate>(input: &T) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|errors| AppError::UnprocessableEntity(format!("Validation failed: {errors}")))
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHouseInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFlatInput {
    pub house_id: Uuid,
    #[validate(length(min = 1, max = 64))]
    pub number: String,
    #[serde(default)]
    pub basic_rent: f64,
    #[serde(default)]
    pub gas_bill: f64,
    #[serde(default)]
    pub utility_bill: f64,
    #[serde(default)]
    pub water_charges: f64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTenantInput {
    pub house_id: Uuid,
    pub flat_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub phone: String,
    #[serde(default)]
    pub nid_number: String,
    #[serde(default)]
    pub advance_amount: f64,
    pub join_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTenantInput {
    pub house_id: Uuid,
    pub flat_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub phone: String,
    #[serde(default)]
    pub nid_number: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub join_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub advance_amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTenantStatusInput {
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRentInput {
    pub tenant_id: Uuid,
    #[validate(length(min = 1, max = 16))]
    pub month: String,
    #[validate(range(min = 2000, max = 2200))]
    pub year: i32,
    #[serde(default)]
    pub basic_rent: f64,
    #[serde(default)]
    pub gas_bill: f64,
    #[serde(default)]
    pub electricity_bill: f64,
    #[serde(default)]
    pub utility_bill: f64,
    #[serde(default)]
    pub water_charges: f64,
    #[serde(default)]
    pub total_paid: f64,
    #[serde(default)]
    pub is_advance: bool,
    pub payment_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdPath {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_input_requires_valid_email() {
        let input = RegisterInput {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
            name: "A".to_string(),
        };
        assert!(validate_input(&input).is_err());
    }

    #[test]
    fn register_input_requires_min_password_length() {
        let input = RegisterInput {
            email: "a@b.test".to_string(),
            password: "short".to_string(),
            name: "A".to_string(),
        };
        assert!(validate_input(&input).is_err());
    }
}
