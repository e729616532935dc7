use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: i64,
}

pub fn issue_token(config: &AppConfig, user: &User) -> AppResult<String> {
    let expires_at = Utc::now() + Duration::hours(config.jwt_ttl_hours);
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|error| AppError::Internal(format!("failed to sign token: {error}")))
}

pub fn verify_token(config: &AppConfig, token: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("invalid or expired token".to_string()))
}

/// Resolves the authenticated landlord from the `Authorization: Bearer`
/// header. Every protected handler calls this before touching storage.
pub fn require_user_id(state: &AppState, headers: &HeaderMap) -> AppResult<Uuid> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("malformed authorization header".to_string()))?;

    let claims = verify_token(&state.config, token)?;
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("invalid user id in token".to_string()))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|error| AppError::Internal(format!("failed to hash password: {error}")))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::from_env();
        config.jwt_secret = "test-secret".to_string();
        config.jwt_ttl_hours = 1;
        config
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "landlord@example.com".to_string(),
            password_hash: String::new(),
            name: "Landlord".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trips() {
        let config = test_config();
        let user = test_user();
        let token = issue_token(&config, &user).unwrap();
        let claims = verify_token(&config, &token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let config = test_config();
        let mut other = test_config();
        other.jwt_secret = "different-secret".to_string();
        let token = issue_token(&other, &test_user()).unwrap();
        assert!(verify_token(&config, &token).is_err());
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }
}
