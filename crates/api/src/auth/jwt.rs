//! Creating and validating JSON Web Tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use solvetrack_domain::{Role, UserAccount};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token format or signature")]
    InvalidToken,

    #[error("Failed to create token")]
    TokenCreation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// HS256 token issuer/validator
pub struct JwtService {
    secret: String,
    ttl_seconds: i64,
}

impl JwtService {
    pub fn new(secret: impl Into<String>, ttl_seconds: i64) -> Self {
        Self { secret: secret.into(), ttl_seconds }
    }

    pub fn create_token(&self, user: &UserAccount) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            role: user.role,
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|_| JwtError::TokenCreation)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &DecodingKey::from_secret(self.secret.as_ref()), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> UserAccount {
        UserAccount {
            id: "u1".into(),
            name: "Test".into(),
            email: "t@example.com".into(),
            password_hash: "hash".into(),
            role,
            batch: None,
            assigned_teacher: None,
            is_approved: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let service = JwtService::new("secret", 3600);

        let token = service.create_token(&user(Role::Teacher)).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.role, Role::Teacher);
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let issuer = JwtService::new("secret-a", 3600);
        let verifier = JwtService::new("secret-b", 3600);

        let token = issuer.create_token(&user(Role::Student)).unwrap();
        assert!(matches!(verifier.validate_token(&token), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Far enough in the past to clear the default validation leeway
        let service = JwtService::new("secret", -600);

        let token = service.create_token(&user(Role::Student)).unwrap();
        assert!(matches!(service.validate_token(&token), Err(JwtError::TokenExpired)));
    }
}
