//! JWT access-token generation and validation.
//!
//! Tokens are HS256-signed and carry a [`Claims`] payload. The `jti` is the
//! session id: it keys the session record and the session cache entry.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mentorhub_core::types::EntityId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's profile id.
    pub sub: EntityId,
    /// Role at issue time (`"mentor"`, `"mentee"` or `"unset"`). Informational;
    /// authorization always re-reads the stored profile.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in minutes (default: 1440).
    pub access_token_expiry_mins: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 1440;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `1440`  |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

/// A freshly issued token together with its claims.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Issue an access token for a new session of `user_id`.
pub fn generate_access_token(
    user_id: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: now + config.access_token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().simple().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(IssuedToken { token, claims })
}

/// Validate signature and expiry, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        }
    }

    #[test]
    fn generate_and_validate_access_token() {
        let config = test_config();
        let issued = generate_access_token("user-1", "mentee", &config).unwrap();

        let claims = validate_token(&issued.token, &config).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, "mentee");
        assert_eq!(claims.jti, issued.claims.jti);
        assert!(claims.exp > claims.iat);
        assert!(claims.jti.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "user-1".to_string(),
            role: "unset".to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: "abc".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        };
        let issued = generate_access_token("user-1", "mentor", &config_a).unwrap();
        assert!(validate_token(&issued.token, &config_b).is_err());
    }
}
