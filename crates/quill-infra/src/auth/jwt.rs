//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::domain::CallerIdentity;
use quill_core::ports::{AuthError, TokenService};

/// Signing secret used when none is configured. Only accepted outside production.
pub const DEV_FALLBACK_SECRET: &str = "quill-dev-secret";

const DEFAULT_ISSUER: &str = "quill-api";

/// Tokens are valid for one hour from issuance.
const TOKEN_TTL_SECONDS: i64 = 3600;

/// Deployment mode, read from `RUST_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Production,
    Development,
    Test,
}

impl RuntimeMode {
    /// Parse a `RUST_ENV` value. Anything unrecognised, including unset, is production.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_lowercase).as_deref() {
            Some("development" | "dev") => Self::Development,
            Some("test") => Self::Test,
            _ => Self::Production,
        }
    }

    pub fn allows_insecure_defaults(self) -> bool {
        !matches!(self, Self::Production)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtConfigError {
    #[error("JWT_SECRET must be set when running in production")]
    MissingSecret,
}

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
}

impl JwtConfig {
    /// Build a config from optional settings.
    ///
    /// Without a secret the development fallback is used, which is refused
    /// in production mode.
    pub fn resolve(
        secret: Option<String>,
        issuer: Option<String>,
        mode: RuntimeMode,
    ) -> Result<Self, JwtConfigError> {
        let secret = match secret.filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if mode.allows_insecure_defaults() => {
                tracing::warn!(?mode, "Using development JWT secret. Set JWT_SECRET for production use.");
                DEV_FALLBACK_SECRET.to_string()
            }
            None => {
                tracing::error!("SECURITY: JWT_SECRET is not set in production");
                return Err(JwtConfigError::MissingSecret);
            }
        };

        Ok(Self {
            secret,
            issuer: issuer.unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
        })
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // caller id
    username: String,
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-based token service (HS256).
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        // Expiry is exact: no clock tolerance past `exp`.
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &CallerIdentity) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::seconds(TOKEN_TTL_SECONDS);

        let claims = Claims {
            sub: identity.id.to_string(),
            username: identity.username.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        let id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(CallerIdentity {
            id,
            username: token_data.claims.username,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        TOKEN_TTL_SECONDS
    }
}
