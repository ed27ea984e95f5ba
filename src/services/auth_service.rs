use crate::utils::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
    /// Whatever else the client asked to have signed.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Signs and verifies HS256 tokens with the service secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Signs `payload` (a JSON object) with a fresh `iat`/`exp`.
    pub fn issue(&self, payload: Value) -> Result<String, AppError> {
        self.issue_at(payload, Utc::now().timestamp())
    }

    pub fn issue_at(&self, payload: Value, now: i64) -> Result<String, AppError> {
        let mut extra = match payload {
            Value::Object(map) => map,
            _ => {
                return Err(AppError::InvalidRequest(
                    "Token payload must be a JSON object".to_string(),
                ))
            }
        };

        extra.remove("iat");
        extra.remove("exp");
        let email = match extra.remove("email") {
            None | Some(Value::Null) => None,
            Some(Value::String(email)) => Some(email),
            Some(_) => {
                return Err(AppError::InvalidRequest(
                    "email must be a string".to_string(),
                ))
            }
        };

        let claims = Claims {
            email,
            iat: now,
            exp: now + self.ttl.num_seconds(),
            extra,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::TokenError(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Payloads are client-defined; an `aud` key is just data here.
        validation.validate_aud = false;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::InvalidToken(e.to_string()))
    }
}
