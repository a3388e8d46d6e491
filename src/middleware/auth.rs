use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::{AppError, AppResult};

/// Lifetime of every issued access token.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Identity claim carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

/// Signs and verifies access tokens with the server-held secret.
#[derive(Clone)]
pub struct TokenVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mints a fresh token for `email`, valid for one hour.
    pub fn issue(&self, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Checks signature and expiry. Any failure is `Forbidden`.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::warn!("❌ Invalid token: {}", e);
                AppError::Forbidden
            })
    }

    /// Verifies the raw `Authorization` header value, if any.
    ///
    /// No header is `Unauthenticated`; anything other than a valid
    /// `Bearer <token>` is `Forbidden`.
    pub fn verify_header(&self, header: Option<&str>) -> AppResult<Claims> {
        let header = header.ok_or(AppError::Unauthenticated)?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                log::warn!("❌ Malformed authorization header");
                AppError::Forbidden
            })?;

        self.verify(token)
    }
}

impl FromRequest for Claims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(AppError::Internal("Application state not configured".into())));
        };

        let header = match req.headers().get(AUTHORIZATION) {
            Some(value) => match value.to_str() {
                Ok(raw) => Some(raw),
                Err(_) => return ready(Err(AppError::Forbidden)),
            },
            None => None,
        };

        ready(state.verifier.verify_header(header))
    }
}
