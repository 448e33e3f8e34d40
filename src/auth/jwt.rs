use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::{config::JwtConfig, error::ApiError, state::AppState};

/// JWT payload: the subject is the username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Holds the signing and verification keys plus the token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs((ttl_minutes as u64) * 60),
        }
    }
}

impl JwtKeys {
    pub fn sign(&self, username: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: username.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(username = %username, "jwt signed");
        Ok(token)
    }

    /// Signature or expiry failures all collapse into one `Auth` error;
    /// callers treat them uniformly as "unauthenticated".
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::default();
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(username = %data.claims.sub, "jwt verified");
                Ok(data.claims)
            }
            Err(e) => {
                warn!(error = %e, "invalid or expired token");
                Err(ApiError::Auth("Could not validate credentials".into()))
            }
        }
    }
}

/// Extracts and validates the bearer token, yielding the subject username.
pub struct AuthUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Auth("Not authenticated".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or_else(|| ApiError::Auth("Not authenticated".to_string()))?;

        let claims = keys.verify(token)?;
        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, ttl_minutes: i64) -> JwtKeys {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs((ttl_minutes as u64) * 60),
        }
    }

    #[test]
    fn sign_and_verify_resolves_subject() {
        let keys = make_keys("dev-secret", 30);
        let token = keys.sign("alice").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn exp_is_issue_time_plus_ttl() {
        let keys = make_keys("dev-secret", 30);
        let token = keys.sign("bob").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let good = make_keys("dev-secret", 30);
        let bad = make_keys("other-secret", 30);
        let token = good.sign("alice").expect("sign");
        assert!(matches!(bad.verify(&token), Err(ApiError::Auth(_))));
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys("dev-secret", 30);
        // Hand-built claims well past the validation leeway.
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: "alice".into(),
            iat: (now - 3600) as usize,
            exp: (now - 1800) as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        assert!(matches!(keys.verify(&token), Err(ApiError::Auth(_))));
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys("dev-secret", 30);
        assert!(matches!(
            keys.verify("not.a.token"),
            Err(ApiError::Auth(_))
        ));
    }
}
