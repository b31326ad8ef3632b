use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, warn};
use uuid::Uuid;

use super::claims::{Claims, TokenKind};
use super::cookies::read_cookie;
use crate::{config::JwtConfig, error::AppError, state::AppState};

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    validation: Validation,
}

fn minutes(m: i64) -> Duration {
    Duration::from_secs(m.max(0) as u64 * 60)
}

impl From<&JwtConfig> for JwtKeys {
    fn from(cfg: &JwtConfig) -> Self {
        // HS256 with issuer and audience pinned; exp is checked by default.
        let mut validation = Validation::default();
        validation.set_issuer(&[cfg.issuer.as_str()]);
        validation.set_audience(&[cfg.audience.as_str()]);

        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            access_ttl: minutes(cfg.ttl_minutes),
            refresh_ttl: minutes(cfg.refresh_ttl_minutes),
            validation,
        }
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::from(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    /// Signs a token of `kind` for `user_id`, valid for [`Self::ttl`].
    pub fn sign(&self, user_id: Uuid, kind: TokenKind) -> anyhow::Result<String> {
        let claims = Claims::issue(user_id, kind, self.ttl(kind), &self.issuer, &self.audience);
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, kind = ?kind, exp = claims.exp, "jwt signed");
        Ok(token)
    }

    pub fn sign_access(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.sign(user_id, TokenKind::Access)
    }

    pub fn sign_refresh(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.sign(user_id, TokenKind::Refresh)
    }

    /// Signature, expiry, issuer and audience only; `kind` is not looked at.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)?.claims;
        debug!(user_id = %claims.sub, kind = ?claims.kind, "jwt verified");
        Ok(claims)
    }

    /// Like [`Self::verify`], and the token must also be of `kind`.
    pub fn verify_kind(&self, token: &str, kind: TokenKind) -> Result<Claims, AppError> {
        let claims = self.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::auth("Invalid or expired token")
        })?;

        if claims.kind != kind {
            warn!(user_id = %claims.sub, got = ?claims.kind, want = ?kind, "wrong token kind");
            return Err(AppError::auth(match kind {
                TokenKind::Access => "Access token required",
                TokenKind::Refresh => "Refresh token required",
            }));
        }
        Ok(claims)
    }
}

/// Bearer header wins over the cookie when both are present.
fn token_from_parts(parts: &Parts, kind: TokenKind) -> Option<String> {
    let bearer = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    bearer.or_else(|| read_cookie(&parts.headers, kind.cookie_name()))
}

fn authenticate<S>(parts: &Parts, state: &S, kind: TokenKind) -> Result<Uuid, AppError>
where
    JwtKeys: FromRef<S>,
{
    let token = token_from_parts(parts, kind)
        .ok_or_else(|| AppError::auth("Missing authorization token"))?;
    let claims = JwtKeys::from_ref(state).verify_kind(&token, kind)?;
    Ok(claims.sub)
}

/// Caller identity proven by a valid access token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authenticate(parts, state, TokenKind::Access).map(AuthUser)
    }
}

/// Caller identity proven by a valid refresh token.
#[derive(Debug, Clone, Copy)]
pub struct RefreshUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for RefreshUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authenticate(parts, state, TokenKind::Refresh).map(RefreshUser)
    }
}
