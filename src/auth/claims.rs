use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Type of JWT: access or refresh. The two are never interchangeable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Cookie the token is delivered in.
    pub fn cookie_name(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// JWT payload bound to a user identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,       // user ID
    pub iat: usize,      // issued at (unix timestamp)
    pub exp: usize,      // expires at (unix timestamp)
    pub iss: String,
    pub aud: String,
    pub kind: TokenKind,
}

impl Claims {
    /// Claims for `sub` issued now and valid for `ttl`.
    pub fn issue(sub: Uuid, kind: TokenKind, ttl: Duration, iss: &str, aud: &str) -> Self {
        let iat = OffsetDateTime::now_utc().unix_timestamp().max(0) as usize;
        Self {
            sub,
            iat,
            exp: iat.saturating_add(ttl.as_secs() as usize),
            iss: iss.to_owned(),
            aud: aud.to_owned(),
            kind,
        }
    }
}
