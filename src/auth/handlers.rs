use axum::{
    extract::{FromRef, State},
    response::AppendHeaders,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        claims::TokenKind,
        cookies::{clear_cookie, set_cookie},
        dto::{LoginRequest, LoginResponse, MeResponse, MessageResponse, RefreshResponse, RegisterRequest},
        jwt::{AuthUser, JwtKeys, RefreshUser},
        services,
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/token/refresh", post(refresh))
}

type Cookies = AppendHeaders<Vec<(axum::http::HeaderName, String)>>;

// An unreadable body counts as every field missing.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Option<Json<RegisterRequest>>,
) -> Result<Json<MessageResponse>, AppError> {
    let req = payload.map(|Json(r)| r).unwrap_or_default();
    services::register(state.users.as_ref(), req).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "User successfully created",
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Option<Json<LoginRequest>>,
) -> Result<(Cookies, Json<LoginResponse>), AppError> {
    let req = payload.map(|Json(r)| r).unwrap_or_default();
    let keys = JwtKeys::from_ref(&state);
    let pair = services::login(state.users.as_ref(), &keys, req).await?;

    let secure = state.config.cookie_secure;
    let cookies = AppendHeaders(vec![
        set_cookie(
            TokenKind::Access.cookie_name(),
            &pair.access,
            keys.ttl(TokenKind::Access),
            secure,
        ),
        set_cookie(
            TokenKind::Refresh.cookie_name(),
            &pair.refresh,
            keys.ttl(TokenKind::Refresh),
            secure,
        ),
    ]);

    Ok((
        cookies,
        Json(LoginResponse {
            success: true,
            access: pair.access,
            refresh: pair.refresh,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let user = services::identity(state.users.as_ref(), user_id).await?;
    Ok(Json(MeResponse {
        success: true,
        username: user.username,
        email: user.email,
    }))
}

/// Both cookies are cleared but only the access cookie is set again.
#[instrument(skip(state))]
pub async fn refresh(
    State(state): State<AppState>,
    RefreshUser(user_id): RefreshUser,
) -> Result<(Cookies, Json<RefreshResponse>), AppError> {
    let keys = JwtKeys::from_ref(&state);
    let access = services::refresh(&keys, user_id)?;

    let secure = state.config.cookie_secure;
    let cookies = AppendHeaders(vec![
        clear_cookie(TokenKind::Access.cookie_name(), secure),
        clear_cookie(TokenKind::Refresh.cookie_name(), secure),
        set_cookie(
            TokenKind::Access.cookie_name(),
            &access,
            keys.ttl(TokenKind::Access),
            secure,
        ),
    ]);

    Ok((
        cookies,
        Json(RefreshResponse {
            success: true,
            access,
        }),
    ))
}
