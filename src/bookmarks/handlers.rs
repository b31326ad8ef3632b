use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{auth::jwt::AuthUser, error::AppError, state::AppState};

use super::dto::{
    BookmarkListResponse, BookmarkResponse, CreateBookmarkRequest, ListQuery, StatsResponse,
    UpdateBookmarkRequest,
};
use super::services;

pub fn bookmark_routes() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route("/bookmarks/", get(list_bookmarks).post(create_bookmark))
        .route("/bookmarks/stats", get(get_stats))
        .route(
            "/bookmarks/:id",
            get(get_bookmark)
                .put(update_bookmark)
                .patch(update_bookmark)
                .delete(delete_bookmark),
        )
}

/// Public short-url redirect, mounted outside `/api/v1`.
pub fn redirect_routes() -> Router<AppState> {
    Router::new().route("/:short_url", get(follow_short_url))
}

// A non-numeric id can never match a row.
fn bookmark_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::not_found("Bookmark not found"))
}

#[instrument(skip(state, payload))]
pub async fn create_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreateBookmarkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let bookmark = services::create(state.bookmarks.as_ref(), user_id, req).await?;

    let location = format!("/api/v1/bookmarks/{}", bookmark.id);
    Ok((
        StatusCode::CREATED,
        AppendHeaders([(header::LOCATION, location)]),
        Json(BookmarkResponse {
            success: true,
            message: Some("Bookmark created successfully"),
            data: bookmark,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<BookmarkListResponse>, AppError> {
    let Query(q) = query?;
    let (data, meta) =
        services::list(state.bookmarks.as_ref(), user_id, q.page(), q.limit()).await?;
    Ok(Json(BookmarkListResponse {
        success: true,
        data,
        meta,
    }))
}

#[instrument(skip(state))]
pub async fn get_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BookmarkResponse>, AppError> {
    let id = bookmark_id(path)?;
    let bookmark = services::get(state.bookmarks.as_ref(), user_id, id).await?;
    Ok(Json(BookmarkResponse {
        success: true,
        message: None,
        data: bookmark,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateBookmarkRequest>, JsonRejection>,
) -> Result<Json<BookmarkResponse>, AppError> {
    let id = bookmark_id(path)?;
    // A body that cannot be read must not turn into an empty patch.
    let Json(req) = payload?;
    let bookmark = services::update(state.bookmarks.as_ref(), user_id, id, req).await?;
    Ok(Json(BookmarkResponse {
        success: true,
        message: Some("Bookmark updated successfully"),
        data: bookmark,
    }))
}

#[instrument(skip(state))]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = bookmark_id(path)?;
    services::delete(state.bookmarks.as_ref(), user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<StatsResponse>, AppError> {
    let data = services::stats(state.bookmarks.as_ref(), user_id).await?;
    Ok(Json(StatsResponse {
        success: true,
        data,
    }))
}

#[instrument(skip(state))]
pub async fn follow_short_url(
    State(state): State<AppState>,
    Path(short_url): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let url = services::visit(state.bookmarks.as_ref(), &short_url).await?;
    // 302 rather than a permanent redirect: browsers must come back to be counted
    Ok((StatusCode::FOUND, AppendHeaders([(header::LOCATION, url)])))
}
