use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::auth::dto::present;
use crate::bookmarks::dto::{CreateBookmarkRequest, StatsItem, UpdateBookmarkRequest};
use crate::bookmarks::pagination::{PageMeta, PageRequest};
use crate::bookmarks::repo::BookmarkStore;
use crate::bookmarks::repo_types::{Bookmark, BookmarkPatch, NewBookmark};
use crate::bookmarks::short_url;
use crate::error::AppError;

const NOT_FOUND: &str = "Bookmark not found";

/// Absolute http(s) URL with a dotted domain, `localhost`, or an IP host.
pub(crate) fn is_valid_url(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Ok(parsed) = Url::parse(raw) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    match parsed.host() {
        Some(url::Host::Domain(domain)) => {
            domain == "localhost"
                || (domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'))
        }
        Some(url::Host::Ipv4(_)) | Some(url::Host::Ipv6(_)) => true,
        None => false,
    }
}

fn ensure_valid_url(url: &str) -> Result<(), AppError> {
    if !is_valid_url(url) {
        warn!(%url, "invalid url");
        return Err(AppError::validation("URL is not valid"));
    }
    Ok(())
}

async fn ensure_url_free(store: &dyn BookmarkStore, url: &str) -> Result<(), AppError> {
    if store.url_exists(url).await? {
        warn!(%url, "url already bookmarked");
        return Err(AppError::conflict("URL already exists"));
    }
    Ok(())
}

pub async fn create(
    store: &dyn BookmarkStore,
    owner: Uuid,
    req: CreateBookmarkRequest,
) -> Result<Bookmark, AppError> {
    let body = present(req.body).ok_or_else(|| AppError::validation("Body is required"))?;
    let url = present(req.url).ok_or_else(|| AppError::validation("Url is required"))?;
    ensure_valid_url(&url)?;
    ensure_url_free(store, &url).await?;

    let bookmark = store
        .create(NewBookmark {
            user_id: owner,
            url,
            body,
        })
        .await?;
    info!(user_id = %owner, bookmark_id = bookmark.id, short_url = %bookmark.short_url, "bookmark created");
    Ok(bookmark)
}

pub async fn list(
    store: &dyn BookmarkStore,
    owner: Uuid,
    page: i64,
    limit: i64,
) -> Result<(Vec<Bookmark>, PageMeta), AppError> {
    let req = PageRequest::new(page, limit)?;
    let page = store.list_page(owner, req.limit, req.offset()).await?;
    Ok((page.items, PageMeta::new(req, page.total)))
}

pub async fn get(store: &dyn BookmarkStore, owner: Uuid, id: i64) -> Result<Bookmark, AppError> {
    store
        .find_owned(owner, id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

/// URL checks run before the ownership lookup, so a taken URL reports a
/// conflict even for an id the caller does not own.
pub async fn update(
    store: &dyn BookmarkStore,
    owner: Uuid,
    id: i64,
    req: UpdateBookmarkRequest,
) -> Result<Bookmark, AppError> {
    let patch = BookmarkPatch {
        url: present(req.url),
        body: present(req.body),
    };
    if let Some(url) = &patch.url {
        ensure_valid_url(url)?;
        ensure_url_free(store, url).await?;
    }

    let bookmark = store
        .update_owned(owner, id, patch)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    info!(user_id = %owner, bookmark_id = id, "bookmark updated");
    Ok(bookmark)
}

pub async fn delete(store: &dyn BookmarkStore, owner: Uuid, id: i64) -> Result<(), AppError> {
    if !store.delete_owned(owner, id).await? {
        return Err(AppError::not_found(NOT_FOUND));
    }
    info!(user_id = %owner, bookmark_id = id, "bookmark deleted");
    Ok(())
}

pub async fn stats(store: &dyn BookmarkStore, owner: Uuid) -> Result<Vec<StatsItem>, AppError> {
    let items = store.list_all(owner).await?;
    Ok(items.into_iter().map(StatsItem::from).collect())
}

/// Counts one visit and returns where to send the visitor.
pub async fn visit(store: &dyn BookmarkStore, code: &str) -> Result<String, AppError> {
    if short_url::decode(code).is_none() {
        return Err(AppError::not_found("Short url not found"));
    }
    store
        .record_visit(code)
        .await?
        .ok_or_else(|| AppError::not_found("Short url not found"))
}
