use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::bookmarks::repo_types::{Bookmark, BookmarkPage, BookmarkPatch, NewBookmark};
use crate::bookmarks::short_url;
use crate::error::{map_sqlx_error, AppError};

/// Persistence for bookmarks.
///
/// Every method taking an `owner` filters by it inside the query, so a
/// bookmark belonging to someone else is indistinguishable from a missing one.
/// URL uniqueness is global and must be enforced by the store, surfacing as
/// [`AppError::Conflict`].
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn url_exists(&self, url: &str) -> Result<bool, AppError>;

    /// Inserts with `visits = 0` and a short url derived from the assigned id.
    async fn create(&self, new: NewBookmark) -> Result<Bookmark, AppError>;

    /// Owner's bookmarks ordered by id.
    async fn list_page(&self, owner: Uuid, limit: i64, offset: i64) -> Result<BookmarkPage, AppError>;

    async fn list_all(&self, owner: Uuid) -> Result<Vec<Bookmark>, AppError>;

    async fn find_owned(&self, owner: Uuid, id: i64) -> Result<Option<Bookmark>, AppError>;

    /// Applies the patch and bumps `updated_at`; `None` when not owned.
    async fn update_owned(
        &self,
        owner: Uuid,
        id: i64,
        patch: BookmarkPatch,
    ) -> Result<Option<Bookmark>, AppError>;

    /// `false` when nothing owned by `owner` had that id.
    async fn delete_owned(&self, owner: Uuid, id: i64) -> Result<bool, AppError>;

    /// Increments visits and returns the target url.
    async fn record_visit(&self, short_url: &str) -> Result<Option<String>, AppError>;
}

#[derive(Clone)]
pub struct PgBookmarkStore {
    db: PgPool,
}

impl PgBookmarkStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const COLUMNS: &str = "id, url, body, user_id, short_url, visits, created_at, updated_at";

#[async_trait]
impl BookmarkStore for PgBookmarkStore {
    async fn url_exists(&self, url: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM bookmarks WHERE url = $1)")
            .bind(url)
            .fetch_one(&self.db)
            .await
            .map_err(map_sqlx_error)
    }

    async fn create(&self, new: NewBookmark) -> Result<Bookmark, AppError> {
        // The id is drawn first so the short url can be written with the row.
        let id: i64 =
            sqlx::query_scalar("SELECT nextval(pg_get_serial_sequence('bookmarks', 'id'))")
                .fetch_one(&self.db)
                .await
                .map_err(map_sqlx_error)?;

        sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            INSERT INTO bookmarks (id, url, body, user_id, short_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&new.url)
        .bind(&new.body)
        .bind(new.user_id)
        .bind(short_url::encode(id))
        .fetch_one(&self.db)
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_page(&self, owner: Uuid, limit: i64, offset: i64) -> Result<BookmarkPage, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookmarks WHERE user_id = $1")
            .bind(owner)
            .fetch_one(&self.db)
            .await
            .map_err(map_sqlx_error)?;

        let items = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(owner)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(map_sqlx_error)?;

        Ok(BookmarkPage { items, total })
    }

    async fn list_all(&self, owner: Uuid) -> Result<Vec<Bookmark>, AppError> {
        sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {COLUMNS} FROM bookmarks WHERE user_id = $1 ORDER BY id ASC"
        ))
        .bind(owner)
        .fetch_all(&self.db)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_owned(&self, owner: Uuid, id: i64) -> Result<Option<Bookmark>, AppError> {
        sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {COLUMNS} FROM bookmarks WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.db)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_owned(
        &self,
        owner: Uuid,
        id: i64,
        patch: BookmarkPatch,
    ) -> Result<Option<Bookmark>, AppError> {
        sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            UPDATE bookmarks
               SET url = COALESCE($3, url),
                   body = COALESCE($4, body),
                   updated_at = now()
             WHERE id = $1 AND user_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner)
        .bind(patch.url)
        .bind(patch.body)
        .fetch_optional(&self.db)
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_owned(&self, owner: Uuid, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.db)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn record_visit(&self, short_url: &str) -> Result<Option<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            "UPDATE bookmarks SET visits = visits + 1 WHERE short_url = $1 RETURNING url",
        )
        .bind(short_url)
        .fetch_optional(&self.db)
        .await
        .map_err(map_sqlx_error)
    }
}
