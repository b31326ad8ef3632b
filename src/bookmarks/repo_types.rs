use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Bookmark record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub url: String,
    pub body: String,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub short_url: String,
    pub visits: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub user_id: Uuid,
    pub url: String,
    pub body: String,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct BookmarkPatch {
    pub url: Option<String>,
    pub body: Option<String>,
}

/// One page of an owner's bookmarks plus the owner's total count.
#[derive(Debug, Clone)]
pub struct BookmarkPage {
    pub items: Vec<Bookmark>,
    pub total: i64,
}
