use serde::{Deserialize, Serialize};

use super::pagination::PageMeta;
use super::repo_types::Bookmark;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 5;

#[derive(Debug, Default, Deserialize)]
pub struct CreateBookmarkRequest {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Fields left out are not changed.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookmarkRequest {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// `?page=&limit=`; values that are not integers fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        parse_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(default)
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: Bookmark,
}

#[derive(Debug, Serialize)]
pub struct BookmarkListResponse {
    pub success: bool,
    pub data: Vec<Bookmark>,
    pub meta: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct StatsItem {
    pub id: i64,
    pub url: String,
    pub short_url: String,
    pub visits: i64,
}

impl From<Bookmark> for StatsItem {
    fn from(b: Bookmark) -> Self {
        Self {
            id: b.id,
            url: b.url,
            short_url: b.short_url,
            visits: b.visits,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: Vec<StatsItem>,
}
