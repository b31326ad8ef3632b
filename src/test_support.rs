//! In-memory stores with the same uniqueness rules as the Postgres schema.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::UserStore;
use crate::auth::repo_types::{NewUser, User};
use crate::bookmarks::repo::BookmarkStore;
use crate::bookmarks::repo_types::{Bookmark, BookmarkPage, BookmarkPatch, NewBookmark};
use crate::bookmarks::short_url;
use crate::error::{conflict_message, AppError};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(conflict_message(Some("users_email_key"))));
        }
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::conflict(conflict_message(Some("users_username_key"))));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[derive(Default)]
pub struct MemoryBookmarkStore {
    inner: Mutex<Bookmarks>,
}

#[derive(Default)]
struct Bookmarks {
    last_id: i64,
    rows: Vec<Bookmark>,
}

impl Bookmarks {
    fn url_taken(&self, url: &str, except: Option<i64>) -> bool {
        self.rows
            .iter()
            .any(|b| b.url == url && Some(b.id) != except)
    }

    fn owned(&self, owner: Uuid) -> impl Iterator<Item = &Bookmark> {
        self.rows.iter().filter(move |b| b.user_id == owner)
    }
}

#[async_trait]
impl BookmarkStore for MemoryBookmarkStore {
    async fn url_exists(&self, url: &str) -> Result<bool, AppError> {
        Ok(self.inner.lock().unwrap().url_taken(url, None))
    }

    async fn create(&self, new: NewBookmark) -> Result<Bookmark, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.url_taken(&new.url, None) {
            return Err(AppError::conflict(conflict_message(Some("bookmarks_url_key"))));
        }
        inner.last_id += 1;
        let id = inner.last_id;
        let now = OffsetDateTime::now_utc();
        let bookmark = Bookmark {
            id,
            url: new.url,
            body: new.body,
            user_id: new.user_id,
            short_url: short_url::encode(id),
            visits: 0,
            created_at: now,
            updated_at: now,
        };
        inner.rows.push(bookmark.clone());
        Ok(bookmark)
    }

    async fn list_page(&self, owner: Uuid, limit: i64, offset: i64) -> Result<BookmarkPage, AppError> {
        let inner = self.inner.lock().unwrap();
        let total = inner.owned(owner).count() as i64;
        let items = inner
            .owned(owner)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok(BookmarkPage { items, total })
    }

    async fn list_all(&self, owner: Uuid) -> Result<Vec<Bookmark>, AppError> {
        Ok(self.inner.lock().unwrap().owned(owner).cloned().collect())
    }

    async fn find_owned(&self, owner: Uuid, id: i64) -> Result<Option<Bookmark>, AppError> {
        let inner = self.inner.lock().unwrap();
        let found = inner.owned(owner).find(|b| b.id == id).cloned();
        Ok(found)
    }

    async fn update_owned(
        &self,
        owner: Uuid,
        id: i64,
        patch: BookmarkPatch,
    ) -> Result<Option<Bookmark>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(url) = &patch.url {
            if inner.url_taken(url, Some(id)) {
                return Err(AppError::conflict(conflict_message(Some("bookmarks_url_key"))));
            }
        }
        let Some(row) = inner
            .rows
            .iter_mut()
            .find(|b| b.id == id && b.user_id == owner)
        else {
            return Ok(None);
        };
        if let Some(url) = patch.url {
            row.url = url;
        }
        if let Some(body) = patch.body {
            row.body = body;
        }
        row.updated_at = OffsetDateTime::now_utc();
        Ok(Some(row.clone()))
    }

    async fn delete_owned(&self, owner: Uuid, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|b| !(b.id == id && b.user_id == owner));
        Ok(inner.rows.len() < before)
    }

    async fn record_visit(&self, short_url: &str) -> Result<Option<String>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .iter_mut()
            .find(|b| b.short_url == short_url)
            .map(|b| {
                b.visits += 1;
                b.url.clone()
            }))
    }
}
