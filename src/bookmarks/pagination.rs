use serde::Serialize;

use crate::error::AppError;

/// 1-based page request, validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Result<Self, AppError> {
        if page < 1 {
            return Err(AppError::validation("Page must be greater than 0"));
        }
        if limit < 1 {
            return Err(AppError::validation("Limit must be greater than 0"));
        }
        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total_count: i64,
    pub total_pages: i64,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(req: PageRequest, total_count: i64) -> Self {
        let total_pages = if total_count <= 0 {
            0
        } else {
            (total_count - 1) / req.limit + 1
        };
        let has_next = req.page < total_pages;
        let has_prev = req.page > 1;
        Self {
            page: req.page,
            limit: req.limit,
            total_count,
            total_pages,
            next_page: has_next.then_some(req.page + 1),
            prev_page: has_prev.then_some(req.page - 1),
            has_next,
            has_prev,
        }
    }
}
