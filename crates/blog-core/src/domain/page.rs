//! Fixed-size pagination of list results.

use serde::{Deserialize, Serialize};

/// Number of posts shown per listing page.
pub const POSTS_PER_PAGE: u64 = 5;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Request page `number` of the post listings. Page numbers below 1 are clamped.
    pub fn posts(number: u64) -> Self {
        Self {
            number: number.max(1),
            per_page: POSTS_PER_PAGE,
        }
    }

    /// Number of items skipped before this page, or `None` when the page lies
    /// beyond any addressable row (stores take signed 64-bit offsets).
    pub fn offset(&self) -> Option<u64> {
        self.number
            .saturating_sub(1)
            .checked_mul(self.per_page)
            .filter(|offset| i64::try_from(*offset).is_ok())
    }
}

/// One page of a larger, ordered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub per_page: u64,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            number: request.number,
            per_page: request.per_page,
            total_items,
        }
    }

    /// Total page count. An empty result still has one (empty) page.
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 1;
        }
        self.total_items.div_ceil(self.per_page).max(1)
    }

    /// Whether the requested page number actually exists.
    pub fn in_range(&self) -> bool {
        self.number >= 1 && self.number <= self.total_pages()
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}
