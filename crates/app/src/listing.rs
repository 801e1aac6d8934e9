//! Listing helpers shared by the back-office resources.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Rows per page when the caller doesn't say.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Upper bound on rows per page.
pub const MAX_PER_PAGE: usize = 100;

/// Requested page, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page number, starting at 1
    pub page: usize,

    /// Rows per page
    pub per_page: usize,
}

impl Pagination {
    /// Build a pagination request, clamping out of range values.
    #[must_use]
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    fn offset(self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Rows on this page
    pub items: Vec<T>,

    /// Rows across all pages
    pub total: usize,

    /// Page number, starting at 1
    pub page: usize,

    /// Rows per page
    pub per_page: usize,

    /// Number of pages; zero when there are no rows
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Cut a page out of an already filtered and sorted list.
    ///
    /// Pages past the end are empty rather than an error.
    #[must_use]
    pub fn from_items(items: Vec<T>, pagination: Pagination) -> Self {
        let pagination = Pagination::new(pagination.page, pagination.per_page);
        let total = items.len();

        let items = items
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .collect();

        Self {
            items,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            total_pages: total.div_ceil(pagination.per_page),
        }
    }

    /// Convert every row, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Apply the direction to an ascending comparison.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Lowercased, trimmed search needle, or `None` for a blank query.
pub fn search_needle(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_lowercase)
}

/// Whether any of the fields contains the (already lowercased) needle, ignoring case.
pub fn matches_any(needle: Option<&str>, fields: &[&str]) -> bool {
    needle.is_none_or(|needle| {
        fields
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    })
}
