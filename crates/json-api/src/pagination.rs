//! Paging query parameters and response metadata.

use fernwood_app::listing::{DEFAULT_PER_PAGE, Page, Pagination};
use salvo::oapi::{ToSchema, extract::QueryParam};
use serde::{Deserialize, Serialize};

/// Build a page request from the optional `page` and `per_page` query parameters.
pub(crate) fn pagination(
    page: QueryParam<usize, false>,
    per_page: QueryParam<usize, false>,
) -> Pagination {
    Pagination::new(
        page.into_inner().unwrap_or(1),
        per_page.into_inner().unwrap_or(DEFAULT_PER_PAGE),
    )
}

/// Where a page sits in the full listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageMeta {
    /// Rows across all pages
    pub total: usize,

    /// Page number, starting at 1
    pub page: usize,

    /// Rows per page
    pub per_page: usize,

    /// Number of pages
    pub total_pages: usize,
}

impl PageMeta {
    /// Split a page into its rows and metadata.
    pub(crate) fn split<T>(page: Page<T>) -> (Vec<T>, Self) {
        let meta = Self {
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
        };

        (page.items, meta)
    }
}
