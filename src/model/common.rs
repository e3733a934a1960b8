use serde::Serialize;

/// Home or away.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

/// Paging metadata computed from the full result length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Pagination {
    /// Descriptor for a result set that has not been fetched yet.
    pub fn empty(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            total: 0,
            total_pages: 0,
            has_next_page: false,
            has_previous_page: false,
        }
    }
}

/// One page of a larger, fully fetched result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}
