use crate::error::{MatchdayError, Result};
use crate::model::{Paginated, Pagination};

/// Slice `items` into the 1-based `page` of size `limit`.
///
/// A page past the end is empty rather than an error. `page` and `limit` of
/// zero are rejected with [`MatchdayError::InvalidPagination`].
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Result<Paginated<T>> {
    if page == 0 || limit == 0 {
        return Err(MatchdayError::InvalidPagination { page, limit });
    }

    let total = items.len();
    let start = (page - 1).saturating_mul(limit);
    let end = start.saturating_add(limit);
    let data: Vec<T> = items.into_iter().skip(start).take(limit).collect();

    Ok(Paginated {
        data,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
            has_next_page: end < total,
            has_previous_page: page > 1,
        },
    })
}
