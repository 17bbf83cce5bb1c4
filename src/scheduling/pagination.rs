use serde::Serialize;
use crate::error::{Error, Result};

/// One page of an already ordered listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Slice `ordered` into page `page` (1-based) of `per_page` items.
    /// A page past the end is empty but still reports the totals.
    pub fn paginate(ordered: Vec<T>, page: usize, per_page: usize) -> Result<Self> {
        if page == 0 {
            return Err(Error::InvalidPage { page });
        }

        let total = ordered.len();
        let total_pages = if per_page == 0 { 0 } else { total.div_ceil(per_page) };
        let offset = (page - 1).saturating_mul(per_page);

        let items: Vec<T> = ordered.into_iter().skip(offset).take(per_page).collect();

        Ok(Page {
            items,
            total,
            page,
            per_page,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        })
    }
}
