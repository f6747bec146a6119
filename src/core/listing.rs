//! Client-side pagination and filtering of already-fetched lists.

use super::types::Customer;

/// Rows per page in the customer and transaction tables.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Number of pages needed for `len` items (0 for an empty list).
pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// Items of 1-based `page`.
///
/// Page 0 and pages past the end yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Customers whose name contains `query`, case-insensitively.
///
/// Surrounding whitespace in `query` is ignored; a blank query yields no
/// suggestions.
pub fn filter_by_name<'a>(customers: &'a [Customer], query: &str) -> Vec<&'a Customer> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    customers
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}
