//! Paged query results

use serde::{Deserialize, Serialize};

/// An ordered slice of records plus pagination metadata
///
/// # Example
///
/// ```rust
/// use users_api::repository::Page;
///
/// let page = Page::new(vec!["a", "b"], 2, 2, 5);
/// assert_eq!(page.total_pages, 3);
/// assert!(page.has_previous);
/// assert!(page.has_next);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,
    /// Current page number (1-indexed)
    pub current_page: u32,
    /// Number of records per page
    pub page_size: u32,
    /// Total number of records across all pages
    pub total_count: u64,
    /// Total number of pages
    pub total_pages: u32,
    /// Whether a page precedes this one
    pub has_previous: bool,
    /// Whether a page follows this one
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Create a page, deriving `total_pages`, `has_previous` and `has_next`
    ///
    /// A page size of zero is treated as one.
    pub fn new(items: Vec<T>, current_page: u32, page_size: u32, total_count: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = calculate_total_pages(total_count, page_size);

        Self {
            items,
            current_page,
            page_size,
            total_count,
            total_pages,
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
        }
    }

    /// Number of records to skip to reach `page_number`
    pub fn offset(page_number: u32, page_size: u32) -> u64 {
        u64::from(page_number.saturating_sub(1)) * u64::from(page_size)
    }

    /// Map each item to a new type, keeping the metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}

/// Ceiling division of `total` by `per_page`, clamped to `u32`
fn calculate_total_pages(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page);
    let pages = total.div_ceil(per_page);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection() {
        let page: Page<u8> = Page::new(vec![], 1, 10, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn test_exact_multiple() {
        let page: Page<u8> = Page::new(vec![], 1, 10, 20);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next);
    }

    #[test]
    fn test_last_partial_page() {
        let page: Page<u8> = Page::new(vec![0; 5], 2, 20, 25);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let page: Page<u8> = Page::new(vec![], 1, 0, 3);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Page::<u8>::offset(1, 20), 0);
        assert_eq!(Page::<u8>::offset(3, 20), 40);
        assert_eq!(Page::<u8>::offset(0, 20), 0);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], 1, 2, 4).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next);
    }
}
