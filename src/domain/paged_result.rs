//! Paged result envelope

use serde::Serialize;
use utoipa::ToSchema;

/// One page of a sorted source plus the source's total count.
///
/// Built once at the end of a retrieval and read-only afterwards. Derived
/// fields are computed at construction so the serialized form carries them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PagedResult<T> {
    /// Items on this page, in sort order
    items: Vec<T>,
    /// Current page (1-based)
    page_number: u32,
    /// Requested page size
    page_size: u32,
    /// Number of records in the source before paging
    total_count: u64,
    /// `ceil(total_count / page_size)`
    total_pages: u64,
    has_previous: bool,
    has_next: bool,
}

impl<T> PagedResult<T> {
    /// Wrap a materialized page. Items beyond `page_size` are dropped so the
    /// envelope never holds more than one page.
    pub fn new(mut items: Vec<T>, page_number: u32, page_size: u32, total_count: u64) -> Self {
        items.truncate(page_size as usize);

        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(u64::from(page_size))
        };

        Self {
            items,
            page_number,
            page_size,
            total_count,
            total_pages,
            has_previous: page_number > 1,
            has_next: u64::from(page_number) < total_pages,
        }
    }

    /// Empty page for a source with no matching records.
    pub fn empty(page_number: u32, page_size: u32) -> Self {
        Self::new(Vec::new(), page_number, page_size, 0)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.has_previous
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn is_first_page(&self) -> bool {
        self.page_number == 1
    }

    pub fn is_last_page(&self) -> bool {
        u64::from(self.page_number) >= self.total_pages
    }

    /// 1-based position of the first item of this page within the whole
    /// ordered source. `None` for an empty page.
    pub fn first_item_index(&self) -> Option<u64> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.offset() + 1)
    }

    /// 1-based position of the last item of this page within the whole
    /// ordered source. `None` for an empty page.
    pub fn last_item_index(&self) -> Option<u64> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.offset() + self.items.len() as u64)
    }

    /// Project the items into another type, keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }

    fn offset(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)) * u64::from(self.page_size)
    }
}

impl<T> IntoIterator for PagedResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PagedResult<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_fields() {
        let page = PagedResult::new(vec![11, 12, 13, 14, 15], 3, 5, 23);

        assert_eq!(page.total_pages(), 5);
        assert!(page.has_previous());
        assert!(page.has_next());
        assert!(!page.is_first_page());
        assert!(!page.is_last_page());
        assert_eq!(page.first_item_index(), Some(11));
        assert_eq!(page.last_item_index(), Some(15));
    }

    #[test]
    fn test_last_partial_page() {
        let page = PagedResult::new(vec!["u", "v", "w"], 5, 5, 23);

        assert_eq!(page.total_pages(), 5);
        assert!(!page.has_next());
        assert!(page.is_last_page());
        assert_eq!(page.last_item_index(), Some(23));
    }

    #[test]
    fn test_empty_source() {
        let page: PagedResult<u8> = PagedResult::empty(1, 10);

        assert_eq!(page.total_count(), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_empty());
        assert!(!page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.first_item_index(), None);
    }

    #[test]
    fn test_page_past_the_end() {
        let page: PagedResult<u8> = PagedResult::new(Vec::new(), 4, 10, 25);

        assert_eq!(page.total_pages(), 3);
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert!(page.is_last_page());
    }

    #[test]
    fn test_items_never_exceed_page_size() {
        let page = PagedResult::new((0..8).collect(), 1, 3, 8);
        assert_eq!(page.items(), &[0, 1, 2]);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = PagedResult::new(vec![1, 2], 2, 2, 5).map(|n| n * 10);

        assert_eq!(page.items(), &[10, 20]);
        assert_eq!(page.page_number(), 2);
        assert_eq!(page.total_count(), 5);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_serializes_derived_fields() {
        let page = PagedResult::new(vec!["a", "b"], 1, 2, 3);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "items": ["a", "b"],
                "page_number": 1,
                "page_size": 2,
                "total_count": 3,
                "total_pages": 2,
                "has_previous": false,
                "has_next": true
            })
        );
    }
}
