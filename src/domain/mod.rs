pub mod error;
pub mod paged_result;
pub mod paging;
pub mod ports;
pub mod sort;

pub use error::{PagingError, PagingResult};
pub use paged_result::PagedResult;
pub use paging::{
    PageRequest, PagingParams, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_COLUMN,
    DEFAULT_SORT_ORDER,
};
pub use ports::{Comparator, QuerySource, SortKeys};
pub use sort::{build_sort_directive, column_name_eq, SortDirective, SortOrder};
