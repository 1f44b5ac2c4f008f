//! Source capability consumed by the paginator

use std::cmp::Ordering;

use async_trait::async_trait;

use super::error::PagingResult;
use super::sort::SortDirective;

/// An orderable, countable, sliceable collection.
///
/// The builder steps consume `self` and return the narrowed source, so a
/// retrieval reads as `source.order_by(..)?.skip(..).take(..).materialize()`.
/// Failures from the backing engine are returned as-is.
#[async_trait]
pub trait QuerySource: Send + Sync + Sized {
    type Item: Send;

    /// Short label used in logs and metrics (`"database"`, `"memory"`).
    fn kind(&self) -> &'static str;

    /// Total number of records, independent of any paging.
    async fn count(&self) -> PagingResult<u64>;

    /// Order by the directive's column. Columns outside the source's
    /// allow-list fail with `UnresolvableSortColumn`.
    fn order_by(self, directive: &SortDirective) -> PagingResult<Self>;

    fn skip(self, count: u64) -> Self;

    fn take(self, count: u64) -> Self;

    /// Run the query and collect the remaining records in order.
    async fn materialize(self) -> PagingResult<Vec<Self::Item>>;
}

/// Typed comparator for one sortable column.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Allow-list of sortable columns for in-memory records.
///
/// ```ignore
/// impl SortKeys for Book {
///     fn comparator(column: &str) -> Option<Comparator<Self>> {
///         let compare: Comparator<Self> = match column {
///             c if column_name_eq(c, "id") => |a, b| a.id.cmp(&b.id),
///             c if column_name_eq(c, "title") => |a, b| a.title.cmp(&b.title),
///             _ => return None,
///         };
///         Some(compare)
///     }
/// }
/// ```
pub trait SortKeys: Sized {
    /// Ascending comparator for `column`, or `None` if it is not sortable.
    fn comparator(column: &str) -> Option<Comparator<Self>>;
}
