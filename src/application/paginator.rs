//! Paged retrieval
//!
//! All entry points reduce to the same four scalars (page number, page size,
//! sort directive, cancellation) and run one routine:
//! count → order → skip → take → materialize → wrap.
//!
//! Count and fetch are two separate source calls. Nothing here snapshots the
//! source between them, so a concurrently mutated source can produce a
//! `total_count` that disagrees with `items`. Callers that need consistency
//! should build the source on a transaction-scoped connection.

use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::PagingConfig;
use crate::domain::{
    PagedResult, PagingError, PagingParams, PagingResult, QuerySource, SortDirective, SortKeys,
};
use crate::infrastructure::MemorySource;
use crate::shared::cancellable;

/// Normalized request shared by every entry point
#[derive(Debug, Clone)]
struct PageWindow {
    page_number: u32,
    page_size: u32,
    directive: SortDirective,
}

/// Paging service
///
/// Holds only immutable configuration, so one instance can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    config: PagingConfig,
}

impl Paginator {
    pub fn new(config: PagingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    /// Page a query-executable source using a params object.
    pub async fn paginate<S, P>(
        &self,
        source: S,
        params: &P,
        cancel: Option<&CancellationToken>,
    ) -> PagingResult<PagedResult<S::Item>>
    where
        S: QuerySource,
        P: PagingParams + ?Sized,
    {
        let window = self.window_from_params(params);
        self.run(source, window, cancel).await
    }

    /// Page a query-executable source using discrete arguments.
    ///
    /// Defaults for callers without input are [`DEFAULT_PAGE_NUMBER`],
    /// [`DEFAULT_PAGE_SIZE`], [`DEFAULT_SORT_COLUMN`] and [`DEFAULT_SORT_ORDER`].
    ///
    /// [`DEFAULT_PAGE_NUMBER`]: crate::domain::DEFAULT_PAGE_NUMBER
    /// [`DEFAULT_PAGE_SIZE`]: crate::domain::DEFAULT_PAGE_SIZE
    /// [`DEFAULT_SORT_COLUMN`]: crate::domain::DEFAULT_SORT_COLUMN
    /// [`DEFAULT_SORT_ORDER`]: crate::domain::DEFAULT_SORT_ORDER
    pub async fn paginate_with<S>(
        &self,
        source: S,
        page_number: u32,
        page_size: u32,
        sort_column: &str,
        sort_order: &str,
        cancel: Option<&CancellationToken>,
    ) -> PagingResult<PagedResult<S::Item>>
    where
        S: QuerySource,
    {
        let window = self.window_from_args(page_number, page_size, sort_column, sort_order);
        self.run(source, window, cancel).await
    }

    /// Page records that are already in memory using a params object.
    pub async fn paginate_in_memory<T, I, P>(
        &self,
        items: I,
        params: &P,
    ) -> PagingResult<PagedResult<T>>
    where
        T: SortKeys + Send + Sync,
        I: IntoIterator<Item = T>,
        P: PagingParams + ?Sized,
    {
        let window = self.window_from_params(params);
        self.run(MemorySource::new(items), window, None).await
    }

    /// Page records that are already in memory using discrete arguments.
    pub async fn paginate_in_memory_with<T, I>(
        &self,
        items: I,
        page_number: u32,
        page_size: u32,
        sort_column: &str,
        sort_order: &str,
    ) -> PagingResult<PagedResult<T>>
    where
        T: SortKeys + Send + Sync,
        I: IntoIterator<Item = T>,
    {
        let window = self.window_from_args(page_number, page_size, sort_column, sort_order);
        self.run(MemorySource::new(items), window, None).await
    }

    fn window_from_params<P: PagingParams + ?Sized>(&self, params: &P) -> PageWindow {
        PageWindow {
            page_number: params.page_number(),
            page_size: params.page_size(),
            directive: params.sort_directive(&self.config.default_sort_column),
        }
    }

    fn window_from_args(
        &self,
        page_number: u32,
        page_size: u32,
        sort_column: &str,
        sort_order: &str,
    ) -> PageWindow {
        PageWindow {
            page_number,
            page_size,
            directive: SortDirective::build(
                Some(sort_column),
                Some(sort_order),
                &self.config.default_sort_column,
            ),
        }
    }

    fn check_bounds(&self, page_number: u32, page_size: u32) -> PagingResult<()> {
        if page_number == 0 {
            return Err(PagingError::InvalidPageNumber(page_number));
        }
        if page_size == 0 {
            return Err(PagingError::InvalidPageSize(page_size));
        }
        if let Some(max) = self.config.max_page_size {
            if page_size > max {
                return Err(PagingError::PageSizeTooLarge {
                    requested: page_size,
                    max,
                });
            }
        }
        Ok(())
    }

    async fn run<S: QuerySource>(
        &self,
        source: S,
        window: PageWindow,
        cancel: Option<&CancellationToken>,
    ) -> PagingResult<PagedResult<S::Item>> {
        let PageWindow {
            page_number,
            page_size,
            directive,
        } = window;

        if let Err(err) = self.check_bounds(page_number, page_size) {
            warn!(page_number, page_size, error = %err, "Rejected paging request");
            return Err(err);
        }

        let kind = source.kind();
        let started = Instant::now();
        metrics::counter!("paged_list_requests_total", "source" => kind).increment(1);

        let total_count = cancellable(cancel, source.count()).await?;

        let offset = u64::from(page_number - 1) * u64::from(page_size);
        let items = cancellable(cancel, async {
            source
                .order_by(&directive)?
                .skip(offset)
                .take(u64::from(page_size))
                .materialize()
                .await
        })
        .await?;

        metrics::histogram!("paged_list_fetch_duration_seconds", "source" => kind)
            .record(started.elapsed().as_secs_f64());
        debug!(
            source = kind,
            %directive,
            page_number,
            page_size,
            total_count,
            returned = items.len(),
            "Fetched page"
        );

        Ok(PagedResult::new(items, page_number, page_size, total_count))
    }
}

/// [`Paginator::paginate`] with the default configuration.
pub async fn paginate<S, P>(
    source: S,
    params: &P,
    cancel: Option<&CancellationToken>,
) -> PagingResult<PagedResult<S::Item>>
where
    S: QuerySource,
    P: PagingParams + ?Sized,
{
    Paginator::default().paginate(source, params, cancel).await
}

/// [`Paginator::paginate_with`] with the default configuration.
pub async fn paginate_with<S>(
    source: S,
    page_number: u32,
    page_size: u32,
    sort_column: &str,
    sort_order: &str,
    cancel: Option<&CancellationToken>,
) -> PagingResult<PagedResult<S::Item>>
where
    S: QuerySource,
{
    Paginator::default()
        .paginate_with(source, page_number, page_size, sort_column, sort_order, cancel)
        .await
}

/// [`Paginator::paginate_in_memory`] with the default configuration.
pub async fn paginate_in_memory<T, I, P>(items: I, params: &P) -> PagingResult<PagedResult<T>>
where
    T: SortKeys + Send + Sync,
    I: IntoIterator<Item = T>,
    P: PagingParams + ?Sized,
{
    Paginator::default().paginate_in_memory(items, params).await
}

/// [`Paginator::paginate_in_memory_with`] with the default configuration.
pub async fn paginate_in_memory_with<T, I>(
    items: I,
    page_number: u32,
    page_size: u32,
    sort_column: &str,
    sort_order: &str,
) -> PagingResult<PagedResult<T>>
where
    T: SortKeys + Send + Sync,
    I: IntoIterator<Item = T>,
{
    Paginator::default()
        .paginate_in_memory_with(items, page_number, page_size, sort_column, sort_order)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{column_name_eq, Comparator, PageRequest};
    use crate::infrastructure::database::entity_source::tests::{book, setup_books};
    use crate::infrastructure::EntitySource;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Person {
        id: u32,
        name: String,
    }

    impl Person {
        fn new(id: u32, name: &str) -> Self {
            Self {
                id,
                name: name.to_string(),
            }
        }
    }

    impl SortKeys for Person {
        fn comparator(column: &str) -> Option<Comparator<Self>> {
            let compare: Comparator<Self> = match column {
                c if column_name_eq(c, "id") => |a, b| a.id.cmp(&b.id),
                c if column_name_eq(c, "name") => |a, b| a.name.cmp(&b.name),
                _ => return None,
            };
            Some(compare)
        }
    }

    fn people(count: u32) -> Vec<Person> {
        (1..=count).map(|id| Person::new(id, &format!("p{:02}", id))).collect()
    }

    fn names(page: &PagedResult<Person>) -> Vec<&str> {
        page.items().iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_sorts_by_name_ascending() {
        let source = vec![Person::new(1, "b"), Person::new(2, "a"), Person::new(3, "c")];
        let request = PageRequest::new(1, 2).sorted_by("Name", "ASC");

        let page = paginate_in_memory(source, &request).await.unwrap();

        assert_eq!(names(&page), vec!["a", "b"]);
        assert_eq!(page.total_count(), 3);
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[tokio::test]
    async fn test_page_sizes_across_25_records() {
        let paginator = Paginator::default();

        for (page_number, expected) in [(1, 10), (2, 10), (3, 5), (4, 0)] {
            let page = paginator
                .paginate_in_memory_with(people(25), page_number, 10, "Id", "ASC")
                .await
                .unwrap();

            assert_eq!(page.len(), expected, "page {}", page_number);
            assert_eq!(page.total_count(), 25);
            assert_eq!(page.total_pages(), 3);
        }
    }

    #[tokio::test]
    async fn test_page_matches_slice_of_full_sort() {
        let paginator = Paginator::default();

        for total in [0u32, 1, 6, 7] {
            let mut sorted = people(total);
            sorted.reverse();

            for page_size in 1..=4u32 {
                for page_number in 1..=4u32 {
                    let page = paginator
                        .paginate_in_memory_with(people(total), page_number, page_size, "", "")
                        .await
                        .unwrap();

                    let start = ((page_number - 1) * page_size) as usize;
                    let end = (start + page_size as usize).min(sorted.len());
                    let expected = sorted.get(start..end).unwrap_or(&[]);

                    assert!(page.len() <= page_size as usize);
                    assert_eq!(page.items(), expected);
                    assert_eq!(page.total_count(), u64::from(total));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_repeated_calls_are_equal() {
        let request = PageRequest::new(2, 3).sorted_by("name", "desc");

        let first = paginate_in_memory(people(9), &request).await.unwrap();
        let second = paginate_in_memory(people(9), &request).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_blank_column_uses_configured_default() {
        let paginator = Paginator::new(PagingConfig {
            default_sort_column: "Name".to_string(),
            max_page_size: None,
        });
        let source = vec![Person::new(1, "b"), Person::new(2, "c"), Person::new(3, "a")];

        let page = paginator
            .paginate_in_memory_with(source, 1, 10, "  ", "asc")
            .await
            .unwrap();

        assert_eq!(names(&page), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_default_request_sorts_by_id_descending() {
        let page = paginate_in_memory(people(12), &PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.items()[0].id, 12);
        assert_eq!(page.len(), 10);
    }

    #[tokio::test]
    async fn test_rejects_zero_page_number_and_size() {
        let err = paginate_in_memory_with(people(3), 0, 10, "Id", "ASC")
            .await
            .unwrap_err();
        assert!(matches!(err, PagingError::InvalidPageNumber(0)));

        let err = paginate_in_memory_with(people(3), 1, 0, "Id", "ASC")
            .await
            .unwrap_err();
        assert!(matches!(err, PagingError::InvalidPageSize(0)));
    }

    #[tokio::test]
    async fn test_max_page_size() {
        let paginator = Paginator::new(PagingConfig {
            max_page_size: Some(50),
            ..PagingConfig::default()
        });

        let err = paginator
            .paginate_in_memory(people(3), &PageRequest::new(1, 51))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PagingError::PageSizeTooLarge {
                requested: 51,
                max: 50
            }
        ));

        let page = paginator
            .paginate_in_memory(people(3), &PageRequest::new(1, 50))
            .await
            .unwrap();
        assert_eq!(page.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_column_propagates() {
        let err = paginate_in_memory_with(people(3), 1, 10, "Salary", "ASC")
            .await
            .unwrap_err();

        assert!(err.is_caller_error());
        assert!(matches!(err, PagingError::UnresolvableSortColumn { column } if column == "Salary"));
    }

    #[tokio::test]
    async fn test_database_source_with_params() {
        let db = setup_books(&[(1, "b", "x"), (2, "a", "y"), (3, "c", "z")]).await;
        let request = PageRequest::new(1, 2).sorted_by("Title", "asc");

        let page = paginate(EntitySource::<book::Entity>::new(db), &request, None)
            .await
            .unwrap();

        let titles: Vec<&str> = page.items().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(page.total_count(), 3);
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn test_database_source_with_args() {
        let rows: Vec<(i32, String)> = (1..=25).map(|id| (id, format!("t{:02}", id))).collect();
        let rows: Vec<(i32, &str, &str)> =
            rows.iter().map(|(id, title)| (*id, title.as_str(), "a")).collect();
        let db = setup_books(&rows).await;

        let page = paginate_with(EntitySource::<book::Entity>::new(db.clone()), 3, 10, "Id", "DESC", None)
            .await
            .unwrap();
        let ids: Vec<i32> = page.items().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
        assert_eq!(page.total_count(), 25);

        let past_end = paginate_with(EntitySource::<book::Entity>::new(db), 4, 10, "Id", "DESC", None)
            .await
            .unwrap();
        assert!(past_end.is_empty());
        assert_eq!(past_end.total_count(), 25);
    }

    #[tokio::test]
    async fn test_database_count_respects_upstream_filter() {
        let db = setup_books(&[(1, "a", "kim"), (2, "b", "lee"), (3, "c", "kim")]).await;
        let source = EntitySource::<book::Entity>::new(db)
            .filter(sea_orm::ColumnTrait::eq(&book::Column::Author, "kim"));

        let page = paginate(source, &PageRequest::new(1, 1), None).await.unwrap();

        assert_eq!(page.total_count(), 2);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.items()[0].id, 3);
    }

    #[tokio::test]
    async fn test_database_page_past_signed_offset_range() {
        let db = setup_books(&[(1, "a", "x")]).await;

        let page = paginate(
            EntitySource::<book::Entity>::new(db),
            &PageRequest::new(u32::MAX, u32::MAX),
            None,
        )
        .await
        .unwrap();

        assert!(page.is_empty());
        assert_eq!(page.total_count(), 1);
        assert!(!page.has_next());
    }

    #[tokio::test]
    async fn test_database_pages_are_bounded_and_repeatable() {
        let rows: Vec<(i32, String)> = (1..=7).map(|id| (id, format!("t{}", id % 3))).collect();
        let rows: Vec<(i32, &str, &str)> =
            rows.iter().map(|(id, title)| (*id, title.as_str(), "a")).collect();
        let db = setup_books(&rows).await;

        for page_size in 1..=3u32 {
            for page_number in 1..=4u32 {
                let request = PageRequest::new(page_number, page_size).sorted_by("title", "asc");

                let first = paginate(EntitySource::<book::Entity>::new(db.clone()), &request, None)
                    .await
                    .unwrap();
                let second = paginate(EntitySource::<book::Entity>::new(db.clone()), &request, None)
                    .await
                    .unwrap();

                assert!(first.len() <= page_size as usize);
                assert_eq!(first.total_count(), 7);
                assert_eq!(first, second);
            }
        }
    }

    #[tokio::test]
    async fn test_cancelled_token_aborts_retrieval() {
        let db = setup_books(&[(1, "a", "x")]).await;
        let token = CancellationToken::new();
        token.cancel();

        let result = paginate(
            EntitySource::<book::Entity>::new(db),
            &PageRequest::default(),
            Some(&token),
        )
        .await;

        assert!(matches!(result, Err(PagingError::Cancelled)));
    }
}
