//! # paged-list
//!
//! Page number / page size / sort column pagination over SeaORM selects and
//! in-memory collections, returning a [`PagedResult`] that carries the items
//! together with the source's total count.
//!
//! ## Architecture
//!
//! - **domain**: paging parameters, sort directives, the result envelope and
//!   the `QuerySource` capability
//! - **application**: the `Paginator` service and its four entry points
//! - **infrastructure**: SeaORM and in-memory sources
//! - **shared**: cancellation and tracing helpers
//!
//! ```ignore
//! let request = PageRequest::new(1, 20).sorted_by("CreatedAt", "desc");
//! let page = paginate(EntitySource::<article::Entity>::new(db), &request, None).await?;
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError, LoggingConfig, PagingConfig};

pub use application::{
    paginate, paginate_in_memory, paginate_in_memory_with, paginate_with, Paginator,
};
pub use domain::{
    build_sort_directive, column_name_eq, Comparator, PageRequest, PagedResult, PagingError,
    PagingParams, PagingResult, QuerySource, SortDirective, SortKeys, SortOrder,
};
pub use infrastructure::{init_database, DatabaseConfig, EntitySource, MemorySource};

pub use tokio_util::sync::CancellationToken;
