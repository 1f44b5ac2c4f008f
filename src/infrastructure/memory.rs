//! In-memory source
//!
//! Pages over records that are already loaded. There is no expression
//! evaluator here, so sort columns resolve through a typed comparator
//! allow-list: either the record's [`SortKeys`] impl or a resolver handed to
//! [`MemorySource::with_keys`]. Unknown columns are an error, never a no-op.

use async_trait::async_trait;

use crate::domain::{
    Comparator, PagingError, PagingResult, QuerySource, SortDirective, SortKeys, SortOrder,
};

/// Resolves a column name to its ascending comparator.
pub type KeyResolver<T> = fn(&str) -> Option<Comparator<T>>;

/// In-memory source over an owned `Vec`
pub struct MemorySource<T> {
    items: Vec<T>,
    keys: KeyResolver<T>,
}

impl<T: SortKeys> MemorySource<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self::with_keys(items, T::comparator)
    }
}

impl<T> MemorySource<T> {
    pub fn with_keys(items: impl IntoIterator<Item = T>, keys: KeyResolver<T>) -> Self {
        Self {
            items: items.into_iter().collect(),
            keys,
        }
    }
}

#[async_trait]
impl<T: Send + Sync> QuerySource for MemorySource<T> {
    type Item = T;

    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn count(&self) -> PagingResult<u64> {
        Ok(self.items.len() as u64)
    }

    fn order_by(mut self, directive: &SortDirective) -> PagingResult<Self> {
        let compare = (self.keys)(directive.column())
            .ok_or_else(|| PagingError::unresolvable(directive.column()))?;

        // sort_by is stable: ties keep their source order in both directions
        match directive.order() {
            SortOrder::Asc => self.items.sort_by(compare),
            SortOrder::Desc => self.items.sort_by(|a, b| compare(b, a)),
        }
        Ok(self)
    }

    fn skip(mut self, count: u64) -> Self {
        let count = usize::try_from(count).unwrap_or(usize::MAX).min(self.items.len());
        self.items.drain(..count);
        self
    }

    fn take(mut self, count: u64) -> Self {
        let count = usize::try_from(count).unwrap_or(usize::MAX);
        self.items.truncate(count);
        self
    }

    async fn materialize(self) -> PagingResult<Vec<T>> {
        Ok(self.items)
    }
}
