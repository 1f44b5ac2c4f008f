//! SeaORM source
//!
//! Wraps a `Select<E>` so list queries can be paged without re-deriving
//! offset/limit/order per repository. Sort columns resolve against the
//! entity's own columns, which act as the allow-list.

use async_trait::async_trait;
use sea_orm::sea_query::IntoCondition;
use sea_orm::{
    DatabaseConnection, EntityTrait, IdenStatic, Iterable, Order, PaginatorTrait,
    PrimaryKeyToColumn, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::domain::{
    column_name_eq, PagingError, PagingResult, QuerySource, SortDirective, SortOrder,
};

/// Query-executable source over a SeaORM entity
pub struct EntitySource<E: EntityTrait> {
    select: Select<E>,
    db: DatabaseConnection,
}

impl<E: EntityTrait> EntitySource<E> {
    /// Source over every row of `E`
    pub fn new(db: DatabaseConnection) -> Self {
        Self::from_select(E::find(), db)
    }

    /// Source over an already-filtered select
    pub fn from_select(select: Select<E>, db: DatabaseConnection) -> Self {
        Self { select, db }
    }

    pub fn filter<F: IntoCondition>(mut self, filter: F) -> Self {
        self.select = self.select.filter(filter);
        self
    }
}

/// Find the entity column named by `name`, ignoring case and underscores.
pub fn resolve_column<E: EntityTrait>(name: &str) -> Option<E::Column> {
    E::Column::iter().find(|column| column_name_eq(name, column.as_str()))
}

/// SQL drivers bind OFFSET/LIMIT as signed 64-bit integers. Anything larger
/// already lies past every row, so saturating keeps the page empty.
fn bind_limit(count: u64) -> u64 {
    count.min(i64::MAX as u64)
}

#[async_trait]
impl<E> QuerySource for EntitySource<E>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
{
    type Item = E::Model;

    fn kind(&self) -> &'static str {
        "database"
    }

    async fn count(&self) -> PagingResult<u64> {
        Ok(self.select.clone().count(&self.db).await?)
    }

    fn order_by(mut self, directive: &SortDirective) -> PagingResult<Self> {
        let column = resolve_column::<E>(directive.column())
            .ok_or_else(|| PagingError::unresolvable(directive.column()))?;

        let order = match directive.order() {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        self.select = self.select.order_by(column, order.clone());

        // Primary key breaks ties so equal sort values page deterministically
        for key in E::PrimaryKey::iter() {
            let key = key.into_column();
            if key.as_str() != column.as_str() {
                self.select = self.select.order_by(key, order.clone());
            }
        }

        Ok(self)
    }

    fn skip(mut self, count: u64) -> Self {
        self.select = self.select.offset(bind_limit(count));
        self
    }

    fn take(mut self, count: u64) -> Self {
        self.select = self.select.limit(bind_limit(count));
        self
    }

    async fn materialize(self) -> PagingResult<Vec<E::Model>> {
        let Self { select, db } = self;
        Ok(select.all(&db).await?)
    }
}
