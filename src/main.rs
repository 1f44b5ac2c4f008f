//! paged-list demo
//!
//! Seeds a small article catalog, then prints a few pages of it from the
//! database and from memory as JSON.
//! Reads configuration from TOML file (~/.config/paged-list/config.toml).

use chrono::{Duration, TimeZone, Utc};
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Schema,
};
use tracing::{error, info};

use paged_list::shared::init_tracing;
use paged_list::{
    column_name_eq, default_config_path, init_database, AppConfig, Comparator, EntitySource,
    PageRequest, PagedResult, Paginator, SortKeys,
};

mod article {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use serde::Serialize;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
    #[sea_orm(table_name = "articles")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i32,
        pub title: String,
        pub author: String,
        pub published_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl SortKeys for article::Model {
    fn comparator(column: &str) -> Option<Comparator<Self>> {
        let compare: Comparator<Self> = match column {
            c if column_name_eq(c, "id") => |a, b| a.id.cmp(&b.id),
            c if column_name_eq(c, "title") => |a, b| a.title.cmp(&b.title),
            c if column_name_eq(c, "author") => |a, b| a.author.cmp(&b.author),
            c if column_name_eq(c, "published_at") => |a, b| a.published_at.cmp(&b.published_at),
            _ => return None,
        };
        Some(compare)
    }
}

fn catalog() -> Vec<article::Model> {
    let authors = ["Ada", "Grace", "Linus", "Barbara"];
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap_or_else(Utc::now);

    (1..=23)
        .map(|id| article::Model {
            id,
            title: format!("Article {:02}", id),
            author: authors[id as usize % authors.len()].to_string(),
            published_at: start + Duration::days(i64::from(id) * 3),
        })
        .collect()
}

async fn seed(db: &DatabaseConnection, rows: &[article::Model]) -> Result<(), sea_orm::DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut create = schema.create_table_from_entity(article::Entity);
    create.if_not_exists();
    db.execute(backend.build(&create)).await?;

    if article::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let models = rows.iter().cloned().map(|row| article::ActiveModel {
        id: Set(row.id),
        title: Set(row.title),
        author: Set(row.author),
        published_at: Set(row.published_at),
    });
    article::Entity::insert_many(models).exec(db).await?;
    Ok(())
}

fn print_page(label: &str, page: &PagedResult<article::Model>) -> Result<(), serde_json::Error> {
    info!(
        label,
        page = page.page_number(),
        total = page.total_count(),
        "Page ready"
    );
    println!("{}", serde_json::to_string_pretty(page)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = default_config_path();
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging)?;
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg.logging)?;
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    // ── Database ───────────────────────────────────────────────
    let db = init_database(&config.database).await?;
    let rows = catalog();
    seed(&db, &rows).await?;
    info!(rows = rows.len(), "Catalog seeded");

    let paginator = Paginator::new(config.paging.clone());

    // ── Database-backed pages ──────────────────────────────────
    let newest = paginator
        .paginate(
            EntitySource::<article::Entity>::new(db.clone()),
            &PageRequest::new(1, 5).sorted_by("PublishedAt", "desc"),
            None,
        )
        .await?;
    print_page("newest", &newest)?;

    let by_title = paginator
        .paginate_with(
            EntitySource::<article::Entity>::new(db.clone()),
            3,
            10,
            "title",
            "asc",
            None,
        )
        .await?;
    print_page("by_title", &by_title)?;

    // ── In-memory pages ────────────────────────────────────────
    let by_author = paginator
        .paginate_in_memory(rows, &PageRequest::new(2, 4).sorted_by("Author", "ASC"))
        .await?;
    print_page("by_author", &by_author)?;

    db.close().await?;
    Ok(())
}
