pub mod database;
pub mod memory;

pub use database::{init_database, DatabaseConfig, EntitySource};
pub use memory::{KeyResolver, MemorySource};
