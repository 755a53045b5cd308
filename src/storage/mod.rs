pub mod postgres;
mod row;
pub mod sqlite;
pub mod trait_def;

pub use postgres::PostgresStorage;
pub use sqlite::SqliteStorage;
pub use trait_def::{OrderStore, StorageError, StorageResult};
