pub mod databases;
pub mod entries;
pub mod query;

pub use databases::{create_database, delete_database, list_databases};
pub use entries::{add_entries, list_entries};
pub use query::query;
