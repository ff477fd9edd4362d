// Implementations of the report store.

pub mod in_memory;
pub mod postgrest_store;
pub mod sqlite_store;

// Re-export for convenience
pub use in_memory::InMemoryReportStore;
pub use postgrest_store::PostgrestReportStore;
pub use sqlite_store::SqliteReportStore;
