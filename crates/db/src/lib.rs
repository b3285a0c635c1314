//! Document store access for bookhub.
//!
//! Feature modules talk to [`UserRepository`] and [`BookRepository`] only.
//! [`connect`] wires them to MongoDB; [`MemoryStore`] backs them in-process.

use std::time::Duration;

pub mod error;
pub mod filter;
pub mod memory;
pub mod mongo;
pub mod records;
pub mod repository;

pub use error::StoreError;
pub use filter::BookFilter;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use records::{BookRecord, UserRecord};
pub use repository::{BookRepository, Repositories, UserRepository};

/// Open the MongoDB database at `uri` and report whether it answers.
///
/// An unreachable server is logged and tolerated: requests fail individually
/// until it comes back.
pub async fn connect(
    uri: &str,
    database: &str,
    timeout: Duration,
) -> Result<Repositories, StoreError> {
    let store = MongoStore::connect(uri, database, timeout).await?;

    match store.ping().await {
        Ok(()) => tracing::info!(target: "bookhub-db", database, "connected to MongoDB"),
        Err(err) => tracing::warn!(
            target: "bookhub-db",
            database,
            error = %err,
            "MongoDB connection check failed"
        ),
    }

    Ok(store.repositories())
}
