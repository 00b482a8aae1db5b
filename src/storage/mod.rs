//! Storage gateway
//!
//! Contact records live in a single document collection. Handlers talk to it
//! through the [`ContactStore`] trait so the MongoDB gateway can be swapped
//! for the in-memory store in tests.

pub mod memory;
pub mod mongo;

use std::time::Duration;

use futures::future::BoxFuture;

use crate::contact::{ContactRecord, StoredContact};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_LIMIT: u32 = 50;
/// Largest page a caller may request
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("store is not connected")]
    NotConnected,

    #[error("store operation `{operation}` timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("store driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("malformed stored document: {0}")]
    Decode(String),

    #[error("store rejected the write: {0}")]
    Rejected(String),
}

/// Operations the request handlers need from the contact collection
pub trait ContactStore: Send + Sync {
    /// Append a record and return its store-assigned identifier
    fn insert(&self, record: ContactRecord) -> BoxFuture<'_, Result<String, StorageError>>;

    /// Newest records first, `skip`/`limit` paginated
    fn list_recent(
        &self,
        skip: u64,
        limit: u32,
    ) -> BoxFuture<'_, Result<Vec<StoredContact>, StorageError>>;

    /// Release the underlying connection. Safe to call more than once.
    fn close(&self) -> BoxFuture<'_, ()>;
}
