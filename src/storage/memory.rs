//! In-memory contact store
//!
//! Used by the test suite and as a stand-in when no database URI is
//! configured. Nothing survives a restart.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use futures::future::BoxFuture;

use super::{ContactStore, StorageError};
use crate::contact::{ContactRecord, StoredContact};

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredContact>>,
    next_id: AtomicU64,
    closed: AtomicBool,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert fail, to exercise error paths
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.closed.load(Ordering::SeqCst) {
            Err(StorageError::NotConnected)
        } else {
            Ok(())
        }
    }
}

impl ContactStore for MemoryStore {
    fn insert(&self, record: ContactRecord) -> BoxFuture<'_, Result<String, StorageError>> {
        Box::pin(async move {
            self.ensure_open()?;
            if self.reject_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Rejected("writes disabled".to_string()));
            }
            // Same width as a MongoDB ObjectId rendered in hex
            let id = format!("{:024x}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            self.records
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(StoredContact {
                    id: id.clone(),
                    record,
                });
            Ok(id)
        })
    }

    fn list_recent(
        &self,
        skip: u64,
        limit: u32,
    ) -> BoxFuture<'_, Result<Vec<StoredContact>, StorageError>> {
        Box::pin(async move {
            self.ensure_open()?;
            let mut records = self
                .records
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            records.sort_by(|a, b| b.record.created_at.cmp(&a.record.created_at));
            Ok(records
                .into_iter()
                .skip(usize::try_from(skip).unwrap_or(usize::MAX))
                .take(limit as usize)
                .collect())
        })
    }

    fn close(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.closed.store(true, Ordering::SeqCst);
        })
    }
}
