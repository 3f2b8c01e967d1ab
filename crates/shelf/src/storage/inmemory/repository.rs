//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shelf_core::record::Record;
use shelf_core::storage::{RecordStore, Result};

/// In-memory storage backend for tests and local runs.
///
/// Records live in a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe
/// access. Data is not persisted and is lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Arc<RwLock<HashMap<String, Record>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn scan_records(&self) -> Result<Vec<Record>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn get_record(&self, id: &str) -> Result<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn put_record(&self, record: &Record) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete_record(&self, id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        records.remove(id);
        Ok(())
    }
}
