//! Application state with store-backed dispatch.
//!
//! The store handle is built once per process and injected into the
//! dispatcher through this state; storage backends are selected via
//! mutually exclusive feature flags.

use std::sync::Arc;

use shelf_core::routing::RouteTable;
use shelf_core::storage::RecordStore;

use crate::config::Config;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!("Cannot enable both 'inmemory' and 'dynamodb' storage features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'dynamodb'");

/// Shared application state.
///
/// This is cloned for each request handler. The store handle is process-wide
/// and reused across invocations as a stateless client.
#[derive(Clone)]
pub struct AppState {
    /// Record store handle.
    pub store: Arc<dyn RecordStore>,
    /// The fixed dispatch table for the configured collection.
    pub routes: Arc<RouteTable>,
    /// Origin echoed in the cross-origin-allow response headers.
    pub allowed_origin: Arc<str>,
}

impl AppState {
    /// Creates a new AppState with the given store and configuration.
    fn build(store: Arc<dyn RecordStore>, config: &Config) -> Self {
        Self {
            store,
            routes: Arc::new(RouteTable::new(config.collection.clone())),
            allowed_origin: config.allowed_origin.clone().into(),
        }
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryStore;

    impl AppState {
        /// Creates AppState backed by the in-memory store.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            Ok(Self::build(Arc::new(InMemoryStore::new()), config))
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb_backend {
    use super::*;
    use crate::storage::DynamoRecordStore;

    impl AppState {
        /// Creates AppState backed by DynamoDB.
        ///
        /// Uses the AWS SDK default credential chain; the table name comes
        /// from configuration.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);
            let store = DynamoRecordStore::new(client, config.table_name.clone());

            Ok(Self::build(Arc::new(store), config))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;

    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use shelf_core::record::Record;
    use shelf_core::storage::Result;

    /// Minimal in-memory store for tests, independent of the selected
    /// storage feature.
    #[derive(Debug, Default)]
    struct TestStore {
        records: RwLock<HashMap<String, Record>>,
    }

    #[async_trait]
    impl RecordStore for TestStore {
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

    impl Default for AppState {
        /// Creates an AppState with in-memory storage for testing.
        fn default() -> Self {
            let config = Config::default();
            Self::build(Arc::new(TestStore::default()), &config)
        }
    }
}
