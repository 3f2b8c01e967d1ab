use async_trait::async_trait;

use crate::record::Record;

use super::Result;

/// The key-value store backing all record operations.
///
/// One fixed table, partition key attribute `id`. These four methods are the
/// only outbound operation kinds the service performs.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches every record in the table. Order is store-defined and not
    /// guaranteed.
    async fn scan_records(&self) -> Result<Vec<Record>>;

    /// Fetches the record with the given id, if present.
    async fn get_record(&self, id: &str) -> Result<Option<Record>>;

    /// Creates or fully replaces the record under its id.
    async fn put_record(&self, record: &Record) -> Result<()>;

    /// Removes the record with the given id. Succeeds even if the id does
    /// not exist.
    async fn delete_record(&self, id: &str) -> Result<()>;
}
