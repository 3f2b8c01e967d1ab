//! DynamoDB store implementation.
//!
//! Implements `RecordStore` from `shelf_core::storage` against a single
//! table whose partition key is the `id` string attribute.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use shelf_core::record::Record;
use shelf_core::storage::{RecordStore, Result};

use super::conversions::{item_to_record, record_to_item};
use super::error::{map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error};

/// DynamoDB-backed record store.
///
/// Holds one client handle, built once per process and reused across
/// invocations as a stateless client.
pub struct DynamoRecordStore {
    client: Client,
    table_name: String,
}

impl DynamoRecordStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn scan_records(&self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(map_scan_error)?;

            for item in result.items() {
                records.push(item_to_record(item)?);
            }

            exclusive_start_key = result.last_evaluated_key;
            if exclusive_start_key.is_none() {
                break;
            }
        }

        Ok(records)
    }

    async fn get_record(&self, id: &str) -> Result<Option<Record>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, id))?;

        match result.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_record(&self, record: &Record) -> Result<()> {
        let item = record_to_item(record)?;

        // Full-record replacement: no condition expression, the write wins.
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &record.id))?;

        Ok(())
    }

    async fn delete_record(&self, id: &str) -> Result<()> {
        // No condition expression: deleting an absent id is a no-op.
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, id))?;

        Ok(())
    }
}
