//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `shelf_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;

use shelf_core::storage::StoreError;

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(err: SdkError<ScanError, R>) -> StoreError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            StoreError::RequestFailed("Table not found".to_string())
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            StoreError::RequestFailed("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            StoreError::RequestFailed("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::RequestFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    id: &str,
) -> StoreError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            StoreError::RequestFailed("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::RequestFailed("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            StoreError::RequestFailed("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::RequestFailed(format!("GetItem failed for {id}: {err:?}")),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    id: &str,
) -> StoreError {
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => {
            StoreError::RequestFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::RequestFailed("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            StoreError::RequestFailed("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::RequestFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            StoreError::RequestFailed("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::RequestFailed(format!("PutItem failed for {id}: {err:?}")),
    }
}

/// Map a DeleteItem SDK error to StoreError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    id: &str,
) -> StoreError {
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => {
            StoreError::RequestFailed("Table not found".to_string())
        }
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::RequestFailed("Throughput exceeded, please retry".to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            StoreError::RequestFailed("Request limit exceeded, please retry".to_string())
        }
        DeleteItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::RequestFailed("Item collection size limit exceeded".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            StoreError::RequestFailed("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::RequestFailed(format!("DeleteItem failed for {id}: {err:?}")),
    }
}
