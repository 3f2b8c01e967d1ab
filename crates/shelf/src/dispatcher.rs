//! The record dispatcher.
//!
//! Takes an inbound request descriptor, resolves it against the fixed
//! four-entry dispatch table, performs exactly one store round trip, and
//! shapes the response. Every failure — unsupported route, malformed body,
//! store failure — is caught here and collapsed to a 400 whose body is the
//! failure's message text.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use shelf_core::record::Record;
use shelf_core::routing::{route_key, Operation, RouteTable};
use shelf_core::storage::{RecordStore, StoreError};

/// Inbound request descriptor, as handed over by the API layer.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub method: String,
    /// Route template the request matched, e.g. `/items/{id}`.
    pub resource_path: String,
    pub path_parameters: HashMap<String, String>,
    pub body: Option<String>,
}

/// Outbound response descriptor.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status_code: u16,
    /// Always a JSON-encoded string, never a raw object.
    pub body: String,
    pub headers: Vec<(&'static str, String)>,
}

/// Failures a dispatch can end in. None is distinguished in the response:
/// all of them produce status 400 with the message text as body.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unsupported route: \"{0}\"")]
    UnsupportedRoute(String),
    /// Carries the parser's own message, surfaced verbatim.
    #[error("{0}")]
    MalformedBody(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The fixed header map attached to every response regardless of outcome.
pub fn response_headers(allowed_origin: &str) -> Vec<(&'static str, String)> {
    vec![
        ("content-type", "application/json".to_string()),
        ("access-control-allow-origin", allowed_origin.to_string()),
        ("access-control-allow-methods", "GET,PUT,DELETE".to_string()),
        ("access-control-allow-headers", "Content-Type".to_string()),
    ]
}

/// Dispatches one request descriptor to its record operation.
///
/// The body is JSON-serialized to a single string as the unconditional last
/// step, on the success and failure paths alike.
pub async fn dispatch(
    store: &dyn RecordStore,
    routes: &RouteTable,
    allowed_origin: &str,
    request: &ApiRequest,
) -> ApiResponse {
    let (status_code, payload) = match run_operation(store, routes, request).await {
        Ok(value) => (200, value),
        Err(err) => {
            tracing::warn!(
                key = %route_key(&request.method, &request.resource_path),
                error = %err,
                "Dispatch failed"
            );
            (400, Value::String(err.to_string()))
        }
    };

    // Serializing a Value cannot fail.
    let body = serde_json::to_string(&payload).unwrap_or_default();

    ApiResponse {
        status_code,
        body,
        headers: response_headers(allowed_origin),
    }
}

async fn run_operation(
    store: &dyn RecordStore,
    routes: &RouteTable,
    request: &ApiRequest,
) -> Result<Value, DispatchError> {
    let operation = routes
        .resolve(&request.method, &request.resource_path)
        .ok_or_else(|| {
            DispatchError::UnsupportedRoute(route_key(&request.method, &request.resource_path))
        })?;

    match operation {
        Operation::List => {
            let records = store.scan_records().await?;
            Ok(Value::Array(records.iter().map(Record::to_value).collect()))
        }
        Operation::ReadOne => {
            let id = path_id(request)?;
            let record = store.get_record(id).await?;
            // An absent record is a success whose body renders as null.
            Ok(record.map(|r| r.to_value()).unwrap_or(Value::Null))
        }
        Operation::Upsert => {
            let body = request.body.as_deref().unwrap_or_default();
            let record = Record::from_body(body)
                .map_err(|e| DispatchError::MalformedBody(e.to_string()))?;
            store.put_record(&record).await?;
            tracing::info!(id = %record.id, "Stored record");
            Ok(Value::String(format!("Put record {}", record.id)))
        }
        Operation::Delete => {
            let id = path_id(request)?;
            store.delete_record(id).await?;
            tracing::info!(%id, "Deleted record");
            Ok(Value::String(format!("Deleted record {id}")))
        }
    }
}

fn path_id(request: &ApiRequest) -> Result<&str, DispatchError> {
    request
        .path_parameters
        .get("id")
        .map(String::as_str)
        .ok_or_else(|| DispatchError::MalformedBody("missing path parameter \"id\"".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use shelf_core::storage::Result as StoreResult;

    /// In-memory store that records which operations were invoked.
    #[derive(Debug, Default)]
    struct RecordingStore {
        records: RwLock<HashMap<String, Record>>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingStore {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        async fn insert(&self, record: Record) {
            self.records.write().await.insert(record.id.clone(), record);
        }
    }

    #[async_trait]
    impl RecordStore for RecordingStore {
        async fn scan_records(&self) -> StoreResult<Vec<Record>> {
            self.calls.lock().unwrap().push("scan");
            Ok(self.records.read().await.values().cloned().collect())
        }

        async fn get_record(&self, id: &str) -> StoreResult<Option<Record>> {
            self.calls.lock().unwrap().push("get");
            Ok(self.records.read().await.get(id).cloned())
        }

        async fn put_record(&self, record: &Record) -> StoreResult<()> {
            self.calls.lock().unwrap().push("put");
            self.records
                .write()
                .await
                .insert(record.id.clone(), record.clone());
            Ok(())
        }

        async fn delete_record(&self, id: &str) -> StoreResult<()> {
            self.calls.lock().unwrap().push("delete");
            self.records.write().await.remove(id);
            Ok(())
        }
    }

    /// Store whose every call fails.
    #[derive(Debug, Default)]
    struct FailingStore;

    #[async_trait]
    impl RecordStore for FailingStore {
        async fn scan_records(&self) -> StoreResult<Vec<Record>> {
            Err(StoreError::RequestFailed("Table not found".to_string()))
        }

        async fn get_record(&self, _id: &str) -> StoreResult<Option<Record>> {
            Err(StoreError::RequestFailed("Table not found".to_string()))
        }

        async fn put_record(&self, _record: &Record) -> StoreResult<()> {
            Err(StoreError::RequestFailed("Table not found".to_string()))
        }

        async fn delete_record(&self, _id: &str) -> StoreResult<()> {
            Err(StoreError::RequestFailed("Table not found".to_string()))
        }
    }

    fn routes() -> RouteTable {
        RouteTable::new("items")
    }

    fn collection_request(method: &str, body: Option<&str>) -> ApiRequest {
        ApiRequest {
            method: method.to_string(),
            resource_path: "/items".to_string(),
            path_parameters: HashMap::new(),
            body: body.map(str::to_string),
        }
    }

    fn item_request(method: &str, id: &str) -> ApiRequest {
        ApiRequest {
            method: method.to_string(),
            resource_path: "/items/{id}".to_string(),
            path_parameters: HashMap::from([("id".to_string(), id.to_string())]),
            body: None,
        }
    }

    /// Decode the always-JSON-encoded body back into a value.
    fn decode(response: &ApiResponse) -> Value {
        serde_json::from_str(&response.body).expect("body must be valid JSON")
    }

    #[tokio::test]
    async fn test_each_route_invokes_exactly_one_operation() {
        let cases = [
            (collection_request("GET", None), "scan"),
            (item_request("GET", "1"), "get"),
            (collection_request("PUT", Some(r#"{"id":"1"}"#)), "put"),
            (item_request("DELETE", "1"), "delete"),
        ];

        for (request, expected) in cases {
            let store = RecordingStore::default();
            let response = dispatch(&store, &routes(), "*", &request).await;

            assert_eq!(response.status_code, 200);
            assert_eq!(store.calls(), vec![expected]);
        }
    }

    #[tokio::test]
    async fn test_put_stores_full_record_and_names_id() {
        let store = RecordingStore::default();
        let request =
            collection_request("PUT", Some(r#"{"id":"1","title":"a","description":"b"}"#));

        let response = dispatch(&store, &routes(), "*", &request).await;

        assert_eq!(response.status_code, 200);
        assert!(response.body.contains('1'));
        assert_eq!(decode(&response), Value::String("Put record 1".to_string()));

        let stored = store.records.read().await.get("1").cloned().unwrap();
        assert_eq!(stored.id, "1");
        assert_eq!(stored.fields["title"], "a");
        assert_eq!(stored.fields["description"], "b");
    }

    #[tokio::test]
    async fn test_put_is_full_replacement() {
        let store = RecordingStore::default();
        store
            .insert(
                Record::new("1")
                    .with_field("title", Value::String("old".to_string()))
                    .with_field("stale", Value::Bool(true)),
            )
            .await;

        let request = collection_request("PUT", Some(r#"{"id":"1","title":"new"}"#));
        dispatch(&store, &routes(), "*", &request).await;

        let stored = store.records.read().await.get("1").cloned().unwrap();
        assert_eq!(stored.fields["title"], "new");
        assert!(!stored.fields.contains_key("stale"));
    }

    #[tokio::test]
    async fn test_list_returns_json_array() {
        let store = RecordingStore::default();
        store.insert(Record::new("a")).await;
        store.insert(Record::new("b")).await;

        let response = dispatch(&store, &routes(), "*", &collection_request("GET", None)).await;

        assert_eq!(response.status_code, 200);
        let decoded = decode(&response);
        assert_eq!(decoded.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_read_absent_record_is_null_not_error() {
        let store = RecordingStore::default();

        let response = dispatch(&store, &routes(), "*", &item_request("GET", "missing")).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "null");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = RecordingStore::default();

        let response = dispatch(&store, &routes(), "*", &item_request("DELETE", "missing")).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            decode(&response),
            Value::String("Deleted record missing".to_string())
        );
    }

    #[tokio::test]
    async fn test_unsupported_route_is_400_with_routing_key() {
        let store = RecordingStore::default();

        let response = dispatch(&store, &routes(), "*", &collection_request("PATCH", None)).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            decode(&response),
            Value::String("Unsupported route: \"PATCH /items\"".to_string())
        );
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_400_with_parser_message() {
        let store = RecordingStore::default();
        let request = collection_request("PUT", Some("not json"));

        let response = dispatch(&store, &routes(), "*", &request).await;

        assert_eq!(response.status_code, 400);
        let expected = Record::from_body("not json").unwrap_err().to_string();
        assert_eq!(decode(&response), Value::String(expected));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_body_on_upsert_is_400() {
        let store = RecordingStore::default();

        let response = dispatch(&store, &routes(), "*", &collection_request("PUT", None)).await;

        assert_eq!(response.status_code, 400);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_400_with_store_message() {
        let store = FailingStore;

        let response = dispatch(&store, &routes(), "*", &collection_request("GET", None)).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            decode(&response),
            Value::String("Request failed: Table not found".to_string())
        );
    }

    #[tokio::test]
    async fn test_headers_are_fixed_on_every_outcome() {
        let store = RecordingStore::default();

        let success = dispatch(&store, &routes(), "https://example.com", &collection_request("GET", None)).await;
        let failure =
            dispatch(&store, &routes(), "https://example.com", &collection_request("PATCH", None)).await;

        for response in [success, failure] {
            assert_eq!(response.headers, response_headers("https://example.com"));
        }
    }

    #[tokio::test]
    async fn test_body_is_always_a_json_string() {
        let store = RecordingStore::default();
        let requests = vec![
            collection_request("GET", None),
            item_request("GET", "missing"),
            collection_request("PUT", Some(r#"{"id":"1"}"#)),
            item_request("DELETE", "1"),
            collection_request("PATCH", None),
            collection_request("PUT", Some("not json")),
        ];

        for request in requests {
            let response = dispatch(&store, &routes(), "*", &request).await;
            // Decodes as JSON in every case: the body is never a raw object
            // dumped via Display.
            decode(&response);
        }
    }
}
