use thiserror::Error;

/// Errors that can occur during store operations.
///
/// An absent record is not an error anywhere in this taxonomy: reads return
/// `Ok(None)`, deletes of missing ids succeed, and writes replace
/// unconditionally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid item: {0}")]
    InvalidItem(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_display() {
        let error = StoreError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_request_failed_display() {
        let error = StoreError::RequestFailed("Table not found".to_string());
        assert_eq!(error.to_string(), "Request failed: Table not found");
    }

    #[test]
    fn test_serialization_display() {
        let error = StoreError::Serialization("unsupported value".to_string());
        assert_eq!(error.to_string(), "Serialization error: unsupported value");
    }

    #[test]
    fn test_invalid_item_display() {
        let error = StoreError::InvalidItem("missing attribute: id".to_string());
        assert_eq!(error.to_string(), "Invalid item: missing attribute: id");
    }
}
