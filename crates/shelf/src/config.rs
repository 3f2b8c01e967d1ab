use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store table name (default: "shelf")
    pub table_name: String,
    /// Collection path segment exposed by the API (default: "items")
    pub collection: String,
    /// Origin named by the cross-origin-allow response headers (default: "*")
    pub allowed_origin: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - Store table name (default: "shelf")
    /// - `COLLECTION` - Collection path segment (default: "items")
    /// - `ALLOWED_ORIGIN` - Origin for cross-origin headers (default: "*")
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "shelf".to_string()),
            collection: env::var("COLLECTION").unwrap_or_else(|_| "items".to_string()),
            allowed_origin: env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "*".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
