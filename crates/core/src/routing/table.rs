//! Route resolution for the fixed four-entry dispatch table.
//!
//! Pure functions only; the collection path segment is configuration, not
//! code, so the table is parameterized over it.

use super::types::{Method, Operation, RouteShape};

/// Forms the routing key for a request: method and resource path joined by a
/// single space, e.g. `GET /items/{id}`.
pub fn route_key(method: &str, resource_path: &str) -> String {
    format!("{method} {resource_path}")
}

/// The dispatch table for one configured collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    collection: String,
}

impl RouteTable {
    /// Creates a table for the given collection path segment (e.g. `items`).
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
        }
    }

    /// The configured collection segment.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Resource path template for the collection route: `/{collection}`.
    pub fn collection_path(&self) -> String {
        format!("/{}", self.collection)
    }

    /// Resource path template for the item route: `/{collection}/{id}`.
    pub fn item_path(&self) -> String {
        format!("/{}/{{id}}", self.collection)
    }

    /// Classifies a resource path template into one of the two route shapes.
    pub fn classify(&self, resource_path: &str) -> Option<RouteShape> {
        if resource_path == self.collection_path() {
            Some(RouteShape::Collection)
        } else if resource_path == self.item_path() {
            Some(RouteShape::Item)
        } else {
            None
        }
    }

    /// Resolves a (method, resource path) pair to a record operation.
    ///
    /// Exhaustive match over `(Method, RouteShape)`; every pair outside the
    /// four defined routes falls through to `None`, which callers surface as
    /// an unsupported-route failure carrying the routing key.
    pub fn resolve(&self, method: &str, resource_path: &str) -> Option<Operation> {
        let method = Method::parse(method)?;
        let shape = self.classify(resource_path)?;

        match (method, shape) {
            (Method::Get, RouteShape::Collection) => Some(Operation::List),
            (Method::Get, RouteShape::Item) => Some(Operation::ReadOne),
            (Method::Put, RouteShape::Collection) => Some(Operation::Upsert),
            (Method::Delete, RouteShape::Item) => Some(Operation::Delete),
            _ => None,
        }
    }
}
