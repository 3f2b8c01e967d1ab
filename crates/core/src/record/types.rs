use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored record: a unique string id plus an opaque payload.
///
/// The payload schema is not fixed by the service — whatever fields arrive in
/// the request body are carried verbatim. Only `id` is structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique primary key.
    pub id: String,
    /// Opaque payload fields, copied verbatim from the request body.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Creates a record with an empty payload.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Adds a payload field.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Parses a write-request body into a record.
    ///
    /// The body must be a JSON object with a string `id`; every other field
    /// is kept as opaque payload. The returned error's message is surfaced
    /// verbatim to the caller on failure.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Renders the record as a JSON value with `id` alongside the payload.
    pub fn to_value(&self) -> Value {
        let mut object = self.fields.clone();
        object.insert("id".to_string(), Value::String(self.id.clone()));
        Value::Object(object)
    }
}
