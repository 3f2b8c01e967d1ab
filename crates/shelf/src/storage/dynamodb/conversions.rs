//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! records. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};

use shelf_core::record::Record;
use shelf_core::storage::StoreError;

/// Attribute holding the partition key.
pub const ID_ATTRIBUTE: &str = "id";

/// Convert a record to a DynamoDB item keyed on `id`.
pub fn record_to_item(record: &Record) -> Result<HashMap<String, AttributeValue>, StoreError> {
    let mut item = HashMap::new();
    item.insert(
        ID_ATTRIBUTE.to_string(),
        AttributeValue::S(record.id.clone()),
    );

    for (name, value) in &record.fields {
        item.insert(name.clone(), json_to_attr(value)?);
    }

    Ok(item)
}

/// Convert a DynamoDB item to a record.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<Record, StoreError> {
    let id = item
        .get(ID_ATTRIBUTE)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| StoreError::InvalidItem(format!("missing attribute: {ID_ATTRIBUTE}")))?;

    let mut fields = Map::new();
    for (name, value) in item {
        if name == ID_ATTRIBUTE {
            continue;
        }
        fields.insert(name.clone(), attr_to_json(value)?);
    }

    Ok(Record { id, fields })
}

/// Convert an opaque JSON payload value to a DynamoDB attribute value.
fn json_to_attr(value: &Value) -> Result<AttributeValue, StoreError> {
    match value {
        Value::Null => Ok(AttributeValue::Null(true)),
        Value::Bool(b) => Ok(AttributeValue::Bool(*b)),
        Value::Number(n) => Ok(AttributeValue::N(n.to_string())),
        Value::String(s) => Ok(AttributeValue::S(s.clone())),
        Value::Array(values) => {
            let items = values
                .iter()
                .map(json_to_attr)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(AttributeValue::L(items))
        }
        Value::Object(object) => {
            let mut entries = HashMap::new();
            for (name, value) in object {
                entries.insert(name.clone(), json_to_attr(value)?);
            }
            Ok(AttributeValue::M(entries))
        }
    }
}

/// Convert a DynamoDB attribute value back to a JSON payload value.
fn attr_to_json(attr: &AttributeValue) -> Result<Value, StoreError> {
    match attr {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => {
            let number = n
                .parse::<Number>()
                .map_err(|e| StoreError::InvalidItem(format!("invalid number {n}: {e}")))?;
            Ok(Value::Number(number))
        }
        AttributeValue::L(items) => {
            let values = items
                .iter()
                .map(attr_to_json)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(values))
        }
        AttributeValue::M(entries) => {
            let mut object = Map::new();
            for (name, value) in entries {
                object.insert(name.clone(), attr_to_json(value)?);
            }
            Ok(Value::Object(object))
        }
        other => Err(StoreError::InvalidItem(format!(
            "unsupported attribute type: {other:?}"
        ))),
    }
}
