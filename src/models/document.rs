//! Conversion between request/response JSON and stored BSON documents.
//!
//! Documents in both collections are schemaless, so handlers carry caller fields
//! as `serde_json::Map` and convert at the store boundary. Integers that fit in
//! 32 bits are stored as `Int32` (what the shell and the Node driver write),
//! larger ones as `Int64`, everything else numeric as `Double`.

use crate::utils::AppError;
use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

pub fn json_to_bson(value: &Value) -> Result<Bson, AppError> {
    Ok(match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => Bson::Int32(small),
                    Err(_) => Bson::Int64(i),
                }
            } else if let Some(f) = n.as_f64() {
                Bson::Double(f)
            } else {
                return Err(AppError::InvalidRequest(format!(
                    "Number {} is out of range",
                    n
                )));
            }
        }
        Value::String(s) => Bson::String(s.clone()),
        Value::Array(items) => Bson::Array(
            items
                .iter()
                .map(json_to_bson)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(map) => Bson::Document(map_to_document(map)?),
    })
}

pub fn map_to_document(map: &Map<String, Value>) -> Result<Document, AppError> {
    let mut doc = Document::new();
    for (key, value) in map {
        doc.insert(key.clone(), json_to_bson(value)?);
    }
    Ok(doc)
}

/// Renders stored values as plain JSON: ObjectIds become hex strings, dates RFC 3339.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::from(dt.timestamp_millis())),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => Value::Object(document_to_map(doc)),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_map(doc: Document) -> Map<String, Value> {
    doc.into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

/// Rejects keys the store would treat as operators or that would touch the immutable `_id`.
pub fn check_field_names(map: &Map<String, Value>) -> Result<(), AppError> {
    for key in map.keys() {
        if key == "_id" {
            return Err(AppError::InvalidRequest("Field '_id' cannot be set".to_string()));
        }
        if key.is_empty() || key.starts_with('$') {
            return Err(AppError::InvalidRequest(format!(
                "Invalid field name '{}'",
                key
            )));
        }
    }
    Ok(())
}
