//! Conversions between the BSON documents stored in MongoDB and the plain JSON
//! the web client sends and expects back.

use crate::utils::AppError;
use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

/// Renders a BSON value as client-facing JSON.
///
/// ObjectIds become their hex string and dates become RFC 3339 strings, so a
/// stored tip reads back as `{"_id": "65f0..."}` rather than `{"_id": {"$oid": ...}}`.
/// Everything else follows relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    let map: Map<String, Value> = doc
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect();
    Value::Object(map)
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

/// Converts a request body into a document for insertion. Only JSON objects are accepted.
pub fn json_to_document(value: &Value) -> Result<Document, AppError> {
    if !value.is_object() {
        return Err(AppError::InvalidRequest(
            "request body must be a JSON object".to_string(),
        ));
    }

    bson::to_document(value).map_err(|e| AppError::InvalidRequest(e.to_string()))
}

/// Like [`json_to_document`], minus `_id`, which MongoDB refuses to `$set`.
pub fn json_to_update_fields(value: &Value) -> Result<Document, AppError> {
    let mut fields = json_to_document(value)?;
    fields.remove("_id");
    Ok(fields)
}
