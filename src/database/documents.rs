//! Conversions between request/response JSON and stored BSON documents.

use crate::utils::AppError;
use futures::stream::TryStreamExt;
use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use mongodb::Cursor;
use serde_json::Value;

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

/// Accepts only JSON objects; arrays and scalars cannot be stored as a document.
pub fn json_to_document(value: Value) -> Result<Document, AppError> {
    if !value.is_object() {
        return Err(AppError::InvalidRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }
    Ok(bson::to_document(&value)?)
}

/// Renders BSON the way API clients expect: object ids as hex strings,
/// datetimes as RFC 3339, everything else as relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::from(dt.timestamp_millis())),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect())
}

pub async fn collect_json(cursor: Cursor<Document>) -> Result<Vec<Value>, AppError> {
    let docs: Vec<Document> = cursor.try_collect().await?;
    Ok(docs.into_iter().map(document_to_json).collect())
}

/// Reads an id stored either natively or as its hex string.
pub fn object_id_from(value: &Bson) -> Option<ObjectId> {
    match value {
        Bson::ObjectId(oid) => Some(*oid),
        Bson::String(s) => ObjectId::parse_str(s).ok(),
        _ => None,
    }
}
