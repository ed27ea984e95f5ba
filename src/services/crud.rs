//! The single-call operations every collection route is built from.

use crate::database::{collect_json, document_to_json, json_to_document, parse_object_id, MongoDB};
use crate::models::{DeleteAck, InsertAck, UpdateAck};
use crate::utils::AppError;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde_json::Value;

pub async fn insert(db: &MongoDB, collection: &str, body: Value) -> Result<InsertAck, AppError> {
    let document = json_to_document(body)?;
    let result = db.documents(collection).insert_one(document).await?;
    Ok(InsertAck::from(result))
}

pub async fn find_all(db: &MongoDB, collection: &str) -> Result<Vec<Value>, AppError> {
    find_where(db, collection, doc! {}).await
}

pub async fn find_where(
    db: &MongoDB,
    collection: &str,
    filter: Document,
) -> Result<Vec<Value>, AppError> {
    let cursor = db.documents(collection).find(filter).await?;
    collect_json(cursor).await
}

pub async fn find_by_id(db: &MongoDB, collection: &str, id: &str) -> Result<Value, AppError> {
    find_by_object_id(db, collection, parse_object_id(id)?).await
}

pub async fn find_by_object_id(
    db: &MongoDB,
    collection: &str,
    id: ObjectId,
) -> Result<Value, AppError> {
    db.documents(collection)
        .find_one(doc! { "_id": id })
        .await?
        .map(document_to_json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No document in {} with id {}",
                collection,
                id.to_hex()
            ))
        })
}

/// `$set` on one document, creating it when no document has that id.
pub async fn upsert_fields(
    db: &MongoDB,
    collection: &str,
    id: &str,
    set: Document,
) -> Result<UpdateAck, AppError> {
    let object_id = parse_object_id(id)?;
    let result = db
        .documents(collection)
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .upsert(true)
        .await?;
    Ok(UpdateAck::from(result))
}

pub async fn delete_by_id(db: &MongoDB, collection: &str, id: &str) -> Result<DeleteAck, AppError> {
    let object_id = parse_object_id(id)?;
    let result = db
        .documents(collection)
        .delete_one(doc! { "_id": object_id })
        .await?;
    Ok(DeleteAck::from(result))
}
