use crate::database::{object_id_from, MongoDB, CARTS, CLASSES};
use crate::models::{DeleteAck, InsertAck};
use crate::services::crud;
use crate::utils::AppError;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde_json::Value;

pub async fn create_cart_item(db: &MongoDB, item: Value) -> Result<InsertAck, AppError> {
    crud::insert(db, CARTS, item).await
}

pub async fn list_cart_items(db: &MongoDB) -> Result<Vec<Value>, AppError> {
    crud::find_all(db, CARTS).await
}

pub async fn get_cart_item(db: &MongoDB, id: &str) -> Result<Value, AppError> {
    crud::find_by_id(db, CARTS, id).await
}

pub async fn delete_cart_item(db: &MongoDB, id: &str) -> Result<DeleteAck, AppError> {
    crud::delete_by_id(db, CARTS, id).await
}

/// Class ids referenced by cart items. Items without a usable `classId`
/// are skipped.
pub fn class_ids(items: &[Document]) -> Vec<ObjectId> {
    items
        .iter()
        .filter_map(|item| item.get("classId"))
        .filter_map(object_id_from)
        .collect()
}

/// The classes sitting in one user's cart.
pub async fn classes_in_cart(db: &MongoDB, email: &str) -> Result<Vec<Value>, AppError> {
    let items: Vec<Document> = db
        .documents(CARTS)
        .find(doc! { "userMail": email })
        .projection(doc! { "classId": 1 })
        .await?
        .try_collect()
        .await?;

    let ids = class_ids(&items);
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    crud::find_where(db, CLASSES, doc! { "_id": { "$in": ids } }).await
}
