use crate::database::{MongoDB, USERS};
use crate::models::{DeleteAck, InsertAck, UserRecord};
use crate::services::crud;
use crate::utils::AppError;
use async_trait::async_trait;
use mongodb::bson::doc;
use serde_json::Value;

/// Looks users up by their natural key. The role gates depend on this
/// rather than on `MongoDB` directly.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;
}

#[async_trait]
impl UserDirectory for MongoDB {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let user = self
            .documents(USERS)
            .find_one(doc! { "email": email })
            .await?;
        Ok(user.as_ref().map(UserRecord::from_document))
    }
}

pub async fn create_user(db: &MongoDB, user: Value) -> Result<InsertAck, AppError> {
    crud::insert(db, USERS, user).await
}

pub async fn list_users(db: &MongoDB) -> Result<Vec<Value>, AppError> {
    crud::find_all(db, USERS).await
}

pub async fn get_user(db: &MongoDB, id: &str) -> Result<Value, AppError> {
    crud::find_by_id(db, USERS, id).await
}

pub async fn delete_user(db: &MongoDB, id: &str) -> Result<DeleteAck, AppError> {
    crud::delete_by_id(db, USERS, id).await
}
