use crate::database::{MongoDB, PAYMENTS};
use crate::models::InsertAck;
use crate::services::crud;
use crate::utils::AppError;
use serde_json::Value;

pub async fn create_payment(db: &MongoDB, payment: Value) -> Result<InsertAck, AppError> {
    crud::insert(db, PAYMENTS, payment).await
}
