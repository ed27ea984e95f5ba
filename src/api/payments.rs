use crate::database::MongoDB;
use crate::models::InsertAck;
use crate::services::payment_service;
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use serde_json::Value;

#[utoipa::path(
    post,
    path = "/payments",
    tag = "Payments",
    responses((status = 200, description = "Payment stored", body = InsertAck))
)]
pub async fn create_payment(
    db: web::Data<MongoDB>,
    payment: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("💳 POST /payments");
    let ack = payment_service::create_payment(&db, payment.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}
