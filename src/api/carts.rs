use crate::database::MongoDB;
use crate::models::{DeleteAck, InsertAck};
use crate::services::cart_service;
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use serde_json::Value;

#[utoipa::path(
    post,
    path = "/carts",
    tag = "Carts",
    responses((status = 200, description = "Cart item stored", body = InsertAck))
)]
pub async fn create_cart_item(
    db: web::Data<MongoDB>,
    item: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("🛒 POST /carts");
    let ack = cart_service::create_cart_item(&db, item.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/carts",
    tag = "Carts",
    responses((status = 200, description = "Every cart item"))
)]
pub async fn list_cart_items(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /carts");
    let items = cart_service::list_cart_items(&db).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    get,
    path = "/carts/{id}",
    tag = "Carts",
    params(("id" = String, Path, description = "Cart item ObjectId")),
    responses(
        (status = 200, description = "The cart item"),
        (status = 404, description = "No such cart item")
    )
)]
pub async fn get_cart_item(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔍 GET /carts/{}", id);
    let item = cart_service::get_cart_item(&db, &id).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[utoipa::path(
    get,
    path = "/carts/{email}/classes",
    tag = "Carts",
    params(("email" = String, Path, description = "Cart owner's email")),
    responses((status = 200, description = "Classes referenced by the user's cart items"))
)]
pub async fn classes_in_cart(
    db: web::Data<MongoDB>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🛒 GET /carts/{}/classes", email);
    let classes = cart_service::classes_in_cart(&db, &email).await?;
    log::info!("✅ {} classes in cart", classes.len());
    Ok(HttpResponse::Ok().json(classes))
}

#[utoipa::path(
    delete,
    path = "/carts/{id}",
    tag = "Carts",
    params(("id" = String, Path, description = "Cart item ObjectId")),
    responses((status = 200, description = "Delete acknowledgment", body = DeleteAck))
)]
pub async fn delete_cart_item(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /carts/{}", id);
    let ack = cart_service::delete_cart_item(&db, &id).await?;
    Ok(HttpResponse::Ok().json(ack))
}
