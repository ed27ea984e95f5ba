use crate::database::MongoDB;
use crate::models::{DeleteAck, InsertAck};
use crate::services::user_service;
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use serde_json::Value;

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses((status = 200, description = "User stored", body = InsertAck))
)]
pub async fn create_user(
    db: web::Data<MongoDB>,
    user: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users");
    let ack = user_service::create_user(&db, user.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses((status = 200, description = "Every user document"))
)]
pub async fn list_users(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users");
    let users = user_service::list_users(&db).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "The user document"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such user")
    )
)]
pub async fn get_user(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔍 GET /users/{}", id);
    let user = user_service::get_user(&db, &id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Admin only.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "Delete acknowledgment", body = DeleteAck),
        (status = 401, description = "Missing token or caller is not an admin"),
        (status = 403, description = "Invalid or expired token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /users/{}", id);
    let ack = user_service::delete_user(&db, &id).await?;
    Ok(HttpResponse::Ok().json(ack))
}
