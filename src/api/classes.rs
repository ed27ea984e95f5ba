use crate::database::MongoDB;
use crate::models::{ClassStatusChange, DeleteAck, InsertAck, UpdateAck};
use crate::services::class_service;
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use serde_json::Value;

/// Admins and instructors only.
#[utoipa::path(
    post,
    path = "/classes",
    tag = "Classes",
    responses(
        (status = 200, description = "Class stored", body = InsertAck),
        (status = 401, description = "Missing token or caller is neither admin nor instructor"),
        (status = 403, description = "Invalid or expired token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_class(
    db: web::Data<MongoDB>,
    class: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /classes");
    let ack = class_service::create_class(&db, class.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/classes",
    tag = "Classes",
    responses(
        (status = 200, description = "Every class document"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid or expired token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_classes(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /classes");
    let classes = class_service::list_classes(&db).await?;
    Ok(HttpResponse::Ok().json(classes))
}

#[utoipa::path(
    get,
    path = "/classes-manage",
    tag = "Classes",
    responses((status = 200, description = "Every class document; unauthenticated listing for the admin dashboard"))
)]
pub async fn manage_classes(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    log::info!("🛠️  GET /classes-manage");
    let classes = class_service::list_classes(&db).await?;
    Ok(HttpResponse::Ok().json(classes))
}

#[utoipa::path(
    get,
    path = "/classes/popilarity-10",
    tag = "Classes",
    responses((status = 200, description = "Ten most enrolled classes, highest first"))
)]
pub async fn popular_classes(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    log::info!("🏆 GET /classes/popilarity-10");
    let classes = class_service::popular_classes(&db).await?;
    Ok(HttpResponse::Ok().json(classes))
}

#[utoipa::path(
    get,
    path = "/classes/popilar-instructor",
    tag = "Classes",
    responses((status = 200, description = "Top five instructors by total enrollment: [{instructor, totalEnrolled}]"))
)]
pub async fn popular_instructors(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    log::info!("🏆 GET /classes/popilar-instructor");
    let leaderboard = class_service::popular_instructors(&db).await?;
    Ok(HttpResponse::Ok().json(leaderboard))
}

/// An ObjectId key returns that class; any other key is read as a status
/// and returns every class with it.
#[utoipa::path(
    get,
    path = "/classes/{key}",
    tag = "Classes",
    params(("key" = String, Path, description = "Class ObjectId, or a status such as `approved`")),
    responses(
        (status = 200, description = "One class for an id, an array of classes for a status"),
        (status = 404, description = "No class with that id")
    )
)]
pub async fn get_class_by_key(
    db: web::Data<MongoDB>,
    key: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔍 GET /classes/{}", key);
    let found = class_service::find_by_key(&db, &key).await?;
    Ok(HttpResponse::Ok().json(found))
}

#[utoipa::path(
    patch,
    path = "/classes/{id}/change",
    tag = "Classes",
    params(("id" = String, Path, description = "Class ObjectId")),
    request_body = ClassStatusChange,
    responses(
        (status = 200, description = "Update acknowledgment (upserts)", body = UpdateAck),
        (status = 400, description = "Malformed id or empty change")
    )
)]
pub async fn change_status(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    change: web::Json<ClassStatusChange>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "🔧 PATCH /classes/{}/change - status: {}",
        id,
        change.status.as_deref().unwrap_or("-")
    );
    let ack = class_service::change_status(&db, &id, &change).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    put,
    path = "/classes/{id}/update",
    tag = "Classes",
    params(("id" = String, Path, description = "Class ObjectId")),
    responses(
        (status = 200, description = "Update acknowledgment (upserts)", body = UpdateAck),
        (status = 400, description = "Malformed id or body")
    )
)]
pub async fn update_class(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    class: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PUT /classes/{}/update", id);
    let ack = class_service::update_class(&db, &id, class.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    delete,
    path = "/classes/{key}",
    tag = "Classes",
    params(("key" = String, Path, description = "Class ObjectId")),
    responses((status = 200, description = "Delete acknowledgment", body = DeleteAck))
)]
pub async fn delete_class(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /classes/{}", id);
    let ack = class_service::delete_class(&db, &id).await?;
    Ok(HttpResponse::Ok().json(ack))
}
