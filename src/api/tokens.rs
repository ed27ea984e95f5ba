use crate::services::auth_service::{TokenResponse, TokenService};
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use serde_json::Value;

/// Signs the posted object as the claims payload. The `email` field is
/// what the role gates later use to find the caller.
#[utoipa::path(
    post,
    path = "/api/set-token",
    tag = "Auth",
    responses(
        (status = 200, description = "Signed token, valid for the configured TTL", body = TokenResponse),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn set_token(
    tokens: web::Data<TokenService>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let email = payload
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or("N/A")
        .to_string();
    log::info!("🔑 POST /api/set-token - email: {}", email);

    let token = tokens.issue(payload.into_inner())?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
