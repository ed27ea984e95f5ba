use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// No `Authorization` header on a protected route
    MissingToken,
    /// Header present but the bearer token did not verify
    InvalidToken(String),
    /// Authenticated caller lacks the role a route requires
    Unauthorized,
    InvalidId(String),
    InvalidRequest(String),
    NotFound(String),
    DatabaseError(String),
    TokenError(String),
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingToken => write!(f, "Invalid authorization"),
            AppError::InvalidToken(msg) => write!(f, "Forbidden access: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized access"),
            AppError::InvalidId(id) => write!(f, "Invalid id: {}", id),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::TokenError(msg) => write!(f, "Token error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Message sent to the client. Internal details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::MissingToken => "Invalid authorization".to_string(),
            AppError::InvalidToken(_) => "Forbidden access".to_string(),
            AppError::Unauthorized => "Unauthorized access".to_string(),
            AppError::InvalidId(id) => format!("Invalid id: {}", id),
            AppError::InvalidRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::DatabaseError(_) => "Database error".to_string(),
            AppError::TokenError(_) => "Failed to issue token".to_string(),
            AppError::Config(_) => "Service misconfigured".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingToken | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken(_) => StatusCode::FORBIDDEN,
            AppError::InvalidId(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::TokenError(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("❌ {}", self);
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.public_message()
        }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        AppError::InvalidRequest(format!("Body is not a valid document: {}", e))
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(e: mongodb::bson::de::Error) -> Self {
        AppError::DatabaseError(format!("Failed to decode document: {}", e))
    }
}
