use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Enrollment Service API",
        version = "1.0.0",
        description = "REST API for the course-enrollment platform: users, classes, carts and payments.\n\n**Authentication:** `POST /api/set-token` issues a bearer token. Deleting users requires an admin; creating classes requires an admin or instructor."
    ),
    paths(
        // Health
        crate::api::health::index,
        crate::api::health::health_check,

        // Auth
        crate::api::tokens::set_token,

        // Users
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::delete_user,

        // Classes
        crate::api::classes::create_class,
        crate::api::classes::list_classes,
        crate::api::classes::manage_classes,
        crate::api::classes::popular_classes,
        crate::api::classes::popular_instructors,
        crate::api::classes::get_class_by_key,
        crate::api::classes::change_status,
        crate::api::classes::update_class,
        crate::api::classes::delete_class,

        // Carts
        crate::api::carts::create_cart_item,
        crate::api::carts::list_cart_items,
        crate::api::carts::get_cart_item,
        crate::api::carts::classes_in_cart,
        crate::api::carts::delete_cart_item,

        // Payments
        crate::api::payments::create_payment,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::services::auth_service::TokenResponse,
            crate::models::ClassStatusChange,
            crate::models::InsertAck,
            crate::models::UpdateAck,
            crate::models::DeleteAck,
        )
    ),
    tags(
        (name = "Health", description = "Liveness check."),
        (name = "Auth", description = "Token issuance."),
        (name = "Users", description = "User documents. Deletion is admin only."),
        (name = "Classes", description = "Class documents, status moderation and enrollment leaderboards."),
        (name = "Carts", description = "Cart items and the classes they reference."),
        (name = "Payments", description = "Payment records."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /api/set-token"))
                        .build(),
                ),
            );
        }
    }
}
