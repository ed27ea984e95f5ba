pub mod carts;
pub mod classes;
pub mod health;
pub mod payments;
pub mod swagger;
pub mod tokens;
pub mod users;

use crate::middleware::{AuthMiddleware, RoleGate};
use actix_web::web;

/// Every route of the service. Literal `/classes/...` paths are registered
/// before `/classes/{key}` so they are matched first.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check))
        .route("/api/set-token", web::post().to(tokens::set_token))
        // Users
        .service(
            web::resource("/users")
                .route(web::post().to(users::create_user))
                .route(web::get().to(users::list_users)),
        )
        .service(
            web::resource("/users/{id}")
                .route(web::get().to(users::get_user))
                .route(
                    web::delete()
                        .to(users::delete_user)
                        .wrap(RoleGate::admin())
                        .wrap(AuthMiddleware),
                ),
        )
        // Classes
        .service(
            web::resource("/classes")
                .route(
                    web::post()
                        .to(classes::create_class)
                        .wrap(RoleGate::staff())
                        .wrap(AuthMiddleware),
                )
                .route(web::get().to(classes::list_classes).wrap(AuthMiddleware)),
        )
        .route(
            "/classes/popilarity-10",
            web::get().to(classes::popular_classes),
        )
        .route(
            "/classes/popilar-instructor",
            web::get().to(classes::popular_instructors),
        )
        .route(
            "/classes/{id}/change",
            web::patch().to(classes::change_status),
        )
        .route("/classes/{id}/update", web::put().to(classes::update_class))
        .service(
            web::resource("/classes/{key}")
                .route(web::get().to(classes::get_class_by_key))
                .route(web::delete().to(classes::delete_class)),
        )
        .route("/classes-manage", web::get().to(classes::manage_classes))
        // Carts
        .service(
            web::resource("/carts")
                .route(web::post().to(carts::create_cart_item))
                .route(web::get().to(carts::list_cart_items)),
        )
        .route(
            "/carts/{email}/classes",
            web::get().to(carts::classes_in_cart),
        )
        .service(
            web::resource("/carts/{id}")
                .route(web::get().to(carts::get_cart_item))
                .route(web::delete().to(carts::delete_cart_item)),
        )
        // Payments
        .route("/payments", web::post().to(payments::create_payment));
}
