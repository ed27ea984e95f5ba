use crate::middleware::auth::Claims;
use crate::models::Role;
use crate::services::UserDirectory;
use crate::utils::AppError;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Admits callers whose stored user record carries one of `allowed`.
///
/// Must sit inside [`AuthMiddleware`](super::AuthMiddleware) (wrapped
/// first, so it runs second) and needs `web::Data<dyn UserDirectory>`.
#[derive(Clone)]
pub struct RoleGate {
    allowed: Rc<[Role]>,
}

impl RoleGate {
    pub fn admin() -> Self {
        Self::any_of(&[Role::Admin])
    }

    pub fn instructor() -> Self {
        Self::any_of(&[Role::Instructor])
    }

    /// Admins or instructors.
    pub fn staff() -> Self {
        Self::any_of(&[Role::Admin, Role::Instructor])
    }

    pub fn any_of(roles: &[Role]) -> Self {
        Self {
            allowed: Rc::from(roles),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGateService {
            service: Rc::new(service),
            allowed: Rc::clone(&self.allowed),
        }))
    }
}

pub struct RoleGateService<S> {
    service: Rc<S>,
    allowed: Rc<[Role]>,
}

impl<S, B> Service<ServiceRequest> for RoleGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let allowed = Rc::clone(&self.allowed);

        Box::pin(async move {
            let email = req
                .extensions()
                .get::<Claims>()
                .and_then(|claims| claims.email.clone());
            let directory = req.app_data::<web::Data<dyn UserDirectory>>().cloned();

            match check_role(directory, email, &allowed).await {
                Ok(role) => {
                    log::debug!("🔓 {} {} allowed for {}", req.method(), req.path(), role);
                    service.call(req).await
                }
                Err(e) => {
                    log::warn!("🚫 {} {} denied: {}", req.method(), req.path(), e);
                    Err(e.into())
                }
            }
        })
    }
}

async fn check_role(
    directory: Option<web::Data<dyn UserDirectory>>,
    email: Option<String>,
    allowed: &[Role],
) -> Result<Role, AppError> {
    let directory =
        directory.ok_or_else(|| AppError::Config("UserDirectory not registered".to_string()))?;
    let email = email.ok_or(AppError::Unauthorized)?;

    let user = directory
        .find_by_email(&email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    match user.role() {
        Some(role) if allowed.contains(&role) => Ok(role),
        _ => Err(AppError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::AuthMiddleware;
    use crate::models::UserRecord;
    use crate::services::TokenService;
    use actix_web::{http::header::AUTHORIZATION, http::StatusCode, test, App, HttpResponse};
    use async_trait::async_trait;
    use mongodb::bson::{doc, Document};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;

    const SECRET: &str = "role-test-secret";

    /// Stores raw user documents and decodes them the way the MongoDB
    /// directory does.
    struct InMemoryDirectory {
        users: HashMap<String, Document>,
    }

    #[async_trait]
    impl UserDirectory for InMemoryDirectory {
        async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
            Ok(self.users.get(email).map(UserRecord::from_document))
        }
    }

    fn directory() -> web::Data<dyn UserDirectory> {
        let users = [
            doc! { "email": "root@example.com", "role": "admin" },
            doc! { "email": "teach@example.com", "role": "instructor" },
            doc! { "email": "learn@example.com", "role": "student" },
            doc! { "email": "odd@example.com", "role": "janitor" },
            doc! { "email": "numeric@example.com", "role": 1 },
            doc! { "email": "listed@example.com", "role": ["admin"] },
        ]
        .into_iter()
        .map(|user| (user.get_str("email").unwrap_or_default().to_string(), user))
        .collect();

        let directory: Arc<dyn UserDirectory> = Arc::new(InMemoryDirectory { users });
        web::Data::from(directory)
    }

    fn bearer(payload: serde_json::Value) -> String {
        format!(
            "Bearer {}",
            TokenService::new(SECRET, 24).issue(payload).unwrap()
        )
    }

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    macro_rules! gated_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(TokenService::new(SECRET, 24)))
                    .app_data(directory())
                    .route(
                        "/admin",
                        web::get()
                            .to(ok)
                            .wrap(RoleGate::admin())
                            .wrap(AuthMiddleware),
                    )
                    .route(
                        "/instructor",
                        web::get()
                            .to(ok)
                            .wrap(RoleGate::instructor())
                            .wrap(AuthMiddleware),
                    )
                    .route(
                        "/staff",
                        web::get()
                            .to(ok)
                            .wrap(RoleGate::staff())
                            .wrap(AuthMiddleware),
                    ),
            )
            .await
        };
    }

    macro_rules! status_for {
        ($app:expr, $path:expr, $payload:expr) => {{
            let req = test::TestRequest::get()
                .uri($path)
                .insert_header((AUTHORIZATION, bearer($payload)))
                .to_request();
            crate::middleware::call_service_or_error(&$app, req)
                .await
                .status()
        }};
    }

    #[actix_web::test]
    async fn test_admin_gate() {
        let app = gated_app!();
        assert_eq!(
            status_for!(app, "/admin", json!({ "email": "root@example.com" })),
            StatusCode::OK
        );
        assert_eq!(
            status_for!(app, "/admin", json!({ "email": "learn@example.com" })),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for!(app, "/admin", json!({ "email": "teach@example.com" })),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_instructor_gate() {
        let app = gated_app!();
        assert_eq!(
            status_for!(app, "/instructor", json!({ "email": "teach@example.com" })),
            StatusCode::OK
        );
        assert_eq!(
            status_for!(app, "/instructor", json!({ "email": "root@example.com" })),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_staff_gate_admits_admins_and_instructors() {
        let app = gated_app!();
        for email in ["root@example.com", "teach@example.com"] {
            assert_eq!(
                status_for!(app, "/staff", json!({ "email": email })),
                StatusCode::OK
            );
        }
        assert_eq!(
            status_for!(app, "/staff", json!({ "email": "learn@example.com" })),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_unknown_user_and_missing_email_are_denied() {
        let app = gated_app!();
        assert_eq!(
            status_for!(app, "/admin", json!({ "email": "ghost@example.com" })),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for!(app, "/admin", json!({ "name": "no email" })),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for!(app, "/staff", json!({ "email": "odd@example.com" })),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_non_string_role_is_denied_not_failed() {
        let app = gated_app!();
        for email in ["numeric@example.com", "listed@example.com"] {
            assert_eq!(
                status_for!(app, "/admin", json!({ "email": email })),
                StatusCode::UNAUTHORIZED
            );
            assert_eq!(
                status_for!(app, "/staff", json!({ "email": email })),
                StatusCode::UNAUTHORIZED
            );
        }
    }

    #[actix_web::test]
    async fn test_denial_body() {
        let app = gated_app!();
        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header((
                AUTHORIZATION,
                bearer(json!({ "email": "learn@example.com" })),
            ))
            .to_request();
        let resp = crate::middleware::call_service_or_error(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Unauthorized access");
    }

    #[actix_web::test]
    async fn test_gate_without_token_reports_missing_token() {
        let app = gated_app!();
        let req = test::TestRequest::get().uri("/admin").to_request();
        let resp = crate::middleware::call_service_or_error(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
