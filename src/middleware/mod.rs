pub mod auth;
pub mod roles;

pub use auth::AuthMiddleware;
pub use roles::RoleGate;

/// Like `actix_web::test::call_service`, but a middleware rejection (`Err`)
/// is rendered into its error response instead of panicking.
#[cfg(test)]
pub(crate) async fn call_service_or_error<S, R, B>(
    app: &S,
    req: R,
) -> actix_web::dev::ServiceResponse
where
    S: actix_web::dev::Service<
        R,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody + 'static,
{
    match actix_web::test::try_call_service(app, req).await {
        Ok(resp) => resp.map_into_boxed_body(),
        Err(err) => actix_web::dev::ServiceResponse::new(
            actix_web::test::TestRequest::default().to_http_request(),
            err.error_response(),
        ),
    }
}
