pub mod auth_service;
pub mod cart_service;
pub mod class_service;
pub mod crud;
pub mod payment_service;
pub mod user_service;

pub use auth_service::{Claims, TokenService};
pub use user_service::UserDirectory;
