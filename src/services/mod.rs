//! Business logic services

pub mod auth_service;
pub mod catalog_service;
pub mod order_service;

pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use order_service::OrderService;
