//! Database access layer

pub mod order_repo;
pub mod product_repo;
pub mod user_repo;

pub use order_repo::OrderRepository;
pub use product_repo::ProductRepository;
pub use user_repo::UserRepository;
