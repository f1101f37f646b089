//! Authentication and authorization module

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService, TokenError};
pub use middleware::{
    authorize_roles, ensure_owner_or_privileged, extract_token, jwt_auth_middleware, AuthContext,
};
pub use password::PasswordHasher;
