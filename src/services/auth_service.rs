//! Authentication service: registration and login

use crate::{
    auth::jwt::JwtService,
    auth::password::PasswordHasher,
    config::AppConfig,
    error::AppError,
    models::auth::{LoginRequest, RegisterRequest, TokenResponse},
    models::user::{Role, User, UserResponse},
    repository::UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

pub struct AuthService {
    db: PgPool,
    jwt_service: Arc<JwtService>,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_service: Arc<JwtService>, config: Arc<AppConfig>) -> Self {
        Self {
            db,
            jwt_service,
            config,
        }
    }

    /// Register a new account. Duplicate usernames are a client error;
    /// new accounts always start with the `user` role.
    pub async fn register(&self, req: RegisterRequest) -> Result<UserResponse, AppError> {
        req.validate()?;
        PasswordHasher::validate_password_policy(&req.password, &self.config)?;

        let user_repo = UserRepository::new(self.db.clone());

        if user_repo.find_by_username(&req.username).await?.is_some() {
            return Err(AppError::BadRequest("Username already registered".to_string()));
        }

        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(&req.password)?;

        let user = user_repo.create(&req.username, &password_hash, Role::User).await?;

        tracing::info!(username = %user.username, "User registered");

        Ok(UserResponse::from(user))
    }

    /// Verify credentials and issue a token. Unknown username and wrong
    /// password are indistinguishable to the client.
    pub async fn login(&self, req: LoginRequest) -> Result<TokenResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user: User = user_repo
            .find_by_username(&req.username)
            .await?
            .ok_or_else(|| AppError::Authentication("invalid credentials".to_string()))?;

        let hasher = PasswordHasher::new();
        if !hasher.verify(&req.password, &user.password_hash) {
            tracing::debug!(username = %req.username, "Password verification failed");
            return Err(AppError::Authentication("invalid credentials".to_string()));
        }

        // The role is embedded at login time and trusted for the token's
        // lifetime; a role change in storage takes effect at the next login.
        let token = self.jwt_service.issue(&user.username, user.role)?;

        tracing::info!(username = %user.username, "User logged in");

        Ok(TokenResponse {
            token,
            token_type: "bearer".to_string(),
            expires_in: self.jwt_service.ttl_secs(),
        })
    }
}
