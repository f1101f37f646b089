//! JWT issuance and validation
//!
//! Tokens are stateless: subject and role are fixed at issuance and trusted
//! until expiry. There is no server-side revocation; a role change only takes
//! effect at the next login. The signing secret and algorithm are process-wide
//! and never rotate mid-process.

use crate::{config::AppConfig, error::AppError, models::user::Role};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Token claims. This is the wire payload: `sub` (username), `role`, and
/// `exp` (Unix seconds).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Role embedded at login time
    pub role: Role,

    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}

/// Token decode failure. Expiry is distinguished from every other failure so
/// the caller can surface a distinct message; everything else collapses into
/// `Invalid` and the underlying detail is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token")]
    Invalid,
}

/// JWT codec
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    token_ttl: Duration,
}

impl JwtService {
    /// Create the codec from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // HMAC needs enough key material
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let algorithm = match config.security.jwt_algorithm.as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => {
                return Err(AppError::Config(format!(
                    "Unsupported JWT algorithm: {}",
                    other
                )))
            }
        };

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            token_ttl: Duration::minutes(config.security.access_token_exp_mins as i64),
        })
    }

    /// Issue a token with the configured TTL
    pub fn issue(&self, subject: &str, role: Role) -> Result<String, AppError> {
        self.issue_with_ttl(subject, role, self.token_ttl)
    }

    /// Issue a token with an explicit TTL. The TTL must be positive.
    pub fn issue_with_ttl(
        &self,
        subject: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<String, AppError> {
        if ttl <= Duration::zero() {
            return Err(AppError::Internal("token ttl must be positive".to_string()));
        }

        let claims = Claims {
            sub: subject.to_string(),
            role,
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// Signature mismatch, malformed structure, or missing claims all map to
    /// `TokenError::Invalid`; only an elapsed `exp` maps to `Expired`.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Exact expiry, no grace window
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token rejected: expired");
                    Err(TokenError::Expired)
                }
                kind => {
                    // Detail stays server-side
                    tracing::debug!("Token rejected: {:?}", kind);
                    Err(TokenError::Invalid)
                }
            },
        }
    }

    /// Seconds until a freshly issued token expires
    pub fn ttl_secs(&self) -> u64 {
        self.token_ttl.num_seconds().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn test_config() -> AppConfig {
        AppConfig {
            server: crate::config::ServerConfig {
                addr: "127.0.0.1:3000".to_string(),
                graceful_shutdown_timeout_secs: 30,
            },
            database: crate::config::DatabaseConfig {
                url: Secret::new("postgresql://localhost/test".to_string()),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
            },
            logging: crate::config::LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: crate::config::SecurityConfig {
                jwt_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
                jwt_algorithm: "HS256".to_string(),
                access_token_exp_mins: 15,
                password_min_length: 8,
            },
        }
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let service = JwtService::from_config(&test_config()).unwrap();

        let token = service.issue("alice", Role::User).unwrap();
        let claims = service.decode(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, Role::User);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_decode_expired_token() {
        let service = JwtService::from_config(&test_config()).unwrap();

        // Encode claims with an exp in the past using the same secret
        let claims = Claims {
            sub: "alice".to_string(),
            role: Role::User,
            exp: Utc::now().timestamp() - 120,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test_secret_key_32_characters_long!".as_bytes()),
        )
        .unwrap();

        assert_eq!(service.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_decode_tampered_signature() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let token = service.issue("alice", Role::Admin).unwrap();

        // Flip a byte in the signature segment
        let mut parts: Vec<String> = token.split('.').map(|s| s.to_string()).collect();
        assert_eq!(parts.len(), 3);
        let sig = parts[2].clone();
        let flipped = if sig.ends_with('A') {
            format!("{}B", &sig[..sig.len() - 1])
        } else {
            format!("{}A", &sig[..sig.len() - 1])
        };
        parts[2] = flipped;
        let tampered = parts.join(".");

        assert_eq!(service.decode(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_decode_wrong_secret() {
        let service = JwtService::from_config(&test_config()).unwrap();

        let claims = Claims {
            sub: "alice".to_string(),
            role: Role::Superadmin,
            exp: Utc::now().timestamp() + 300,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("another_secret_key_32_characters!!!!".as_bytes()),
        )
        .unwrap();

        assert_eq!(service.decode(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_decode_missing_claims() {
        let service = JwtService::from_config(&test_config()).unwrap();

        // A payload without `role` must not decode
        #[derive(Serialize)]
        struct PartialClaims {
            sub: String,
            exp: i64,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &PartialClaims {
                sub: "alice".to_string(),
                exp: Utc::now().timestamp() + 300,
            },
            &EncodingKey::from_secret("test_secret_key_32_characters_long!".as_bytes()),
        )
        .unwrap();

        assert_eq!(service.decode(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_decode_garbage() {
        let service = JwtService::from_config(&test_config()).unwrap();
        assert_eq!(service.decode("not-a-token"), Err(TokenError::Invalid));
        assert_eq!(service.decode(""), Err(TokenError::Invalid));
    }

    #[test]
    fn test_issue_rejects_non_positive_ttl() {
        let service = JwtService::from_config(&test_config()).unwrap();
        assert!(service.issue_with_ttl("alice", Role::User, Duration::zero()).is_err());
        assert!(service.issue_with_ttl("alice", Role::User, Duration::seconds(-5)).is_err());
    }

    #[test]
    fn test_role_survives_round_trip() {
        let service = JwtService::from_config(&test_config()).unwrap();

        for role in [Role::User, Role::Admin, Role::Superadmin] {
            let token = service.issue("bob", role).unwrap();
            assert_eq!(service.decode(&token).unwrap().role, role);
        }
    }
}
