//! Shared test helpers

use metrics_exporter_prometheus::PrometheusHandle;
use paper_store::auth::JwtService;
use paper_store::config::{
    AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig,
};
use secrecy::Secret;
use std::sync::{Arc, OnceLock};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

/// Test configuration with no external dependencies
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
        },
        database: DatabaseConfig {
            url: Secret::new("postgresql://localhost/paper_store_test".to_string()),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new(TEST_SECRET.to_string()),
            jwt_algorithm: "HS256".to_string(),
            access_token_exp_mins: 5,
            password_min_length: 8,
        },
    }
}

/// JWT service backed by the test secret
pub fn create_jwt_service() -> Arc<JwtService> {
    Arc::new(JwtService::from_config(&create_test_config()).expect("Failed to create JWT service"))
}

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Prometheus recorder handle. The recorder is global to the process, so it
/// is installed once per test binary and shared between tests.
#[allow(dead_code)]
pub fn metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            paper_store::telemetry::init_metrics()
                .expect("Failed to install metrics recorder")
        })
        .clone()
}
