//! Paper store service entry point

use paper_store::{
    auth::JwtService,
    config::AppConfig,
    db,
    handlers::health,
    middleware::AppState,
    routes,
    services::{AuthService, CatalogService, OrderService},
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("paper-store {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // .env files are a development convenience; production sets real
    // environment variables
    if let Ok(profile) = std::env::var("STORE_ENV") {
        dotenv::from_filename(format!(".env.{}", profile)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    health::set_start_time();

    // 1. Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. Initialize logging and metrics
    telemetry::init_telemetry(&config);
    let metrics_handle = telemetry::init_metrics()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Paper store starting...");

    // 3. Database pool and migrations
    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    tracing::info!("Database initialized");

    // 4. Build shared state
    let jwt_service = Arc::new(JwtService::from_config(&config)?);

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db: db_pool.clone(),
        jwt_service: jwt_service.clone(),
        auth_service: Arc::new(AuthService::new(
            db_pool.clone(),
            jwt_service.clone(),
            Arc::new(config.clone()),
        )),
        catalog_service: Arc::new(CatalogService::new(db_pool.clone())),
        order_service: Arc::new(OrderService::new(db_pool.clone())),
        metrics_handle,
    });

    // 5. Build routes
    let app = routes::create_router(app_state);

    // 6. Start the server
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. Graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handling
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
    tracing::warn!("Graceful shutdown timeout reached, forcing exit");
}

/// Print CLI help
fn print_help() {
    println!("paper-store {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: paper-store [options]");
    println!();
    println!("Options:");
    println!("  --version     Print version and exit");
    println!("  --help        Print this help and exit");
    println!();
    println!("Configuration:");
    println!("  All settings are environment variables with the STORE_ prefix,");
    println!("  e.g. STORE_DATABASE__URL, STORE_SECURITY__JWT_SECRET.");
    println!("  SECRET_KEY, ALGORITHM and ACCESS_TOKEN_EXPIRE_MINUTES are also");
    println!("  honored for compatibility with earlier deployments.");
}
