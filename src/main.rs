//! Callmon service entrypoint.
//!
//! Reads configuration from TOML file (~/.config/callmon/config.toml),
//! runs migrations, seeds the default admin and serves the REST API.

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use callmon::config::AppConfig;
use callmon::infrastructure::crypto::jwt::JwtConfig;
use callmon::infrastructure::database::migrator::Migrator;
use callmon::{create_api_router, default_config_path, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("CALLMON_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Callmon quality-monitoring service...");

    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        access_token_hours: app_cfg.security.access_token_hours,
        refresh_token_days: app_cfg.security.refresh_token_days,
        issuer: "callmon".to_string(),
    };
    info!(
        "JWT configured: {}h access tokens, {}d refresh tokens",
        jwt_config.access_token_hours, jwt_config.refresh_token_days
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    create_default_admin(&db, &app_cfg).await;

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(db.clone(), jwt_config);

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, api_router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    }

    info!("Callmon shutdown complete");
    Ok(())
}

/// Create the default admin account when no users exist yet.
async fn create_default_admin(db: &sea_orm::DatabaseConnection, app_cfg: &AppConfig) {
    use callmon::domain::{NewUser, UserRepositoryInterface, UserRole};
    use callmon::infrastructure::crypto::password::hash_password;
    use callmon::infrastructure::database::repositories::UserRepository;

    let repo = UserRepository::new(db.clone());

    let existing = match repo
        .list_users(callmon::domain::UserFilter::default())
        .await
    {
        Ok(result) => result.total,
        Err(e) => {
            error!("Failed to check for existing users: {}", e);
            return;
        }
    };

    if existing > 0 {
        return;
    }

    info!("Creating default admin user...");

    let password_hash = match hash_password(&app_cfg.admin.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    match repo
        .create_user(NewUser {
            username: app_cfg.admin.username.clone(),
            email: app_cfg.admin.email.clone(),
            password_hash,
            full_name: app_cfg.admin.full_name.clone(),
            role: UserRole::Admin,
        })
        .await
    {
        Ok(user) => {
            info!("Default admin created: {}", user.email);
            warn!("Please change the admin password immediately!");
        }
        Err(e) => {
            error!("Failed to create admin user: {}", e);
        }
    }
}
