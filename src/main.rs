//!
//! Admin console for managing user accounts and roles.
//! Reads configuration from TOML file (~/.config/admin-console/config.toml).

use std::sync::Arc;
use std::time::Duration;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use admin_console::application::identity::{Seeder, UserService};
use admin_console::config::AppConfig;
use admin_console::infrastructure::database::migrator::Migrator;
use admin_console::infrastructure::database::repositories::{RoleRepository, UserRepository};
use admin_console::interfaces::http::modules::users::UserPagesState;
use admin_console::shared::shutdown::ShutdownSignal;
use admin_console::{create_router, default_config_path, init_database, ConsoleState, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("ADMIN_CONSOLE_CONFIG")
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
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting admin console...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

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

    // ── Repositories & services ────────────────────────────────
    let users = Arc::new(UserRepository::new(db.clone()));
    let roles = Arc::new(RoleRepository::new(db.clone()));

    // Seed baseline roles and the first admin account
    let seeder = Seeder::new(users.clone(), roles.clone(), app_cfg.admin.clone());
    if let Err(e) = seeder.run().await {
        error!("Startup seeding failed: {}", e);
        return Err(e.into());
    }

    let service = Arc::new(UserService::new(
        users,
        roles,
        app_cfg.paging.page_size,
    ));

    // ── HTTP server ────────────────────────────────────────────
    let router = create_router(ConsoleState {
        user_pages: UserPagesState {
            service,
            paging: app_cfg.paging.clone(),
        },
    });

    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_os_signals();

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Admin console listening on http://{}", addr);

    let signal = shutdown.clone();
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        signal.wait().await;
        info!("HTTP server received shutdown signal");
    });

    // Bound the drain: once the signal fires, in-flight requests get
    // `shutdown_timeout` seconds before the process stops waiting.
    let drain = shutdown.clone();
    let drain_timeout = Duration::from_secs(app_cfg.server.shutdown_timeout);
    tokio::select! {
        result = server => result?,
        _ = async {
            drain.wait().await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            warn!(
                "Graceful shutdown timed out after {}s, dropping in-flight requests",
                app_cfg.server.shutdown_timeout
            );
        }
    }

    // Perform final cleanup
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Admin console shutdown complete");
    Ok(())
}
