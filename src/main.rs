use std::sync::Arc;

use borne_api::api::{self, AppState};
use borne_api::config::{Config, StoreBackend};
use borne_api::repositories::{
    AccountStore, DeviceStore, InMemoryStore, PgDeviceRepository, PgUserRepository,
};
use borne_api::services::{AccountService, DeviceRegistry};
use borne_api::{db, seed};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cfg = Config::discover()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("Starting borne-api");

    let (account_store, device_store): (Arc<dyn AccountStore>, Arc<dyn DeviceStore>) =
        match cfg.store.backend {
            StoreBackend::Memory => {
                info!("Using in-memory store");
                let store = Arc::new(InMemoryStore::new());
                (
                    store.clone() as Arc<dyn AccountStore>,
                    store as Arc<dyn DeviceStore>,
                )
            }
            StoreBackend::Postgres => {
                let pool = db::connect(&cfg.database).await?;
                db::ensure_schema(&pool).await?;
                info!(
                    host = %cfg.database.host,
                    database = %cfg.database.name,
                    max_connections = cfg.database.max_connections,
                    "Connected to database"
                );
                (
                    Arc::new(PgUserRepository::new(pool.clone())) as Arc<dyn AccountStore>,
                    Arc::new(PgDeviceRepository::new(pool)) as Arc<dyn DeviceStore>,
                )
            }
        };

    let accounts = AccountService::new(account_store.clone(), cfg.auth.secret_scheme);
    let devices = DeviceRegistry::new(device_store.clone(), cfg.alerts.clone());

    let seeded = seed::apply(&cfg.seed, &accounts, &*account_store, &*device_store).await?;
    if seeded.users_created > 0 || seeded.devices_created > 0 {
        info!(
            users = seeded.users_created,
            devices = seeded.devices_created,
            "Seed data loaded"
        );
    }

    let router = api::create_router(AppState { accounts, devices });
    let addr = cfg.api_bind_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    info!("API server listening on {}", addr);

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "API server error");
    }

    info!("Application shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
