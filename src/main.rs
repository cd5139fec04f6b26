//! Delivery fee service entry point
//!
//! Reads configuration from TOML file, runs database migrations, starts the
//! periodic weather ingestion task and serves the REST API until SIGTERM or
//! Ctrl+C.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use delivery_fees::application::services::{
    start_weather_ingestion_task, DeliveryFeeCalculator, FeeResolver, WeatherIngestionService,
};
use delivery_fees::config::{default_config_path, AppConfig};
use delivery_fees::domain::RepositoryProvider;
use delivery_fees::infrastructure::database::migrator::Migrator;
use delivery_fees::infrastructure::HttpWeatherFeed;
use delivery_fees::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use delivery_fees::{create_api_router, init_database, DatabaseConfig, SeaOrmRepositoryProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("DELIVERY_FEE_CONFIG")
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
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting delivery fee service...");

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

    // ── Services ───────────────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
    let resolver = Arc::new(FeeResolver::new(repos.clone()));
    let calculator = Arc::new(DeliveryFeeCalculator::new(repos.clone(), resolver.clone()));

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // ── Weather ingestion ──────────────────────────────────────
    let feed = Arc::new(HttpWeatherFeed::new(app_cfg.weather.api_url.clone()));
    let ingestion = Arc::new(WeatherIngestionService::new(feed, repos.clone()));
    start_weather_ingestion_task(
        ingestion,
        shutdown.clone(),
        app_cfg.weather.fetch_interval_secs,
    );

    // ── HTTP server ────────────────────────────────────────────
    let router = create_api_router(repos, resolver, calculator);
    let address = app_cfg.server.address();
    info!("REST API listening on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    let server_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { server_shutdown.wait().await })
        .await?;

    info!("Delivery fee service stopped");
    Ok(())
}
