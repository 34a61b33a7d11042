use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use motortax::config::{Config, DatabaseConfig, LogFormat};
use motortax::middleware::{ErrorHandler, RequestId};
use motortax::taxes::TaxCalculator;
use motortax::vehicles::{
    InMemoryVehicleRepository, MySqlVehicleRepository, VehicleRepository, VehicleService,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting motor vehicle tax service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let repository: Arc<dyn VehicleRepository> = match &config.database {
        Some(database) => {
            let pool = database
                .create_pool()
                .await
                .context("Failed to create database pool")?;
            DatabaseConfig::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;

            tracing::info!(
                "Database pool initialized ({} connections)",
                database.pool_size
            );
            Arc::new(MySqlVehicleRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory vehicle store");
            Arc::new(InMemoryVehicleRepository::new())
        }
    };

    let calculator = TaxCalculator::new();
    let vehicle_service = Arc::new(VehicleService::new(
        repository,
        calculator,
        config.app.max_assessed_value,
    ));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(cors())
            .app_data(web::Data::new(calculator))
            .app_data(web::Data::new(vehicle_service.clone()))
            .configure(motortax::configure_app)
            .route("/", web::get().to(index))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// The catalog is edited from a browser client on another origin
fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(["GET", "POST", "PUT", "DELETE"])
        .allow_any_header()
        .expose_headers(["x-request-id"])
        .max_age(3600)
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Motor Vehicle Tax Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
