use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use lunchmate::config::{LoggingSettings, Settings};
use lunchmate::core::MatchEngine;
use lunchmate::routes::{self, AppState};
use lunchmate::services::{InMemoryLedger, InMemoryMembership, RestaurantCatalog};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    init_logging(&settings.logging);

    info!("Starting LunchMate matching service...");

    let catalog = if settings.restaurants.is_empty() {
        RestaurantCatalog::builtin()
    } else {
        RestaurantCatalog::new(settings.restaurants.clone()).map_err(|e| {
            error!("Invalid restaurant catalog: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
        })?
    };
    let catalog = Arc::new(catalog);

    info!("Restaurant catalog loaded ({} entries)", catalog.len());

    let rules = settings.matching.rules();
    let ledger = Arc::new(InMemoryLedger::new());
    let engine = Arc::new(MatchEngine::new(
        rules,
        catalog.clone(),
        Arc::new(InMemoryMembership::new()),
        ledger.clone(),
    ));

    info!("Match engine initialized with rules: {:?}", rules);

    let app_state = AppState {
        engine,
        catalog,
        ledger,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
