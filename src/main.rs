mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use core::DuplicateMatcher;
use models::{DetectionThresholds, ScoringWeights};
use routes::duplicates::AppState;
use services::RecordStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap_or_default())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting BSL duplicate-check service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize record store client
    let records = Arc::new(
        RecordStore::new(
            settings.backend.endpoint,
            settings.backend.api_key,
            settings.backend.table,
            Duration::from_secs(settings.records.request_timeout_secs),
            Duration::from_secs(settings.records.snapshot_ttl_secs),
        )
        .unwrap_or_else(|e| {
            error!("Failed to create record store client: {}", e);
            panic!("Record store error: {}", e);
        }),
    );

    info!("Record store client initialized");

    // Initial fetch of the full record set; duplicate checks return 503
    // until this succeeds, so a failure here is logged, not fatal
    match records.refresh().await {
        Ok(count) => info!("Initial record fetch complete ({} records)", count),
        Err(e) => warn!("Initial record fetch failed, will retry in background: {}", e),
    }

    // Background refresh loop keeps the snapshot fresh
    let refresh_interval = Duration::from_secs(settings.records.refresh_interval_secs);
    let refresher = Arc::clone(&records);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(refresh_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        ticker.tick().await; // first tick completes immediately
        loop {
            ticker.tick().await;
            if let Err(e) = refresher.refresh().await {
                warn!("Background record refresh failed: {}", e);
            }
        }
    });

    // Initialize matcher with configured weights and thresholds
    let weights = ScoringWeights {
        location: settings.scoring.weights.location,
        breed_overlap: settings.scoring.weights.breed_overlap,
        legislation_type: settings.scoring.weights.legislation_type,
    };
    let thresholds = DetectionThresholds {
        report_floor: settings.scoring.thresholds.report_floor,
        maybe: settings.scoring.thresholds.maybe,
        likely: settings.scoring.thresholds.likely,
    };

    let matcher = DuplicateMatcher::new(weights, thresholds);

    info!("Matcher initialized with weights: {:?}, thresholds: {:?}", weights, thresholds);

    // Build application state
    let app_state = AppState { records, matcher };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
