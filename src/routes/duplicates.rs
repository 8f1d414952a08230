use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::DuplicateMatcher;
use crate::models::{
    CheckDuplicatesRequest, CheckDuplicatesResponse, ErrorResponse, HealthResponse,
    RecordsStatusResponse,
};
use crate::services::RecordStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordStore>,
    pub matcher: DuplicateMatcher,
}

/// Configure all duplicate-check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/duplicates/check", web::post().to(check_duplicates))
        .route("/records/status", web::get().to(records_status));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (ready, _, _) = state.records.status().await;
    let status = if ready { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Duplicate check endpoint
///
/// POST /api/v1/duplicates/check
///
/// Request body:
/// ```json
/// {
///   "municipality": "Denver",
///   "state": "Colorado",
///   "municipalityType": "City",
///   "bannedBreeds": ["Pit Bull"],
///   "legislationType": "ban"
/// }
/// ```
async fn check_duplicates(
    state: web::Data<AppState>,
    req: web::Json<CheckDuplicatesRequest>,
) -> impl Responder {
    // Validate request; incomplete candidates are the caller's mistake,
    // never the matcher's problem
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for duplicate check: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let candidate = req.into_inner().into_candidate();

    if !candidate.is_complete() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Incomplete candidate".to_string(),
            message: "municipality, state and at least one banned breed are required".to_string(),
            status_code: 400,
        });
    }

    // Checks are deferred while the record set is loading; the client
    // retries once records are available
    let Some(snapshot) = state.records.snapshot().await else {
        tracing::debug!("Duplicate check requested before record set loaded");
        return HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "Records unavailable".to_string(),
            message: "Legislation records are still loading, retry shortly".to_string(),
            status_code: 503,
        });
    };

    tracing::debug!(
        "Checking candidate {} ({}) against {} records",
        candidate.municipality,
        candidate.state,
        snapshot.records.len()
    );

    let report = state.matcher.detect_duplicates(&candidate, &snapshot.records);

    tracing::info!(
        "Duplicate check for {}, {}: has_duplicates={}, confidence={:?}, {} matches",
        candidate.municipality,
        candidate.state,
        report.has_duplicates,
        report.confidence,
        report.matches.len()
    );

    HttpResponse::Ok().json(CheckDuplicatesResponse::from_report(
        report,
        snapshot.records.len(),
    ))
}

/// Record snapshot status endpoint
///
/// GET /api/v1/records/status
///
/// Lets the client defer duplicate checks until the full record set has
/// been fetched.
async fn records_status(state: web::Data<AppState>) -> impl Responder {
    let (ready, record_count, fetched_at) = state.records.status().await;

    HttpResponse::Ok().json(RecordsStatusResponse {
        ready,
        record_count,
        fetched_at,
    })
}
