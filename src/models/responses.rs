use serde::{Deserialize, Serialize};

use crate::models::domain::{
    Confidence, DuplicateReport, MatchReason, MunicipalityType, RecordMatch,
};

/// Response for the duplicate check endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDuplicatesResponse {
    #[serde(rename = "hasDuplicates")]
    pub has_duplicates: bool,
    pub confidence: Confidence,
    pub matches: Vec<MatchSummary>,
    #[serde(rename = "recordsChecked")]
    pub records_checked: usize,
}

/// Flattened per-match view for the warning banner in the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    #[serde(rename = "recordId")]
    pub record_id: String,
    pub municipality: String,
    pub state: String,
    #[serde(rename = "municipalityType")]
    pub municipality_type: MunicipalityType,
    #[serde(rename = "similarityScore")]
    pub similarity_score: f64,
    pub reasons: Vec<MatchReason>,
    #[serde(rename = "sharedBreeds")]
    pub shared_breeds: Vec<String>,
}

impl From<RecordMatch> for MatchSummary {
    fn from(m: RecordMatch) -> Self {
        Self {
            record_id: m.record.id,
            municipality: m.record.municipality,
            state: m.record.state,
            municipality_type: m.record.municipality_type,
            similarity_score: m.similarity_score,
            reasons: m.reasons,
            shared_breeds: m.shared_breeds,
        }
    }
}

impl CheckDuplicatesResponse {
    pub fn from_report(report: DuplicateReport, records_checked: usize) -> Self {
        Self {
            has_duplicates: report.has_duplicates,
            confidence: report.confidence,
            matches: report.matches.into_iter().map(MatchSummary::from).collect(),
            records_checked,
        }
    }
}

/// Record store snapshot status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsStatusResponse {
    pub ready: bool,
    #[serde(rename = "recordCount")]
    pub record_count: usize,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
