pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Candidate, Confidence, DetectionThresholds, DuplicateReport, LegislationRecord,
    LegislationType, MatchReason, MunicipalityType, RecordMatch, ScoringWeights,
};
pub use requests::CheckDuplicatesRequest;
pub use responses::{
    CheckDuplicatesResponse, ErrorResponse, HealthResponse, MatchSummary, RecordsStatusResponse,
};
