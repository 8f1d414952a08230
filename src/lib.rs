//! BSL Dupcheck - duplicate-submission detection for the BSL legislation database
//!
//! This library provides the duplicate-detection core used by the BSL web
//! application's submission workflow: a pure matcher that scores an
//! in-progress submission against every existing legislation record, and a
//! debounced-check state machine governing when the matcher runs.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{CheckController, CheckEvent, CheckState, DuplicateMatcher};
pub use models::{
    Candidate, Confidence, DetectionThresholds, DuplicateReport, LegislationRecord,
    LegislationType, MunicipalityType, RecordMatch, ScoringWeights,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let matcher = DuplicateMatcher::with_defaults();
        let candidate = Candidate {
            municipality: "Denver".to_string(),
            state: "Colorado".to_string(),
            municipality_type: MunicipalityType::City,
            banned_breeds: vec!["Pit Bull".to_string()],
            legislation_type: LegislationType::Ban,
        };

        let report = matcher.detect_duplicates(&candidate, &[]);
        assert!(!report.has_duplicates);
    }
}
