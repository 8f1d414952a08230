use crate::core::scoring::score_record;
use crate::models::{
    Candidate, Confidence, DetectionThresholds, DuplicateReport, LegislationRecord, RecordMatch,
    ScoringWeights,
};

/// Duplicate matcher for in-progress legislation submissions.
///
/// Pure and deterministic: scores every existing record against the
/// candidate, drops the noise floor, ranks what survives and classifies
/// overall confidence from the top score. Performs no I/O and never mutates
/// its inputs.
#[derive(Debug, Clone)]
pub struct DuplicateMatcher {
    weights: ScoringWeights,
    thresholds: DetectionThresholds,
}

impl DuplicateMatcher {
    pub fn new(weights: ScoringWeights, thresholds: DetectionThresholds) -> Self {
        Self { weights, thresholds }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: ScoringWeights::default(),
            thresholds: DetectionThresholds::default(),
        }
    }

    pub fn thresholds(&self) -> DetectionThresholds {
        self.thresholds
    }

    /// Check a candidate submission against the full record set
    ///
    /// # Arguments
    /// * `candidate` - The in-progress submission snapshot
    /// * `records` - The complete current legislation record set
    ///
    /// # Returns
    /// A ranked report. An incomplete candidate or empty record set yields
    /// an empty report rather than an error.
    pub fn detect_duplicates(
        &self,
        candidate: &Candidate,
        records: &[LegislationRecord],
    ) -> DuplicateReport {
        // Callers withhold checks until the candidate is complete; fail
        // fast with an empty report if one slips through.
        if !candidate.is_complete() {
            return DuplicateReport::empty();
        }

        let mut matches: Vec<RecordMatch> = records
            .iter()
            .filter_map(|record| {
                let breakdown = score_record(candidate, record, &self.weights);

                // Records with no location match and negligible breed
                // overlap are noise, not advisories.
                if breakdown.composite >= self.thresholds.report_floor {
                    Some(RecordMatch {
                        record: record.clone(),
                        similarity_score: breakdown.composite,
                        reasons: breakdown.reasons,
                        shared_breeds: breakdown.shared_breeds,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Sort by score (descending), ties broken by record id (ascending)
        // so output is deterministic for fixed inputs.
        matches.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.record.id.cmp(&b.record.id))
        });

        let top_score = matches.first().map(|m| m.similarity_score);
        let confidence = self.classify(top_score);

        DuplicateReport {
            // Low/medium matches are advisory only; gating requires a
            // high-confidence top match.
            has_duplicates: confidence == Confidence::High,
            confidence,
            matches,
        }
    }

    fn classify(&self, top_score: Option<f64>) -> Confidence {
        match top_score {
            Some(score) if score >= self.thresholds.likely => Confidence::High,
            Some(score) if score >= self.thresholds.maybe => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

impl Default for DuplicateMatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LegislationType, MunicipalityType};

    fn candidate(municipality: &str, breeds: Vec<&str>) -> Candidate {
        Candidate {
            municipality: municipality.to_string(),
            state: "Colorado".to_string(),
            municipality_type: MunicipalityType::City,
            banned_breeds: breeds.into_iter().map(String::from).collect(),
            legislation_type: LegislationType::Ban,
        }
    }

    fn record(id: &str, municipality: &str, breeds: Vec<&str>) -> LegislationRecord {
        LegislationRecord {
            id: id.to_string(),
            municipality: municipality.to_string(),
            state: "Colorado".to_string(),
            municipality_type: MunicipalityType::City,
            banned_breeds: breeds.into_iter().map(String::from).collect(),
            legislation_type: Some(LegislationType::Ban),
            ordinance_text: None,
            latitude: None,
            longitude: None,
            population: None,
        }
    }

    #[test]
    fn test_exact_duplicate_is_high_confidence() {
        let matcher = DuplicateMatcher::with_defaults();
        let candidate = candidate("Denver", vec!["Pit Bull"]);
        let records = vec![record("1", "Denver", vec!["Pit Bull"])];

        let report = matcher.detect_duplicates(&candidate, &records);

        assert!(report.has_duplicates);
        assert_eq!(report.confidence, Confidence::High);
        assert_eq!(report.matches.len(), 1);
        assert!(report.matches[0].similarity_score >= matcher.thresholds().likely);
    }

    #[test]
    fn test_different_municipality_is_not_a_duplicate() {
        let matcher = DuplicateMatcher::with_defaults();
        let candidate = candidate("Denver", vec!["Pit Bull"]);
        let records = vec![record("1", "Aurora", vec!["Pit Bull"])];

        let report = matcher.detect_duplicates(&candidate, &records);

        assert!(!report.has_duplicates);
        assert_ne!(report.confidence, Confidence::High);
        if let Some(top) = report.matches.first() {
            assert!(top.similarity_score < matcher.thresholds().likely);
        }
    }

    #[test]
    fn test_empty_record_set() {
        let matcher = DuplicateMatcher::with_defaults();
        let candidate = candidate("Denver", vec!["Pit Bull"]);

        let report = matcher.detect_duplicates(&candidate, &[]);

        assert!(!report.has_duplicates);
        assert_eq!(report.confidence, Confidence::Low);
        assert!(report.matches.is_empty());
    }

    #[test]
    fn test_incomplete_candidate_fails_fast() {
        let matcher = DuplicateMatcher::with_defaults();
        let candidate = candidate("", vec!["Pit Bull"]);
        let records = vec![record("1", "Denver", vec!["Pit Bull"])];

        let report = matcher.detect_duplicates(&candidate, &records);

        assert!(!report.has_duplicates);
        assert!(report.matches.is_empty());
    }

    #[test]
    fn test_matches_sorted_by_score_then_id() {
        let matcher = DuplicateMatcher::with_defaults();
        let candidate = candidate("Denver", vec!["Pit Bull", "Rottweiler"]);

        let records = vec![
            record("c", "Denver", vec!["Pit Bull"]),
            record("a", "Denver", vec!["Pit Bull", "Rottweiler"]),
            record("b", "Denver", vec!["Pit Bull", "Rottweiler"]),
        ];

        let report = matcher.detect_duplicates(&candidate, &records);

        assert_eq!(report.matches.len(), 3);
        for pair in report.matches.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
        // Equal scores fall back to id order
        assert_eq!(report.matches[0].record.id, "a");
        assert_eq!(report.matches[1].record.id, "b");
        assert_eq!(report.matches[2].record.id, "c");
    }

    #[test]
    fn test_noise_floor_drops_unrelated_records() {
        let matcher = DuplicateMatcher::with_defaults();
        let candidate = candidate("Denver", vec!["Pit Bull"]);

        let mut unrelated = record("1", "Springfield", vec!["Beagle"]);
        unrelated.state = "Illinois".to_string();
        unrelated.legislation_type = Some(LegislationType::Repealed);

        let report = matcher.detect_duplicates(&candidate, &[unrelated]);
        assert!(report.matches.is_empty());
    }

    #[test]
    fn test_deterministic_for_fixed_inputs() {
        let matcher = DuplicateMatcher::with_defaults();
        let candidate = candidate("Denver", vec!["Pit Bull", "Akita"]);
        let records = vec![
            record("1", "Denver", vec!["Pit Bull"]),
            record("2", "Aurora", vec!["Pit Bull", "Akita"]),
        ];

        let first = matcher.detect_duplicates(&candidate, &records);
        let second = matcher.detect_duplicates(&candidate, &records);

        assert_eq!(first.has_duplicates, second.has_duplicates);
        assert_eq!(first.confidence, second.confidence);
        assert_eq!(first.matches.len(), second.matches.len());
        for (a, b) in first.matches.iter().zip(second.matches.iter()) {
            assert_eq!(a.record.id, b.record.id);
            assert_eq!(a.similarity_score, b.similarity_score);
        }
    }

    #[test]
    fn test_malformed_record_contributes_zero_not_panic() {
        let matcher = DuplicateMatcher::with_defaults();
        let candidate = candidate("Denver", vec!["Pit Bull"]);

        let mut bare = record("1", "Denver", vec![]);
        bare.legislation_type = None;

        let report = matcher.detect_duplicates(&candidate, &[bare]);

        // Location still matches, so the record is reported, but breed and
        // type sub-scores are zero.
        assert_eq!(report.matches.len(), 1);
        let expected = 0.6;
        assert!((report.matches[0].similarity_score - expected).abs() < 1e-9);
        assert!(!report.has_duplicates);
    }

    #[test]
    fn test_gating_requires_high_confidence() {
        let matcher = DuplicateMatcher::with_defaults();
        let candidate = candidate("Denver", vec!["Pit Bull"]);

        // Full breed overlap + type match, wrong municipality: advisory only
        let records = vec![record("1", "Aurora", vec!["Pit Bull"])];
        let report = matcher.detect_duplicates(&candidate, &records);

        assert_eq!(report.confidence, Confidence::Medium);
        assert!(!report.has_duplicates);
        assert_eq!(report.matches.len(), 1);
    }
}
