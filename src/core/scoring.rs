use crate::core::normalize::{breed_set, jaccard, normalize};
use crate::models::{Candidate, LegislationRecord, MatchReason, ScoringWeights};

/// Full scoring output for one candidate/record pair
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub composite: f64,
    pub reasons: Vec<MatchReason>,
    pub shared_breeds: Vec<String>,
}

/// Score a single existing record against the candidate (0-1)
///
/// Composite formula:
/// score = (
///     location_score * 0.6 +      # same municipality + state + type
///     breed_score * 0.3 +         # Jaccard over normalized breed sets
///     type_score * 0.1            # active/inactive status agrees
/// ) / weight_total
pub fn score_record(
    candidate: &Candidate,
    record: &LegislationRecord,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let location = location_score(candidate, record);
    let (breeds, shared_breeds) = breed_overlap_score(candidate, record);
    let legislation = type_consistency_score(candidate, record);

    // Normalize by the weight sum so tuned weights still yield [0, 1]
    let total = weights.total();
    let composite = if total > 0.0 {
        (location * weights.location
            + breeds * weights.breed_overlap
            + legislation * weights.legislation_type)
            / total
    } else {
        0.0
    };

    let mut reasons = Vec::new();
    if location == 1.0 {
        reasons.push(MatchReason::Location);
    }
    if !shared_breeds.is_empty() {
        reasons.push(MatchReason::BreedOverlap);
    }
    if legislation == 1.0 {
        reasons.push(MatchReason::TypeMatch);
    }

    ScoreBreakdown {
        composite: composite.clamp(0.0, 1.0),
        reasons,
        shared_breeds,
    }
}

/// Binary location match: municipality, state and municipality type must all
/// agree after normalization. This is the dominant signal.
#[inline]
pub fn location_score(candidate: &Candidate, record: &LegislationRecord) -> f64 {
    let same_place = normalize(&candidate.municipality) == normalize(&record.municipality)
        && normalize(&candidate.state) == normalize(&record.state)
        && candidate.municipality_type == record.municipality_type;

    if same_place { 1.0 } else { 0.0 }
}

/// Jaccard similarity between the two banned-breed sets, plus the shared
/// breeds themselves for the per-match explanation.
#[inline]
pub fn breed_overlap_score(
    candidate: &Candidate,
    record: &LegislationRecord,
) -> (f64, Vec<String>) {
    let ours = breed_set(&candidate.banned_breeds);
    let theirs = breed_set(&record.banned_breeds);

    let score = jaccard(&ours, &theirs);
    let shared: Vec<String> = ours.intersection(&theirs).cloned().collect();

    (score, shared)
}

/// Binary tie-breaker bonus when the candidate's legislation type and the
/// record's implied type agree on active vs. inactive status. A record with
/// no implied type contributes nothing.
#[inline]
pub fn type_consistency_score(candidate: &Candidate, record: &LegislationRecord) -> f64 {
    match record.legislation_type {
        Some(implied) if implied.is_active() == candidate.legislation_type.is_active() => 1.0,
        _ => 0.0,
    }
}
