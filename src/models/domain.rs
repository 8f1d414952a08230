use serde::{Deserialize, Serialize};

/// Whether a piece of legislation applies at the city or county level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MunicipalityType {
    City,
    County,
}

/// Status of a piece of breed legislation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegislationType {
    Ban,
    Restriction,
    Repealed,
    Unverified,
}

impl LegislationType {
    /// Ban and restriction are in-force legislation; repealed and
    /// unverified entries are not.
    pub fn is_active(self) -> bool {
        matches!(self, LegislationType::Ban | LegislationType::Restriction)
    }
}

/// In-progress user submission, snapshotted per duplicate check.
/// Never persisted; lifecycle is bounded to a single check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub municipality: String,
    pub state: String,
    #[serde(rename = "municipalityType")]
    pub municipality_type: MunicipalityType,
    #[serde(rename = "bannedBreeds")]
    pub banned_breeds: Vec<String>,
    #[serde(rename = "legislationType")]
    pub legislation_type: LegislationType,
}

impl Candidate {
    /// Whether every field the matcher requires is present.
    /// Callers hold off on checks until this is true.
    pub fn is_complete(&self) -> bool {
        !self.municipality.trim().is_empty()
            && !self.state.trim().is_empty()
            && self.banned_breeds.iter().any(|b| !b.trim().is_empty())
    }
}

/// Existing legislation record as stored in the hosted backend.
///
/// Only identity, location, breeds and the implied legislation type matter
/// for matching; the presentational fields ride along for the UI. Optional
/// fields default to absent so malformed rows never fail decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegislationRecord {
    pub id: String,
    pub municipality: String,
    pub state: String,
    #[serde(rename = "municipalityType")]
    pub municipality_type: MunicipalityType,
    #[serde(rename = "bannedBreeds", default)]
    pub banned_breeds: Vec<String>,
    #[serde(rename = "legislationType", default)]
    pub legislation_type: Option<LegislationType>,
    #[serde(rename = "ordinanceText", default)]
    pub ordinance_text: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub population: Option<u64>,
}

/// Why a record was surfaced as a potential duplicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchReason {
    Location,
    BreedOverlap,
    TypeMatch,
}

/// One scored record from a duplicate check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMatch {
    pub record: LegislationRecord,
    #[serde(rename = "similarityScore")]
    pub similarity_score: f64,
    pub reasons: Vec<MatchReason>,
    #[serde(rename = "sharedBreeds")]
    pub shared_breeds: Vec<String>,
}

/// Confidence classification derived from the top similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Outcome of a single duplicate check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateReport {
    #[serde(rename = "hasDuplicates")]
    pub has_duplicates: bool,
    pub confidence: Confidence,
    pub matches: Vec<RecordMatch>,
}

impl DuplicateReport {
    /// Report for an empty or not-yet-checkable candidate universe
    pub fn empty() -> Self {
        Self {
            has_duplicates: false,
            confidence: Confidence::Low,
            matches: Vec::new(),
        }
    }
}

/// Scoring weights for the composite similarity score.
///
/// Location must dominate: two different municipalities are never duplicates
/// of each other, however similar their breed lists. The exact values are
/// tunable policy, loaded from configuration.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub location: f64,
    pub breed_overlap: f64,
    pub legislation_type: f64,
}

impl ScoringWeights {
    /// Sum of all weights, used to normalize the composite into [0, 1]
    pub fn total(&self) -> f64 {
        self.location + self.breed_overlap + self.legislation_type
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            location: 0.6,
            breed_overlap: 0.3,
            legislation_type: 0.1,
        }
    }
}

/// Score thresholds driving reporting and confidence classification.
///
/// Composites below `report_floor` are dropped entirely; the top surviving
/// score classifies as low below `maybe`, medium below `likely`, high at or
/// above `likely`. Only a high top score gates as a duplicate.
#[derive(Debug, Clone, Copy)]
pub struct DetectionThresholds {
    pub report_floor: f64,
    pub maybe: f64,
    pub likely: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            report_floor: 0.2,
            maybe: 0.4,
            likely: 0.8,
        }
    }
}
