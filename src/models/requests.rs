use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Candidate, LegislationType, MunicipalityType};

/// Request to check an in-progress submission for duplicates
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckDuplicatesRequest {
    #[validate(length(min = 1))]
    pub municipality: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[serde(alias = "municipality_type", rename = "municipalityType")]
    pub municipality_type: MunicipalityType,
    #[validate(length(min = 1))]
    #[serde(alias = "banned_breeds", rename = "bannedBreeds")]
    pub banned_breeds: Vec<String>,
    #[serde(alias = "legislation_type", rename = "legislationType")]
    pub legislation_type: LegislationType,
}

impl CheckDuplicatesRequest {
    pub fn into_candidate(self) -> Candidate {
        Candidate {
            municipality: self.municipality,
            state: self.state,
            municipality_type: self.municipality_type,
            banned_breeds: self.banned_breeds,
            legislation_type: self.legislation_type,
        }
    }
}
