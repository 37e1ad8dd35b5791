use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{ParticipantRecord, WeightOverrides};

/// Request to run the matching engine over a roster
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateMatchRequest {
    #[serde(alias = "match_name", rename = "matchName", default)]
    pub match_name: Option<String>,
    /// Raw profile rows; rows with a non-participant role are skipped
    #[validate(length(min = 1))]
    pub participants: Vec<ParticipantRecord>,
    #[serde(default)]
    pub config: Option<WeightOverrides>,
    #[validate(range(min = 2000, max = 9999))]
    #[serde(alias = "program_year", rename = "programYear", default)]
    pub program_year: Option<i32>,
}
