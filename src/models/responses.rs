use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, MatchStats, Mentorship};

/// Response for the generate match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMatchResponse {
    #[serde(rename = "match")]
    pub match_result: MatchResult,
    pub mentorships: Vec<Mentorship>,
    pub stats: MatchStats,
    pub max_group_size: usize,
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
