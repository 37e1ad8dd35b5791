//! Mentor Match - matching engine for the mentorship program
//!
//! This library scores mentee/mentor compatibility and partitions a cohort
//! of mentees across mentors in balanced, round-robin groups.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use core::{calculate_matching_rate, compute_match_groups, MatchError, Matcher};
pub use models::{Group, MatchResult, MatchedMentee, Participant, Role, ScoringWeights, WeightOverrides};
