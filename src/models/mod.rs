// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Attributes, Group, MatchResult, MatchStats, MatchedMentee, MenteeAttributes, MentorAttributes,
    Mentorship, MentorshipMetadata, Participant, ParticipantRecord, Role, ScoringWeights, WeightOverrides,
};
pub use requests::GenerateMatchRequest;
pub use responses::{ErrorResponse, GenerateMatchResponse, HealthResponse};
