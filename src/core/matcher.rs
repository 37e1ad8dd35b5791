use crate::core::{filters::partition_roster, scoring::calculate_matching_rate};
use crate::models::{Group, MatchResult, MatchedMentee, Participant, ScoringWeights, WeightOverrides};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Reasons a roster cannot be matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("No mentors available for matching")]
    NoMentorsAvailable,

    #[error("No mentees available for matching")]
    NoMenteesAvailable,
}

pub const DEFAULT_NAME_PREFIX: &str = "Match";

/// One scored mentor/mentee combination
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    mentor_index: usize,
    mentee: &'a Participant,
    score: f64,
}

/// Group assignment orchestrator
///
/// # Pipeline Stages
/// 1. Partition the roster into mentees and mentors
/// 2. Score every mentor x mentee pair
/// 3. Rank pairs by score (stable, so ties keep mentor-major order)
/// 4. Visit mentors round-robin, each visit taking its best unmatched
///    mentees up to the group size cap
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    name_prefix: String,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }

    /// Prefix of the generated name used when a run is not given one
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Cap on mentees per group for a cohort
    pub fn max_group_size(mentee_count: usize, mentor_count: usize) -> usize {
        if mentor_count == 0 {
            return 0;
        }
        mentee_count.div_ceil(mentor_count)
    }

    /// Partition a roster across its mentors
    ///
    /// # Arguments
    /// * `roster` - Mentors and mentees, in the order the roster source returned them
    /// * `match_name` - Name of the run; a timestamped name is generated when absent or empty
    ///
    /// # Returns
    /// A MatchResult with one group per mentor visit, covering every mentee exactly once
    pub fn generate_groups(
        &self,
        roster: &[Participant],
        match_name: Option<&str>,
    ) -> Result<MatchResult, MatchError> {
        let (mentees, mentors) = partition_roster(roster);

        if mentors.is_empty() {
            tracing::warn!("Cannot match roster of {} participants: no mentors", roster.len());
            return Err(MatchError::NoMentorsAvailable);
        }

        if mentees.is_empty() {
            tracing::warn!("Cannot match roster of {} participants: no mentees", roster.len());
            return Err(MatchError::NoMenteesAvailable);
        }

        let max_group_size = Self::max_group_size(mentees.len(), mentors.len());

        tracing::debug!(
            "Matching {} mentees across {} mentors (max group size {})",
            mentees.len(),
            mentors.len(),
            max_group_size
        );

        // Stage 2: Score every pair, mentor-major
        let mut candidates: Vec<Candidate> = mentors
            .iter()
            .enumerate()
            .flat_map(|(mentor_index, mentor)| {
                mentees.iter().filter_map(move |&mentee| {
                    let score = calculate_matching_rate(
                        mentee.as_mentee()?,
                        mentor.as_mentor()?,
                        &self.weights,
                    );
                    Some(Candidate { mentor_index, mentee, score })
                })
            })
            .collect();

        // Stage 3: Rank, highest score first
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        // Bucketing after the sort keeps each mentor's list in ranked order
        let mut ranked_by_mentor: Vec<Vec<Candidate>> = vec![Vec::new(); mentors.len()];
        for candidate in candidates {
            ranked_by_mentor[candidate.mentor_index].push(candidate);
        }

        // Stage 4: Round-robin assignment
        let mut unmatched: HashSet<&str> = mentees.iter().map(|m| m.id.as_str()).collect();
        let mut groups = Vec::new();

        for (mentor_index, mentor) in mentors.iter().enumerate().cycle() {
            if unmatched.is_empty() {
                break;
            }

            let mut group = Group {
                id: mentor_index,
                mentor_id: mentor.id.clone(),
                mentor_name: mentor.full_name.clone(),
                mentees: Vec::new(),
            };

            for candidate in &ranked_by_mentor[mentor_index] {
                if group.mentees.len() >= max_group_size {
                    break;
                }

                if !unmatched.remove(candidate.mentee.id.as_str()) {
                    continue;
                }

                group.mentees.push(MatchedMentee {
                    mentee_id: candidate.mentee.id.clone(),
                    mentee_name: candidate.mentee.full_name.clone(),
                    match_rate: candidate.score,
                });
            }

            groups.push(group);
        }

        let created_at = Utc::now();
        let match_name = match match_name {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => self.default_match_name(created_at),
        };

        tracing::info!(
            "Match '{}' produced {} groups for {} mentees",
            match_name,
            groups.len(),
            mentees.len()
        );

        Ok(MatchResult {
            uid: Uuid::new_v4(),
            created_at,
            match_name,
            groups,
        })
    }

    /// Same as `generate_groups`, with a partial weight override for this run only
    pub fn generate_groups_with(
        &self,
        roster: &[Participant],
        match_name: Option<&str>,
        overrides: &WeightOverrides,
    ) -> Result<MatchResult, MatchError> {
        let matcher = Self {
            weights: overrides.merge_over(&self.weights),
            name_prefix: self.name_prefix.clone(),
        };
        matcher.generate_groups(roster, match_name)
    }

    fn default_match_name(&self, at: DateTime<Utc>) -> String {
        format!("{} {}", self.name_prefix, at.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Run one matching pass with the default weights, overridden by `config`
pub fn compute_match_groups(
    roster: &[Participant],
    match_name: Option<&str>,
    config: Option<&WeightOverrides>,
) -> Result<MatchResult, MatchError> {
    let matcher = Matcher::with_default_weights();
    match config {
        Some(overrides) => matcher.generate_groups_with(roster, match_name, overrides),
        None => matcher.generate_groups(roster, match_name),
    }
}
