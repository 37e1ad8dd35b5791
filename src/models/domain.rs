use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Which side of the mentorship a participant is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Mentor,
    Mentee,
}

impl Role {
    /// Profile-table role label; other labels (e.g. "Admin") are not matchable
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Mentor" => Some(Self::Mentor),
            "Mentee" => Some(Self::Mentee),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mentor => "Mentor",
            Self::Mentee => "Mentee",
        }
    }
}

/// Unanswered multiselects are stored as `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Matching-relevant answers a mentee gave at registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenteeAttributes {
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub student_year: Option<String>,
    #[serde(default)]
    pub prefer_mentor_gender: Option<String>,
    #[serde(default)]
    pub prefer_mentor_working_style: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prefer_mentoring_fields: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prefer_mentoring_softskills: Vec<String>,
}

/// Matching-relevant answers a mentor gave at registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentorAttributes {
    #[serde(default)]
    pub working_field: Option<String>,
    #[serde(default)]
    pub student_year: Option<String>,
    #[serde(default)]
    pub prefer_mentee_gender: Option<String>,
    #[serde(default)]
    pub prefer_mentee_working_style: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prefer_mentoring_field: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prefer_mentoring_softskills: Vec<String>,
}

/// Role-tagged attribute record. The role is carried by the variant, so a
/// participant can never be both a mentor and a mentee.
#[derive(Debug, Clone, PartialEq)]
pub enum Attributes {
    Mentee(MenteeAttributes),
    Mentor(MentorAttributes),
}

/// A person eligible for matching
///
/// On the wire this is the flat profile row: `id`, `full_name`, `role` and
/// a `user_data` object whose shape depends on `role`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParticipantRecord", into = "ParticipantRecord")]
pub struct Participant {
    pub id: String,
    pub full_name: String,
    pub attributes: Attributes,
    pub created_at: Option<DateTime<Utc>>,
}

impl Participant {
    pub fn mentee(id: impl Into<String>, full_name: impl Into<String>, attributes: MenteeAttributes) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            attributes: Attributes::Mentee(attributes),
            created_at: None,
        }
    }

    pub fn mentor(id: impl Into<String>, full_name: impl Into<String>, attributes: MentorAttributes) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            attributes: Attributes::Mentor(attributes),
            created_at: None,
        }
    }

    pub fn role(&self) -> Role {
        match self.attributes {
            Attributes::Mentee(_) => Role::Mentee,
            Attributes::Mentor(_) => Role::Mentor,
        }
    }

    pub fn as_mentee(&self) -> Option<&MenteeAttributes> {
        match &self.attributes {
            Attributes::Mentee(attrs) => Some(attrs),
            Attributes::Mentor(_) => None,
        }
    }

    pub fn as_mentor(&self) -> Option<&MentorAttributes> {
        match &self.attributes {
            Attributes::Mentor(attrs) => Some(attrs),
            Attributes::Mentee(_) => None,
        }
    }
}

/// Wire shape of a participant profile row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub id: String,
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub user_data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<ParticipantRecord> for Participant {
    type Error = serde_json::Error;

    fn try_from(record: ParticipantRecord) -> Result<Self, Self::Error> {
        // A profile saved before the form was filled in has no user_data at all
        let user_data = match record.user_data {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };

        let role = Role::from_label(&record.role).ok_or_else(|| {
            <serde_json::Error as serde::de::Error>::custom(format!(
                "unknown participant role `{}`",
                record.role
            ))
        })?;

        let attributes = match role {
            Role::Mentee => Attributes::Mentee(serde_json::from_value(user_data)?),
            Role::Mentor => Attributes::Mentor(serde_json::from_value(user_data)?),
        };

        Ok(Self {
            id: record.id,
            full_name: record.full_name,
            attributes,
            created_at: record.created_at,
        })
    }
}

impl Participant {
    /// Build a roster from raw profile rows, skipping rows whose role is not
    /// Mentor or Mentee. A malformed `user_data` on a matchable row is still an error.
    pub fn from_profile_rows(rows: Vec<ParticipantRecord>) -> Result<Vec<Self>, serde_json::Error> {
        rows.into_iter()
            .filter(|row| Role::from_label(&row.role).is_some())
            .map(Self::try_from)
            .collect()
    }
}

impl From<Participant> for ParticipantRecord {
    fn from(participant: Participant) -> Self {
        let role = participant.role();
        let user_data = match &participant.attributes {
            Attributes::Mentee(attrs) => serde_json::to_value(attrs),
            Attributes::Mentor(attrs) => serde_json::to_value(attrs),
        }
        .unwrap_or(serde_json::Value::Null);

        Self {
            id: participant.id,
            full_name: participant.full_name,
            role: role.as_str().to_string(),
            user_data,
            created_at: participant.created_at,
        }
    }
}

/// Points awarded per matching criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    pub major_working_field_match: f64,
    pub common_fields_per_match: f64,
    pub common_soft_skills_per_match: f64,
    pub gender_preference_exact: f64,
    pub gender_preference_flexible: f64,
    pub student_year_match: f64,
    pub working_style_exact: f64,
    pub working_style_flexible: f64,
}

impl ScoringWeights {
    /// Every weight must be finite and non-negative for scores to stay >= 0
    pub fn is_valid(&self) -> bool {
        [
            self.major_working_field_match,
            self.common_fields_per_match,
            self.common_soft_skills_per_match,
            self.gender_preference_exact,
            self.gender_preference_flexible,
            self.student_year_match,
            self.working_style_exact,
            self.working_style_flexible,
        ]
        .iter()
        .all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            major_working_field_match: 2.0,
            common_fields_per_match: 1.0,
            common_soft_skills_per_match: 2.0,
            gender_preference_exact: 1.0,
            gender_preference_flexible: 0.5,
            student_year_match: 1.0,
            working_style_exact: 1.0,
            working_style_flexible: 0.5,
        }
    }
}

/// Partial weight configuration supplied per matching run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct WeightOverrides {
    #[validate(range(min = 0.0, max = 1000.0))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_working_field_match: Option<f64>,
    #[validate(range(min = 0.0, max = 1000.0))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_fields_per_match: Option<f64>,
    #[validate(range(min = 0.0, max = 1000.0))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_soft_skills_per_match: Option<f64>,
    #[validate(range(min = 0.0, max = 1000.0))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_preference_exact: Option<f64>,
    #[validate(range(min = 0.0, max = 1000.0))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_preference_flexible: Option<f64>,
    #[validate(range(min = 0.0, max = 1000.0))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_year_match: Option<f64>,
    #[validate(range(min = 0.0, max = 1000.0))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_style_exact: Option<f64>,
    #[validate(range(min = 0.0, max = 1000.0))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_style_flexible: Option<f64>,
}

impl WeightOverrides {
    /// Fill every key not present in the override from `base`
    pub fn merge_over(&self, base: &ScoringWeights) -> ScoringWeights {
        ScoringWeights {
            major_working_field_match: self.major_working_field_match.unwrap_or(base.major_working_field_match),
            common_fields_per_match: self.common_fields_per_match.unwrap_or(base.common_fields_per_match),
            common_soft_skills_per_match: self.common_soft_skills_per_match.unwrap_or(base.common_soft_skills_per_match),
            gender_preference_exact: self.gender_preference_exact.unwrap_or(base.gender_preference_exact),
            gender_preference_flexible: self.gender_preference_flexible.unwrap_or(base.gender_preference_flexible),
            student_year_match: self.student_year_match.unwrap_or(base.student_year_match),
            working_style_exact: self.working_style_exact.unwrap_or(base.working_style_exact),
            working_style_flexible: self.working_style_flexible.unwrap_or(base.working_style_flexible),
        }
    }
}

/// One mentee placed in a group, with the score that placed them there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedMentee {
    pub mentee_id: String,
    pub mentee_name: String,
    pub match_rate: f64,
}

/// One mentor's mentees for a single round-robin visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Round-robin slot (mentor index) of the visit that produced this group
    pub id: usize,
    pub mentor_id: String,
    pub mentor_name: String,
    pub mentees: Vec<MatchedMentee>,
}

/// Complete output of one matching run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub uid: Uuid,
    pub created_at: DateTime<Utc>,
    pub match_name: String,
    pub groups: Vec<Group>,
}

impl MatchResult {
    /// Flatten groups into one pairing row per matched mentee
    pub fn mentorships(&self) -> Vec<Mentorship> {
        self.groups
            .iter()
            .flat_map(|group| {
                group.mentees.iter().map(move |mentee| Mentorship {
                    mentor_id: group.mentor_id.clone(),
                    mentee_id: mentee.mentee_id.clone(),
                    match_id: self.uid,
                    mentorship_metadata: MentorshipMetadata {
                        match_rate: mentee.match_rate,
                        group_id: group.id,
                        mentor_name: group.mentor_name.clone(),
                        mentee_name: mentee.mentee_name.clone(),
                        created_at: self.created_at,
                    },
                })
            })
            .collect()
    }

    pub fn stats(&self) -> MatchStats {
        let rates: Vec<f64> = self
            .groups
            .iter()
            .flat_map(|g| g.mentees.iter().map(|m| m.match_rate))
            .collect();

        let unique_mentors: HashSet<&str> = self
            .groups
            .iter()
            .filter(|g| !g.mentees.is_empty())
            .map(|g| g.mentor_id.as_str())
            .collect();

        let average_match_rate = if rates.is_empty() {
            0.0
        } else {
            rates.iter().sum::<f64>() / rates.len() as f64
        };

        MatchStats {
            total_pairs: rates.len(),
            unique_mentors: unique_mentors.len(),
            average_match_rate,
        }
    }
}

/// Mentor/mentee pairing row handed to the persistence sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentorship {
    pub mentor_id: String,
    pub mentee_id: String,
    pub match_id: Uuid,
    pub mentorship_metadata: MentorshipMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorshipMetadata {
    pub match_rate: f64,
    pub group_id: usize,
    pub mentor_name: String,
    pub mentee_name: String,
    pub created_at: DateTime<Utc>,
}

/// Summary figures for a finished match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub total_pairs: usize,
    pub unique_mentors: usize,
    pub average_match_rate: f64,
}
