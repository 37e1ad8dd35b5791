use crate::core::filters::find_common_elements;
use crate::models::{MenteeAttributes, MentorAttributes, ScoringWeights};

/// Stated gender preference meaning "anyone"
pub const NO_PREFERENCE: &str = "No Preference";
/// Working style compatible with every other style
pub const FLEXIBLE_APPROACH: &str = "Flexible Approach";
/// Working style that only matches itself
pub const NEEDS_GUIDANCE: &str = "Needs Guidance";
/// Working style that only matches itself
pub const SELF_MOTIVATED: &str = "Self-motivated";

/// Calculate the compatibility score of a mentee/mentor pair
///
/// Scoring formula (every term is independent):
/// score =
///     major == working_field           -> majorWorkingFieldMatch
///   + |common mentoring fields|        * commonFieldsPerMatch
///   + |common soft skills|             * commonSoftSkillsPerMatch
///   + gender preference (flexible|exact)
///   + student_year equal               -> studentYearMatch
///   + working style (flexible|exact)
///
/// Missing answers never match anything, so they contribute nothing.
pub fn calculate_matching_rate(
    mentee: &MenteeAttributes,
    mentor: &MentorAttributes,
    weights: &ScoringWeights,
) -> f64 {
    let mut total = 0.0;

    if both_equal(&mentee.major, &mentor.working_field) {
        total += weights.major_working_field_match;
    }

    let common_fields = find_common_elements(
        &mentee.prefer_mentoring_fields,
        &mentor.prefer_mentoring_field,
    );
    total += common_fields.len() as f64 * weights.common_fields_per_match;

    let common_soft_skills = find_common_elements(
        &mentee.prefer_mentoring_softskills,
        &mentor.prefer_mentoring_softskills,
    );
    total += common_soft_skills.len() as f64 * weights.common_soft_skills_per_match;

    total += gender_preference_points(
        mentee.prefer_mentor_gender.as_deref(),
        mentor.prefer_mentee_gender.as_deref(),
        weights,
    );

    if both_equal(&mentee.student_year, &mentor.student_year) {
        total += weights.student_year_match;
    }

    total += working_style_points(
        mentee.prefer_mentor_working_style.as_deref(),
        mentor.prefer_mentee_working_style.as_deref(),
        weights,
    );

    total
}

#[inline]
fn both_equal(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

#[inline]
fn is_flexible_gender(preference: Option<&str>) -> bool {
    matches!(preference, Some(NO_PREFERENCE) | Some(""))
}

/// Flexible wins over exact: either side being open earns the flexible points
#[inline]
fn gender_preference_points(
    mentee_pref: Option<&str>,
    mentor_pref: Option<&str>,
    weights: &ScoringWeights,
) -> f64 {
    if is_flexible_gender(mentee_pref) || is_flexible_gender(mentor_pref) {
        return weights.gender_preference_flexible;
    }

    match (mentee_pref, mentor_pref) {
        (Some(a), Some(b)) if a == b => weights.gender_preference_exact,
        _ => 0.0,
    }
}

#[inline]
fn working_style_points(
    mentee_style: Option<&str>,
    mentor_style: Option<&str>,
    weights: &ScoringWeights,
) -> f64 {
    if mentee_style == Some(FLEXIBLE_APPROACH) || mentor_style == Some(FLEXIBLE_APPROACH) {
        return weights.working_style_flexible;
    }

    match (mentee_style, mentor_style) {
        (Some(NEEDS_GUIDANCE), Some(NEEDS_GUIDANCE)) | (Some(SELF_MOTIVATED), Some(SELF_MOTIVATED)) => {
            weights.working_style_exact
        }
        _ => 0.0,
    }
}
