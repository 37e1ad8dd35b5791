use chrono::Datelike;
use crate::models::{Participant, Role};

/// Elements of `left` that also appear in `right`
///
/// This is a membership filter, not a set intersection: duplicates in
/// `left` are kept, so `["a", "a"]` against `["a"]` yields two elements.
#[inline]
pub fn find_common_elements<'a>(left: &'a [String], right: &[String]) -> Vec<&'a String> {
    left.iter().filter(|item| right.contains(item)).collect()
}

/// Split a roster into (mentees, mentors), each in roster order
pub fn partition_roster(roster: &[Participant]) -> (Vec<&Participant>, Vec<&Participant>) {
    roster.iter().partition(|p| p.role() == Role::Mentee)
}

/// Participants who registered during the given program year (UTC)
///
/// Profiles without a creation timestamp cannot be placed in a year and are
/// left out.
pub fn filter_program_year(roster: &[Participant], year: i32) -> Vec<Participant> {
    roster
        .iter()
        .filter(|p| p.created_at.map(|ts| ts.year() == year).unwrap_or(false))
        .cloned()
        .collect()
}
