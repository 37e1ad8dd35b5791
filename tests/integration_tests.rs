// Integration tests for Mentor Match

use mentor_match::core::{compute_match_groups, MatchError, Matcher};
use mentor_match::models::{MatchResult, MenteeAttributes, MentorAttributes, Participant, ScoringWeights};
use std::collections::HashSet;

const FIELDS: &[&str] = &["Software Engineering", "Data Science", "Design", "Research", "Business"];
const SOFT_SKILLS: &[&str] = &["Communication", "Teamwork", "Leadership", "Time Management"];
const YEARS: &[&str] = &["1st Year", "2nd Year", "3rd Year", "4th Year"];
const GENDERS: &[&str] = &["No Preference", "Male", "Female", ""];
const STYLES: &[&str] = &["Needs Guidance", "Self-motivated", "Flexible Approach", "Goal-oriented"];

fn pick<'a>(items: &[&'a str], seed: usize) -> &'a str {
    items[seed % items.len()]
}

fn pick_many(items: &[&str], seed: usize) -> Vec<String> {
    (0..(seed % 3) + 1)
        .map(|i| pick(items, seed * 7 + i * 3).to_string())
        .collect()
}

fn create_test_mentee(i: usize) -> Participant {
    Participant::mentee(
        format!("mentee-{}", i),
        format!("Mentee {}", i),
        MenteeAttributes {
            major: Some(pick(FIELDS, i).to_string()),
            student_year: Some(pick(YEARS, i / 2).to_string()),
            prefer_mentor_gender: Some(pick(GENDERS, i * 5).to_string()),
            prefer_mentor_working_style: Some(pick(STYLES, i * 3).to_string()),
            prefer_mentoring_fields: pick_many(FIELDS, i),
            prefer_mentoring_softskills: pick_many(SOFT_SKILLS, i + 1),
        },
    )
}

fn create_test_mentor(i: usize) -> Participant {
    Participant::mentor(
        format!("mentor-{}", i),
        format!("Mentor {}", i),
        MentorAttributes {
            working_field: Some(pick(FIELDS, i * 2).to_string()),
            student_year: Some(pick(YEARS, i).to_string()),
            prefer_mentee_gender: Some(pick(GENDERS, i).to_string()),
            prefer_mentee_working_style: Some(pick(STYLES, i + 1).to_string()),
            prefer_mentoring_field: pick_many(FIELDS, i + 2),
            prefer_mentoring_softskills: pick_many(SOFT_SKILLS, i * 3),
        },
    )
}

/// Mentors and mentees interleaved, the way a profile table returns them
fn create_roster(mentors: usize, mentees: usize) -> Vec<Participant> {
    let mut roster = Vec::new();
    for i in 0..mentors.max(mentees) {
        if i < mentees {
            roster.push(create_test_mentee(i));
        }
        if i < mentors {
            roster.push(create_test_mentor(i));
        }
    }
    roster
}

fn matched_ids(result: &MatchResult) -> Vec<&str> {
    result
        .groups
        .iter()
        .flat_map(|g| g.mentees.iter().map(|m| m.mentee_id.as_str()))
        .collect()
}

#[test]
fn test_every_mentee_matched_exactly_once() {
    for (mentors, mentees) in [(1, 1), (1, 9), (3, 10), (4, 4), (5, 2), (7, 50), (10, 33)] {
        let roster = create_roster(mentors, mentees);
        let result = Matcher::with_default_weights().generate_groups(&roster, None).unwrap();

        let ids = matched_ids(&result);
        let unique: HashSet<&str> = ids.iter().copied().collect();

        assert_eq!(ids.len(), mentees, "mentors={} mentees={}", mentors, mentees);
        assert_eq!(unique.len(), mentees, "duplicate assignment for mentors={} mentees={}", mentors, mentees);
        for i in 0..mentees {
            assert!(unique.contains(format!("mentee-{}", i).as_str()));
        }
    }
}

#[test]
fn test_groups_respect_capacity() {
    for (mentors, mentees) in [(2, 3), (3, 10), (6, 13), (4, 40)] {
        let roster = create_roster(mentors, mentees);
        let result = Matcher::with_default_weights().generate_groups(&roster, None).unwrap();
        let cap = Matcher::max_group_size(mentees, mentors);

        for group in &result.groups {
            assert!(
                group.mentees.len() <= cap,
                "group {} has {} mentees, cap {}",
                group.id,
                group.mentees.len(),
                cap
            );
        }
    }
}

#[test]
fn test_group_mentees_ordered_by_score() {
    let roster = create_roster(3, 12);
    let result = Matcher::with_default_weights().generate_groups(&roster, None).unwrap();

    for group in &result.groups {
        for pair in group.mentees.windows(2) {
            assert!(pair[0].match_rate >= pair[1].match_rate, "group {} not ranked", group.id);
        }
    }
}

#[test]
fn test_group_ids_follow_mentor_order() {
    let roster = create_roster(4, 8);
    let result = Matcher::with_default_weights().generate_groups(&roster, None).unwrap();

    for group in &result.groups {
        assert_eq!(group.mentor_id, format!("mentor-{}", group.id));
        assert_eq!(group.mentor_name, format!("Mentor {}", group.id));
    }
}

#[test]
fn test_scenario_a_single_mentor() {
    let mentor = Participant::mentor(
        "m1",
        "Mentor",
        MentorAttributes {
            working_field: Some("AI".to_string()),
            prefer_mentee_gender: Some("No Preference".to_string()),
            ..Default::default()
        },
    );
    let web = Participant::mentee(
        "web",
        "Web Mentee",
        MenteeAttributes { major: Some("Web".to_string()), ..Default::default() },
    );
    let ai = Participant::mentee(
        "ai",
        "AI Mentee",
        MenteeAttributes { major: Some("AI".to_string()), ..Default::default() },
    );

    let result = compute_match_groups(&[mentor, web, ai], Some("Scenario A"), None).unwrap();

    assert_eq!(result.groups.len(), 1);
    let mentees = &result.groups[0].mentees;
    assert_eq!(mentees.len(), 2);
    assert_eq!(mentees[0].mentee_id, "ai");
    assert_eq!(mentees[1].mentee_id, "web");
    let weights = ScoringWeights::default();
    assert_eq!(mentees[0].match_rate - mentees[1].match_rate, weights.major_working_field_match);
}

#[test]
fn test_scenario_b_identical_scores() {
    let roster = vec![
        Participant::mentor("m0", "Mentor 0", MentorAttributes::default()),
        Participant::mentor("m1", "Mentor 1", MentorAttributes::default()),
        Participant::mentee("e0", "Mentee 0", MenteeAttributes::default()),
        Participant::mentee("e1", "Mentee 1", MenteeAttributes::default()),
        Participant::mentee("e2", "Mentee 2", MenteeAttributes::default()),
    ];

    let result = compute_match_groups(&roster, None, None).unwrap();

    assert_eq!(result.groups.len(), 2);
    let first: Vec<&str> = result.groups[0].mentees.iter().map(|m| m.mentee_id.as_str()).collect();
    let second: Vec<&str> = result.groups[1].mentees.iter().map(|m| m.mentee_id.as_str()).collect();
    assert_eq!(result.groups[0].mentor_id, "m0");
    assert_eq!(first, vec!["e0", "e1"]);
    assert_eq!(result.groups[1].mentor_id, "m1");
    assert_eq!(second, vec!["e2"]);
    assert!(result.groups.iter().flat_map(|g| &g.mentees).all(|m| m.match_rate == 0.0));
}

#[test]
fn test_assignment_is_deterministic() {
    let roster = create_roster(5, 23);
    let matcher = Matcher::with_default_weights();

    let first = matcher.generate_groups(&roster, Some("Run")).unwrap();
    let second = matcher.generate_groups(&roster, Some("Run")).unwrap();

    assert_eq!(first.groups, second.groups);
    assert_ne!(first.uid, second.uid);
}

#[test]
fn test_roster_is_not_mutated() {
    let roster = create_roster(3, 7);
    let before = roster.clone();

    let _ = compute_match_groups(&roster, None, None).unwrap();

    assert_eq!(roster, before);
}

#[test]
fn test_precondition_errors() {
    let mentors_only = vec![create_test_mentor(0), create_test_mentor(1)];
    let mentees_only = vec![create_test_mentee(0), create_test_mentee(1)];

    assert_eq!(
        compute_match_groups(&mentors_only, None, None).unwrap_err(),
        MatchError::NoMenteesAvailable
    );
    assert_eq!(
        compute_match_groups(&mentees_only, None, None).unwrap_err(),
        MatchError::NoMentorsAvailable
    );
}

#[test]
fn test_mentorship_rows_cover_all_pairs() {
    let roster = create_roster(3, 10);
    let result = compute_match_groups(&roster, Some("Rows"), None).unwrap();

    let rows = result.mentorships();
    let stats = result.stats();

    assert_eq!(rows.len(), 10);
    assert_eq!(stats.total_pairs, 10);
    assert_eq!(stats.unique_mentors, 3);
    for row in &rows {
        assert_eq!(row.match_id, result.uid);
        assert!(row.mentorship_metadata.match_rate >= 0.0);
    }
}

#[test]
fn test_roster_from_profile_json() {
    let json = r#"[
        {"id": "m1", "full_name": "Minh", "role": "Mentor",
         "user_data": {"working_field": "Design", "student_year": "4th Year",
                       "prefer_mentee_gender": "Female", "prefer_mentee_working_style": "Needs Guidance",
                       "prefer_mentoring_field": ["Design"], "prefer_mentoring_softskills": ["Leadership"]}},
        {"id": "e1", "full_name": "An", "role": "Mentee", "created_at": "2025-02-01T08:00:00Z",
         "user_data": {"major": "Design", "student_year": "4th Year",
                       "prefer_mentor_gender": "Female", "prefer_mentor_working_style": "Needs Guidance",
                       "prefer_mentoring_fields": ["Design", "Business"], "prefer_mentoring_softskills": ["Leadership"]}}
    ]"#;

    let roster: Vec<Participant> = serde_json::from_str(json).unwrap();
    let result = compute_match_groups(&roster, None, None).unwrap();

    // 2 + 1 + 2 + 1 + 1 + 1
    assert_eq!(result.groups[0].mentees[0].match_rate, 8.0);
    assert!(roster[1].created_at.is_some());
}
