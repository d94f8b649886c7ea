// Unit tests for Talent Match

use talent_match::core::{
    coverage::{classify_match_quality, classify_skill_coverage, compute_skill_coverage},
    filters::{filter_by_score_range, filter_by_skills},
    insights::build_insight_summary,
    ranking::{sort_matches, top_n},
    skills::skill_matches,
};
use talent_match::models::{CoverageEntry, MatchRecord, SkillFilterState, SortKey, Tier};

fn create_record(id: &str, scores: [f64; 4], matched: &[&str]) -> MatchRecord {
    MatchRecord {
        candidate_id: id.to_string(),
        candidate_name: format!("Candidate {}", id),
        candidate_email: format!("{}@example.com", id),
        match_score: scores[0],
        skills_score: scores[1],
        experience_score: scores[2],
        education_score: scores[3],
        matched_skills: matched.iter().map(|s| s.to_string()).collect(),
        missing_skills: vec![],
        analysis: None,
        cv_url: None,
    }
}

fn overall(id: &str, score: f64) -> MatchRecord {
    create_record(id, [score, 0.0, 0.0, 0.0], &[])
}

fn ids(records: &[MatchRecord]) -> Vec<&str> {
    records.iter().map(|r| r.candidate_id.as_str()).collect()
}

#[test]
fn test_score_range_scenario() {
    let records = vec![overall("a", 90.0), overall("b", 55.0), overall("c", 72.0)];

    let filtered = filter_by_score_range(&records, 60.0, 100.0);

    let scores: Vec<f64> = filtered.iter().map(|r| r.match_score).collect();
    assert_eq!(scores, vec![90.0, 72.0]);
}

#[test]
fn test_score_range_is_idempotent() {
    let records: Vec<MatchRecord> = (0..20)
        .map(|i| overall(&i.to_string(), (i * 7 % 101) as f64))
        .collect();

    let once = filter_by_score_range(&records, 25.0, 75.0);
    let twice = filter_by_score_range(&once, 25.0, 75.0);

    assert_eq!(once, twice);
}

#[test]
fn test_filters_preserve_relative_order() {
    let records = vec![
        create_record("1", [10.0, 0.0, 0.0, 0.0], &["Rust"]),
        create_record("2", [90.0, 0.0, 0.0, 0.0], &["Go"]),
        create_record("3", [50.0, 0.0, 0.0, 0.0], &["rust (partial)"]),
        create_record("4", [70.0, 0.0, 0.0, 0.0], &["Rust.lang (semantic)"]),
    ];

    assert_eq!(ids(&filter_by_score_range(&records, 0.0, 100.0)), vec!["1", "2", "3", "4"]);
    assert_eq!(ids(&filter_by_skills(&records, &["Rust"])), vec!["1", "3", "4"]);
}

#[test]
fn test_sort_by_skills_scenario() {
    let records = vec![
        create_record("first", [0.0, 40.0, 0.0, 0.0], &[]),
        create_record("top", [0.0, 90.0, 0.0, 0.0], &[]),
        create_record("second", [0.0, 40.0, 0.0, 0.0], &[]),
    ];

    let sorted = sort_matches(&records, SortKey::Skills);
    assert_eq!(ids(&sorted), vec!["top", "first", "second"]);
}

#[test]
fn test_sort_overall_is_stable_and_deterministic() {
    let records = vec![
        overall("a", 50.0),
        overall("b", 80.0),
        overall("c", 50.0),
        overall("d", 80.0),
        overall("e", 50.0),
    ];

    let first = sort_matches(&records, SortKey::Overall);
    let second = sort_matches(&records, SortKey::Overall);

    assert_eq!(ids(&first), vec!["b", "d", "a", "c", "e"]);
    assert_eq!(first, second);
}

#[test]
fn test_unknown_sort_key_falls_back_to_overall() {
    let records = vec![
        create_record("a", [10.0, 99.0, 0.0, 0.0], &[]),
        create_record("b", [90.0, 1.0, 0.0, 0.0], &[]),
    ];

    let sorted = sort_matches(&records, SortKey::parse("salary"));
    assert_eq!(ids(&sorted), vec!["b", "a"]);
}

#[test]
fn test_coverage_scenario_equal_split() {
    let records = vec![
        create_record("both", [80.0, 0.0, 0.0, 0.0], &["SQL", "Python"]),
        create_record("neither", [20.0, 0.0, 0.0, 0.0], &["Excel"]),
    ];

    let coverage = compute_skill_coverage(&records, &["SQL", "Python"]);

    assert_eq!(
        coverage,
        vec![
            CoverageEntry { skill: "SQL".to_string(), count: 1, percentage: 50 },
            CoverageEntry { skill: "Python".to_string(), count: 1, percentage: 50 },
        ]
    );
}

#[test]
fn test_coverage_empty_set_safety() {
    let coverage = compute_skill_coverage(&[], &["X"]);

    assert_eq!(
        coverage,
        vec![CoverageEntry { skill: "X".to_string(), count: 0, percentage: 0 }]
    );
}

#[test]
fn test_coverage_bounds() {
    let records: Vec<MatchRecord> = (0..7)
        .map(|i| {
            let skills: Vec<&str> = ["Rust", "SQL", "Docker", "AWS"].iter().take(i % 5).copied().collect();
            create_record(&i.to_string(), [50.0, 0.0, 0.0, 0.0], &skills)
        })
        .collect();

    let coverage = compute_skill_coverage(&records, &["Rust", "SQL", "Docker", "AWS", "Go"]);

    assert_eq!(coverage.len(), 5);
    for entry in &coverage {
        assert!(entry.percentage <= 100, "{} out of range", entry.percentage);
        assert!(entry.count <= records.len());
    }
    for pair in coverage.windows(2) {
        assert!(pair[0].percentage <= pair[1].percentage, "coverage not ascending");
    }
}

#[test]
fn test_permissive_skill_match() {
    assert!(skill_matches("React.js (semantic)", "React"));

    let records = vec![create_record("a", [80.0, 0.0, 0.0, 0.0], &["React.js (semantic)"])];
    assert_eq!(filter_by_skills(&records, &["React"]).len(), 1);
}

#[test]
fn test_skill_filter_partial_annotation_scenario() {
    let records = vec![
        create_record("java", [80.0, 0.0, 0.0, 0.0], &["Java (partial)", "AWS"]),
        create_record("other", [80.0, 0.0, 0.0, 0.0], &["C#"]),
    ];

    let filtered = filter_by_skills(&records, &["java"]);
    assert_eq!(ids(&filtered), vec!["java"]);
}

#[test]
fn test_skill_filter_state_drives_filter() {
    let required = vec!["SQL".to_string(), "Python".to_string()];
    let mut state = SkillFilterState::from_required(&required);
    let records = vec![
        create_record("a", [80.0, 0.0, 0.0, 0.0], &["SQL"]),
        create_record("b", [80.0, 0.0, 0.0, 0.0], &["SQL", "python (semantic)"]),
    ];

    assert_eq!(filter_by_skills(&records, &state.selected()).len(), 2);

    state.toggle("Python");
    assert_eq!(ids(&filter_by_skills(&records, &state.selected())), vec!["b"]);
}

#[test]
fn test_top_n_scenario() {
    let records = vec![overall("a", 90.0), overall("b", 80.0), overall("c", 70.0)];

    let top = top_n(&records, 5);
    assert_eq!(top, records);
}

#[test]
fn test_classifiers_are_distinct() {
    // 35 sits between the two lower boundaries
    assert_eq!(classify_skill_coverage(35.0), Tier::Low);
    assert_eq!(classify_match_quality(35.0), Tier::Medium);

    assert_eq!(classify_skill_coverage(70.0), Tier::High);
    assert_eq!(classify_match_quality(70.0), Tier::High);
}

#[test]
fn test_insight_summary_over_sorted_records() {
    let records = vec![
        create_record("1", [55.0, 50.0, 50.0, 50.0], &["SQL"]),
        create_record("2", [88.0, 80.0, 70.0, 60.0], &["SQL", "Python"]),
    ];

    let ranked = sort_matches(&records, SortKey::Overall);
    let summary = build_insight_summary(&ranked, &["SQL", "Python"]);

    assert_eq!(summary.total_candidates, 2);
    let top = summary.top_candidate.expect("top candidate");
    assert_eq!(top.candidate_id, "2");
    assert_eq!(top.skills_score, 80.0);
    assert_eq!(summary.skill_coverage[0].skill, "Python");
    assert_eq!(summary.skill_coverage[0].percentage, 50);
    assert!(summary.insights.contains(&"Largest skill gap: Python (50% coverage)".to_string()));
}

#[test]
fn test_malformed_json_never_panics() {
    let records: Vec<MatchRecord> = serde_json::from_str(
        r#"[
            {"candidateId": "a", "matchScore": "oops", "matchedSkills": "SQL"},
            {"candidateId": "b", "matchScore": 250, "matchedSkills": ["SQL"]},
            {}
        ]"#,
    )
    .unwrap();

    let filtered = filter_by_score_range(&records, 0.0, 100.0);
    assert_eq!(filtered.len(), 3);

    let sorted = sort_matches(&records, SortKey::Overall);
    assert_eq!(sorted[0].candidate_id, "b");

    let coverage = compute_skill_coverage(&records, &["SQL"]);
    assert_eq!(coverage[0].count, 1);
    assert_eq!(coverage[0].percentage, 33);

    let summary = build_insight_summary(&sorted, &["SQL"]);
    assert_eq!(summary.top_candidate.map(|t| t.match_score), Some(100.0));
}
