use crate::models::{MatchRecord, SortKey};

/// Sort records descending by the chosen score.
///
/// The sort is stable: records with equal scores keep their input order.
pub fn sort_matches(records: &[MatchRecord], sort_key: SortKey) -> Vec<MatchRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.score(sort_key).total_cmp(&a.score(sort_key)));
    sorted
}

/// First `n` records of an already ranked sequence. Never sorts, never pads.
pub fn top_n(records: &[MatchRecord], n: usize) -> Vec<MatchRecord> {
    records.iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_record(id: &str, overall: f64, skills: f64) -> MatchRecord {
        MatchRecord {
            candidate_id: id.to_string(),
            candidate_name: id.to_uppercase(),
            candidate_email: String::new(),
            match_score: overall,
            skills_score: skills,
            experience_score: 0.0,
            education_score: 0.0,
            matched_skills: vec![],
            missing_skills: vec![],
            analysis: None,
            cv_url: None,
        }
    }

    fn ids(records: &[MatchRecord]) -> Vec<&str> {
        records.iter().map(|r| r.candidate_id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_skills_stable() {
        let records = vec![
            create_record("a", 10.0, 40.0),
            create_record("b", 20.0, 90.0),
            create_record("c", 30.0, 40.0),
        ];

        let sorted = sort_matches(&records, SortKey::Skills);
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let records = vec![create_record("a", 10.0, 0.0), create_record("b", 90.0, 0.0)];

        let sorted = sort_matches(&records, SortKey::Overall);
        assert_eq!(ids(&sorted), vec!["b", "a"]);
        assert_eq!(ids(&records), vec!["a", "b"]);
    }

    #[test]
    fn test_sort_treats_nan_as_zero() {
        let records = vec![create_record("a", f64::NAN, 0.0), create_record("b", 1.0, 0.0)];

        let sorted = sort_matches(&records, SortKey::Overall);
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn test_top_n_shorter_input() {
        let records = vec![
            create_record("a", 90.0, 0.0),
            create_record("b", 80.0, 0.0),
            create_record("c", 70.0, 0.0),
        ];

        assert_eq!(top_n(&records, 5).len(), 3);
        assert_eq!(ids(&top_n(&records, 2)), vec!["a", "b"]);
        assert!(top_n(&records, 0).is_empty());
    }
}
