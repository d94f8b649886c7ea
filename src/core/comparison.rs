use serde::{Deserialize, Serialize};

use crate::core::coverage::percentage_of;
use crate::core::skills::{normalize_skill, parse_skill};
use crate::models::{MatchRecord, MatchType, SkillMatch, SortKey};

/// Leader on one score dimension among compared candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionLeader {
    pub dimension: SortKey,
    pub candidate_id: String,
    pub score: f64,
}

/// Side-by-side comparison of selected candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub candidates: Vec<MatchRecord>,
    pub missing: Vec<String>,
    pub leaders: Vec<DimensionLeader>,
    pub common_skills: Vec<String>,
}

/// Matched and missing skills of one candidate, with annotations parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillBreakdown {
    pub candidate_id: String,
    pub matched: Vec<SkillMatch>,
    pub missing: Vec<String>,
    pub exact_count: usize,
    pub semantic_count: usize,
    pub partial_count: usize,
    pub missing_count: usize,
    pub skill_match_rate: u32,
}

/// Compare the requested candidates in request order.
///
/// Unknown ids are reported in `missing`; a repeated id is compared once.
/// On each dimension the earliest candidate wins ties.
pub fn compare_candidates<S: AsRef<str>>(records: &[MatchRecord], candidate_ids: &[S]) -> Comparison {
    let mut candidates: Vec<MatchRecord> = Vec::with_capacity(candidate_ids.len());
    let mut missing = Vec::new();

    for id in candidate_ids {
        let id = id.as_ref();
        if candidates.iter().any(|c| c.candidate_id == id) || missing.iter().any(|m| m == id) {
            continue;
        }
        match records.iter().find(|r| r.candidate_id == id) {
            Some(record) => candidates.push(record.clone()),
            None => missing.push(id.to_string()),
        }
    }

    let leaders = SortKey::ALL
        .iter()
        .filter_map(|&dimension| {
            candidates
                .iter()
                .fold(None::<&MatchRecord>, |best, record| match best {
                    Some(b) if b.score(dimension) >= record.score(dimension) => Some(b),
                    _ => Some(record),
                })
                .map(|record| DimensionLeader {
                    dimension,
                    candidate_id: record.candidate_id.clone(),
                    score: record.score(dimension),
                })
        })
        .collect();

    Comparison {
        common_skills: common_skills(&candidates),
        candidates,
        missing,
        leaders,
    }
}

/// Skills every compared candidate matched, by normalized name in first-seen order.
fn common_skills(candidates: &[MatchRecord]) -> Vec<String> {
    let Some((first, rest)) = candidates.split_first() else {
        return Vec::new();
    };

    let others: Vec<Vec<String>> = rest
        .iter()
        .map(|record| record.matched_skills.iter().map(|s| normalize_skill(s)).collect())
        .collect();

    let mut common: Vec<String> = Vec::new();
    for skill in &first.matched_skills {
        let name = normalize_skill(skill);
        if name.is_empty() || common.contains(&name) {
            continue;
        }
        if others.iter().all(|skills| skills.contains(&name)) {
            common.push(name);
        }
    }
    common
}

/// Structured view of one candidate's skills for the matching visualisation
pub fn skill_breakdown(record: &MatchRecord) -> SkillBreakdown {
    let matched: Vec<SkillMatch> = record
        .matched_skills
        .iter()
        .map(|s| parse_skill(s))
        .filter(|s| !s.name.is_empty())
        .collect();

    let count_of = |kind: MatchType| matched.iter().filter(|s| s.match_type == kind).count();
    let exact_count = count_of(MatchType::Exact);
    let semantic_count = count_of(MatchType::Semantic);
    let partial_count = count_of(MatchType::Partial);

    let missing: Vec<String> = record
        .missing_skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let missing_count = missing.len();

    SkillBreakdown {
        candidate_id: record.candidate_id.clone(),
        skill_match_rate: percentage_of(matched.len(), matched.len() + missing_count),
        matched,
        missing,
        exact_count,
        semantic_count,
        partial_count,
        missing_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_record(id: &str, scores: [f64; 4], matched: &[&str], missing: &[&str]) -> MatchRecord {
        MatchRecord {
            candidate_id: id.to_string(),
            candidate_name: format!("Candidate {}", id),
            candidate_email: String::new(),
            match_score: scores[0],
            skills_score: scores[1],
            experience_score: scores[2],
            education_score: scores[3],
            matched_skills: matched.iter().map(|s| s.to_string()).collect(),
            missing_skills: missing.iter().map(|s| s.to_string()).collect(),
            analysis: None,
            cv_url: None,
        }
    }

    #[test]
    fn test_compare_leaders_and_missing() {
        let records = vec![
            create_record("a", [80.0, 70.0, 90.0, 50.0], &["SQL", "Python (semantic)"], &[]),
            create_record("b", [85.0, 70.0, 60.0, 95.0], &["python", "sql (partial)", "Go"], &[]),
            create_record("c", [10.0, 10.0, 10.0, 10.0], &[], &[]),
        ];

        let comparison = compare_candidates(&records, &["b", "a", "zz", "a"]);

        let ids: Vec<&str> = comparison.candidates.iter().map(|r| r.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(comparison.missing, vec!["zz"]);

        let leaders: Vec<(SortKey, &str)> = comparison
            .leaders
            .iter()
            .map(|l| (l.dimension, l.candidate_id.as_str()))
            .collect();
        assert_eq!(
            leaders,
            vec![
                (SortKey::Overall, "b"),
                (SortKey::Skills, "b"),
                (SortKey::Experience, "a"),
                (SortKey::Education, "b"),
            ]
        );
        assert_eq!(comparison.common_skills, vec!["python", "sql"]);
    }

    #[test]
    fn test_compare_nothing_found() {
        let comparison = compare_candidates(&[], &["x"]);
        assert!(comparison.candidates.is_empty());
        assert!(comparison.leaders.is_empty());
        assert!(comparison.common_skills.is_empty());
        assert_eq!(comparison.missing, vec!["x"]);
    }

    #[test]
    fn test_skill_breakdown_counts() {
        let record = create_record(
            "a",
            [0.0; 4],
            &["Rust", "Tokio (semantic)", "SQL (partial)", "Go"],
            &["Kubernetes", " "],
        );

        let breakdown = skill_breakdown(&record);
        assert_eq!(breakdown.exact_count, 2);
        assert_eq!(breakdown.semantic_count, 1);
        assert_eq!(breakdown.partial_count, 1);
        assert_eq!(breakdown.missing_count, 1);
        assert_eq!(breakdown.skill_match_rate, 80);
        assert_eq!(breakdown.matched[1].name, "Tokio");
    }

    #[test]
    fn test_skill_breakdown_empty() {
        let record = create_record("a", [0.0; 4], &[], &[]);
        assert_eq!(skill_breakdown(&record).skill_match_rate, 0);
    }
}
