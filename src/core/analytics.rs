use serde::{Deserialize, Serialize};

use crate::core::coverage::classify_match_quality;
use crate::models::{MatchRecord, SortKey, Tier};

/// Candidate quality buckets and score averages for the analytics dashboard
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub average_match_score: f64,
    pub average_skills_score: f64,
    pub average_experience_score: f64,
    pub average_education_score: f64,
}

pub fn quality_distribution(records: &[MatchRecord]) -> QualityDistribution {
    let mut distribution = QualityDistribution::default();

    for record in records {
        match classify_match_quality(record.overall()) {
            Tier::High => distribution.high += 1,
            Tier::Medium => distribution.medium += 1,
            Tier::Low => distribution.low += 1,
        }
    }

    distribution.average_match_score = average(records, SortKey::Overall);
    distribution.average_skills_score = average(records, SortKey::Skills);
    distribution.average_experience_score = average(records, SortKey::Experience);
    distribution.average_education_score = average(records, SortKey::Education);
    distribution
}

/// Mean of one score dimension rounded to one decimal, `0` for an empty set.
fn average(records: &[MatchRecord], key: SortKey) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: f64 = records.iter().map(|r| r.score(key)).sum();
    (sum / records.len() as f64 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_record(overall: f64, education: f64) -> MatchRecord {
        MatchRecord {
            candidate_id: overall.to_string(),
            candidate_name: String::new(),
            candidate_email: String::new(),
            match_score: overall,
            skills_score: 0.0,
            experience_score: 100.0,
            education_score: education,
            matched_skills: vec![],
            missing_skills: vec![],
            analysis: None,
            cv_url: None,
        }
    }

    #[test]
    fn test_distribution_buckets() {
        let records = vec![
            create_record(95.0, 10.0),
            create_record(70.0, 20.0),
            create_record(30.0, 30.0),
            create_record(29.0, 0.0),
            create_record(150.0, 0.0),
        ];

        let distribution = quality_distribution(&records);
        assert_eq!(distribution.high, 3);
        assert_eq!(distribution.medium, 1);
        assert_eq!(distribution.low, 1);
        // 150 is clamped to 100
        assert_eq!(distribution.average_match_score, 64.8);
        assert_eq!(distribution.average_education_score, 12.0);
        assert_eq!(distribution.average_experience_score, 100.0);
    }

    #[test]
    fn test_distribution_empty() {
        assert_eq!(quality_distribution(&[]), QualityDistribution::default());
    }
}
