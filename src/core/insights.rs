use crate::core::coverage::{classify_match_quality, classify_skill_coverage, compute_skill_coverage};
use crate::models::{CoverageEntry, InsightSummary, MatchRecord, Tier, TopCandidate};

/// Summarise a ranked result set for the insights panel.
///
/// `records` must already be ranked by overall score; the first record is
/// reported as the top candidate. Everything here is arithmetic over the
/// backend's scores, so identical input always yields identical output.
pub fn build_insight_summary<S: AsRef<str>>(
    records: &[MatchRecord],
    required_skills: &[S],
) -> InsightSummary {
    let skill_coverage = compute_skill_coverage(records, required_skills);
    let top_candidate = records.first().map(TopCandidate::from);
    let insights = leaderboard_insights(records, top_candidate.as_ref(), &skill_coverage);

    InsightSummary {
        total_candidates: records.len(),
        top_candidate,
        skill_coverage,
        insights,
    }
}

/// Plain-language leaderboard lines, in a fixed order.
pub fn leaderboard_insights(
    records: &[MatchRecord],
    top_candidate: Option<&TopCandidate>,
    coverage: &[CoverageEntry],
) -> Vec<String> {
    let total = records.len();
    let mut lines = Vec::new();

    lines.push(match total {
        0 => "No candidates matched yet".to_string(),
        1 => "1 candidate matched".to_string(),
        n => format!("{} candidates matched", n),
    });

    if let Some(top) = top_candidate {
        let name = if top.candidate_name.is_empty() {
            top.candidate_id.as_str()
        } else {
            top.candidate_name.as_str()
        };
        lines.push(format!(
            "Top candidate: {} with {}% overall match",
            name,
            top.match_score.round() as u32
        ));
    }

    let strong = records
        .iter()
        .filter(|record| classify_match_quality(record.overall()) == Tier::High)
        .count();
    if strong > 0 {
        lines.push(format!(
            "{} of {} candidates are strong matches (70%+)",
            strong, total
        ));
    }

    if let Some(gap) = coverage.first() {
        if classify_skill_coverage(gap.percentage as f64) != Tier::High {
            lines.push(format!(
                "Largest skill gap: {} ({}% coverage)",
                gap.skill, gap.percentage
            ));
        } else {
            // Sorted ascending, so the head being high means all are.
            lines.push("All required skills are well covered".to_string());
        }
    }

    lines
}
