use crate::core::skills::{any_matches, normalize_all, normalize_skill};
use crate::models::{clamp_score, MatchRecord};

/// Keep records whose overall score lies in `[min_score, max_score]`.
///
/// Bounds are clamped to `[0, 100]` and swapped when reversed. Surviving
/// records keep their input order.
pub fn filter_by_score_range(
    records: &[MatchRecord],
    min_score: f64,
    max_score: f64,
) -> Vec<MatchRecord> {
    let (min, max) = score_bounds(min_score, max_score);

    records
        .iter()
        .filter(|record| {
            let score = record.overall();
            score >= min && score <= max
        })
        .cloned()
        .collect()
}

/// Keep records that match every selected skill.
///
/// Matching strips `(semantic)` / `(partial)` annotations and compares
/// case-insensitively by substring in either direction. With no selected
/// skills every record passes.
pub fn filter_by_skills<S: AsRef<str>>(
    records: &[MatchRecord],
    selected_skills: &[S],
) -> Vec<MatchRecord> {
    let wanted: Vec<String> = selected_skills
        .iter()
        .map(|s| normalize_skill(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();

    if wanted.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| {
            let matched = normalize_all(&record.matched_skills);
            wanted.iter().all(|skill| any_matches(&matched, skill))
        })
        .cloned()
        .collect()
}

#[inline]
fn score_bounds(min_score: f64, max_score: f64) -> (f64, f64) {
    let min = clamp_score(min_score);
    let max = if max_score.is_nan() { 100.0 } else { clamp_score(max_score) };
    if min <= max {
        (min, max)
    } else {
        (max, min)
    }
}
