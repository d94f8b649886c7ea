use crate::core::skills::{any_matches, normalize_all, normalize_skill};
use crate::models::{CoverageEntry, MatchRecord, Tier};

/// Per required skill, how many records match it and what share of the set that is.
///
/// Entries are ordered by ascending percentage so the widest skill gaps come
/// first; equal percentages keep the order of `required_skills`.
pub fn compute_skill_coverage<S: AsRef<str>>(
    records: &[MatchRecord],
    required_skills: &[S],
) -> Vec<CoverageEntry> {
    let normalized: Vec<Vec<String>> = records
        .iter()
        .map(|record| normalize_all(&record.matched_skills))
        .collect();

    let mut coverage: Vec<CoverageEntry> = required_skills
        .iter()
        .map(|skill| {
            let skill = skill.as_ref();
            let wanted = normalize_skill(skill);
            let count = normalized
                .iter()
                .filter(|matched| any_matches(matched, &wanted))
                .count();

            CoverageEntry {
                skill: skill.to_string(),
                count,
                percentage: percentage_of(count, records.len()),
            }
        })
        .collect();

    coverage.sort_by_key(|entry| entry.percentage);
    coverage
}

/// Tier for skill coverage bars: `<40` low, `40..70` medium, `>=70` high.
#[inline]
pub fn classify_skill_coverage(percentage: f64) -> Tier {
    classify(percentage, 40.0, 70.0)
}

/// Tier for candidate match quality: `<30` low, `30..70` medium, `>=70` high.
#[inline]
pub fn classify_match_quality(percentage: f64) -> Tier {
    classify(percentage, 30.0, 70.0)
}

#[inline]
fn classify(value: f64, medium_from: f64, high_from: f64) -> Tier {
    if value >= high_from {
        Tier::High
    } else if value >= medium_from {
        Tier::Medium
    } else {
        // NaN lands here too
        Tier::Low
    }
}

/// `round(count / total * 100)`, or `0` for an empty set.
#[inline]
pub(crate) fn percentage_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}
