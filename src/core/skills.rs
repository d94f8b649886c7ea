use crate::models::{MatchType, SkillMatch};

const SEMANTIC_SUFFIX: &str = "(semantic)";
const PARTIAL_SUFFIX: &str = "(partial)";

/// Split a trailing `(semantic)` / `(partial)` annotation off a matched skill.
///
/// The annotation is matched case-insensitively and surrounding whitespace is
/// trimmed, so `"Java (partial)"` and `"java(PARTIAL) "` both yield `"Java"`/`"java"`.
pub fn parse_skill(entry: &str) -> SkillMatch {
    let trimmed = entry.trim();
    for (suffix, match_type) in [
        (SEMANTIC_SUFFIX, MatchType::Semantic),
        (PARTIAL_SUFFIX, MatchType::Partial),
    ] {
        if let Some(name) = strip_suffix_ignore_case(trimmed, suffix) {
            return SkillMatch {
                name: name.trim_end().to_string(),
                match_type,
            };
        }
    }

    SkillMatch {
        name: trimmed.to_string(),
        match_type: MatchType::Exact,
    }
}

/// The skill name with any match annotation removed
pub fn strip_annotation(entry: &str) -> &str {
    let trimmed = entry.trim();
    strip_suffix_ignore_case(trimmed, SEMANTIC_SUFFIX)
        .or_else(|| strip_suffix_ignore_case(trimmed, PARTIAL_SUFFIX))
        .map(str::trim_end)
        .unwrap_or(trimmed)
}

/// Lower-cased, annotation-free form used for every comparison
#[inline]
pub fn normalize_skill(entry: &str) -> String {
    strip_annotation(entry).to_lowercase()
}

/// Permissive skill comparison: either normalized name contains the other.
///
/// "React" matches "React.js (semantic)", "Java" matches "JavaScript".
/// An empty name never matches.
#[inline]
pub fn skill_matches(candidate_skill: &str, wanted: &str) -> bool {
    normalized_matches(&normalize_skill(candidate_skill), &normalize_skill(wanted))
}

#[inline]
pub(crate) fn normalized_matches(candidate: &str, wanted: &str) -> bool {
    if candidate.is_empty() || wanted.is_empty() {
        return false;
    }
    candidate.contains(wanted) || wanted.contains(candidate)
}

/// Whether any of the candidate's already normalized skills matches `wanted`.
#[inline]
pub(crate) fn any_matches(normalized_skills: &[String], wanted: &str) -> bool {
    normalized_skills
        .iter()
        .any(|skill| normalized_matches(skill, wanted))
}

pub(crate) fn normalize_all(skills: &[String]) -> Vec<String> {
    skills.iter().map(|s| normalize_skill(s)).collect()
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(cut) {
        return None;
    }
    let (head, tail) = value.split_at(cut);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
