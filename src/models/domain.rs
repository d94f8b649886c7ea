use serde::{Deserialize, Serialize};

use super::lenient;

/// One candidate's precomputed fit against one vacancy, as produced by the backend.
///
/// Field names follow the backend wire format. Decoding never fails on a bad
/// field: absent or malformed scores read as `0`, absent skill lists as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub candidate_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub candidate_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub candidate_email: String,
    #[serde(default, deserialize_with = "lenient::score")]
    pub match_score: f64,
    #[serde(default, deserialize_with = "lenient::score")]
    pub skills_score: f64,
    #[serde(default, deserialize_with = "lenient::score")]
    pub experience_score: f64,
    #[serde(default, deserialize_with = "lenient::score")]
    pub education_score: f64,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub matched_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub missing_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ExperienceAnalysis>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,
}

impl MatchRecord {
    /// Score for the given dimension, clamped to `[0, 100]`; NaN reads as `0`.
    pub fn score(&self, key: SortKey) -> f64 {
        let raw = match key {
            SortKey::Overall => self.match_score,
            SortKey::Skills => self.skills_score,
            SortKey::Experience => self.experience_score,
            SortKey::Education => self.education_score,
        };
        clamp_score(raw)
    }

    pub fn overall(&self) -> f64 {
        self.score(SortKey::Overall)
    }
}

/// Clamp a display score into `[0, 100]`.
#[inline]
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Experience detail attached to a match
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceAnalysis {
    #[serde(default, deserialize_with = "lenient::score")]
    pub total_years: f64,
    #[serde(default, deserialize_with = "lenient::score")]
    pub required_years: f64,
    #[serde(default, deserialize_with = "lenient::score")]
    pub relevance: f64,
    #[serde(default, deserialize_with = "lenient::score")]
    pub recency: f64,
}

/// Required skills of a vacancy; the universe coverage is computed against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacancyRequirement {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Sort dimension for ranking matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Overall,
    Skills,
    Experience,
    Education,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Overall,
        SortKey::Skills,
        SortKey::Experience,
        SortKey::Education,
    ];

    /// Parse a sort key; anything unrecognised falls back to `Overall`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "skills" => SortKey::Skills,
            "experience" => SortKey::Experience,
            "education" => SortKey::Education,
            _ => SortKey::Overall,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Overall => "overall",
            SortKey::Skills => "skills",
            SortKey::Experience => "experience",
            SortKey::Education => "education",
        }
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::parse(value)
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(SortKey::parse).unwrap_or_default())
    }
}

/// How a matched skill was recognised by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Semantic,
    Partial,
}

/// A matched skill with its annotation split out of the display string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatch {
    pub name: String,
    pub match_type: MatchType,
}

/// Three-level bucket used by coverage bars and candidate quality charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

/// Coverage of one required skill across a result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageEntry {
    pub skill: String,
    pub count: usize,
    pub percentage: u32,
}

/// Headline scores of the best-ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCandidate {
    pub candidate_id: String,
    pub candidate_name: String,
    pub match_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
}

impl From<&MatchRecord> for TopCandidate {
    fn from(record: &MatchRecord) -> Self {
        Self {
            candidate_id: record.candidate_id.clone(),
            candidate_name: record.candidate_name.clone(),
            match_score: record.score(SortKey::Overall),
            skills_score: record.score(SortKey::Skills),
            experience_score: record.score(SortKey::Experience),
            education_score: record.score(SortKey::Education),
        }
    }
}

/// Deterministic leaderboard summary of a result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub total_candidates: usize,
    pub top_candidate: Option<TopCandidate>,
    pub skill_coverage: Vec<CoverageEntry>,
    pub insights: Vec<String>,
}

/// Selected flags for each required skill, in required-skill order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillFilterState {
    entries: Vec<(String, bool)>,
}

impl SkillFilterState {
    /// Build the state with every required skill unselected; duplicates collapse.
    pub fn from_required(required_skills: &[String]) -> Self {
        let mut entries: Vec<(String, bool)> = Vec::with_capacity(required_skills.len());
        for skill in required_skills {
            if !entries.iter().any(|(name, _)| name == skill) {
                entries.push((skill.clone(), false));
            }
        }
        Self { entries }
    }

    /// Flip a skill's flag. Returns the new flag, or `None` for an unknown skill.
    pub fn toggle(&mut self, skill: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|(name, _)| name == skill)?;
        entry.1 = !entry.1;
        Some(entry.1)
    }

    /// Set a skill's flag; unknown skills are ignored.
    pub fn set(&mut self, skill: &str, selected: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == skill) {
            entry.1 = selected;
        }
    }

    pub fn is_selected(&self, skill: &str) -> bool {
        self.entries
            .iter()
            .any(|(name, selected)| *selected && name == skill)
    }

    pub fn selected(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, selected)| *selected)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            entry.1 = false;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
