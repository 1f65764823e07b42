//! Input and output documents of the enrichment pipeline.
//!
//! Everything here is transient: built from the caller's request, held for one
//! `enrich` call, and handed back. Wire names are camelCase.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// One person's professional background.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub years_of_experience: Option<u32>,
    /// Set semantics: duplicates are ignored by consumers.
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    /// Chronological order as supplied. Never re-sorted.
    pub experience: Vec<WorkEntry>,
    pub education: Vec<String>,
    pub languages: Vec<String>,
    pub summary: Option<String>,
}

/// A single role. Dates are free-form and never parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkEntry {
    pub company: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub responsibilities: String,
}

/// A hiring need. `text` may be the only populated field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDescription {
    pub text: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub title: Option<String>,
    pub company: Option<String>,
}

impl JobDescription {
    /// No text and no structured lists: nothing to tailor against.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
            && self.requirements.is_empty()
            && self.skills.is_empty()
            && self.responsibilities.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Intermediate
// ────────────────────────────────────────────────────────────────────────────

/// Output of the job-analysis step, threaded into the skills and experience steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobAnalysis {
    pub key_skills_required: Vec<String>,
    pub experience_emphasis: Vec<String>,
    pub industry_context: String,
    pub seniority_level: String,
    pub technical_focus: Vec<String>,
    pub soft_skills_needed: Vec<String>,
    pub client_facing: bool,
    pub leadership_required: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// The fully-populated enrichment result. Every field is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedContent {
    pub enhanced_summary: String,
    pub optimized_skills: OptimizedSkills,
    pub enriched_experience: Vec<EnrichedExperience>,
    pub areas_of_expertise: Vec<String>,
    pub value_proposition: String,
    pub optimized_education: Vec<String>,
    pub optimized_certifications: Vec<String>,
    pub optimized_core_competencies: Vec<String>,
    pub optimized_technical_expertise: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedSkills {
    pub technical: Vec<String>,
    pub functional: Vec<String>,
    pub leadership: Vec<String>,
}

/// One output role. `company`, `title` and `period` always come from the input entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedExperience {
    pub company: String,
    pub title: String,
    pub period: String,
    pub enhanced_description: String,
    pub key_achievements: Vec<String>,
    pub technical_environment: Vec<String>,
    pub responsibilities: Vec<String>,
}

impl WorkEntry {
    /// Display period built from the free-form dates.
    pub fn period(&self) -> String {
        let start = self.start_date.trim();
        let end = self.end_date.trim();
        match (start.is_empty(), end.is_empty()) {
            (true, true) => String::new(),
            (true, false) => end.to_string(),
            (false, true) => format!("{start} - Present"),
            (false, false) => format!("{start} - {end}"),
        }
    }
}

/// De-duplicates case-insensitively, keeping the first spelling and input order.
/// Blank items are dropped.
pub fn unique_items(items: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}
