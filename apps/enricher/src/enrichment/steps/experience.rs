//! Step 4 — enrich one work-history entry. The orchestrator runs one of these
//! per input role, so cardinality and order always match the input.

use serde::Deserialize;

use crate::enrichment::fallbacks;
use crate::enrichment::models::{unique_items, EnrichedExperience, JobAnalysis, WorkEntry};
use crate::enrichment::parsing::{parse_json, StepError};
use crate::enrichment::prompts::{Prompt, ENRICH_EXPERIENCE};
use crate::enrichment::steps::{analysis_json, bullet_list, EnrichmentInput, GenerationStep};

/// The generated part of a role. Every field is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedRole {
    enhanced_description: String,
    key_achievements: Vec<String>,
    technical_environment: Vec<String>,
    responsibilities: Vec<String>,
}

pub struct ExperienceStep<'a> {
    pub input: EnrichmentInput<'a>,
    pub entry: &'a WorkEntry,
    pub analysis: Option<&'a JobAnalysis>,
}

impl GenerationStep for ExperienceStep<'_> {
    type Output = EnrichedExperience;

    fn name(&self) -> &'static str {
        "enrich_experience"
    }

    fn prompt(&self) -> Prompt {
        let entry = self.entry;
        let responsibilities = entry.responsibilities.trim();
        Prompt::new(&ENRICH_EXPERIENCE)
            .with("company", entry.company.trim())
            .with("title", entry.title.trim())
            .with("period", entry.period())
            .with(
                "responsibilities",
                if responsibilities.is_empty() {
                    "(none given)"
                } else {
                    responsibilities
                },
            )
            .with(
                "skills",
                bullet_list(&unique_items(&self.input.candidate.skills)),
            )
            .with("analysis_json", analysis_json(self.analysis))
    }

    fn parse(&self, raw: &str) -> Result<EnrichedExperience, StepError> {
        let role: GeneratedRole = parse_json(raw)?;
        Ok(EnrichedExperience {
            company: self.entry.company.clone(),
            title: self.entry.title.clone(),
            period: self.entry.period(),
            enhanced_description: role.enhanced_description,
            key_achievements: role.key_achievements,
            technical_environment: role.technical_environment,
            responsibilities: role.responsibilities,
        })
    }

    fn fallback(&self) -> EnrichedExperience {
        fallbacks::experience_entry(self.input.candidate, self.entry)
    }
}
