//! Step 3 — optimize skills into technical, functional and leadership buckets.

use crate::enrichment::fallbacks;
use crate::enrichment::models::{unique_items, JobAnalysis, OptimizedSkills};
use crate::enrichment::parsing::{
    optional_string_array, parse_json_object, required_string_array, StepError,
};
use crate::enrichment::prompts::{Prompt, OPTIMIZE_SKILLS};
use crate::enrichment::steps::{analysis_json, bullet_list, EnrichmentInput, GenerationStep};

pub struct SkillsStep<'a> {
    pub input: EnrichmentInput<'a>,
    pub analysis: Option<&'a JobAnalysis>,
}

impl GenerationStep for SkillsStep<'_> {
    type Output = OptimizedSkills;

    fn name(&self) -> &'static str {
        "optimize_skills"
    }

    fn prompt(&self) -> Prompt {
        Prompt::new(&OPTIMIZE_SKILLS)
            .with(
                "skills",
                bullet_list(&unique_items(&self.input.candidate.skills)),
            )
            .with("analysis_json", analysis_json(self.analysis))
    }

    fn parse(&self, raw: &str) -> Result<OptimizedSkills, StepError> {
        let map = parse_json_object(raw)?;
        Ok(OptimizedSkills {
            technical: required_string_array(&map, "technical")?,
            functional: optional_string_array(&map, "functional")?,
            leadership: optional_string_array(&map, "leadership")?,
        })
    }

    fn fallback(&self) -> OptimizedSkills {
        fallbacks::skills(self.input.candidate)
    }
}
