//! Step 1 — analyze job requirements.

use serde_json::Value;

use crate::enrichment::fallbacks;
use crate::enrichment::models::{JobAnalysis, JobDescription};
use crate::enrichment::parsing::{parse_json_object, required_string_array, StepError};
use crate::enrichment::prompts::{Prompt, JOB_ANALYSIS};
use crate::enrichment::steps::{bullet_list, GenerationStep};

/// Takes a normalized job, so the structured lists are populated whenever
/// the free text was.
pub struct JobAnalysisStep<'a> {
    pub job: &'a JobDescription,
}

impl GenerationStep for JobAnalysisStep<'_> {
    type Output = JobAnalysis;

    fn name(&self) -> &'static str {
        "analyze_job_requirements"
    }

    fn prompt(&self) -> Prompt {
        let job = self.job;
        Prompt::new(&JOB_ANALYSIS)
            .with("job_title", job.title.clone().unwrap_or_default())
            .with("job_company", job.company.clone().unwrap_or_default())
            .with("requirements", bullet_list(&job.requirements))
            .with("skills", bullet_list(&job.skills))
            .with("responsibilities", bullet_list(&job.responsibilities))
            .with("job_text", job.text.trim())
    }

    fn parse(&self, raw: &str) -> Result<JobAnalysis, StepError> {
        let map = parse_json_object(raw)?;
        if required_string_array(&map, "keySkillsRequired")?.is_empty() {
            return Err(StepError::InvalidShape(
                "`keySkillsRequired` must not be empty".to_string(),
            ));
        }
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    fn fallback(&self) -> JobAnalysis {
        fallbacks::job_analysis(self.job)
    }
}
