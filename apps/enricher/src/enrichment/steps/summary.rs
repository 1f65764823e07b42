//! Step 2 — generate the professional summary.

use crate::enrichment::fallbacks;
use crate::enrichment::parsing::{require_text, StepError};
use crate::enrichment::prompts::{Prompt, SUMMARY};
use crate::enrichment::steps::{
    candidate_json, client_label, job_context, EnrichmentInput, GenerationStep,
};

pub struct SummaryStep<'a> {
    pub input: EnrichmentInput<'a>,
}

impl GenerationStep for SummaryStep<'_> {
    type Output = String;

    fn name(&self) -> &'static str {
        "generate_summary"
    }

    fn prompt(&self) -> Prompt {
        Prompt::new(&SUMMARY)
            .with("candidate_json", candidate_json(self.input.candidate))
            .with("job_context", job_context(self.input.job))
            .with("client_name", client_label(self.input.client_name))
    }

    fn parse(&self, raw: &str) -> Result<String, StepError> {
        require_text(raw)
    }

    fn fallback(&self) -> String {
        fallbacks::summary(self.input.candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::models::CandidateProfile;

    #[test]
    fn test_summary_prompt_and_parse() {
        let candidate = CandidateProfile {
            title: Some("Analyst".to_string()),
            ..Default::default()
        };
        let step = SummaryStep {
            input: EnrichmentInput {
                candidate: &candidate,
                job: None,
                client_name: Some("Initech"),
            },
        };
        let prompt = step.prompt();
        assert_eq!(prompt.var("client_name"), Some("Initech"));
        assert_eq!(prompt.var("job_context"), Some("Not provided"));
        assert!(prompt.var("candidate_json").unwrap().contains("Analyst"));

        assert_eq!(step.parse("\n A focused analyst. \n").unwrap(), "A focused analyst.");
        assert!(matches!(step.parse("   "), Err(StepError::EmptyResponse)));
        assert_eq!(step.fallback(), "Analyst.");
    }

    #[test]
    fn test_candidate_text_reaches_prompt_verbatim() {
        let candidate = CandidateProfile {
            summary: Some("Writes templates like {client_name} daily".to_string()),
            ..Default::default()
        };
        let rendered = SummaryStep {
            input: EnrichmentInput {
                candidate: &candidate,
                job: None,
                client_name: Some("Globex"),
            },
        }
        .prompt()
        .render();
        assert!(rendered.contains("Writes templates like {client_name} daily"));
        assert!(!rendered.contains("templates like Globex"));
    }
}
