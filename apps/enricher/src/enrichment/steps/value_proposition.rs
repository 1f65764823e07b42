//! Final step — generate the one-sentence value proposition.

use crate::enrichment::fallbacks;
use crate::enrichment::parsing::{require_text, StepError};
use crate::enrichment::prompts::{Prompt, VALUE_PROPOSITION};
use crate::enrichment::steps::{
    candidate_json, client_label, job_context, EnrichmentInput, GenerationStep,
};

pub struct ValuePropositionStep<'a> {
    pub input: EnrichmentInput<'a>,
}

impl GenerationStep for ValuePropositionStep<'_> {
    type Output = String;

    fn name(&self) -> &'static str {
        "generate_value_proposition"
    }

    fn prompt(&self) -> Prompt {
        Prompt::new(&VALUE_PROPOSITION)
            .with("candidate_json", candidate_json(self.input.candidate))
            .with("job_context", job_context(self.input.job))
            .with("client_name", client_label(self.input.client_name))
    }

    fn parse(&self, raw: &str) -> Result<String, StepError> {
        require_text(raw)
    }

    fn fallback(&self) -> String {
        fallbacks::value_proposition(self.input.candidate, self.input.job, self.input.client_name)
    }
}
