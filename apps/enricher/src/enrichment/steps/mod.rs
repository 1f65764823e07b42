//! Generation steps — one (prompt, parse, fallback) triple per output facet.
//!
//! A step never talks to the generator itself. `StepRunner::run` renders its
//! prompt, calls the generator through `resilience::resilient`, and hands the
//! raw text to the step's parser, falling back to the step's heuristic.

use serde_json::json;
use tracing::debug;

use crate::enrichment::models::{unique_items, CandidateProfile, JobAnalysis, JobDescription};
use crate::enrichment::parsing::StepError;
use crate::enrichment::prompts::Prompt;
use crate::enrichment::resilience::{resilient, RetryPolicy, RunGuard};
use crate::llm_client::TextGenerator;

pub mod experience;
pub mod job_analysis;
pub mod lists;
pub mod skills;
pub mod summary;
pub mod value_proposition;

pub use experience::ExperienceStep;
pub use job_analysis::JobAnalysisStep;
pub use lists::{ListFacet, ListStep};
pub use skills::SkillsStep;
pub use summary::SummaryStep;
pub use value_proposition::ValuePropositionStep;

/// One unit of generation. Implementations are pure: building the prompt,
/// parsing the reply and computing the fallback never perform I/O.
pub trait GenerationStep: Sync {
    type Output: Send;

    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    fn prompt(&self) -> Prompt;

    /// Strict parser. Any error triggers a retry and eventually the fallback.
    fn parse(&self, raw: &str) -> Result<Self::Output, StepError>;

    fn fallback(&self) -> Self::Output;

    /// Output to return without calling the generator at all.
    fn short_circuit(&self) -> Option<Self::Output> {
        None
    }
}

/// The request-level inputs every step may read.
#[derive(Debug, Clone, Copy)]
pub struct EnrichmentInput<'a> {
    pub candidate: &'a CandidateProfile,
    /// Already normalized. `None` when the caller sent no usable job.
    pub job: Option<&'a JobDescription>,
    pub client_name: Option<&'a str>,
}

/// Runs steps against one generator under one retry policy and run guard.
#[derive(Clone, Copy)]
pub struct StepRunner<'a> {
    llm: &'a dyn TextGenerator,
    policy: &'a RetryPolicy,
    guard: &'a RunGuard,
}

impl<'a> StepRunner<'a> {
    pub fn new(llm: &'a dyn TextGenerator, policy: &'a RetryPolicy, guard: &'a RunGuard) -> Self {
        Self { llm, policy, guard }
    }

    pub async fn run<S: GenerationStep>(&self, step: &S) -> S::Output {
        if let Some(output) = step.short_circuit() {
            debug!(step = step.name(), "no input, skipping generation");
            return output;
        }

        let prompt = step.prompt();
        let system = prompt.system();
        let user = prompt.render();
        let (system, user) = (system.as_str(), user.as_str());
        let template = prompt.template;
        let llm = self.llm;

        resilient(
            step.name(),
            self.policy,
            self.guard,
            || async move {
                let raw = llm
                    .generate(system, user, template.temperature, template.max_tokens)
                    .await?;
                step.parse(&raw)
            },
            || step.fallback(),
        )
        .await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt context helpers
// ────────────────────────────────────────────────────────────────────────────

const NOT_PROVIDED: &str = "Not provided";
const JOB_TEXT_LIMIT: usize = 6000;

/// Candidate facts for prompts. Contact details are left out.
pub(crate) fn candidate_json(candidate: &CandidateProfile) -> String {
    let view = json!({
        "title": candidate.title,
        "yearsOfExperience": candidate.years_of_experience,
        "summary": candidate.summary,
        "skills": unique_items(&candidate.skills),
        "certifications": unique_items(&candidate.certifications),
        "education": unique_items(&candidate.education),
        "languages": candidate.languages,
        "experience": candidate.experience,
    });
    serde_json::to_string_pretty(&view).unwrap_or_else(|_| view.to_string())
}

/// Human-readable job block, or "Not provided".
pub(crate) fn job_context(job: Option<&JobDescription>) -> String {
    let Some(job) = job else {
        return NOT_PROVIDED.to_string();
    };

    let mut lines = Vec::new();
    if let Some(title) = job.title.as_deref().filter(|t| !t.trim().is_empty()) {
        lines.push(format!("Title: {title}"));
    }
    if let Some(company) = job.company.as_deref().filter(|c| !c.trim().is_empty()) {
        lines.push(format!("Company: {company}"));
    }
    for (label, items) in [
        ("Requirements", &job.requirements),
        ("Skills", &job.skills),
        ("Responsibilities", &job.responsibilities),
    ] {
        if !items.is_empty() {
            lines.push(format!("{label}:\n{}", bullet_list(items)));
        }
    }
    let text = job.text.trim();
    if !text.is_empty() {
        lines.push(format!("Description:\n{}", truncate_chars(text, JOB_TEXT_LIMIT)));
    }

    if lines.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        lines.join("\n")
    }
}

pub(crate) fn analysis_json(analysis: Option<&JobAnalysis>) -> String {
    match analysis {
        Some(analysis) => serde_json::to_string_pretty(analysis)
            .unwrap_or_else(|_| NOT_PROVIDED.to_string()),
        None => format!("{NOT_PROVIDED}. Order by general professional relevance."),
    }
}

pub(crate) fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn client_label(client_name: Option<&str>) -> String {
    client_name
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(NOT_PROVIDED)
        .to_string()
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
