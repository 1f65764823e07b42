//! Enricher — orchestrates the full enrichment pipeline.
//!
//! Flow: normalize job → analyze job → (optimize skills, enrich experience)
//!       alongside summary, expertise, education, certifications,
//!       competencies, technical expertise and value proposition → assemble.
//!
//! The only data dependency is job analysis → skills and experience.
//! `enrich` never fails: every step resolves to generated or fallback content.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::enrichment::models::{
    CandidateProfile, EnrichedContent, EnrichedExperience, JobAnalysis, JobDescription,
    OptimizedSkills,
};
use crate::enrichment::normalizer::normalize;
use crate::enrichment::resilience::{CancelSignal, RetryPolicy, RunGuard};
use crate::enrichment::steps::{
    EnrichmentInput, ExperienceStep, JobAnalysisStep, ListFacet, ListStep, SkillsStep,
    StepRunner, SummaryStep, ValuePropositionStep,
};
use crate::llm_client::TextGenerator;

/// Holds no per-request state, so one instance serves concurrent requests.
#[derive(Clone)]
pub struct Enricher {
    llm: Arc<dyn TextGenerator>,
    policy: RetryPolicy,
    /// Overall budget for one `enrich` call. `None` means unbounded.
    deadline: Option<Duration>,
}

impl Enricher {
    pub fn new(llm: Arc<dyn TextGenerator>, policy: RetryPolicy, deadline: Option<Duration>) -> Self {
        Self {
            llm,
            policy,
            deadline,
        }
    }

    /// Produces a fully populated `EnrichedContent`. Never fails.
    pub async fn enrich(
        &self,
        candidate: &CandidateProfile,
        job: Option<&JobDescription>,
        client_name: Option<&str>,
    ) -> EnrichedContent {
        self.enrich_with_cancel(candidate, job, client_name, CancelSignal::never())
            .await
    }

    /// Like `enrich`, but abandons outstanding generation when `cancel` fires.
    /// Steps not yet generated resolve to their fallbacks. Dropping the
    /// returned future also abandons every pending call, without a result.
    pub async fn enrich_with_cancel(
        &self,
        candidate: &CandidateProfile,
        job: Option<&JobDescription>,
        client_name: Option<&str>,
        cancel: CancelSignal,
    ) -> EnrichedContent {
        let span = tracing::info_span!(
            "enrich",
            request_id = %Uuid::new_v4(),
            roles = candidate.experience.len(),
            has_job = job.is_some(),
        );
        self.run(candidate, job, client_name, cancel)
            .instrument(span)
            .await
    }

    /// Runs only the job-analysis step for a job (normalized first).
    pub async fn analyze_job(&self, job: &JobDescription) -> JobAnalysis {
        let job = normalize(job);
        let guard = RunGuard::new(self.deadline, CancelSignal::never());
        let runner = StepRunner::new(self.llm.as_ref(), &self.policy, &guard);
        runner.run(&JobAnalysisStep { job: &job }).await
    }

    async fn run(
        &self,
        candidate: &CandidateProfile,
        job: Option<&JobDescription>,
        client_name: Option<&str>,
        cancel: CancelSignal,
    ) -> EnrichedContent {
        info!("Starting enrichment");

        let job = job.filter(|j| !j.is_blank()).map(normalize);
        let input = EnrichmentInput {
            candidate,
            job: job.as_ref(),
            client_name: client_name.map(str::trim).filter(|c| !c.is_empty()),
        };

        let guard = RunGuard::new(self.deadline, cancel);
        let runner = StepRunner::new(self.llm.as_ref(), &self.policy, &guard);

        let summary = SummaryStep { input };
        let value_proposition = ValuePropositionStep { input };
        let list = |facet| ListStep { facet, input };
        let (expertise, education, certifications, competencies, technical) = (
            list(ListFacet::AreasOfExpertise),
            list(ListFacet::Education),
            list(ListFacet::Certifications),
            list(ListFacet::CoreCompetencies),
            list(ListFacet::TechnicalExpertise),
        );

        let (
            (optimized_skills, enriched_experience),
            enhanced_summary,
            areas_of_expertise,
            optimized_education,
            optimized_certifications,
            optimized_core_competencies,
            optimized_technical_expertise,
            value_proposition,
        ) = tokio::join!(
            analysis_dependents(runner, input),
            runner.run(&summary),
            runner.run(&expertise),
            runner.run(&education),
            runner.run(&certifications),
            runner.run(&competencies),
            runner.run(&technical),
            runner.run(&value_proposition),
        );

        info!(
            "Enrichment complete: {} roles, {} expertise areas",
            enriched_experience.len(),
            areas_of_expertise.len()
        );

        EnrichedContent {
            enhanced_summary,
            optimized_skills,
            enriched_experience,
            areas_of_expertise,
            value_proposition,
            optimized_education,
            optimized_certifications,
            optimized_core_competencies,
            optimized_technical_expertise,
        }
    }
}

/// Job analysis, then the two steps that consume it.
async fn analysis_dependents(
    runner: StepRunner<'_>,
    input: EnrichmentInput<'_>,
) -> (OptimizedSkills, Vec<EnrichedExperience>) {
    let analysis = match input.job {
        Some(job) => Some(runner.run(&JobAnalysisStep { job }).await),
        None => None,
    };
    let analysis = analysis.as_ref();

    let skills_step = SkillsStep { input, analysis };
    let experience_steps: Vec<ExperienceStep<'_>> = input
        .candidate
        .experience
        .iter()
        .map(|entry| ExperienceStep {
            input,
            entry,
            analysis,
        })
        .collect();

    // join_all yields results in input order.
    tokio::join!(
        runner.run(&skills_step),
        join_all(experience_steps.iter().map(|step| runner.run(step))),
    )
}
