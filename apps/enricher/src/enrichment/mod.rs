// Candidate enrichment pipeline
// Implements: job normalization, job analysis, nine generation steps with
// retry/backoff and deterministic fallbacks, result assembly.
// All LLM calls go through llm_client::TextGenerator.

pub mod enricher;
pub mod fallbacks;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod parsing;
pub mod prompts;
pub mod resilience;
pub mod steps;
