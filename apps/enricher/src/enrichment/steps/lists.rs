//! Steps 5–7 — the five facets that come back as a JSON array of strings.
//!
//! They differ only in template, wording, source data and fallback, so one
//! step type parameterized by `ListFacet` covers all of them.

use crate::enrichment::fallbacks;
use crate::enrichment::models::unique_items;
use crate::enrichment::parsing::{parse_string_array, StepError};
use crate::enrichment::prompts::{
    Prompt, PromptTemplate, AREAS_OF_EXPERTISE, CORE_COMPETENCIES, OPTIMIZE_CERTIFICATIONS,
    OPTIMIZE_EDUCATION, TECHNICAL_EXPERTISE,
};
use crate::enrichment::steps::{
    bullet_list, candidate_json, job_context, EnrichmentInput, GenerationStep,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFacet {
    AreasOfExpertise,
    Education,
    Certifications,
    CoreCompetencies,
    TechnicalExpertise,
}

impl ListFacet {
    fn template(self) -> &'static PromptTemplate {
        match self {
            ListFacet::AreasOfExpertise => &AREAS_OF_EXPERTISE,
            ListFacet::Education => &OPTIMIZE_EDUCATION,
            ListFacet::Certifications => &OPTIMIZE_CERTIFICATIONS,
            ListFacet::CoreCompetencies => &CORE_COMPETENCIES,
            ListFacet::TechnicalExpertise => &TECHNICAL_EXPERTISE,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ListFacet::AreasOfExpertise => "generate_areas_of_expertise",
            ListFacet::Education => "optimize_education",
            ListFacet::Certifications => "optimize_certifications",
            ListFacet::CoreCompetencies => "optimize_core_competencies",
            ListFacet::TechnicalExpertise => "optimize_technical_expertise",
        }
    }

    fn task(self) -> &'static str {
        match self {
            ListFacet::AreasOfExpertise => {
                "List 6 to 10 short areas-of-expertise tags (2-4 words each) for this candidate, \
                most relevant to the target job first."
            }
            ListFacet::Education => {
                "Rewrite each education entry as one clean, consistently formatted line \
                (degree, field, institution, year when given)."
            }
            ListFacet::Certifications => {
                "Rewrite each certification as one clean, consistently formatted line \
                (official certification name, issuer when given)."
            }
            ListFacet::CoreCompetencies => {
                "List up to 8 core competencies for this candidate, \
                most relevant to the target job first."
            }
            ListFacet::TechnicalExpertise => {
                "List the candidate's technical expertise (languages, platforms, tools, methods), \
                most relevant to the target job first."
            }
        }
    }

    fn rules(self) -> &'static str {
        match self {
            ListFacet::AreasOfExpertise | ListFacet::CoreCompetencies => {
                "1. Every item must be supported by the candidate's skills, titles or experience\n\
                2. No duplicates, no full sentences"
            }
            ListFacet::Education | ListFacet::Certifications => {
                "1. Return exactly one line per source entry, in the same order\n\
                2. Do NOT add degrees, institutions, dates or certifications that are not listed"
            }
            ListFacet::TechnicalExpertise => {
                "1. Only technologies named in the candidate's skills or experience\n\
                2. No duplicates, no soft skills"
            }
        }
    }
}

pub struct ListStep<'a> {
    pub facet: ListFacet,
    pub input: EnrichmentInput<'a>,
}

impl ListStep<'_> {
    /// The candidate data the facet is derived from.
    fn source(&self) -> (&'static str, String) {
        let candidate = self.input.candidate;
        match self.facet {
            ListFacet::Education => (
                "EDUCATION ENTRIES",
                bullet_list(&unique_items(&candidate.education)),
            ),
            ListFacet::Certifications => (
                "CERTIFICATIONS",
                bullet_list(&unique_items(&candidate.certifications)),
            ),
            _ => ("CANDIDATE", candidate_json(candidate)),
        }
    }
}

impl GenerationStep for ListStep<'_> {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        self.facet.name()
    }

    fn prompt(&self) -> Prompt {
        let (source_label, source) = self.source();
        Prompt::new(self.facet.template())
            .with("task", self.facet.task())
            .with("rules", self.facet.rules())
            .with("source_label", source_label)
            .with("source", source)
            .with("job_context", job_context(self.input.job))
    }

    fn parse(&self, raw: &str) -> Result<Vec<String>, StepError> {
        parse_string_array(raw)
    }

    fn fallback(&self) -> Vec<String> {
        let candidate = self.input.candidate;
        match self.facet {
            ListFacet::AreasOfExpertise => fallbacks::areas_of_expertise(candidate),
            ListFacet::Education => fallbacks::education(candidate),
            ListFacet::Certifications => fallbacks::certifications(candidate),
            ListFacet::CoreCompetencies => fallbacks::core_competencies(candidate),
            ListFacet::TechnicalExpertise => fallbacks::technical_expertise(candidate),
        }
    }

    /// Education and certifications with no input produce `[]` without a call.
    fn short_circuit(&self) -> Option<Vec<String>> {
        let candidate = self.input.candidate;
        let source = match self.facet {
            ListFacet::Education => &candidate.education,
            ListFacet::Certifications => &candidate.certifications,
            _ => return None,
        };
        unique_items(source).is_empty().then(Vec::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::models::CandidateProfile;

    const ALL: [ListFacet; 5] = [
        ListFacet::AreasOfExpertise,
        ListFacet::Education,
        ListFacet::Certifications,
        ListFacet::CoreCompetencies,
        ListFacet::TechnicalExpertise,
    ];

    fn step(facet: ListFacet, candidate: &CandidateProfile) -> ListStep<'_> {
        ListStep {
            facet,
            input: EnrichmentInput {
                candidate,
                job: None,
                client_name: None,
            },
        }
    }

    #[test]
    fn test_every_facet_renders_without_leftover_placeholders() {
        let candidate = CandidateProfile {
            education: vec!["BSc Physics".to_string()],
            ..Default::default()
        };
        for facet in ALL {
            let rendered = step(facet, &candidate).prompt().render();
            for placeholder in ["{task}", "{rules}", "{source_label}", "{source}", "{job_context}"] {
                assert!(!rendered.contains(placeholder), "{facet:?} left {placeholder}");
            }
        }
    }

    #[test]
    fn test_short_circuit_only_for_empty_credentials() {
        let empty = CandidateProfile::default();
        assert_eq!(step(ListFacet::Education, &empty).short_circuit(), Some(vec![]));
        assert_eq!(
            step(ListFacet::Certifications, &empty).short_circuit(),
            Some(vec![])
        );
        assert_eq!(step(ListFacet::CoreCompetencies, &empty).short_circuit(), None);

        let with_cert = CandidateProfile {
            certifications: vec!["CKA".to_string()],
            ..Default::default()
        };
        assert_eq!(
            step(ListFacet::Certifications, &with_cert).short_circuit(),
            None
        );
    }

    #[test]
    fn test_education_source_is_the_raw_list() {
        let candidate = CandidateProfile {
            education: vec!["MSc CS, ETH".to_string()],
            ..Default::default()
        };
        let prompt = step(ListFacet::Education, &candidate).prompt();
        assert_eq!(prompt.var("source"), Some("- MSc CS, ETH"));
        assert_eq!(prompt.var("source_label"), Some("EDUCATION ENTRIES"));
    }

    #[test]
    fn test_parse_requires_array() {
        let candidate = CandidateProfile::default();
        let s = step(ListFacet::CoreCompetencies, &candidate);
        assert_eq!(
            s.parse("```json\n[\"Delivery\", \"Planning\"]\n```").unwrap(),
            vec!["Delivery", "Planning"]
        );
        assert!(s.parse(r#"{"items": []}"#).is_err());
    }

    #[test]
    fn test_fallbacks_route_to_heuristics() {
        let candidate = CandidateProfile {
            skills: vec!["Kubernetes".to_string(), "Negotiation".to_string()],
            certifications: vec!["CKA".to_string()],
            ..Default::default()
        };
        assert_eq!(
            step(ListFacet::TechnicalExpertise, &candidate).fallback(),
            vec!["Kubernetes"]
        );
        assert_eq!(
            step(ListFacet::Certifications, &candidate).fallback(),
            vec!["CKA"]
        );
        assert_eq!(
            step(ListFacet::CoreCompetencies, &candidate).fallback(),
            vec!["Kubernetes", "Negotiation"]
        );
    }
}
