//! Fallback Heuristics — deterministic stand-ins for every generated facet.
//!
//! No I/O, no randomness, no LLM. Each function only reshapes the input data,
//! so the same input always yields byte-identical output.

use std::sync::LazyLock;

use regex::Regex;

use crate::enrichment::models::{
    unique_items, CandidateProfile, EnrichedExperience, JobAnalysis, JobDescription,
    OptimizedSkills, WorkEntry,
};

static TECHNICAL_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(aws|azure|gcp|cloud|python|java|javascript|typescript|rust|golang|ruby|php|scala|kotlin|swift|sql|nosql|postgres\w*|mysql|mongodb|redis|docker|kubernetes|terraform|ansible|linux|unix|git|ci/cd|devops|react|angular|vue|node(\.js)?|django|flask|spring|api|apis|rest|graphql|microservices|machine learning|ml|ai|data\w*|analytics|tableau|power bi|excel|sap|salesforce|html|css|security|network\w*|software|programming|architecture|infrastructure|etl|spark|hadoop|kafka)\b|c\+\+|c#|\.net\b",
    )
    .unwrap()
});

static LEADERSHIP_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(lead\w*|manag\w*|strateg\w*|director|executive|mentor\w*|coach\w*|vision\w*|stakeholder\w*|governance|budget\w*|p&l|team building|head of)\b",
    )
    .unwrap()
});

static RESPONSIBILITY_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n;•]|\.\s+").unwrap());

const DEFAULT_TECHNICAL: &[&str] = &["Technical Problem Solving", "Process Improvement"];
const DEFAULT_FUNCTIONAL: &[&str] = &["Communication", "Problem Solving"];
const DEFAULT_LEADERSHIP: &[&str] = &["Collaboration", "Stakeholder Engagement"];

const GENERIC_SOFT_SKILLS: &[&str] = &["Communication", "Collaboration", "Problem Solving"];
const CORE_COMPETENCY_LIMIT: usize = 8;
const EXPERTISE_SKILL_LIMIT: usize = 5;
const EXPERTISE_LIMIT: usize = 10;

pub fn is_technical(skill: &str) -> bool {
    TECHNICAL_KEYWORDS.is_match(skill)
}

pub fn is_leadership(skill: &str) -> bool {
    LEADERSHIP_KEYWORDS.is_match(skill)
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Job analysis
// ────────────────────────────────────────────────────────────────────────────

/// Generic analysis built from an already-normalized job.
pub fn job_analysis(job: &JobDescription) -> JobAnalysis {
    let skills = unique_items(&job.skills);
    let requirements = unique_items(&job.requirements);
    let text = job.text.to_lowercase();

    let key_skills_required = if skills.is_empty() {
        owned(&["Professional Skills"])
    } else {
        skills.clone()
    };
    let experience_emphasis = if requirements.is_empty() {
        owned(&["Relevant professional experience"])
    } else {
        requirements.clone()
    };

    JobAnalysis {
        key_skills_required,
        experience_emphasis,
        industry_context: "General".to_string(),
        seniority_level: "mid".to_string(),
        technical_focus: skills.iter().filter(|s| is_technical(s)).cloned().collect(),
        soft_skills_needed: owned(GENERIC_SOFT_SKILLS),
        client_facing: text.contains("client") || text.contains("customer"),
        leadership_required: requirements
            .iter()
            .chain(skills.iter())
            .any(|s| is_leadership(s)),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Candidate facets
// ────────────────────────────────────────────────────────────────────────────

/// Existing summary, or a sentence built from title, years and top skills.
pub fn summary(candidate: &CandidateProfile) -> String {
    if let Some(existing) = non_blank(candidate.summary.as_deref()) {
        return existing.to_string();
    }

    let title = non_blank(candidate.title.as_deref()).unwrap_or("Experienced professional");
    let years = match candidate.years_of_experience {
        Some(n) if n > 0 => format!(" with {n}+ years of experience"),
        _ => String::new(),
    };
    let top: Vec<String> = unique_items(&candidate.skills).into_iter().take(3).collect();
    let skills = match top.as_slice() {
        [] => String::new(),
        [only] => format!(", skilled in {only}"),
        [init @ .., last] => format!(", skilled in {} and {last}", init.join(", ")),
    };
    format!("{title}{years}{skills}.")
}

/// Buckets skills by keyword: technical first, then leadership, else functional.
/// An empty bucket gets a small generic default.
pub fn skills(candidate: &CandidateProfile) -> OptimizedSkills {
    let mut buckets = OptimizedSkills::default();
    for skill in unique_items(&candidate.skills) {
        if is_technical(&skill) {
            buckets.technical.push(skill);
        } else if is_leadership(&skill) {
            buckets.leadership.push(skill);
        } else {
            buckets.functional.push(skill);
        }
    }

    for (bucket, defaults) in [
        (&mut buckets.technical, DEFAULT_TECHNICAL),
        (&mut buckets.functional, DEFAULT_FUNCTIONAL),
        (&mut buckets.leadership, DEFAULT_LEADERSHIP),
    ] {
        if bucket.is_empty() {
            *bucket = owned(defaults);
        }
    }
    buckets
}

/// One role rendered from its own responsibilities text plus templated achievements.
pub fn experience_entry(candidate: &CandidateProfile, entry: &WorkEntry) -> EnrichedExperience {
    let title = non_blank(Some(entry.title.as_str()));
    let company = non_blank(Some(entry.company.as_str()));
    let role = title.unwrap_or("the role");
    let employer = company.unwrap_or("the organisation");

    let responsibilities = split_responsibilities(&entry.responsibilities);
    let enhanced_description = match non_blank(Some(entry.responsibilities.as_str())) {
        Some(text) => text.to_string(),
        None => match (title, company) {
            (Some(t), Some(c)) => format!("{t} at {c}."),
            (Some(t), None) => format!("{t}."),
            (None, Some(c)) => format!("Role at {c}."),
            (None, None) => String::new(),
        },
    };

    let key_achievements = vec![
        format!("Delivered the core responsibilities of {role} at {employer}"),
        format!("Contributed to team objectives and business outcomes at {employer}"),
        format!("Built effective working relationships with colleagues and stakeholders as {role}"),
    ];

    let lowered = entry.responsibilities.to_lowercase();
    let technical_environment = unique_items(&candidate.skills)
        .into_iter()
        .filter(|s| is_technical(s) && lowered.contains(&s.to_lowercase()))
        .collect();

    EnrichedExperience {
        company: entry.company.clone(),
        title: entry.title.clone(),
        period: entry.period(),
        enhanced_description,
        key_achievements,
        technical_environment,
        responsibilities,
    }
}

/// Every role, in input order.
#[cfg(test)]
pub fn experience(candidate: &CandidateProfile) -> Vec<EnrichedExperience> {
    candidate
        .experience
        .iter()
        .map(|entry| experience_entry(candidate, entry))
        .collect()
}

/// Splits free text into bullet-sized items, dropping list markers.
pub fn split_responsibilities(text: &str) -> Vec<String> {
    RESPONSIBILITY_SPLIT
        .split(text)
        .map(|item| {
            item.trim()
                .trim_start_matches(['-', '*', '•'])
                .trim()
                .trim_end_matches('.')
                .trim()
        })
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Title, leading skills and employers as tags.
pub fn areas_of_expertise(candidate: &CandidateProfile) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    if let Some(title) = non_blank(candidate.title.as_deref()) {
        tags.push(title.to_string());
    }
    tags.extend(
        unique_items(&candidate.skills)
            .into_iter()
            .take(EXPERTISE_SKILL_LIMIT),
    );
    tags.extend(candidate.experience.iter().map(|e| e.company.clone()));

    let mut tags = unique_items(&tags);
    tags.truncate(EXPERTISE_LIMIT);
    if tags.is_empty() {
        tags = owned(&["Professional Experience"]);
    }
    tags
}

pub fn education(candidate: &CandidateProfile) -> Vec<String> {
    unique_items(&candidate.education)
}

pub fn certifications(candidate: &CandidateProfile) -> Vec<String> {
    unique_items(&candidate.certifications)
}

pub fn core_competencies(candidate: &CandidateProfile) -> Vec<String> {
    unique_items(&candidate.skills)
        .into_iter()
        .take(CORE_COMPETENCY_LIMIT)
        .collect()
}

pub fn technical_expertise(candidate: &CandidateProfile) -> Vec<String> {
    unique_items(&candidate.skills)
        .into_iter()
        .filter(|s| is_technical(s))
        .collect()
}

/// Templated pitch from title and years, aimed at the client or the role when known.
pub fn value_proposition(
    candidate: &CandidateProfile,
    job: Option<&JobDescription>,
    client_name: Option<&str>,
) -> String {
    let title = non_blank(candidate.title.as_deref()).unwrap_or("Experienced professional");
    let experience = match candidate.years_of_experience {
        Some(n) if n > 0 => format!("{n}+ years of hands-on experience"),
        _ => "hands-on, practical experience".to_string(),
    };
    let target = match (
        non_blank(client_name),
        job.and_then(|j| non_blank(j.title.as_deref())),
    ) {
        (Some(client), _) => client.to_string(),
        (None, Some(role)) => format!("the {role} role"),
        (None, None) => "your team".to_string(),
    };
    format!("{title} bringing {experience} to {target}.")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn candidate() -> CandidateProfile {
        CandidateProfile {
            title: Some("Cloud Architect".to_string()),
            years_of_experience: Some(12),
            skills: vec![
                "AWS".to_string(),
                "Team Leadership".to_string(),
                "Negotiation".to_string(),
                "Python".to_string(),
                "aws".to_string(),
            ],
            experience: vec![WorkEntry {
                company: "Acme".to_string(),
                title: "Lead Engineer".to_string(),
                start_date: "2018".to_string(),
                end_date: "2023".to_string(),
                responsibilities: "Migrated billing to AWS. Mentored four engineers; ran design reviews"
                    .to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_skills_buckets_by_keyword() {
        let candidate = CandidateProfile {
            skills: vec!["AWS".to_string(), "Team Leadership".to_string()],
            ..Default::default()
        };
        let buckets = skills(&candidate);
        assert!(buckets.technical.contains(&"AWS".to_string()));
        assert!(buckets.leadership.contains(&"Team Leadership".to_string()));
        assert_eq!(buckets.functional, DEFAULT_FUNCTIONAL);
    }

    #[test]
    fn test_skills_empty_candidate_gets_three_nonempty_buckets() {
        let buckets = skills(&CandidateProfile::default());
        assert!(!buckets.technical.is_empty());
        assert!(!buckets.functional.is_empty());
        assert!(!buckets.leadership.is_empty());
    }

    #[test]
    fn test_skills_deduplicates() {
        let buckets = skills(&candidate());
        assert_eq!(buckets.technical, vec!["AWS", "Python"]);
        assert_eq!(buckets.functional, vec!["Negotiation"]);
    }

    #[test]
    fn test_summary_prefers_existing() {
        let mut c = candidate();
        c.summary = Some("  Builds resilient platforms.  ".to_string());
        assert_eq!(summary(&c), "Builds resilient platforms.");
    }

    #[test]
    fn test_summary_template() {
        assert_eq!(
            summary(&candidate()),
            "Cloud Architect with 12+ years of experience, skilled in AWS, Team Leadership and Negotiation."
        );
        assert_eq!(
            summary(&CandidateProfile::default()),
            "Experienced professional."
        );
    }

    #[test]
    fn test_experience_entry_uses_own_text_and_input_identity() {
        let c = candidate();
        let entry = experience_entry(&c, &c.experience[0]);
        assert_eq!(entry.company, "Acme");
        assert_eq!(entry.title, "Lead Engineer");
        assert_eq!(entry.period, "2018 - 2023");
        assert_eq!(entry.enhanced_description, c.experience[0].responsibilities);
        assert_eq!(
            entry.responsibilities,
            vec![
                "Migrated billing to AWS",
                "Mentored four engineers",
                "ran design reviews"
            ]
        );
        assert_eq!(entry.technical_environment, vec!["AWS"]);
        assert_eq!(entry.key_achievements.len(), 3);
        assert!(entry.key_achievements[0].contains("Lead Engineer"));
        assert!(entry.key_achievements[0].contains("Acme"));
    }

    #[test]
    fn test_experience_keeps_cardinality_and_order() {
        let mut c = candidate();
        for company in ["Beta", "Gamma", "Delta", "Epsilon"] {
            c.experience.push(WorkEntry {
                company: company.to_string(),
                ..Default::default()
            });
        }
        let entries = experience(&c);
        assert_eq!(entries.len(), 5);
        let companies: Vec<_> = entries.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(companies, vec!["Acme", "Beta", "Gamma", "Delta", "Epsilon"]);
        assert_eq!(entries[1].enhanced_description, "Role at Beta.");
    }

    #[test]
    fn test_split_responsibilities_strips_markers() {
        let text = "- Owned the roadmap.\n* Ran hiring\n• Cut costs";
        assert_eq!(
            split_responsibilities(text),
            vec!["Owned the roadmap", "Ran hiring", "Cut costs"]
        );
        assert!(split_responsibilities("   ").is_empty());
    }

    #[test]
    fn test_areas_of_expertise_from_title_skills_employers() {
        let tags = areas_of_expertise(&candidate());
        assert_eq!(
            tags,
            vec!["Cloud Architect", "AWS", "Team Leadership", "Negotiation", "Python", "Acme"]
        );
        assert_eq!(
            areas_of_expertise(&CandidateProfile::default()),
            vec!["Professional Experience"]
        );
    }

    #[test]
    fn test_core_competencies_caps_at_eight() {
        let c = CandidateProfile {
            skills: (1..=12).map(|i| format!("Skill {i}")).collect(),
            ..Default::default()
        };
        let competencies = core_competencies(&c);
        assert_eq!(competencies.len(), 8);
        assert_eq!(competencies[0], "Skill 1");
    }

    #[test]
    fn test_technical_expertise_filters_allowlist() {
        assert_eq!(technical_expertise(&candidate()), vec!["AWS", "Python"]);
    }

    #[test]
    fn test_technical_keywords_handle_symbols() {
        assert!(is_technical("C++"));
        assert!(is_technical("C#"));
        assert!(is_technical("ASP.NET"));
        assert!(!is_technical("Negotiation"));
    }

    #[test]
    fn test_value_proposition_targets() {
        let c = candidate();
        assert_eq!(
            value_proposition(&c, None, Some("Globex")),
            "Cloud Architect bringing 12+ years of hands-on experience to Globex."
        );
        let job = JobDescription {
            title: Some("Platform Lead".to_string()),
            ..Default::default()
        };
        assert_eq!(
            value_proposition(&c, Some(&job), None),
            "Cloud Architect bringing 12+ years of hands-on experience to the Platform Lead role."
        );
        assert_eq!(
            value_proposition(&CandidateProfile::default(), None, None),
            "Experienced professional bringing hands-on, practical experience to your team."
        );
    }

    #[test]
    fn test_job_analysis_from_normalized_job() {
        let job = JobDescription {
            text: "Client-facing role".to_string(),
            requirements: vec!["Leadership experience".to_string()],
            skills: vec!["Python".to_string(), "AWS".to_string(), "Communication".to_string()],
            ..Default::default()
        };
        let analysis = job_analysis(&job);
        assert_eq!(analysis.key_skills_required, vec!["Python", "AWS", "Communication"]);
        assert_eq!(analysis.technical_focus, vec!["Python", "AWS"]);
        assert_eq!(analysis.seniority_level, "mid");
        assert!(analysis.client_facing);
        assert!(analysis.leadership_required);
    }

    #[test]
    fn test_job_analysis_empty_job_is_generic() {
        let analysis = job_analysis(&JobDescription::default());
        assert_eq!(analysis.key_skills_required, vec!["Professional Skills"]);
        assert!(!analysis.client_facing);
        assert!(!analysis.leadership_required);
    }

    #[test]
    fn test_fallbacks_are_deterministic() {
        let c = candidate();
        assert_eq!(experience(&c), experience(&c));
        assert_eq!(skills(&c), skills(&c));
        assert_eq!(summary(&c), summary(&c));
    }
}
