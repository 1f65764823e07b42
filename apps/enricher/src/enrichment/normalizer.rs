//! Text Extraction Normalizer — derives requirement, skill and responsibility
//! lists from free job text when the structured lists are empty.
//!
//! Pure keyword matching, no LLM call. Each list falls back to a small generic
//! default set when nothing matches, so job analysis always has context.

use std::sync::LazyLock;

use regex::Regex;

use crate::enrichment::models::JobDescription;

/// (pattern, canonical label). Patterns run against lowercased text.
type Catalogue = Vec<(Regex, &'static str)>;

fn compile(entries: &[(&str, &'static str)]) -> Catalogue {
    entries
        .iter()
        .map(|(pattern, label)| (Regex::new(pattern).unwrap(), *label))
        .collect()
}

static REQUIREMENT_CUES: LazyLock<Catalogue> = LazyLock::new(|| {
    compile(&[
        (r"\bexperience\b|\byears?\b", "Relevant professional experience"),
        (
            r"\bdegree\b|\bbachelor|\bmaster|\bphd\b|\beducation\b",
            "Relevant degree or equivalent education",
        ),
        (
            r"\bskills?\b|\bproficien|\bknowledge of\b|\bexpertise\b",
            "Strong technical skills",
        ),
        (
            r"\blead(er|ership|ing)?\b|\bmentor|\bmanage (a )?team",
            "Leadership experience",
        ),
        (
            r"\bcommunicat|\bstakeholder|\bpresentation",
            "Excellent communication skills",
        ),
    ])
});

static SKILL_CATALOGUE: LazyLock<Catalogue> = LazyLock::new(|| {
    compile(&[
        (r"\bpython\b", "Python"),
        (r"\bjava\b", "Java"),
        (r"\bjavascript\b", "JavaScript"),
        (r"\btypescript\b", "TypeScript"),
        (r"\brust\b", "Rust"),
        (r"\bgolang\b", "Go"),
        (r"\bc\+\+", "C++"),
        (r"\bc#", "C#"),
        (r"\bsql\b", "SQL"),
        (r"\baws\b|\bamazon web services\b", "AWS"),
        (r"\bazure\b", "Azure"),
        (r"\bgcp\b|\bgoogle cloud\b", "GCP"),
        (r"\bdocker\b", "Docker"),
        (r"\bkubernetes\b|\bk8s\b", "Kubernetes"),
        (r"\bterraform\b", "Terraform"),
        (r"\blinux\b", "Linux"),
        (r"\breact\b", "React"),
        (r"\bnode(\.js)?\b", "Node.js"),
        (r"\bmachine learning\b|\bml\b", "Machine Learning"),
        (r"\bdata analy", "Data Analysis"),
        (r"\bci/cd\b|\bcontinuous integration\b", "CI/CD"),
        (r"\bdevops\b", "DevOps"),
        (r"\bagile\b", "Agile"),
        (r"\bscrum\b", "Scrum"),
        (r"\bproject management\b", "Project Management"),
        (r"\bleadership\b", "Leadership"),
        (r"\bcommunication\b", "Communication"),
        (r"\bproblem[- ]solving\b", "Problem Solving"),
        (r"\bteamwork\b|\bcollaboration\b", "Collaboration"),
    ])
});

static RESPONSIBILITY_CUES: LazyLock<Catalogue> = LazyLock::new(|| {
    compile(&[
        (r"\bdevelop|\bbuild\b|\bimplement", "Develop and maintain solutions"),
        (r"\bmanag", "Manage projects and deliverables"),
        (
            r"\bcollaborat|\bpartner with\b|\bwork closely\b",
            "Collaborate with cross-functional teams",
        ),
        (r"\banaly[sz]", "Analyze requirements and data"),
        (r"\bdesign", "Design systems and processes"),
    ])
});

const DEFAULT_REQUIREMENTS: &[&str] = &[
    "Relevant professional experience",
    "Strong problem-solving skills",
];
const DEFAULT_SKILLS: &[&str] = &["Communication", "Problem Solving", "Collaboration"];
const DEFAULT_RESPONSIBILITIES: &[&str] = &[
    "Deliver on role objectives",
    "Collaborate with cross-functional teams",
];

/// Fills every empty structured list of `job` from its free text.
/// Lists the caller already populated are left untouched; a job with blank
/// text is returned as is.
pub fn normalize(job: &JobDescription) -> JobDescription {
    let mut normalized = job.clone();
    let text = job.text.to_lowercase();
    if text.trim().is_empty() {
        return normalized;
    }

    if normalized.requirements.is_empty() {
        normalized.requirements = extract_requirements(&text);
    }
    if normalized.skills.is_empty() {
        normalized.skills = extract_skills(&text);
    }
    if normalized.responsibilities.is_empty() {
        normalized.responsibilities = extract_responsibilities(&text);
    }
    normalized
}

pub fn extract_requirements(text: &str) -> Vec<String> {
    scan(&REQUIREMENT_CUES, text, DEFAULT_REQUIREMENTS)
}

pub fn extract_skills(text: &str) -> Vec<String> {
    scan(&SKILL_CATALOGUE, text, DEFAULT_SKILLS)
}

pub fn extract_responsibilities(text: &str) -> Vec<String> {
    scan(&RESPONSIBILITY_CUES, text, DEFAULT_RESPONSIBILITIES)
}

/// Emits matched labels in catalogue order, or the defaults when nothing matched.
fn scan(catalogue: &Catalogue, text: &str, defaults: &[&str]) -> Vec<String> {
    let lowered = text.to_lowercase();
    let matched: Vec<String> = catalogue
        .iter()
        .filter(|(re, _)| re.is_match(&lowered))
        .map(|(_, label)| label.to_string())
        .collect();

    if matched.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        matched
    }
}
