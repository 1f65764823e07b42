// All LLM prompt templates for the enrichment pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.
//
// Every user template embeds {fidelity_instruction} and {style_instruction};
// `Prompt::render` fills both alongside the step's own variables.

use crate::llm_client::prompts::{
    style_instruction, FIDELITY_INSTRUCTION, JSON_ONLY_RULES, PLAIN_TEXT_RULES,
};

/// A step's fixed prompt text and sampling settings.
#[derive(Debug)]
pub struct PromptTemplate {
    pub system: &'static str,
    pub body: &'static str,
    /// True when the system prompt must be followed by the JSON-only rules.
    pub json_output: bool,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A template together with the variables for one call.
/// Assertable without rendering or calling the generator.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub template: &'static PromptTemplate,
    pub vars: Vec<(&'static str, String)>,
}

impl Prompt {
    pub fn new(template: &'static PromptTemplate) -> Self {
        Self {
            template,
            vars: Vec::new(),
        }
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.vars.push((key, value.into()));
        self
    }

    #[cfg(test)]
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// System prompt including the output-format rules.
    pub fn system(&self) -> String {
        let rules = if self.template.json_output {
            JSON_ONLY_RULES
        } else {
            PLAIN_TEXT_RULES
        };
        format!("{} {}", self.template.system, rules)
    }

    /// User prompt with every `{placeholder}` filled.
    ///
    /// One pass over the template body: substituted values are never scanned
    /// again, so candidate text containing `{client_name}` stays verbatim.
    /// Braces that do not name a known key (JSON examples) are copied as is.
    pub fn render(&self) -> String {
        let style = style_instruction();
        let body = self.template.body;
        let mut rendered = String::with_capacity(body.len());
        let mut rest = body;

        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let filled = after
                .find('}')
                .and_then(|close| self.lookup(&after[..close], &style).map(|v| (v, close)));
            match filled {
                Some((value, close)) => {
                    rendered.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    rendered.push('{');
                    rest = after;
                }
            }
        }
        rendered.push_str(rest);
        rendered
    }

    fn lookup<'a>(&'a self, key: &str, style: &'a str) -> Option<&'a str> {
        match key {
            "fidelity_instruction" => Some(FIDELITY_INSTRUCTION),
            "style_instruction" => Some(style),
            _ => self
                .vars
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job analysis
// ────────────────────────────────────────────────────────────────────────────

pub static JOB_ANALYSIS: PromptTemplate = PromptTemplate {
    system: "You are an expert recruiter who analyzes job descriptions \
        to identify what a hiring client actually needs.",
    body: r#"{fidelity_instruction}

{style_instruction}

Analyze the job below and return a JSON object with this EXACT schema:
{
  "keySkillsRequired": ["skill"],
  "experienceEmphasis": ["kind of experience the role values"],
  "industryContext": "short industry description",
  "seniorityLevel": "junior" | "mid" | "senior" | "lead" | "executive",
  "technicalFocus": ["technology or technical area"],
  "softSkillsNeeded": ["soft skill"],
  "clientFacing": true,
  "leadershipRequired": false
}

RULES:
1. "keySkillsRequired" must contain at least one skill named in the job data
2. Only list skills, technologies and requirements the job data mentions
3. Use "mid" for seniority when the job data gives no signal

JOB TITLE: {job_title}
COMPANY: {job_company}

REQUIREMENTS:
{requirements}

SKILLS:
{skills}

RESPONSIBILITIES:
{responsibilities}

FULL TEXT:
{job_text}"#,
    json_output: true,
    temperature: 0.2,
    max_tokens: 1024,
};

// ────────────────────────────────────────────────────────────────────────────
// Summary and value proposition (plain text)
// ────────────────────────────────────────────────────────────────────────────

pub static SUMMARY: PromptTemplate = PromptTemplate {
    system: "You are an expert consultant profile writer. \
        You write concise professional summaries for candidate presentations.",
    body: r#"{fidelity_instruction}

{style_instruction}

Write a professional summary of 3 to 4 sentences for the candidate below,
tailored to the target job and client when they are given.
Return ONLY the summary as a single plain-text paragraph.

CANDIDATE:
{candidate_json}

TARGET JOB:
{job_context}

CLIENT: {client_name}"#,
    json_output: false,
    temperature: 0.7,
    max_tokens: 512,
};

pub static VALUE_PROPOSITION: PromptTemplate = PromptTemplate {
    system: "You are an expert consultant profile writer. \
        You write one-sentence value propositions for candidate presentations.",
    body: r#"{fidelity_instruction}

{style_instruction}

Write ONE sentence (at most 40 words) stating what this candidate brings to the client
and the target role. Return ONLY the sentence as plain text.

CANDIDATE:
{candidate_json}

TARGET JOB:
{job_context}

CLIENT: {client_name}"#,
    json_output: false,
    temperature: 0.7,
    max_tokens: 256,
};

// ────────────────────────────────────────────────────────────────────────────
// Skills and experience (JSON objects)
// ────────────────────────────────────────────────────────────────────────────

pub static OPTIMIZE_SKILLS: PromptTemplate = PromptTemplate {
    system: "You are an expert consultant profile writer who organizes \
        a candidate's skills for a hiring client.",
    body: r#"{fidelity_instruction}

{style_instruction}

Organize the candidate's skills into three categories and order each list by relevance
to the job analysis (most relevant first). Return a JSON object with this EXACT schema:
{
  "technical": ["skill"],
  "functional": ["skill"],
  "leadership": ["skill"]
}

RULES:
1. Every item must be one of the candidate's listed skills, optionally with clearer wording
2. Do NOT add skills the candidate does not list
3. Each skill appears in exactly one category

CANDIDATE SKILLS:
{skills}

JOB ANALYSIS:
{analysis_json}"#,
    json_output: true,
    temperature: 0.3,
    max_tokens: 1024,
};

pub static ENRICH_EXPERIENCE: PromptTemplate = PromptTemplate {
    system: "You are an expert consultant profile writer who rewrites \
        one work-history entry for a candidate presentation.",
    body: r#"{fidelity_instruction}

{style_instruction}

Rewrite the role below for a candidate presentation. Return a JSON object with this EXACT schema:
{
  "enhancedDescription": "2-3 sentence description of the role",
  "keyAchievements": ["achievement stated in the responsibilities text"],
  "technicalEnvironment": ["tool or technology named in the entry or the candidate's skills"],
  "responsibilities": ["responsibility"]
}

RULES:
1. Achievements must restate outcomes present in the responsibilities text; never add numbers
2. technicalEnvironment only lists tools named in the entry or in the candidate's skills
3. Emphasize what the job analysis values, without changing facts

ROLE:
Company: {company}
Title: {title}
Period: {period}
Responsibilities:
{responsibilities}

CANDIDATE SKILLS:
{skills}

JOB ANALYSIS:
{analysis_json}"#,
    json_output: true,
    temperature: 0.5,
    max_tokens: 1536,
};

// ────────────────────────────────────────────────────────────────────────────
// String-array steps
// ────────────────────────────────────────────────────────────────────────────

/// Shared body for steps that return a JSON array of strings.
/// Replace: {task}, {rules}, {source_label}, {source}, {job_context}
const STRING_ARRAY_BODY: &str = r#"{fidelity_instruction}

{style_instruction}

{task}
Return a JSON ARRAY of strings, for example: ["item one", "item two"]

RULES:
{rules}

{source_label}:
{source}

TARGET JOB:
{job_context}"#;

pub static AREAS_OF_EXPERTISE: PromptTemplate = PromptTemplate {
    system: "You are an expert consultant profile writer who distills \
        a candidate's background into areas of expertise.",
    body: STRING_ARRAY_BODY,
    json_output: true,
    temperature: 0.4,
    max_tokens: 512,
};

pub static OPTIMIZE_EDUCATION: PromptTemplate = PromptTemplate {
    system: "You are an expert consultant profile writer who formats \
        education entries for a candidate presentation.",
    body: STRING_ARRAY_BODY,
    json_output: true,
    temperature: 0.2,
    max_tokens: 512,
};

pub static OPTIMIZE_CERTIFICATIONS: PromptTemplate = PromptTemplate {
    system: "You are an expert consultant profile writer who formats \
        professional certifications for a candidate presentation.",
    body: STRING_ARRAY_BODY,
    json_output: true,
    temperature: 0.2,
    max_tokens: 512,
};

pub static CORE_COMPETENCIES: PromptTemplate = PromptTemplate {
    system: "You are an expert consultant profile writer who selects \
        a candidate's core competencies.",
    body: STRING_ARRAY_BODY,
    json_output: true,
    temperature: 0.4,
    max_tokens: 512,
};

pub static TECHNICAL_EXPERTISE: PromptTemplate = PromptTemplate {
    system: "You are an expert consultant profile writer who summarizes \
        a candidate's technical expertise.",
    body: STRING_ARRAY_BODY,
    json_output: true,
    temperature: 0.3,
    max_tokens: 512,
};

/// Every template, for checks that apply across the board.
#[cfg(test)]
pub fn all_templates() -> [&'static PromptTemplate; 10] {
    [
        &JOB_ANALYSIS,
        &SUMMARY,
        &VALUE_PROPOSITION,
        &OPTIMIZE_SKILLS,
        &ENRICH_EXPERIENCE,
        &AREAS_OF_EXPERTISE,
        &OPTIMIZE_EDUCATION,
        &OPTIMIZE_CERTIFICATIONS,
        &CORE_COMPETENCIES,
        &TECHNICAL_EXPERTISE,
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::llm_client::prompts::CLICHE_PHRASES;

    #[test]
    fn test_every_template_carries_fidelity_and_style_instructions() {
        for template in all_templates() {
            let rendered = Prompt::new(template).render();
            assert!(rendered.contains(FIDELITY_INSTRUCTION));
            for phrase in CLICHE_PHRASES {
                assert!(rendered.contains(phrase));
            }
        }
    }

    #[test]
    fn test_system_prompts_are_distinct() {
        let systems: HashSet<&str> = all_templates().iter().map(|t| t.system).collect();
        assert_eq!(systems.len(), all_templates().len());
    }

    #[test]
    fn test_output_rules_follow_shape() {
        assert!(Prompt::new(&OPTIMIZE_SKILLS).system().ends_with(JSON_ONLY_RULES));
        assert!(Prompt::new(&SUMMARY).system().ends_with(PLAIN_TEXT_RULES));
    }

    #[test]
    fn test_render_fills_variables() {
        let prompt = Prompt::new(&VALUE_PROPOSITION)
            .with("candidate_json", "{\"name\":\"Ada\"}")
            .with("job_context", "none")
            .with("client_name", "Globex");
        assert_eq!(prompt.var("client_name"), Some("Globex"));
        let rendered = prompt.render();
        assert!(rendered.contains("CLIENT: Globex"));
        assert!(rendered.contains("{\"name\":\"Ada\"}"));
        assert!(!rendered.contains("{client_name}"));
    }

    #[test]
    fn test_render_keeps_placeholder_text_inside_values() {
        let rendered = Prompt::new(&SUMMARY)
            .with("candidate_json", "Writes templates like {client_name} daily")
            .with("job_context", "Uses {job_context} and {fidelity_instruction} literally")
            .with("client_name", "Globex")
            .render();
        assert!(rendered.contains("Writes templates like {client_name} daily"));
        assert!(!rendered.contains("templates like Globex"));
        assert!(rendered.contains("Uses {job_context} and {fidelity_instruction} literally"));
        assert!(rendered.contains("Globex"));
    }

    #[test]
    fn test_render_copies_unknown_braces() {
        let rendered = Prompt::new(&OPTIMIZE_SKILLS)
            .with("skills", "- Rust")
            .with("analysis_json", "{\"keySkillsRequired\": [\"Rust\"]}")
            .render();
        assert!(rendered.contains("{\"keySkillsRequired\": [\"Rust\"]}"));
        assert!(!rendered.contains("{skills}"));
        assert!(!rendered.contains("{analysis_json}"));
    }
}
