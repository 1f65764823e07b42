// Shared prompt fragments.
// Each enrichment step defines its own template in enrichment::prompts.
// This file contains the cross-cutting instructions every template embeds.

/// Closing sentence for system prompts of steps that return JSON.
pub const JSON_ONLY_RULES: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Closing sentence for system prompts of steps that return prose.
pub const PLAIN_TEXT_RULES: &str = "Respond with the requested text only. \
    No headings, no quotation marks, no markdown, no preamble.";

/// Embedded in every user prompt. Generation may elaborate, never invent.
pub const FIDELITY_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY facts present in the candidate and job data supplied below. \
    Do NOT invent achievements, metrics, dates, employers, titles, tools, or qualifications. \
    You may rephrase and elaborate on what is there; if the data does not support a claim, omit it.";

/// Filler phrases every step must avoid.
pub const CLICHE_PHRASES: &[&str] = &[
    "results-driven",
    "detail-oriented",
    "team player",
    "go-getter",
    "think outside the box",
    "synergy",
    "dynamic professional",
    "proven track record",
    "hard-working",
    "self-starter",
    "passionate about",
    "best-in-class",
    "wears many hats",
    "rockstar",
];

/// Renders the cliché-avoidance instruction.
pub fn style_instruction() -> String {
    format!(
        "STYLE: Write in a confident, specific, professional register. \
        Never use these phrases or close variants: {}.",
        CLICHE_PHRASES
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_instruction_lists_every_phrase() {
        let rendered = style_instruction();
        for phrase in CLICHE_PHRASES {
            assert!(rendered.contains(phrase), "missing {phrase}");
        }
    }
}
