//! Fixed instruction prompts sent to the completion provider.
//!
//! Each prompt embeds the caller's text verbatim and states a target length.
//! Token budgets live next to the prompt they belong to.

use crate::templates::{GuidanceSection, section_guidance};

/// Token budget and sampling temperature for one prompt family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromptBudget {
    pub max_tokens: u32,
    pub temperature: f32,
}

pub const TITLE_BUDGET: PromptBudget = PromptBudget {
    max_tokens: 60,
    temperature: 0.3,
};
pub const QUESTION_BUDGET: PromptBudget = PromptBudget {
    max_tokens: 120,
    temperature: 0.3,
};
pub const METHODOLOGY_INPUT_BUDGET: PromptBudget = PromptBudget {
    max_tokens: 250,
    temperature: 0.5,
};
pub const OUTCOMES_INPUT_BUDGET: PromptBudget = PromptBudget {
    max_tokens: 250,
    temperature: 0.5,
};

pub const SUMMARY_BUDGET: PromptBudget = PromptBudget {
    max_tokens: 400,
    temperature: 0.7,
};
pub const LITERATURE_BUDGET: PromptBudget = PromptBudget {
    max_tokens: 600,
    temperature: 0.7,
};
pub const METHODOLOGY_BUDGET: PromptBudget = PromptBudget {
    max_tokens: 600,
    temperature: 0.7,
};
pub const OBJECTIVES_BUDGET: PromptBudget = PromptBudget {
    max_tokens: 400,
    temperature: 0.7,
};

pub fn enhance_title(title: &str, field: &str) -> String {
    format!(
        "Improve this research title for an academic proposal in {field}.\n\
         Make it clear, specific and in Title Case, under 15 words.\n\
         Keep acronyms as written. Return only the improved title, no quotes.\n\n\
         Title: {title}"
    )
}

pub fn enhance_question(question: &str, field: &str) -> String {
    format!(
        "Rewrite this as one focused, researchable question for a study in {field}.\n\
         Keep the original intent, use one sentence ending with a question mark, under 40 words.\n\
         Return only the question, no quotes.\n\n\
         Question: {question}"
    )
}

pub fn enhance_methodology(methodology: &str, field: &str) -> String {
    format!(
        "Rewrite this methodology sketch for a research proposal in {field} in precise academic language.\n\
         Keep every method the author mentions and do not invent new ones. 2-3 sentences.\n\
         Return only the rewritten text.\n\n\
         Methodology: {methodology}"
    )
}

pub fn enhance_outcomes(outcomes: &str, field: &str) -> String {
    format!(
        "Rewrite these expected outcomes for a research proposal in {field} as concrete, \
         measurable results. Keep the author's claims, 2-3 sentences.\n\
         Return only the rewritten text.\n\n\
         Expected outcomes: {outcomes}"
    )
}

pub fn executive_summary(
    title: &str,
    question: &str,
    methodology: &str,
    outcomes: &str,
    field: &str,
    proposal_type: &str,
) -> String {
    format!(
        "Generate a professional research proposal executive summary (200-250 words) for:\n\n\
         Field: {field}\n\
         Title: {title}\n\
         Research Question: {question}\n\
         Methodology: {methodology}\n\
         Expected Outcomes: {outcomes}\n\n\
         Requirements:\n\
         - Academic tone appropriate for {proposal_type}\n\
         - Highlight significance and innovation\n\
         - Include expected impact\n\
         - Follow {proposal_type} formatting standards\n\
         - Be concise but comprehensive"
    )
}

pub fn literature_review(field: &str, topic: &str, question: &str) -> String {
    let guidance = section_guidance(field, GuidanceSection::LiteratureReview);
    format!(
        "Create a literature review framework for a research proposal in {field} on the topic: {topic}\n\n\
         Research Question: {question}\n\n\
         Provide:\n\
         1. Overview of current research landscape\n\
         2. Key theoretical frameworks\n\
         3. Research gaps this study addresses\n\
         4. How this study builds on existing work\n\n\
         Guidance: {guidance}\n\n\
         Keep it academic but concise (300-400 words)."
    )
}

pub fn methodology(methodology: &str, field: &str, research_type: &str) -> String {
    let guidance = section_guidance(field, GuidanceSection::Methodology);
    format!(
        "Expand this research methodology for a {research_type} in {field}:\n\n\
         Brief methodology: {methodology}\n\n\
         Provide a detailed methodology section including:\n\
         1. Research design and approach\n\
         2. Data collection methods\n\
         3. Sample/participants (if applicable)\n\
         4. Analysis techniques\n\
         5. Validity and reliability considerations\n\n\
         Guidance: {guidance}\n\n\
         Make it specific and academically rigorous (300-400 words)."
    )
}

pub fn objectives(question: &str, field: &str) -> String {
    format!(
        "Based on this research question in {field}:\n\"{question}\"\n\n\
         Generate:\n\
         1. One primary research objective\n\
         2. 3-4 specific sub-objectives\n\
         3. 1-2 testable hypotheses (if applicable)\n\n\
         Format as structured items, concise and clear."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_inputs_verbatim() {
        let p = executive_summary("T", "Q?", "surveys", "insight", "Medical", "Grant Application");
        assert!(p.contains("Title: T\n"));
        assert!(p.contains("Research Question: Q?\n"));
        assert!(p.contains("Academic tone appropriate for Grant Application"));
        assert!(p.contains("200-250 words"));
    }

    #[test]
    fn section_prompts_carry_field_guidance() {
        let p = methodology("interviews", "Humanities", "Thesis Proposal");
        assert!(p.contains("primary source selection"));
        let p = literature_review("Engineering", "Bridges", "Why do bridges fail?");
        assert!(p.contains("engineering principles"));
    }

    #[test]
    fn title_prompt_states_word_limit() {
        assert!(enhance_title("ai in health", "Medical").contains("under 15 words"));
    }
}
