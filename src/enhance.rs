//! Input enhancement: AI-assisted when a provider is available, rule-based otherwise.
//!
//! Every field is enhanced independently. A provider failure on one field falls
//! back for that field only and never aborts the others.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clients::AiProvider;
use crate::input::{EnhancedInput, RawInput};
use crate::normalize::{normalize_name, normalize_question, normalize_title};
use crate::prompts::{self, PromptBudget};

/// Below these lengths a field is returned as typed, provider or not
const MIN_TITLE: usize = 3;
const MIN_QUESTION: usize = 5;
const MIN_METHODOLOGY: usize = 10;
const MIN_OUTCOMES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Question,
    Methodology,
    Outcomes,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Question => "question",
            Field::Methodology => "methodology",
            Field::Outcomes => "outcomes",
        }
    }

    fn min_len(self) -> usize {
        match self {
            Field::Title => MIN_TITLE,
            Field::Question => MIN_QUESTION,
            Field::Methodology => MIN_METHODOLOGY,
            Field::Outcomes => MIN_OUTCOMES,
        }
    }

    fn prompt(self, text: &str, field_of_study: &str) -> (String, PromptBudget) {
        match self {
            Field::Title => (
                prompts::enhance_title(text, field_of_study),
                prompts::TITLE_BUDGET,
            ),
            Field::Question => (
                prompts::enhance_question(text, field_of_study),
                prompts::QUESTION_BUDGET,
            ),
            Field::Methodology => (
                prompts::enhance_methodology(text, field_of_study),
                prompts::METHODOLOGY_INPUT_BUDGET,
            ),
            Field::Outcomes => (
                prompts::enhance_outcomes(text, field_of_study),
                prompts::OUTCOMES_INPUT_BUDGET,
            ),
        }
    }

    /// Rule-based result used without a provider or after a provider failure
    fn fallback(self, text: &str) -> String {
        match self {
            Field::Title => normalize_title(text),
            Field::Question => normalize_question(text),
            Field::Methodology | Field::Outcomes => text.to_string(),
        }
    }
}

/// Which fields came out different from what the user typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementReport {
    pub title: bool,
    pub question: bool,
    pub methodology: bool,
    pub outcomes: bool,
    pub researcher_name: bool,
}

impl EnhancementReport {
    pub fn compare(raw: &RawInput, enhanced: &EnhancedInput) -> Self {
        Self {
            title: raw.title != enhanced.title,
            question: raw.question != enhanced.question,
            methodology: raw.methodology != enhanced.methodology,
            outcomes: raw.outcomes != enhanced.outcomes,
            researcher_name: raw.researcher_name != enhanced.researcher_name,
        }
    }

    pub fn any(&self) -> bool {
        self.title || self.question || self.methodology || self.outcomes || self.researcher_name
    }

    /// Labels of the changed fields, in input order
    pub fn changed_fields(&self) -> Vec<&'static str> {
        [
            (self.title, "title"),
            (self.question, "question"),
            (self.methodology, "methodology"),
            (self.outcomes, "outcomes"),
            (self.researcher_name, "researcher name"),
        ]
        .into_iter()
        .filter_map(|(changed, label)| changed.then_some(label))
        .collect()
    }
}

pub struct InputEnhancer<'a> {
    provider: &'a AiProvider,
}

impl<'a> InputEnhancer<'a> {
    pub fn new(provider: &'a AiProvider) -> Self {
        Self { provider }
    }

    pub async fn enhance(&self, raw: &RawInput) -> EnhancedInput {
        let title = self.enhance_field(Field::Title, &raw.title, &raw.field).await;
        let question = self
            .enhance_field(Field::Question, &raw.question, &raw.field)
            .await;
        let methodology = self
            .enhance_field(Field::Methodology, &raw.methodology, &raw.field)
            .await;
        let outcomes = self
            .enhance_field(Field::Outcomes, &raw.outcomes, &raw.field)
            .await;
        let researcher_name = normalize_name(&raw.researcher_name);

        EnhancedInput::from_parts(raw, title, question, methodology, outcomes, researcher_name)
    }

    async fn enhance_field(&self, field: Field, text: &str, field_of_study: &str) -> String {
        if text.trim().chars().count() < field.min_len() {
            return text.to_string();
        }
        if !self.provider.available() {
            return field.fallback(text);
        }

        let (prompt, budget) = field.prompt(text, field_of_study);
        match self
            .provider
            .complete(&prompt, budget.max_tokens, budget.temperature)
            .await
        {
            Ok(response) => {
                let cleaned = strip_quotes(&response);
                if cleaned.is_empty() {
                    debug!("Empty {} enhancement, keeping original", field.label());
                    text.to_string()
                } else {
                    cleaned
                }
            }
            Err(e) => {
                warn!(
                    "AI enhancement of {} failed: {}. Using rule-based cleanup",
                    field.label(),
                    e
                );
                field.fallback(text)
            }
        }
    }
}

/// Trim whitespace and any surrounding quote characters
pub fn strip_quotes(text: &str) -> String {
    const QUOTES: &[char] = &['"', '\'', '`', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];
    text.trim()
        .trim_matches(|c: char| QUOTES.contains(&c) || c.is_whitespace())
        .to_string()
}
