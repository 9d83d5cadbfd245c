//! Proposal assembly: validate, enhance, generate, allocate, then hand one
//! payload to the renderers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::budget::{BudgetPlan, budget_from_str};
use crate::clients::AiProvider;
use crate::enhance::{EnhancementReport, InputEnhancer};
use crate::error::Result;
use crate::input::{EnhancedInput, RawInput};
use crate::sections::{Objectives, SectionGenerator, SectionParams};
use crate::templates::{FieldTemplate, ProposalType, lookup};
use crate::timeline::{GanttChart, TimelinePlan, create_gantt_chart, create_timeline};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Introduction {
    pub problem_statement: String,
    pub methodology_brief: String,
    pub significance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSections {
    pub executive_summary: String,
    pub introduction: Introduction,
    pub literature_review: String,
    pub objectives: Objectives,
    pub methodology: String,
    pub expected_outcomes: String,
    pub references: String,
}

impl ProposalSections {
    /// Number of sections a renderer will emit
    pub fn count(&self) -> usize {
        if self.references.trim().is_empty() { 6 } else { 7 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalMetadata {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub title: String,
    pub researcher: String,
    pub institution: String,
    pub field: String,
    pub proposal_type: ProposalType,
    pub duration: u32,
    pub budget: String,
    pub citation_format: String,
    pub ai_used: bool,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalPayload {
    pub metadata: ProposalMetadata,
    pub sections: ProposalSections,
    pub timeline: TimelinePlan,
    pub gantt: GanttChart,
    pub budget: Option<BudgetPlan>,
    pub template: FieldTemplate,
    pub enhancements: EnhancementReport,
}

pub struct ProposalAssembler<'a> {
    provider: &'a AiProvider,
}

impl<'a> ProposalAssembler<'a> {
    pub fn new(provider: &'a AiProvider) -> Self {
        Self { provider }
    }

    /// Build the full payload for `raw`, with the timeline starting at `start_date`.
    ///
    /// Validation runs before any provider call; nothing past it can fail.
    pub async fn assemble(&self, raw: &RawInput, start_date: NaiveDate) -> Result<ProposalPayload> {
        raw.validate()?;
        let run_id = Uuid::new_v4();
        info!(
            "Assembling proposal {} ({}, {} months, provider: {})",
            run_id,
            raw.proposal_type,
            raw.duration_months,
            self.provider.kind().as_str()
        );

        info!("Enhancing inputs");
        let enhanced = InputEnhancer::new(self.provider).enhance(raw).await;
        let enhancements = EnhancementReport::compare(raw, &enhanced);

        info!("Generating sections");
        let sections = self.sections(&enhanced).await;

        info!("Creating project timeline");
        let timeline = create_timeline(
            enhanced.duration_months,
            enhanced.proposal_type,
            start_date,
        );
        let gantt = create_gantt_chart(&timeline);
        let budget = budget_from_str(&enhanced.budget);
        let template = lookup(&enhanced.field, enhanced.proposal_type);

        let metadata = ProposalMetadata {
            run_id,
            generated_at: Utc::now(),
            title: enhanced.title.clone(),
            researcher: enhanced.researcher_name.clone(),
            institution: enhanced.institution.clone(),
            field: enhanced.field.clone(),
            proposal_type: enhanced.proposal_type,
            duration: enhanced.duration_months,
            budget: enhanced.budget.clone(),
            citation_format: enhanced.citation_format.clone(),
            ai_used: self.provider.available(),
            provider: self.provider.kind().as_str().to_string(),
        };

        Ok(ProposalPayload {
            metadata,
            sections,
            timeline,
            gantt,
            budget,
            template,
            enhancements,
        })
    }

    async fn sections(&self, input: &EnhancedInput) -> ProposalSections {
        let generator = SectionGenerator::new(self.provider);
        let params = SectionParams {
            field: &input.field,
            title: &input.title,
            question: &input.question,
            methodology: &input.methodology,
            outcomes: &input.outcomes,
            proposal_type: input.proposal_type.as_str(),
        };

        let executive_summary = generator.executive_summary(&params).await;
        let literature_review = generator.literature_review(&params).await;
        let methodology = generator.methodology(&params).await;
        let objectives = generator.objectives(&params).await;

        ProposalSections {
            executive_summary,
            introduction: Introduction {
                problem_statement: input.question.clone(),
                methodology_brief: input.methodology.clone(),
                significance: input.outcomes.clone(),
            },
            literature_review,
            objectives,
            methodology,
            expected_outcomes: input.outcomes.clone(),
            references: input.references.clone(),
        }
    }
}
