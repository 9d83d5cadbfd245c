//! Field-of-study and proposal-type lookup tables.
//!
//! Both key sets are closed. Unknown fields fall back to Sciences and unknown
//! proposal types to Research Project.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalType {
    #[serde(rename = "Grant Application")]
    GrantApplication,
    #[serde(rename = "Thesis Proposal")]
    ThesisProposal,
    #[serde(rename = "Research Project")]
    ResearchProject,
    #[serde(rename = "Conference Abstract")]
    ConferenceAbstract,
}

impl ProposalType {
    pub const ALL: [ProposalType; 4] = [
        ProposalType::GrantApplication,
        ProposalType::ThesisProposal,
        ProposalType::ResearchProject,
        ProposalType::ConferenceAbstract,
    ];

    /// Case-insensitive; anything unrecognised is a Research Project
    pub fn parse(name: &str) -> Self {
        let key = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(&key))
            .unwrap_or(ProposalType::ResearchProject)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalType::GrantApplication => "Grant Application",
            ProposalType::ThesisProposal => "Thesis Proposal",
            ProposalType::ResearchProject => "Research Project",
            ProposalType::ConferenceAbstract => "Conference Abstract",
        }
    }
}

impl std::fmt::Display for ProposalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldOfStudy {
    Sciences,
    #[serde(rename = "Social Sciences")]
    SocialSciences,
    Humanities,
    Engineering,
    Medical,
    Business,
}

impl FieldOfStudy {
    pub const ALL: [FieldOfStudy; 6] = [
        FieldOfStudy::Sciences,
        FieldOfStudy::SocialSciences,
        FieldOfStudy::Humanities,
        FieldOfStudy::Engineering,
        FieldOfStudy::Medical,
        FieldOfStudy::Business,
    ];

    /// Unknown fields map to Sciences
    pub fn parse(name: &str) -> Self {
        let key = name.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(key))
            .unwrap_or(FieldOfStudy::Sciences)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldOfStudy::Sciences => "Sciences",
            FieldOfStudy::SocialSciences => "Social Sciences",
            FieldOfStudy::Humanities => "Humanities",
            FieldOfStudy::Engineering => "Engineering",
            FieldOfStudy::Medical => "Medical",
            FieldOfStudy::Business => "Business",
        }
    }
}

/// One phase of a timeline template; percentages within a template sum to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTemplate {
    pub name: &'static str,
    pub percentage: u32,
}

const fn phase(name: &'static str, percentage: u32) -> PhaseTemplate {
    PhaseTemplate { name, percentage }
}

const GRANT_PHASES: [PhaseTemplate; 5] = [
    phase("Preparation & Setup", 10),
    phase("Data Collection", 30),
    phase("Analysis", 25),
    phase("Results Interpretation", 20),
    phase("Reporting & Dissemination", 15),
];

const THESIS_PHASES: [PhaseTemplate; 5] = [
    phase("Literature Review", 20),
    phase("Methodology Development", 15),
    phase("Data Collection", 25),
    phase("Analysis & Writing", 30),
    phase("Revision & Defense", 10),
];

const RESEARCH_PHASES: [PhaseTemplate; 5] = [
    phase("Project Setup", 10),
    phase("Investigation", 35),
    phase("Analysis", 25),
    phase("Documentation", 20),
    phase("Review & Delivery", 10),
];

const CONFERENCE_PHASES: [PhaseTemplate; 3] = [
    phase("Research Execution", 50),
    phase("Analysis", 30),
    phase("Presentation Prep", 20),
];

pub fn phase_template(proposal_type: ProposalType) -> &'static [PhaseTemplate] {
    match proposal_type {
        ProposalType::GrantApplication => &GRANT_PHASES,
        ProposalType::ThesisProposal => &THESIS_PHASES,
        ProposalType::ResearchProject => &RESEARCH_PHASES,
        ProposalType::ConferenceAbstract => &CONFERENCE_PHASES,
    }
}

pub fn milestone_template(proposal_type: ProposalType) -> &'static [&'static str] {
    match proposal_type {
        ProposalType::GrantApplication => &[
            "Ethics approval obtained",
            "Data collection completed",
            "Preliminary results available",
            "Final report submitted",
        ],
        ProposalType::ThesisProposal => &[
            "Proposal defense",
            "Literature review completed",
            "Data collection finished",
            "First draft completed",
            "Final thesis defense",
        ],
        ProposalType::ResearchProject => &[
            "Project kickoff",
            "Mid-point review",
            "Data analysis completed",
            "Final deliverables submitted",
        ],
        ProposalType::ConferenceAbstract => &[
            "Research completed",
            "Abstract submitted",
            "Presentation ready",
        ],
    }
}

pub const DEFAULT_ACTIVITIES: &str = "Research activities and task completion";

/// Human-readable activities for a phase name
pub fn phase_activities(phase_name: &str) -> &'static str {
    match phase_name {
        "Preparation & Setup" => {
            "Literature review, team assembly, ethics approval, resource acquisition"
        }
        "Project Setup" => {
            "Planning, resource allocation, preliminary research, stakeholder engagement"
        }
        "Literature Review" => {
            "Comprehensive literature search, critical analysis, theoretical framework development"
        }
        "Methodology Development" => {
            "Design research instruments, pilot testing, refinement of protocols"
        }
        "Data Collection" => {
            "Systematic data gathering, participant recruitment, fieldwork, experiments"
        }
        "Investigation" => "Primary research, data collection, experimentation, field studies",
        "Analysis" => "Data processing, statistical analysis, interpretation of findings",
        "Analysis & Writing" => {
            "Data analysis, results interpretation, thesis drafting, literature integration"
        }
        "Results Interpretation" => {
            "Findings synthesis, theoretical implications, practical applications"
        }
        "Documentation" => "Report writing, documentation, results compilation",
        "Reporting & Dissemination" => {
            "Final report, presentations, publications, stakeholder communication"
        }
        "Presentation Prep" => {
            "Abstract finalization, slide preparation, presentation rehearsal"
        }
        "Revision & Defense" => "Thesis revision, defense preparation, final edits",
        "Review & Delivery" => "Quality review, final deliverables, project closure",
        "Research Execution" => "Core research activities, data collection, experimental work",
        _ => DEFAULT_ACTIVITIES,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingHints {
    pub citation_style: String,
    pub structure: String,
    pub figures: bool,
}

/// Field template merged with proposal-type customisation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTemplate {
    pub name: String,
    pub emphasis: String,
    pub methodology_focus: String,
    pub sections: Vec<String>,
    pub formatting: FormattingHints,
    pub proposal_type: ProposalType,
    pub emphasis_areas: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn base_template(
    field: FieldOfStudy,
) -> (&'static str, &'static str, [&'static str; 3], FormattingHints) {
    let hints = |citation: &str, structure: &str, figures: bool| FormattingHints {
        citation_style: citation.to_string(),
        structure: structure.to_string(),
        figures,
    };
    match field {
        FieldOfStudy::Sciences => (
            "empirical",
            "experimental design and data collection",
            ["hypothesis", "data_analysis", "validation"],
            hints("APA", "IMRAD", true),
        ),
        FieldOfStudy::SocialSciences => (
            "qualitative and quantitative",
            "mixed methods and surveys",
            ["theoretical_framework", "sampling", "ethics"],
            hints("APA", "traditional", true),
        ),
        FieldOfStudy::Humanities => (
            "interpretive",
            "critical analysis and textual interpretation",
            ["theoretical_lens", "primary_sources", "argumentation"],
            hints("MLA", "narrative", false),
        ),
        FieldOfStudy::Engineering => (
            "applied",
            "design and testing protocols",
            ["technical_specs", "prototyping", "performance_metrics"],
            hints("IEEE", "technical", true),
        ),
        FieldOfStudy::Medical => (
            "clinical",
            "clinical trials and patient outcomes",
            ["ethics_approval", "patient_criteria", "clinical_measures"],
            hints("Vancouver", "clinical", true),
        ),
        FieldOfStudy::Business => (
            "practical",
            "case studies and market analysis",
            ["market_analysis", "stakeholders", "roi"],
            hints("APA", "executive", true),
        ),
    }
}

/// Template for a field of study, customised for the proposal type
pub fn lookup(field: &str, proposal_type: ProposalType) -> FieldTemplate {
    let field = FieldOfStudy::parse(field);
    let (emphasis, methodology_focus, sections, formatting) = base_template(field);
    let mut sections = strings(&sections);

    let emphasis_areas = match proposal_type {
        ProposalType::GrantApplication => {
            sections.extend(strings(&["budget_justification", "impact_statement"]));
            strings(&["significance", "innovation", "impact"])
        }
        ProposalType::ThesisProposal => {
            sections.extend(strings(&["literature_gap", "contribution"]));
            strings(&["originality", "feasibility", "academic_rigor"])
        }
        ProposalType::ConferenceAbstract => {
            sections = strings(&["brief_method", "key_findings", "implications"]);
            strings(&["novelty", "relevance", "clarity"])
        }
        ProposalType::ResearchProject => {
            sections.extend(strings(&["deliverables", "milestones"]));
            strings(&["methodology", "outcomes", "timeline"])
        }
    };

    FieldTemplate {
        name: field.as_str().to_string(),
        emphasis: emphasis.to_string(),
        methodology_focus: methodology_focus.to_string(),
        sections,
        formatting,
        proposal_type,
        emphasis_areas,
    }
}

/// Section a piece of guidance applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidanceSection {
    Methodology,
    LiteratureReview,
    Outcomes,
}

/// Field-specific writing guidance for a section
pub fn section_guidance(field: &str, section: GuidanceSection) -> &'static str {
    let [methodology, literature_review, outcomes] = match FieldOfStudy::parse(field) {
        FieldOfStudy::Sciences => [
            "Emphasize experimental design, control variables, data collection protocols, and statistical analysis methods.",
            "Focus on recent empirical studies, theoretical frameworks, and research gaps in current scientific understanding.",
            "Specify measurable outcomes, expected data patterns, and potential scientific contributions.",
        ],
        FieldOfStudy::SocialSciences => [
            "Detail sampling strategies, survey instruments, interview protocols, and mixed-methods approaches.",
            "Integrate theoretical perspectives, previous empirical work, and social context.",
            "Describe anticipated findings, policy implications, and social impact.",
        ],
        FieldOfStudy::Humanities => [
            "Explain analytical frameworks, primary source selection, and interpretive approaches.",
            "Synthesize critical theory, historical context, and scholarly debates.",
            "Articulate intellectual contributions, new interpretations, and cultural significance.",
        ],
        FieldOfStudy::Engineering => [
            "Specify design parameters, testing procedures, validation methods, and technical requirements.",
            "Review existing technologies, engineering principles, and innovation opportunities.",
            "Define technical specifications, performance metrics, and practical applications.",
        ],
        FieldOfStudy::Medical => [
            "Detail clinical protocols, patient selection criteria, safety measures, and outcome measures.",
            "Summarize clinical evidence, treatment gaps, and medical relevance.",
            "Specify clinical endpoints, patient benefits, and healthcare implications.",
        ],
        FieldOfStudy::Business => [
            "Outline research methods, data sources, analytical frameworks, and validation approaches.",
            "Examine market trends, theoretical models, and business practices.",
            "Project business impact, ROI, stakeholder benefits, and practical recommendations.",
        ],
    };
    match section {
        GuidanceSection::Methodology => methodology,
        GuidanceSection::LiteratureReview => literature_review,
        GuidanceSection::Outcomes => outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_percentages_sum_to_100() {
        for t in ProposalType::ALL {
            let total: u32 = phase_template(t).iter().map(|p| p.percentage).sum();
            assert_eq!(total, 100, "{t}");
        }
    }

    #[test]
    fn every_template_phase_has_activities() {
        for t in ProposalType::ALL {
            for p in phase_template(t) {
                assert_ne!(phase_activities(p.name), DEFAULT_ACTIVITIES, "{}", p.name);
            }
        }
        assert_eq!(phase_activities("Unknown Phase"), DEFAULT_ACTIVITIES);
    }

    #[test]
    fn proposal_type_parse_falls_back() {
        assert_eq!(ProposalType::parse("thesis proposal"), ProposalType::ThesisProposal);
        assert_eq!(ProposalType::parse("Grant Application"), ProposalType::GrantApplication);
        assert_eq!(ProposalType::parse("Hackathon Pitch"), ProposalType::ResearchProject);
    }

    #[test]
    fn unknown_field_uses_sciences() {
        let t = lookup("Astrology", ProposalType::ResearchProject);
        assert_eq!(t.name, "Sciences");
        assert_eq!(t.formatting.structure, "IMRAD");
        assert_eq!(
            t.sections,
            strings(&["hypothesis", "data_analysis", "validation", "deliverables", "milestones"])
        );
    }

    #[test]
    fn conference_abstract_replaces_sections() {
        let t = lookup("humanities", ProposalType::ConferenceAbstract);
        assert_eq!(t.name, "Humanities");
        assert_eq!(t.sections, strings(&["brief_method", "key_findings", "implications"]));
        assert!(!t.formatting.figures);
        assert_eq!(t.emphasis_areas, strings(&["novelty", "relevance", "clarity"]));
    }

    #[test]
    fn guidance_defaults_to_sciences() {
        assert_eq!(
            section_guidance("Unknown", GuidanceSection::Methodology),
            section_guidance("Sciences", GuidanceSection::Methodology)
        );
        assert!(section_guidance("Medical", GuidanceSection::Outcomes).contains("clinical"));
    }
}
