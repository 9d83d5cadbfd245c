//! Writing a finished proposal to disk.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::Result;
use crate::proposal::ProposalPayload;

pub const JSON_FILE: &str = "proposal_data.json";
pub const MARKDOWN_FILE: &str = "research_proposal.md";
pub const SUMMARY_FILE: &str = "summary.txt";
pub const ERROR_FILE: &str = "error.txt";

const RULE_WIDTH: usize = 60;

/// One output format for a payload
pub trait ProposalRenderer {
    fn file_name(&self) -> &'static str;

    fn render_to_string(&self, payload: &ProposalPayload) -> Result<String>;

    /// Render into `dir`, creating it if needed; returns the written path
    fn render(&self, payload: &ProposalPayload, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.render_to_string(payload)?)?;
        Ok(path)
    }
}

/// Pretty-printed structured snapshot
pub struct JsonRenderer;

impl ProposalRenderer for JsonRenderer {
    fn file_name(&self) -> &'static str {
        JSON_FILE
    }

    fn render_to_string(&self, payload: &ProposalPayload) -> Result<String> {
        Ok(serde_json::to_string_pretty(payload)?)
    }
}

pub struct MarkdownRenderer;

impl ProposalRenderer for MarkdownRenderer {
    fn file_name(&self) -> &'static str {
        MARKDOWN_FILE
    }

    fn render_to_string(&self, payload: &ProposalPayload) -> Result<String> {
        Ok(render_markdown(payload))
    }
}

/// "January 2025"
pub fn month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// "$12,500.00"
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

fn render_markdown(p: &ProposalPayload) -> String {
    let m = &p.metadata;
    let s = &p.sections;
    let mut out = String::new();
    let mut n = 0;
    let mut heading = |out: &mut String, title: &str| {
        n += 1;
        let _ = write!(out, "\n## {n}. {title}\n\n");
    };

    let _ = writeln!(out, "# {}\n", m.title);
    let _ = writeln!(out, "**{}**  ", m.proposal_type);
    let _ = writeln!(out, "**Researcher:** {}  ", m.researcher);
    if !m.institution.trim().is_empty() {
        let _ = writeln!(out, "**Institution:** {}  ", m.institution);
    }
    let _ = writeln!(out, "**Field of Study:** {}  ", m.field);
    let _ = writeln!(out, "**Duration:** {} months  ", m.duration);
    let _ = writeln!(out, "**Date:** {}", m.generated_at.format("%B %d, %Y"));

    heading(&mut out, "Executive Summary");
    push_paragraphs(&mut out, &s.executive_summary);

    heading(&mut out, "Introduction & Background");
    let _ = write!(out, "### Problem Statement\n\n{}\n\n", s.introduction.problem_statement);
    let _ = write!(
        out,
        "### Research Gap\n\nThis research addresses a critical gap in current understanding by \
         providing systematic investigation of the research question. Existing literature has not \
         fully explored this area, creating an opportunity for meaningful contribution to the \
         field.\n\n"
    );
    let _ = writeln!(out, "### Significance\n\n{}", s.introduction.significance);

    heading(&mut out, "Literature Review");
    push_paragraphs(&mut out, &s.literature_review);

    heading(&mut out, "Research Questions and Objectives");
    let _ = write!(out, "### Primary Research Objective\n\n{}\n\n", s.objectives.primary);
    out.push_str("### Specific Objectives\n\n");
    for (i, item) in s.objectives.sub_objectives.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, item);
    }
    if !s.objectives.hypotheses.is_empty() {
        out.push_str("\n### Research Hypotheses\n\n");
        for (i, item) in s.objectives.hypotheses.iter().enumerate() {
            let _ = writeln!(out, "- **H{}:** {}", i + 1, item);
        }
    }

    heading(&mut out, "Methodology");
    push_paragraphs(&mut out, &s.methodology);

    heading(&mut out, "Expected Outcomes");
    push_paragraphs(&mut out, &s.expected_outcomes);

    heading(&mut out, "Timeline");
    let _ = writeln!(
        out,
        "Total duration: {} months ({} to {})\n",
        p.timeline.total_duration,
        month_year(p.timeline.start_date),
        month_year(p.timeline.end_date)
    );
    out.push_str("| Phase | Duration | Period | Activities |\n|---|---|---|---|\n");
    for phase in &p.timeline.phases {
        let _ = writeln!(
            out,
            "| {} | {} | {} - {} | {} |",
            phase.name,
            phase.duration_label(),
            month_year(phase.start_date),
            month_year(phase.end_date),
            phase.activities
        );
    }
    if !p.timeline.milestones.is_empty() {
        out.push_str("\n### Key Milestones\n\n");
        for milestone in &p.timeline.milestones {
            let _ = writeln!(
                out,
                "- **{}**: {}",
                month_year(milestone.target_date),
                milestone.label
            );
        }
    }

    if let Some(budget) = &p.budget {
        heading(&mut out, "Budget");
        out.push_str("| Category | Amount | Percentage |\n|---|---:|---:|\n");
        for c in &budget.categories {
            let _ = writeln!(
                out,
                "| {} | {} | {}% |",
                c.name,
                format_currency(c.amount),
                c.percentage
            );
        }
        let _ = writeln!(
            out,
            "| **Total** | **{}** | **100%** |",
            format_currency(budget.total)
        );
    }

    if !s.references.trim().is_empty() {
        heading(&mut out, "References");
        let _ = writeln!(out, "*Citation Format: {}*\n", m.citation_format);
        for line in s.references.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let _ = writeln!(out, "{}\n", line);
        }
    }

    out
}

fn push_paragraphs(out: &mut String, text: &str) {
    for para in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        out.push_str(para);
        out.push_str("\n\n");
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    pub sections: usize,
    pub ai_used: bool,
    pub provider: String,
}

pub fn write_summary(dir: &Path, summary: &ExportSummary) -> Result<PathBuf> {
    let rule = "=".repeat(RULE_WIDTH);
    let mut text = String::from("Research Proposal Generated Successfully!\n\n");
    let _ = write!(text, "{rule}\nPROPOSAL GENERATION SUMMARY\n{rule}\n\n");
    text.push_str("Status: SUCCESS\n");
    for path in &summary.written {
        let _ = writeln!(text, "Written: {}", path.display());
    }
    let _ = writeln!(text, "Sections Created: {}", summary.sections);
    let _ = writeln!(
        text,
        "Content Generation: {}\n",
        if summary.ai_used {
            format!("AI-assisted ({})", summary.provider)
        } else {
            "template-based".to_string()
        }
    );
    text.push_str("Your research proposal is ready!\n");
    text.push_str(
        "Review the Markdown document for the full proposal and the JSON file for structured data.\n",
    );

    fs::create_dir_all(dir)?;
    let path = dir.join(SUMMARY_FILE);
    fs::write(&path, text)?;
    Ok(path)
}

/// Troubleshooting report for a failed run
pub fn error_report(error: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "Error: {error}\n\n\
         {rule}\nTROUBLESHOOTING\n{rule}\n\n\
         1. Check that all required fields are filled:\n   \
         - Research title\n   \
         - Research question/problem statement\n   \
         - Methodology description\n   \
         - Expected outcomes\n   \
         - Researcher name\n\n\
         2. Ensure duration is between 1-60 months\n\n\
         3. If using AI features, check API key is provided\n\n\
         4. Try again with corrected inputs\n"
    )
}

pub fn write_error(dir: &Path, error: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(ERROR_FILE);
    fs::write(&path, error_report(error))?;
    Ok(path)
}
