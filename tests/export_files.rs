//! Exporter output on disk

use chrono::NaiveDate;
use proposal_forge::clients::AiProvider;
use proposal_forge::export::{
    ERROR_FILE, ExportSummary, JsonRenderer, MarkdownRenderer, ProposalRenderer, SUMMARY_FILE,
    write_error, write_summary,
};
use proposal_forge::input::RawInput;
use proposal_forge::proposal::{ProposalAssembler, ProposalPayload};
use proposal_forge::templates::ProposalType;

async fn payload(budget: &str, references: &str) -> ProposalPayload {
    let mut raw = RawInput::new(
        "machine learning for crop yield",
        "how can satellite data predict crop yield",
        "gradient boosted models trained on ten years of imagery",
        "A yield model with under ten percent error.",
    );
    raw.field = "Engineering".to_string();
    raw.proposal_type = ProposalType::ThesisProposal;
    raw.institution = "State University".to_string();
    raw.budget = budget.to_string();
    raw.references = references.to_string();
    let provider = AiProvider::disabled();
    ProposalAssembler::new(&provider)
        .assemble(&raw, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_json_snapshot_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let payload = payload("$80,000", "").await;
    let path = JsonRenderer.render(&payload, dir.path()).unwrap();

    assert!(path.ends_with("proposal_data.json"));
    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["metadata"]["proposal_type"], "Thesis Proposal");
    assert_eq!(value["metadata"]["provider"], "none");
    assert_eq!(value["sections"]["objectives"]["hypotheses"].as_array().unwrap().len(), 2);
    assert_eq!(value["template"]["formatting"]["citation_style"], "IEEE");
    assert_eq!(value["budget"]["categories"][0]["amount"], 32_000.0);

    let back: ProposalPayload = serde_json::from_str(&text).unwrap();
    assert_eq!(back, payload);
}

#[tokio::test]
async fn test_markdown_document_layout() {
    let dir = tempfile::tempdir().unwrap();
    let payload = payload("$80,000", "Smith, J. (2020). Crops.\n\nDoe, A. (2021). Yield.").await;
    let path = MarkdownRenderer.render(&payload, dir.path()).unwrap();
    let md = std::fs::read_to_string(path).unwrap();

    assert!(md.starts_with("# Machine Learning for Crop Yield\n"));
    assert!(md.contains("**Institution:** State University"));
    assert!(md.contains("## 1. Executive Summary"));
    assert!(md.contains("## 4. Research Questions and Objectives"));
    assert!(md.contains("| Literature Review | "));
    assert!(md.contains("September 2025"));
    assert!(md.contains("| Personnel | $32,000.00 | 40% |"));
    assert!(md.contains("## 8. Budget"));
    assert!(md.contains("## 9. References"));
    assert!(md.contains("*Citation Format: APA*"));
    assert!(md.contains("Doe, A. (2021). Yield."));
}

#[tokio::test]
async fn test_markdown_without_budget_or_references() {
    let payload = payload("", "").await;
    let md = MarkdownRenderer.render_to_string(&payload).unwrap();
    assert!(!md.contains("Budget"));
    assert!(!md.contains("References"));
    assert!(md.contains("## 7. Timeline"));
}

#[test]
fn test_summary_and_error_reports() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested");

    let summary = ExportSummary {
        written: vec![out.join("research_proposal.md")],
        sections: 6,
        ai_used: false,
        provider: "none".to_string(),
    };
    let path = write_summary(&out, &summary).unwrap();
    assert!(path.ends_with(SUMMARY_FILE));
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("Sections Created: 6"));
    assert!(text.contains("Content Generation: template-based"));

    let path = write_error(&out, "Validation error: bad input").unwrap();
    assert!(path.ends_with(ERROR_FILE));
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.starts_with("Error: Validation error: bad input\n"));
    assert!(text.contains("2. Ensure duration is between 1-60 months"));
}
