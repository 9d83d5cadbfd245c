//! Properties of the timeline and budget allocators over their whole input range

use chrono::{Months, NaiveDate};
use proposal_forge::budget::{allocate_budget, budget_from_str};
use proposal_forge::templates::{ProposalType, milestone_template, phase_template};
use proposal_forge::timeline::{
    MAX_DURATION_MONTHS, MIN_DURATION_MONTHS, create_gantt_chart, create_timeline,
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
}

#[test]
fn test_phases_are_contiguous_for_every_duration() {
    for proposal_type in ProposalType::ALL {
        for months in MIN_DURATION_MONTHS..=MAX_DURATION_MONTHS {
            let plan = create_timeline(months, proposal_type, start());
            let context = format!("{proposal_type} / {months} months");

            assert_eq!(plan.phases.len(), phase_template(proposal_type).len(), "{context}");
            assert_eq!(plan.phases[0].start_date, plan.start_date, "{context}");
            assert_eq!(plan.phases.last().unwrap().end_date, plan.end_date, "{context}");
            assert_eq!(plan.total_duration, months);
            for phase in &plan.phases {
                assert!(phase.months >= 1, "{context}");
                assert!(phase.end_date > phase.start_date, "{context}");
            }
            for pair in plan.phases.windows(2) {
                assert_eq!(pair[0].end_date, pair[1].start_date, "{context}");
            }
        }
    }
}

#[test]
fn test_milestones_land_on_phase_ends() {
    for proposal_type in ProposalType::ALL {
        for months in MIN_DURATION_MONTHS..=MAX_DURATION_MONTHS {
            let plan = create_timeline(months, proposal_type, start());
            assert_eq!(plan.milestones.len(), milestone_template(proposal_type).len());
            for milestone in &plan.milestones {
                assert!(
                    plan.phases.iter().any(|p| p.end_date == milestone.target_date),
                    "{} at {} is not a phase end",
                    milestone.label,
                    milestone.target_date
                );
            }
            for pair in plan.milestones.windows(2) {
                assert!(pair[0].target_date <= pair[1].target_date);
            }
        }
    }
}

#[test]
fn test_month_end_start_clamps_day() {
    // Jan 31 + 1 month has no Feb 31
    let plan = create_timeline(12, ProposalType::ResearchProject, start());
    assert_eq!(
        plan.phases[0].end_date,
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
}

#[test]
fn test_twelve_month_research_project_end_date() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let plan = create_timeline(12, ProposalType::ResearchProject, start);
    let phase_sum: u32 = plan.phases.iter().map(|p| p.months).sum();
    assert_eq!(phase_sum, 11);
    assert_eq!(plan.end_date, start.checked_add_months(Months::new(11)).unwrap());
}

#[test]
fn test_gantt_offsets_are_cumulative() {
    let plan = create_timeline(36, ProposalType::ThesisProposal, start());
    let chart = create_gantt_chart(&plan);
    assert_eq!(chart.total_months, 36);
    assert_eq!(chart.tasks[0].start_month, 0);
    for pair in chart.tasks.windows(2) {
        assert_eq!(pair[0].end_month, pair[1].start_month);
    }
    for (task, phase) in chart.tasks.iter().zip(&plan.phases) {
        assert_eq!(task.duration, phase.months);
        assert_eq!(task.task, phase.name);
    }
}

#[test]
fn test_budget_split_sums_to_total() {
    for total in [0.0, 0.01, 7.0, 50_000.0, 123_456.78, 9_999_999.99] {
        let plan = allocate_budget(total);
        assert_eq!(plan.categories.len(), 5);
        let sum: f64 = plan.categories.iter().map(|c| c.amount).sum();
        assert!((sum - total).abs() < 1e-6, "{total} vs {sum}");
        let pct: u32 = plan.categories.iter().map(|c| u32::from(c.percentage)).sum();
        assert_eq!(pct, 100);
    }
}

#[test]
fn test_budget_string_forms() {
    assert_eq!(budget_from_str("50000").unwrap().total, 50_000.0);
    assert_eq!(budget_from_str("$1,000,000").unwrap().total, 1_000_000.0);
    assert!(budget_from_str("TBD").is_none());
    assert!(budget_from_str("   ").is_none());
}
