//! Proportional timeline allocation.
//!
//! Phase lengths are `max(1, round(total * pct / 100))`; the rounding drift is
//! accepted, so the phase months need not add up to the requested duration.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::templates::{ProposalType, milestone_template, phase_activities, phase_template};

pub const MIN_DURATION_MONTHS: u32 = 1;
pub const MAX_DURATION_MONTHS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub activities: String,
    pub months: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Phase {
    /// "1 month" / "4 months"
    pub fn duration_label(&self) -> String {
        format!(
            "{} month{}",
            self.months,
            if self.months == 1 { "" } else { "s" }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub label: String,
    pub target_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePlan {
    pub phases: Vec<Phase>,
    pub milestones: Vec<Milestone>,
    pub total_duration: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Allocate phases and milestones for `duration_months` starting at `start`.
///
/// `duration_months` is expected to be validated to 1..=60 by the caller.
pub fn create_timeline(
    duration_months: u32,
    proposal_type: ProposalType,
    start: NaiveDate,
) -> TimelinePlan {
    let mut phases = Vec::new();
    let mut cursor = start;

    for template in phase_template(proposal_type) {
        let months = phase_months(duration_months, template.percentage);
        let end = add_months(cursor, months);
        phases.push(Phase {
            name: template.name.to_string(),
            activities: phase_activities(template.name).to_string(),
            months,
            start_date: cursor,
            end_date: end,
        });
        cursor = end;
    }

    let milestones = distribute_milestones(&phases, milestone_template(proposal_type));

    TimelinePlan {
        phases,
        milestones,
        total_duration: duration_months,
        start_date: start,
        end_date: cursor,
    }
}

fn phase_months(total: u32, percentage: u32) -> u32 {
    let raw = f64::from(total) * f64::from(percentage) / 100.0;
    (raw.round() as u32).max(1)
}

/// Calendar-month addition; the day is clamped for shorter months
fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Milestone i sits at the end of phase floor(i * phases / milestones)
fn distribute_milestones(phases: &[Phase], labels: &[&str]) -> Vec<Milestone> {
    if phases.is_empty() || labels.is_empty() {
        return Vec::new();
    }
    let interval = phases.len() as f64 / labels.len() as f64;
    let last = phases.len() - 1;

    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let index = ((i as f64 * interval).floor() as usize).min(last);
            Milestone {
                label: label.to_string(),
                target_date: phases[index].end_date,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttTask {
    pub task: String,
    pub start_month: u32,
    pub duration: u32,
    pub end_month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttChart {
    pub chart_title: String,
    pub total_months: u32,
    pub tasks: Vec<GanttTask>,
}

/// Month-offset view of a plan for chart rendering
pub fn create_gantt_chart(plan: &TimelinePlan) -> GanttChart {
    let mut month = 0;
    let tasks = plan
        .phases
        .iter()
        .map(|p| {
            let task = GanttTask {
                task: p.name.clone(),
                start_month: month,
                duration: p.months,
                end_month: month + p.months,
            };
            month += p.months;
            task
        })
        .collect();

    GanttChart {
        chart_title: "Project Timeline".to_string(),
        total_months: plan.total_duration,
        tasks,
    }
}
