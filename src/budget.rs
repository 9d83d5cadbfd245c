//! Fixed-percentage budget split

use serde::{Deserialize, Serialize};

use crate::error::{ProposalError, Result};

/// (category, percent of total); percents sum to 100
pub const ALLOCATION: [(&str, u8); 5] = [
    ("Personnel", 40),
    ("Equipment", 25),
    ("Materials & Supplies", 15),
    ("Travel", 10),
    ("Other", 10),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    pub amount: f64,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub total: f64,
    pub categories: Vec<BudgetCategory>,
}

/// Parse a currency-like string ("$50,000", "12000.50")
pub fn parse_budget(text: &str) -> Result<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let value: f64 = cleaned.trim().parse().map_err(|_| ProposalError::Parse {
        message: format!("budget '{}' is not a number", text.trim()),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(ProposalError::Parse {
            message: format!("budget '{}' must be a non-negative amount", text.trim()),
        });
    }
    Ok(value)
}

pub fn allocate_budget(total: f64) -> BudgetPlan {
    let categories = ALLOCATION
        .iter()
        .map(|(name, pct)| BudgetCategory {
            name: name.to_string(),
            amount: total * f64::from(*pct) / 100.0,
            percentage: *pct,
        })
        .collect();
    BudgetPlan { total, categories }
}

/// Soft-fail entry point: an unparseable or empty budget means no budget section
pub fn budget_from_str(text: &str) -> Option<BudgetPlan> {
    if text.trim().is_empty() {
        return None;
    }
    match parse_budget(text) {
        Ok(total) => Some(allocate_budget(total)),
        Err(e) => {
            tracing::warn!("{}; omitting budget section", e);
            None
        }
    }
}
