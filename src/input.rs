//! User-supplied facts and their validation

use serde::{Deserialize, Serialize};

use crate::error::{ProposalError, Result};
use crate::templates::ProposalType;
use crate::timeline::{MAX_DURATION_MONTHS, MIN_DURATION_MONTHS};

pub const DEFAULT_RESEARCHER: &str = "Anonymous Researcher";
pub const DEFAULT_FIELD: &str = "Sciences";
pub const DEFAULT_DURATION_MONTHS: u32 = 12;
pub const DEFAULT_CITATION_FORMAT: &str = "APA";

/// Input keys, named as the process environment names them
pub mod keys {
    pub const TITLE: &str = "research_title";
    pub const QUESTION: &str = "research_question";
    pub const METHODOLOGY: &str = "methodology";
    pub const OUTCOMES: &str = "expected_outcomes";
    pub const RESEARCHER: &str = "researcher_name";
    pub const FIELD: &str = "field_of_study";
    pub const DURATION: &str = "duration_months";
    pub const PROPOSAL_TYPE: &str = "proposal_type";
    pub const INSTITUTION: &str = "institution";
    pub const BUDGET: &str = "budget";
    pub const REFERENCES: &str = "references";
    pub const CITATION_FORMAT: &str = "citation_format";
}

/// Facts exactly as the user supplied them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub title: String,
    pub question: String,
    pub methodology: String,
    pub outcomes: String,
    pub researcher_name: String,
    pub field: String,
    pub duration_months: u32,
    pub proposal_type: ProposalType,
    pub institution: String,
    pub budget: String,
    pub references: String,
    pub citation_format: String,
}

impl RawInput {
    /// Minimal input with defaults for every optional fact
    pub fn new(
        title: impl Into<String>,
        question: impl Into<String>,
        methodology: impl Into<String>,
        outcomes: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            question: question.into(),
            methodology: methodology.into(),
            outcomes: outcomes.into(),
            researcher_name: DEFAULT_RESEARCHER.to_string(),
            field: DEFAULT_FIELD.to_string(),
            duration_months: DEFAULT_DURATION_MONTHS,
            proposal_type: ProposalType::ResearchProject,
            institution: String::new(),
            budget: String::new(),
            references: String::new(),
            citation_format: DEFAULT_CITATION_FORMAT.to_string(),
        }
    }

    /// Build from a key lookup (environment, CLI flags, or both layered)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        let or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let duration_months = match lookup(keys::DURATION) {
            Some(v) if !v.trim().is_empty() => parse_duration(&v)?,
            _ => DEFAULT_DURATION_MONTHS,
        };

        Ok(Self {
            title: get(keys::TITLE),
            question: get(keys::QUESTION),
            methodology: get(keys::METHODOLOGY),
            outcomes: get(keys::OUTCOMES),
            researcher_name: or_default(keys::RESEARCHER, DEFAULT_RESEARCHER),
            field: or_default(keys::FIELD, DEFAULT_FIELD),
            duration_months,
            proposal_type: ProposalType::parse(&get(keys::PROPOSAL_TYPE)),
            institution: get(keys::INSTITUTION),
            budget: get(keys::BUDGET),
            references: get(keys::REFERENCES),
            citation_format: or_default(keys::CITATION_FORMAT, DEFAULT_CITATION_FORMAT),
        })
    }

    /// Load from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Required facts present and duration within 1..=60 months
    pub fn validate(&self) -> Result<()> {
        let required = [
            (keys::TITLE, &self.title),
            (keys::QUESTION, &self.question),
            (keys::METHODOLOGY, &self.methodology),
            (keys::OUTCOMES, &self.outcomes),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ProposalError::validation(format!(
                    "Required field '{}' is missing. Please provide all required information.",
                    name
                )));
            }
        }
        if !(MIN_DURATION_MONTHS..=MAX_DURATION_MONTHS).contains(&self.duration_months) {
            return Err(duration_error());
        }
        Ok(())
    }
}

fn duration_error() -> ProposalError {
    ProposalError::validation(format!(
        "Duration must be between {} and {} months",
        MIN_DURATION_MONTHS, MAX_DURATION_MONTHS
    ))
}

fn parse_duration(value: &str) -> Result<u32> {
    let months: i64 = value.trim().parse().map_err(|_| {
        ProposalError::validation(format!(
            "duration_months must be a whole number of months, got '{}'",
            value.trim()
        ))
    })?;
    u32::try_from(months).map_err(|_| duration_error())
}

/// Polished facts; built from a RawInput, never by mutating it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedInput {
    pub title: String,
    pub question: String,
    pub methodology: String,
    pub outcomes: String,
    pub researcher_name: String,
    pub field: String,
    pub duration_months: u32,
    pub proposal_type: ProposalType,
    pub institution: String,
    pub budget: String,
    pub references: String,
    pub citation_format: String,
}

impl EnhancedInput {
    /// Carry the non-enhanced facts over from `raw`
    pub fn from_parts(
        raw: &RawInput,
        title: String,
        question: String,
        methodology: String,
        outcomes: String,
        researcher_name: String,
    ) -> Self {
        Self {
            title,
            question,
            methodology,
            outcomes,
            researcher_name,
            field: raw.field.clone(),
            duration_months: raw.duration_months,
            proposal_type: raw.proposal_type,
            institution: raw.institution.clone(),
            budget: raw.budget.clone(),
            references: raw.references.clone(),
            citation_format: raw.citation_format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn complete_pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            (keys::TITLE, "sleep and memory"),
            (keys::QUESTION, "does sleep help memory"),
            (keys::METHODOLOGY, "a randomized sleep study"),
            (keys::OUTCOMES, "better recall"),
        ]
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let raw = RawInput::from_lookup(lookup_from(&complete_pairs())).unwrap();
        assert_eq!(raw.researcher_name, DEFAULT_RESEARCHER);
        assert_eq!(raw.field, "Sciences");
        assert_eq!(raw.duration_months, 12);
        assert_eq!(raw.proposal_type, ProposalType::ResearchProject);
        assert_eq!(raw.citation_format, "APA");
        assert!(raw.budget.is_empty());
        assert!(raw.validate().is_ok());
    }

    #[test]
    fn missing_required_field_names_it() {
        let pairs: Vec<_> = complete_pairs()
            .into_iter()
            .filter(|(k, _)| *k != keys::METHODOLOGY)
            .collect();
        let raw = RawInput::from_lookup(lookup_from(&pairs)).unwrap();
        let err = raw.validate().unwrap_err().to_string();
        assert!(err.contains("'methodology'"), "{err}");
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut raw = RawInput::new("t", "q", "m", "o");
        raw.outcomes = "   ".to_string();
        assert!(matches!(
            raw.validate(),
            Err(ProposalError::Validation { .. })
        ));
    }

    #[test]
    fn duration_bounds() {
        let mut raw = RawInput::new("t", "q", "m", "o");
        for ok in [1, 60] {
            raw.duration_months = ok;
            assert!(raw.validate().is_ok());
        }
        for bad in [0, 61] {
            raw.duration_months = bad;
            assert_eq!(
                raw.validate().unwrap_err().to_string(),
                "Validation error: Duration must be between 1 and 60 months"
            );
        }
    }

    #[test]
    fn bad_duration_strings_are_validation_errors() {
        let mut pairs = complete_pairs();
        pairs.push((keys::DURATION, "twelve"));
        assert!(matches!(
            RawInput::from_lookup(lookup_from(&pairs)),
            Err(ProposalError::Validation { .. })
        ));

        let mut pairs = complete_pairs();
        pairs.push((keys::DURATION, "-3"));
        assert!(matches!(
            RawInput::from_lookup(lookup_from(&pairs)),
            Err(ProposalError::Validation { .. })
        ));
    }

    #[test]
    fn enhanced_input_keeps_context() {
        let mut raw = RawInput::new("t", "q", "m", "o");
        raw.budget = "$10".to_string();
        raw.duration_months = 24;
        let enhanced = EnhancedInput::from_parts(
            &raw,
            "T".into(),
            "Q?".into(),
            "M".into(),
            "O".into(),
            "N".into(),
        );
        assert_eq!(enhanced.budget, "$10");
        assert_eq!(enhanced.duration_months, 24);
        assert_eq!(raw.title, "t");
    }
}
