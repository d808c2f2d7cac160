#![deny(warnings)]

//! Core domain models and invariants for the capital allocation advisor.
//!
//! This crate defines the serializable project table, the closed set of
//! forecast scenarios, the engine assumptions, and validation helpers that
//! guarantee basic invariants before any computation runs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A candidate capital project: one row of the input table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Human-readable project name, unique within a portfolio.
    pub name: String,
    /// Expected annual revenue in currency units (>= 0).
    pub expected_annual_revenue: Decimal,
    /// Annual operating cost in currency units (>= 0).
    pub annual_cost: Decimal,
    /// Upfront investment in currency units (>= 0).
    pub initial_investment: Decimal,
    /// Number of cash-flow periods in years (1..=100).
    pub duration_years: u32,
    /// Probability-like risk discount in [0, 1].
    pub risk_score: f32,
    /// Qualitative strategic multiplier (>= 0, typically in [0, 1]).
    pub strategic_weight: f32,
}

/// Revenue forecast scenario. Closed set: an unrecognized name is a parse
/// error, never a silent fallthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    /// Revenue as forecast (multiplier 1.00).
    #[serde(rename = "Base Case")]
    BaseCase,
    /// Optimistic revenue (multiplier 1.15).
    #[serde(rename = "Best Case")]
    BestCase,
    /// Pessimistic revenue (multiplier 0.85).
    #[serde(rename = "Worst Case")]
    WorstCase,
}

impl Scenario {
    /// Multiplier applied to expected annual revenue.
    pub fn multiplier(self) -> Decimal {
        match self {
            Scenario::BaseCase => Decimal::ONE,
            Scenario::BestCase => Decimal::new(115, 2),
            Scenario::WorstCase => Decimal::new(85, 2),
        }
    }

    /// Display name, matching the input vocabulary.
    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::BaseCase => "Base Case",
            Scenario::BestCase => "Best Case",
            Scenario::WorstCase => "Worst Case",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Base Case" => Ok(Scenario::BaseCase),
            "Best Case" => Ok(Scenario::BestCase),
            "Worst Case" => Ok(Scenario::WorstCase),
            other => Err(ValidationError::UnknownScenario(other.to_string())),
        }
    }
}

/// Global engine parameters supplied by the host surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Periodic discount rate, e.g. 0.10 for 10%. Must be finite and > -1.
    pub discount_rate: f64,
    /// Total capital budget available for allocation (>= 0).
    pub total_budget: Decimal,
    /// Revenue forecast scenario.
    pub scenario: Scenario,
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Project name must be non-empty.
    #[error("project name must not be empty")]
    EmptyName,
    /// Project names must be unique within a portfolio.
    #[error("duplicate project name: {0}")]
    DuplicateName(String),
    /// Revenue, cost, investment, and budget must be non-negative.
    #[error("negative monetary value for project field")]
    NegativeMoney,
    /// Duration must be within [1, 100] years.
    #[error("duration of {0} years is outside supported range [1, 100]")]
    DurationOutOfRange(u32),
    /// Risk score must be within [0, 1].
    #[error("risk score {0} is outside [0, 1]")]
    RiskScoreOutOfRange(f32),
    /// Strategic weight must be finite and non-negative.
    #[error("strategic weight {0} is invalid")]
    InvalidStrategicWeight(f32),
    /// Discount rate must be finite and > -1.
    #[error("discount rate {0} is invalid; must be finite and > -1")]
    InvalidDiscountRate(f64),
    /// Budget must be non-negative.
    #[error("total budget must be >= 0")]
    NegativeBudget,
    /// Scenario name outside the closed set.
    #[error("unknown scenario: {0:?} (expected Base Case, Best Case, or Worst Case)")]
    UnknownScenario(String),
}

/// Validate a single project row.
pub fn validate_project(p: &Project) -> Result<(), ValidationError> {
    if p.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if p.expected_annual_revenue < Decimal::ZERO
        || p.annual_cost < Decimal::ZERO
        || p.initial_investment < Decimal::ZERO
    {
        return Err(ValidationError::NegativeMoney);
    }
    if !(1..=100).contains(&p.duration_years) {
        return Err(ValidationError::DurationOutOfRange(p.duration_years));
    }
    if !p.risk_score.is_finite() || !(0.0..=1.0).contains(&p.risk_score) {
        return Err(ValidationError::RiskScoreOutOfRange(p.risk_score));
    }
    if !p.strategic_weight.is_finite() || p.strategic_weight < 0.0 {
        return Err(ValidationError::InvalidStrategicWeight(p.strategic_weight));
    }
    Ok(())
}

/// Validate a whole portfolio, including cross-row name uniqueness.
pub fn validate_portfolio(projects: &[Project]) -> Result<(), ValidationError> {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    for p in projects {
        validate_project(p)?;
        if !names.insert(p.name.as_str()) {
            return Err(ValidationError::DuplicateName(p.name.clone()));
        }
    }
    Ok(())
}

/// Validate engine parameters before any row processing.
pub fn validate_assumptions(a: &Assumptions) -> Result<(), ValidationError> {
    if !a.discount_rate.is_finite() || a.discount_rate <= -1.0 {
        return Err(ValidationError::InvalidDiscountRate(a.discount_rate));
    }
    if a.total_budget < Decimal::ZERO {
        return Err(ValidationError::NegativeBudget);
    }
    Ok(())
}
