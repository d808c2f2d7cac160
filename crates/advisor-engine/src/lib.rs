#![deny(warnings)]

//! Allocation engine: scenario-adjusted cash-flow forecasting, NPV and
//! risk adjustment, ranking, and greedy budget allocation.
//!
//! The engine is a pure function of `(projects, assumptions)`. Every call
//! recomputes the full table; there is no incremental mode and no hidden
//! state, so identical inputs always produce identical output.

use advisor_core::{
    validate_assumptions, validate_portfolio, Assumptions, Project, ValidationError,
};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors produced by the allocation engine.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// Input failed validation; the whole table is rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A Decimal/f64 conversion produced a non-finite or unrepresentable value.
    #[error("non-finite numeric conversion in NPV computation")]
    NonFinite,
}

/// Funding decision for a single project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Rejected,
}

/// One ranked row of engine output: the input project plus all derived columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedProject {
    /// The input row, unchanged.
    pub project: Project,
    /// Revenue scaled by the scenario multiplier.
    pub adjusted_revenue: Decimal,
    /// Adjusted revenue minus annual cost; level across all periods.
    pub annual_cash_flow: Decimal,
    /// Discounted cash flows minus initial investment.
    pub npv: Decimal,
    /// NPV scaled by (1 - risk_score) * strategic_weight.
    pub risk_adjusted_npv: Decimal,
    /// Greedy allocation outcome.
    pub decision: Decision,
}

/// Portfolio-level aggregates over the allocation result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Budget supplied in the assumptions.
    pub total_budget: Decimal,
    /// Sum of initial investments over approved projects. Never exceeds
    /// `total_budget`.
    pub allocated_capital: Decimal,
    /// Sum of NPV over approved projects.
    pub portfolio_npv: Decimal,
    /// Number of approved projects.
    pub approved: usize,
    /// Number of rejected projects.
    pub rejected: usize,
}

/// Full engine output: rows ranked by descending risk-adjusted NPV plus
/// the summary aggregates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub projects: Vec<EvaluatedProject>,
    pub summary: PortfolioSummary,
}

/// Sum of discrete discount factors (1+rate)^-t for t in 1..=years.
///
/// Matches the closed-form annuity factor (1 - (1+r)^-n) / r for r != 0.
pub fn annuity_factor(rate: f64, years: u32) -> f64 {
    (1..=years).map(|t| (1.0 + rate).powi(-(t as i32))).sum()
}

/// NPV of a level annual cash flow discounted over `years`, minus the
/// upfront investment.
pub fn project_npv(
    annual_cash_flow: Decimal,
    years: u32,
    rate: f64,
    initial_investment: Decimal,
) -> Result<Decimal, EngineError> {
    let cf = annual_cash_flow.to_f64().ok_or(EngineError::NonFinite)?;
    let pv = cf * annuity_factor(rate, years);
    if !pv.is_finite() {
        return Err(EngineError::NonFinite);
    }
    let pv = Decimal::from_f64(pv).ok_or(EngineError::NonFinite)?;
    Ok(pv - initial_investment)
}

/// Scale NPV by the risk discount and strategic weight.
pub fn risk_adjusted(
    npv: Decimal,
    risk_score: f32,
    strategic_weight: f32,
) -> Result<Decimal, EngineError> {
    let factor = ((1.0 - risk_score) * strategic_weight) as f64;
    let factor = Decimal::from_f64(factor).ok_or(EngineError::NonFinite)?;
    Ok(npv * factor)
}

/// Evaluate the whole portfolio: validate, derive per-row columns, rank by
/// risk-adjusted NPV, and greedily allocate the budget in a single pass.
///
/// Validation failures abort the whole table; no partial rows are produced.
/// Output rows are in rank order (descending risk-adjusted NPV, ties keeping
/// input order).
pub fn evaluate_portfolio(
    projects: &[Project],
    assumptions: &Assumptions,
) -> Result<AllocationReport, EngineError> {
    validate_assumptions(assumptions)?;
    validate_portfolio(projects)?;

    let multiplier = assumptions.scenario.multiplier();
    let mut rows = Vec::with_capacity(projects.len());
    for p in projects {
        let adjusted_revenue = p.expected_annual_revenue * multiplier;
        let annual_cash_flow = adjusted_revenue - p.annual_cost;
        let npv = project_npv(
            annual_cash_flow,
            p.duration_years,
            assumptions.discount_rate,
            p.initial_investment,
        )?;
        let risk_adjusted_npv = risk_adjusted(npv, p.risk_score, p.strategic_weight)?;
        rows.push(EvaluatedProject {
            project: p.clone(),
            adjusted_revenue,
            annual_cash_flow,
            npv,
            risk_adjusted_npv,
            decision: Decision::Rejected,
        });
    }

    // Stable sort: ties keep input order.
    rows.sort_by(|a, b| b.risk_adjusted_npv.cmp(&a.risk_adjusted_npv));

    let mut allocated_capital = Decimal::ZERO;
    let mut portfolio_npv = Decimal::ZERO;
    let mut approved = 0usize;
    for row in &mut rows {
        if allocated_capital + row.project.initial_investment <= assumptions.total_budget {
            row.decision = Decision::Approved;
            allocated_capital += row.project.initial_investment;
            portfolio_npv += row.npv;
            approved += 1;
        } else {
            row.decision = Decision::Rejected;
        }
        debug!(
            project = %row.project.name,
            decision = ?row.decision,
            %allocated_capital,
            "allocation step"
        );
    }

    let rejected = rows.len() - approved;
    Ok(AllocationReport {
        projects: rows,
        summary: PortfolioSummary {
            total_budget: assumptions.total_budget,
            allocated_capital,
            portfolio_npv,
            approved,
            rejected,
        },
    })
}
