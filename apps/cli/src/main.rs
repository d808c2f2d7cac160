#![deny(warnings)]

//! Headless CLI for the capital allocation advisor: loads a project table,
//! evaluates it under the supplied assumptions, and prints the ranked table
//! with KPI aggregates.

use advisor_core::{Assumptions, Scenario};
use advisor_engine::Decision;
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "advisor [--input <csv>] [--discount-rate <percent>] \
[--budget <amount>] [--scenario <name>] [--json <path>]";

struct Args {
    input: String,
    discount_rate_pct: f64,
    budget: Decimal,
    scenario: Scenario,
    json: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        input: "assets/projects_data.csv".to_string(),
        discount_rate_pct: 10.0,
        budget: Decimal::new(10_000_000, 0),
        scenario: Scenario::BaseCase,
        json: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--input" => {
                args.input = it.next().context("--input requires a path")?;
            }
            "--discount-rate" => {
                let v = it.next().context("--discount-rate requires a value")?;
                args.discount_rate_pct = v
                    .parse()
                    .with_context(|| format!("invalid discount rate: {v:?}"))?;
            }
            "--budget" => {
                let v = it.next().context("--budget requires a value")?;
                args.budget = Decimal::from_str(&v)
                    .with_context(|| format!("invalid budget: {v:?}"))?;
            }
            "--scenario" => {
                let v = it.next().context("--scenario requires a name")?;
                args.scenario = v.parse()?;
            }
            "--json" => {
                args.json = Some(it.next().context("--json requires a path")?);
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument {other:?}\nusage: {USAGE}"),
        }
    }
    Ok(args)
}

/// Round to whole currency units and group thousands, e.g. `-$1,234,567`.
fn format_money(value: Decimal) -> String {
    let rounded = value.round();
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args()?;
    info!(git_sha = env!("GIT_SHA"), input = %args.input, "starting advisor");

    let assumptions = Assumptions {
        discount_rate: args.discount_rate_pct / 100.0,
        total_budget: args.budget,
        scenario: args.scenario,
    };

    let projects = advisor_io::load_projects(&args.input)?;
    let report = advisor_engine::evaluate_portfolio(&projects, &assumptions)?;

    println!(
        "Project Evaluation Summary | scenario: {} | discount rate: {:.1}%",
        assumptions.scenario, args.discount_rate_pct
    );
    println!(
        "{:<24} {:>16} {:>18} {:>16} {:>14} {:>9}",
        "Project", "NPV", "Risk-Adj NPV", "Investment", "Cash Flow", "Decision"
    );
    for row in &report.projects {
        println!(
            "{:<24} {:>16} {:>18} {:>16} {:>14} {:>9}",
            row.project.name,
            format_money(row.npv),
            format_money(row.risk_adjusted_npv),
            format_money(row.project.initial_investment),
            format_money(row.annual_cash_flow),
            match row.decision {
                Decision::Approved => "Approved",
                Decision::Rejected => "Rejected",
            }
        );
    }

    println!(
        "KPI | total budget: {} | allocated capital: {} | portfolio NPV: {} | approved: {} | rejected: {}",
        format_money(report.summary.total_budget),
        format_money(report.summary.allocated_capital),
        format_money(report.summary.portfolio_npv),
        report.summary.approved,
        report.summary.rejected
    );

    for row in report.projects.iter().filter(|r| r.decision == Decision::Approved) {
        println!(
            "{} approved | investment: {} | risk-adjusted NPV: {}",
            row.project.name,
            format_money(row.project.initial_investment),
            format_money(row.risk_adjusted_npv)
        );
    }

    if let Some(path) = &args.json {
        let report = advisor_io::Report::new(assumptions, report);
        advisor_io::write_report_json(path, &report)?;
        println!("Report written to {path}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formatting_groups_thousands() {
        assert_eq!(format_money(Decimal::new(0, 0)), "$0");
        assert_eq!(format_money(Decimal::new(950, 0)), "$950");
        assert_eq!(format_money(Decimal::new(1_234_567, 0)), "$1,234,567");
        assert_eq!(format_money(Decimal::new(-1_051, 3)), "-$1");
        assert_eq!(format_money(Decimal::new(2_486_852, 2)), "$24,869");
    }
}
