#![deny(warnings)]

//! Portfolio I/O: CSV project-table loader and JSON allocation reports.
//!
//! The loader is strict: a missing column or a non-numeric cell rejects the
//! whole file with the offending row reported, rather than letting a faulted
//! value propagate into the engine.

use advisor_core::{Assumptions, Project};
use advisor_engine::AllocationReport;
use chrono::{DateTime, Utc};
use csv::Trim;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors produced while loading or writing portfolio files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or its header row is unusable.
    #[error("failed to open portfolio file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },
    /// A data row is missing a field or holds a non-numeric cell.
    #[error("invalid portfolio row {row}: {source}")]
    Row {
        /// 1-based line number including the header.
        row: usize,
        #[source]
        source: csv::Error,
    },
    /// Report serialization or file write failed.
    #[error("failed to write report {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

/// One CSV row using the table's column vocabulary.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Project")]
    project: String,
    #[serde(rename = "Expected_Annual_Revenue")]
    expected_annual_revenue: rust_decimal::Decimal,
    #[serde(rename = "Annual_Cost")]
    annual_cost: rust_decimal::Decimal,
    #[serde(rename = "Initial_Investment")]
    initial_investment: rust_decimal::Decimal,
    #[serde(rename = "Duration_Years")]
    duration_years: u32,
    #[serde(rename = "Risk_Score")]
    risk_score: f32,
    #[serde(rename = "Strategic_Weight")]
    strategic_weight: f32,
}

impl From<RawRecord> for Project {
    fn from(r: RawRecord) -> Self {
        Project {
            name: r.project,
            expected_annual_revenue: r.expected_annual_revenue,
            annual_cost: r.annual_cost,
            initial_investment: r.initial_investment,
            duration_years: r.duration_years,
            risk_score: r.risk_score,
            strategic_weight: r.strategic_weight,
        }
    }
}

/// Load a project table from a CSV file.
///
/// Field values are whitespace-trimmed. Range validation (risk score,
/// duration, negative money) is the engine's job; this loader only enforces
/// that every row is structurally complete and numeric.
pub fn load_projects<P: AsRef<Path>>(path: P) -> Result<Vec<Project>, LoadError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(|source| LoadError::Open {
            path: path.display().to_string(),
            source,
        })?;

    let mut projects = Vec::new();
    for (i, record) in reader.deserialize::<RawRecord>().enumerate() {
        // +2: 1-based, after the header line.
        let raw = record.map_err(|source| LoadError::Row {
            row: i + 2,
            source,
        })?;
        projects.push(Project::from(raw));
    }
    info!(rows = projects.len(), path = %path.display(), "loaded project table");
    Ok(projects)
}

/// A complete allocation report suitable for archiving or downstream tools.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// UTC timestamp of report generation.
    pub generated_at: DateTime<Utc>,
    /// Engine parameters the allocation was computed under.
    pub assumptions: Assumptions,
    /// Ranked rows and summary aggregates.
    #[serde(flatten)]
    pub allocation: AllocationReport,
}

impl Report {
    /// Stamp an allocation result with the current time.
    pub fn new(assumptions: Assumptions, allocation: AllocationReport) -> Self {
        Report {
            generated_at: Utc::now(),
            assumptions,
            allocation,
        }
    }
}

/// Serialize a report as pretty JSON to `path`.
pub fn write_report_json<P: AsRef<Path>>(path: P, report: &Report) -> Result<(), LoadError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report).map_err(|e| LoadError::Write {
        path: path.display().to_string(),
        source: e.into(),
    })?;
    fs::write(path, json).map_err(|e| LoadError::Write {
        path: path.display().to_string(),
        source: e.into(),
    })?;
    info!(path = %path.display(), "wrote allocation report");
    Ok(())
}
