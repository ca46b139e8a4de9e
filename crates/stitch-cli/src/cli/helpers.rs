use super::CliError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stitch_core::{Histogram, OverlapNotice, OverlapRegion, StitchConfig, StitchOutcome};

/// One stitch invocation as described by a job file: the two input
/// histograms and an optional configuration block (defaults apply when the
/// block or any of its fields is missing).
#[derive(Debug, Clone, Deserialize)]
pub(super) struct StitchJob {
    pub(super) lhs: Histogram,
    pub(super) rhs: Histogram,
    #[serde(default)]
    pub(super) config: StitchConfig,
}

pub(super) fn load_job(path: &Path) -> Result<StitchJob, CliError> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read job file '{}'", path.display()))?;
    let job: StitchJob = serde_json::from_str(&source)
        .with_context(|| format!("failed to parse job file '{}'", path.display()))?;
    Ok(job)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StitchReport {
    pub(super) scale_factor: f64,
    pub(super) overlap: OverlapRegion,
    pub(super) notices: Vec<OverlapNotice>,
    pub(super) merged: Histogram,
}

impl StitchReport {
    pub(super) fn from_outcome(outcome: StitchOutcome) -> Self {
        Self {
            scale_factor: outcome.scale_factor,
            overlap: outcome.overlap,
            notices: outcome.notices,
            merged: outcome.merged,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InspectReport {
    pub(super) start_overlap: f64,
    pub(super) end_overlap: f64,
    pub(super) grid_bin_count: usize,
    pub(super) grid_min: f64,
    pub(super) grid_max: f64,
    pub(super) notices: Vec<OverlapNotice>,
}

pub(super) fn write_report<T: Serialize>(report: &T, output: Option<&Path>) -> Result<(), CliError> {
    let rendered =
        serde_json::to_string_pretty(report).context("failed to render the JSON report")?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create report directory '{}'", parent.display())
                    })?;
                }
            }
            fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("failed to write report '{}'", path.display()))?;
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
