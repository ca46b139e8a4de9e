use super::CliError;
use super::helpers::{InspectReport, StitchReport, load_job, write_report};
use clap::Args;
use std::path::PathBuf;
use stitch_core::{
    NoticeSeverity, OverlapNotice, RebinParams, resolve_overlap_bounds, stitch, validate_inputs,
};
use tracing::{info, warn};

#[derive(Args)]
pub(super) struct RunArgs {
    /// Path to the JSON job file (two histograms plus configuration)
    pub(super) job: PathBuf,
    /// Write the JSON report here instead of stdout
    #[arg(long)]
    pub(super) output: Option<PathBuf>,
}

pub(super) fn run_stitch_command(args: RunArgs) -> Result<i32, CliError> {
    let job = load_job(&args.job)?;
    let outcome = stitch(&job.lhs, &job.rhs, &job.config)?;

    forward_notices(&outcome.notices);
    info!(
        scale_factor = outcome.scale_factor,
        start_bin = outcome.overlap.start_bin,
        end_bin = outcome.overlap.end_bin,
        "stitch complete"
    );

    let report = StitchReport::from_outcome(outcome);
    write_report(&report, args.output.as_deref())?;
    Ok(0)
}

#[derive(Args)]
pub(super) struct InspectArgs {
    /// Path to the JSON job file
    pub(super) job: PathBuf,
}

pub(super) fn run_inspect_command(args: InspectArgs) -> Result<i32, CliError> {
    let job = load_job(&args.job)?;
    validate_inputs(&job.lhs, &job.rhs, &job.config)?;

    let bounds = resolve_overlap_bounds(&job.lhs, &job.rhs, &job.config);
    let params = RebinParams::from_slice(&job.config.rebin_params)?;
    let edges = params.build_edges(job.lhs.x_min(), job.rhs.x_max())?;

    forward_notices(&bounds.notices);

    let report = InspectReport {
        start_overlap: bounds.start,
        end_overlap: bounds.end,
        grid_bin_count: edges.len().saturating_sub(1),
        grid_min: edges.first().copied().unwrap_or(f64::NAN),
        grid_max: edges.last().copied().unwrap_or(f64::NAN),
        notices: bounds.notices,
    };
    write_report(&report, None)?;
    Ok(0)
}

fn forward_notices(notices: &[OverlapNotice]) {
    for notice in notices {
        match notice.severity() {
            NoticeSeverity::Info => info!("{notice}"),
            NoticeSeverity::Warning => warn!("{notice}"),
        }
    }
}
