//! Orchestration of the stitching pipeline: validate, rebin onto a common
//! grid, locate the overlap, scale one side, mask and merge.
//!
//! Every stage takes histograms as explicit parameters and returns fresh
//! values; there is no shared registry and no state carried across calls.

use crate::domain::{
    DatasetSide, Histogram, StitchConfig, StitchError, StitchOutcome, StitchResult,
};
use crate::stages::{
    DenseHistogramOps, HistogramOps, RebinParams, apply_scale, locate_overlap,
    merge_contributions, resolve_overlap_bounds,
};

/// Check both inputs and the configuration without computing anything.
pub fn validate_inputs(
    lhs: &Histogram,
    rhs: &Histogram,
    config: &StitchConfig,
) -> StitchResult<()> {
    lhs.validate_for_side(DatasetSide::Lhs)?;
    rhs.validate_for_side(DatasetSide::Rhs)?;
    RebinParams::from_slice(&config.rebin_params)?;

    if let Some(value) = config.start_overlap {
        if !value.is_finite() {
            return Err(StitchError::NonFiniteOverlapBound {
                bound: "start",
                value,
            });
        }
    }
    if let Some(value) = config.end_overlap {
        if !value.is_finite() {
            return Err(StitchError::NonFiniteOverlapBound {
                bound: "end",
                value,
            });
        }
    }
    if config.use_manual_scale_factor {
        let factor = config.manual_scale_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(StitchError::ManualScaleFactorInvalid { value: factor });
        }
    }

    Ok(())
}

/// Stitch two overlapping histograms with the in-memory backend.
pub fn stitch(
    lhs: &Histogram,
    rhs: &Histogram,
    config: &StitchConfig,
) -> StitchResult<StitchOutcome> {
    stitch_with_ops(&DenseHistogramOps, lhs, rhs, config)
}

/// Stitch two overlapping histograms using the supplied numeric backend.
pub fn stitch_with_ops<O: HistogramOps>(
    ops: &O,
    lhs: &Histogram,
    rhs: &Histogram,
    config: &StitchConfig,
) -> StitchResult<StitchOutcome> {
    validate_inputs(lhs, rhs, config)?;

    let bounds = resolve_overlap_bounds(lhs, rhs, config);
    let params = RebinParams::from_slice(&config.rebin_params)?;
    let edges = params.build_edges(lhs.x_min(), rhs.x_max())?;
    let lhs_rebinned = ops.rebin(lhs, &edges)?;
    let rhs_rebinned = ops.rebin(rhs, &edges)?;

    let region = locate_overlap(&lhs_rebinned, bounds.start, bounds.end)?;
    let scaled = apply_scale(ops, &lhs_rebinned, &rhs_rebinned, &region, config)?;
    let merged = merge_contributions(ops, &scaled.lhs, &scaled.rhs, &region)?;

    Ok(StitchOutcome {
        merged,
        scale_factor: scaled.scale_factor,
        overlap: region,
        notices: bounds.notices,
    })
}
