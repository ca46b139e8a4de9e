mod mask;
mod merge;
mod overlap;
mod rebin;
mod scale;

pub use mask::{mask_after_overlap_start, mask_before_overlap_end, mask_outside_overlap};
pub use merge::merge_contributions;
pub use overlap::{
    ResolvedBounds, candidate_intersection, locate_overlap, resolve_overlap_bounds,
};
pub use rebin::RebinParams;
pub use scale::{ScaledPair, apply_scale};

use std::ops::Range;

use crate::domain::{Histogram, Measurement, StitchError, StitchResult};
use crate::numerics::{add_in_quadrature, quadrature_sum, round_to_places, stable_sum};

/// Decimal precision of every grid-boundary comparison in the pipeline.
pub(crate) const RANGE_DECIMAL_PLACES: i32 = 9;

/// Typed histogram arithmetic consumed by the stitching stages. One
/// implementation is provided ([`DenseHistogramOps`]); the seam exists so a
/// different numeric backend can be swapped in without touching the pipeline.
pub trait HistogramOps {
    /// Redistribute a histogram onto the given bin edges.
    fn rebin(&self, hist: &Histogram, edges: &[f64]) -> StitchResult<Histogram>;

    /// Sum the signal over a bin range, with quadrature error.
    fn integrate(&self, hist: &Histogram, bins: Range<usize>) -> Measurement;

    /// Broadcast-multiply every bin by a scalar measurement.
    fn multiply(&self, hist: &Histogram, factor: Measurement) -> Histogram;

    /// Ratio of two measurements with propagated error. The caller is
    /// responsible for rejecting a zero denominator first.
    fn divide(&self, numerator: Measurement, denominator: Measurement) -> Measurement;

    /// Bin-wise sum of two histograms on the same grid.
    fn add(&self, lhs: &Histogram, rhs: &Histogram) -> StitchResult<Histogram>;

    /// Bin-wise inverse-variance weighted mean of two histograms on the same
    /// grid. A bin where only one side carries a positive error takes that
    /// side's value; a bin where neither does yields zero signal and error.
    fn weighted_mean(&self, lhs: &Histogram, rhs: &Histogram) -> StitchResult<Histogram>;
}

/// The in-memory backend: plain loops over the bin vectors with standard
/// quadrature error propagation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseHistogramOps;

impl HistogramOps for DenseHistogramOps {
    fn rebin(&self, hist: &Histogram, edges: &[f64]) -> StitchResult<Histogram> {
        rebin::rebin_to_edges(hist, edges)
    }

    fn integrate(&self, hist: &Histogram, bins: Range<usize>) -> Measurement {
        let value = stable_sum(&hist.y[bins.clone()]);
        let error = quadrature_sum(&hist.e[bins]);
        Measurement::new(value, error)
    }

    fn multiply(&self, hist: &Histogram, factor: Measurement) -> Histogram {
        let y: Vec<f64> = hist.y.iter().map(|value| value * factor.value).collect();
        let e: Vec<f64> = hist
            .y
            .iter()
            .zip(&hist.e)
            .map(|(value, error)| add_in_quadrature(error * factor.value, value * factor.error))
            .collect();
        Histogram::new(hist.x.clone(), y, e)
    }

    fn divide(&self, numerator: Measurement, denominator: Measurement) -> Measurement {
        let value = numerator.value / denominator.value;
        let error = add_in_quadrature(
            numerator.error / denominator.value,
            numerator.value * denominator.error / (denominator.value * denominator.value),
        );
        Measurement::new(value, error)
    }

    fn add(&self, lhs: &Histogram, rhs: &Histogram) -> StitchResult<Histogram> {
        ensure_matching_grids(lhs, rhs)?;
        let y: Vec<f64> = lhs
            .y
            .iter()
            .zip(&rhs.y)
            .map(|(left, right)| left + right)
            .collect();
        let e: Vec<f64> = lhs
            .e
            .iter()
            .zip(&rhs.e)
            .map(|(left, right)| add_in_quadrature(*left, *right))
            .collect();
        Ok(Histogram::new(lhs.x.clone(), y, e))
    }

    fn weighted_mean(&self, lhs: &Histogram, rhs: &Histogram) -> StitchResult<Histogram> {
        ensure_matching_grids(lhs, rhs)?;
        let mut y = vec![0.0; lhs.bin_count()];
        let mut e = vec![0.0; lhs.bin_count()];

        for index in 0..lhs.bin_count() {
            let (left_error, right_error) = (lhs.e[index], rhs.e[index]);
            if left_error > 0.0 && right_error > 0.0 {
                let left_weight = 1.0 / (left_error * left_error);
                let right_weight = 1.0 / (right_error * right_error);
                let total_weight = left_weight + right_weight;
                y[index] = (lhs.y[index] * left_weight + rhs.y[index] * right_weight) / total_weight;
                e[index] = (1.0 / total_weight).sqrt();
            } else if left_error > 0.0 {
                y[index] = lhs.y[index];
                e[index] = left_error;
            } else if right_error > 0.0 {
                y[index] = rhs.y[index];
                e[index] = right_error;
            }
        }

        Ok(Histogram::new(lhs.x.clone(), y, e))
    }
}

fn ensure_matching_grids(lhs: &Histogram, rhs: &Histogram) -> StitchResult<()> {
    if lhs.bin_count() != rhs.bin_count() {
        return Err(StitchError::GridBinCountMismatch {
            lhs_bins: lhs.bin_count(),
            rhs_bins: rhs.bin_count(),
        });
    }
    for (index, (lhs_edge, rhs_edge)) in lhs.x.iter().zip(&rhs.x).enumerate() {
        if round_to_places(*lhs_edge, RANGE_DECIMAL_PLACES)
            != round_to_places(*rhs_edge, RANGE_DECIMAL_PLACES)
        {
            return Err(StitchError::GridEdgeMismatch {
                index,
                lhs_edge: *lhs_edge,
                rhs_edge: *rhs_edge,
            });
        }
    }
    Ok(())
}
