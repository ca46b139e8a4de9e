use super::{HistogramOps, mask_after_overlap_start, mask_before_overlap_end, mask_outside_overlap};
use crate::domain::{Histogram, Measurement, OverlapRegion, StitchResult};

/// Combine the scaled inputs into the final stitched histogram.
///
/// The grid is split into three disjoint pieces: the left-only bins before
/// the overlap, the averaged overlap bins, and the right-only bins from the
/// overlap end onward. When both overlap variants carry error information the
/// average is the inverse-variance weighted mean; otherwise it is the plain
/// mean `(y1 + y2) / 2`. Summing the pieces bin-wise reconstructs a complete
/// histogram because each bin receives exactly one non-zero contributor.
pub fn merge_contributions<O: HistogramOps>(
    ops: &O,
    lhs: &Histogram,
    rhs: &Histogram,
    region: &OverlapRegion,
) -> StitchResult<Histogram> {
    let left = mask_after_overlap_start(lhs, region.start_bin);
    let right = mask_before_overlap_end(rhs, region.end_bin);
    let lhs_overlap = mask_outside_overlap(lhs, region.start_bin, region.end_bin);
    let rhs_overlap = mask_outside_overlap(rhs, region.start_bin, region.end_bin);

    let average = if lhs_overlap.has_non_zero_errors() && rhs_overlap.has_non_zero_errors() {
        ops.weighted_mean(&lhs_overlap, &rhs_overlap)?
    } else {
        ops.multiply(
            &ops.add(&lhs_overlap, &rhs_overlap)?,
            Measurement::exact(0.5),
        )
    };

    ops.add(&ops.add(&left, &average)?, &right)
}

#[cfg(test)]
mod tests {
    use super::merge_contributions;
    use crate::domain::{Histogram, OverlapRegion};
    use crate::stages::DenseHistogramOps;

    fn full_region(bins: usize) -> OverlapRegion {
        OverlapRegion {
            start_x: 0.0,
            end_x: bins as f64,
            start_bin: 0,
            end_bin: bins,
        }
    }

    #[test]
    fn errorless_sides_take_the_plain_mean() {
        let edges = vec![0.0, 1.0, 2.0, 3.0];
        let lhs = Histogram::new(edges.clone(), vec![10.0, 10.0, 10.0], vec![0.0; 3]);
        let rhs = Histogram::new(edges, vec![20.0, 20.0, 20.0], vec![0.0; 3]);

        let merged = merge_contributions(&DenseHistogramOps, &lhs, &rhs, &full_region(3))
            .expect("merge should succeed");
        assert_eq!(merged.y, vec![15.0, 15.0, 15.0]);
        assert_eq!(merged.e, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn one_errorless_side_forces_the_plain_mean_with_propagated_errors() {
        let edges = vec![0.0, 1.0, 2.0];
        let lhs = Histogram::new(edges.clone(), vec![10.0, 10.0], vec![0.0, 0.0]);
        let rhs = Histogram::new(edges, vec![20.0, 20.0], vec![2.0, 2.0]);

        let merged = merge_contributions(&DenseHistogramOps, &lhs, &rhs, &full_region(2))
            .expect("merge should succeed");
        assert_eq!(merged.y, vec![15.0, 15.0]);
        assert_eq!(merged.e, vec![1.0, 1.0]);
    }

    #[test]
    fn identical_sides_keep_their_value_and_shrink_the_error() {
        let edges = vec![0.0, 1.0, 2.0];
        let hist = Histogram::new(edges, vec![5.0, 5.0], vec![1.0, 1.0]);

        let merged = merge_contributions(&DenseHistogramOps, &hist, &hist.clone(), &full_region(2))
            .expect("merge should succeed");
        assert_eq!(merged.y, vec![5.0, 5.0]);
        for error in merged.e {
            assert!((error - 1.0 / 2.0f64.sqrt()).abs() < 1.0e-12);
        }
    }

    #[test]
    fn pieces_outside_the_overlap_pass_through_unaveraged() {
        let edges = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let lhs = Histogram::new(edges.clone(), vec![1.0, 1.0, 1.0, 0.0], vec![0.0; 4]);
        let rhs = Histogram::new(edges, vec![0.0, 2.0, 2.0, 2.0], vec![0.0; 4]);
        let region = OverlapRegion {
            start_x: 1.0,
            end_x: 3.0,
            start_bin: 1,
            end_bin: 3,
        };

        let merged = merge_contributions(&DenseHistogramOps, &lhs, &rhs, &region)
            .expect("merge should succeed");
        assert_eq!(merged.y, vec![1.0, 1.5, 1.5, 2.0]);
    }

    #[test]
    fn masked_zero_bins_never_produce_non_finite_output() {
        let edges = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let lhs = Histogram::new(edges.clone(), vec![1.0, 1.0, 1.0, 0.0], vec![0.5, 0.5, 0.5, 0.0]);
        let rhs = Histogram::new(edges, vec![0.0, 2.0, 2.0, 2.0], vec![0.0, 0.4, 0.4, 0.4]);
        let region = OverlapRegion {
            start_x: 1.0,
            end_x: 3.0,
            start_bin: 1,
            end_bin: 3,
        };

        let merged = merge_contributions(&DenseHistogramOps, &lhs, &rhs, &region)
            .expect("merge should succeed");
        assert!(merged.y.iter().all(|value| value.is_finite()));
        assert!(merged.e.iter().all(|error| error.is_finite()));
        assert_eq!(merged.y[0], 1.0);
        assert_eq!(merged.y[3], 2.0);
    }
}
