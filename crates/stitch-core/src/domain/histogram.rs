use serde::{Deserialize, Serialize};

use super::{DatasetSide, StitchError, StitchResult};

/// A 1-D binned dataset: `x` holds the bin edges, `y` the per-bin signal and
/// `e` the per-bin standard error. `x` always carries one more entry than `y`
/// and `e`; an all-zero `e` signals that no error information is available.
///
/// Histograms are value-like. Every pipeline stage that changes one returns a
/// fresh instance; nothing is mutated in place across stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub e: Vec<f64>,
}

impl Histogram {
    pub fn new(x: Vec<f64>, y: Vec<f64>, e: Vec<f64>) -> Self {
        Self { x, y, e }
    }

    /// A histogram on the given edges with zero signal and zero error.
    pub fn zeroed(x: Vec<f64>) -> Self {
        let bins = x.len().saturating_sub(1);
        Self {
            x,
            y: vec![0.0; bins],
            e: vec![0.0; bins],
        }
    }

    pub fn bin_count(&self) -> usize {
        self.y.len()
    }

    pub fn x_min(&self) -> f64 {
        self.x.first().copied().unwrap_or(f64::NAN)
    }

    pub fn x_max(&self) -> f64 {
        self.x.last().copied().unwrap_or(f64::NAN)
    }

    pub fn has_non_zero_errors(&self) -> bool {
        self.e.iter().any(|error| *error != 0.0)
    }

    /// Index of the bin whose `[x[i], x[i+1])` interval contains `value`.
    /// Values below the first edge map onto bin 0, values at or past the last
    /// edge onto the final bin.
    pub fn containing_bin(&self, value: f64) -> usize {
        containing_bin(&self.x, value)
    }

    /// Shape validation run at the orchestration boundary: edge/value/error
    /// counts line up, edges strictly increase, everything finite, errors
    /// non-negative.
    pub fn validate_for_side(&self, side: DatasetSide) -> StitchResult<()> {
        if self.x.len() < 2 {
            return Err(StitchError::TooFewBinEdges {
                side,
                actual: self.x.len(),
            });
        }
        if self.y.len() + 1 != self.x.len() || self.e.len() != self.y.len() {
            return Err(StitchError::BinCountMismatch {
                side,
                x_len: self.x.len(),
                y_len: self.y.len(),
                e_len: self.e.len(),
            });
        }

        for (index, edge) in self.x.iter().copied().enumerate() {
            if !edge.is_finite() {
                return Err(StitchError::NonFiniteChannelValue {
                    side,
                    channel: "x",
                    index,
                    value: edge,
                });
            }
            if index > 0 {
                let previous = self.x[index - 1];
                if edge <= previous {
                    return Err(StitchError::NonIncreasingBinEdges {
                        side,
                        index,
                        previous,
                        current: edge,
                    });
                }
            }
        }

        for (index, value) in self.y.iter().copied().enumerate() {
            if !value.is_finite() {
                return Err(StitchError::NonFiniteChannelValue {
                    side,
                    channel: "y",
                    index,
                    value,
                });
            }
        }

        for (index, value) in self.e.iter().copied().enumerate() {
            if !value.is_finite() {
                return Err(StitchError::NonFiniteChannelValue {
                    side,
                    channel: "e",
                    index,
                    value,
                });
            }
            if value < 0.0 {
                return Err(StitchError::NegativeErrorValue { side, index, value });
            }
        }

        Ok(())
    }
}

pub(crate) fn containing_bin(edges: &[f64], value: f64) -> usize {
    let upper = edges.partition_point(|edge| *edge <= value);
    upper
        .saturating_sub(1)
        .min(edges.len().saturating_sub(2))
}

#[cfg(test)]
mod tests {
    use super::{Histogram, containing_bin};
    use crate::domain::{DatasetSide, StitchError};

    fn unit_histogram() -> Histogram {
        Histogram::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![1.0, 2.0, 3.0],
            vec![0.1, 0.2, 0.3],
        )
    }

    #[test]
    fn validation_accepts_a_well_formed_histogram() {
        unit_histogram()
            .validate_for_side(DatasetSide::Lhs)
            .expect("histogram should validate");
    }

    #[test]
    fn validation_rejects_point_data() {
        let point_data = Histogram::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0], vec![0.0; 3]);
        let error = point_data
            .validate_for_side(DatasetSide::Rhs)
            .expect_err("point data should fail");
        assert_eq!(
            error,
            StitchError::BinCountMismatch {
                side: DatasetSide::Rhs,
                x_len: 3,
                y_len: 3,
                e_len: 3,
            }
        );
    }

    #[test]
    fn validation_rejects_unordered_edges() {
        let unordered = Histogram::new(vec![0.0, 2.0, 1.0], vec![1.0, 1.0], vec![0.0, 0.0]);
        let error = unordered
            .validate_for_side(DatasetSide::Lhs)
            .expect_err("unordered edges should fail");
        assert_eq!(
            error,
            StitchError::NonIncreasingBinEdges {
                side: DatasetSide::Lhs,
                index: 2,
                previous: 2.0,
                current: 1.0,
            }
        );
    }

    #[test]
    fn validation_rejects_negative_errors_and_non_finite_values() {
        let negative = Histogram::new(vec![0.0, 1.0], vec![1.0], vec![-0.5]);
        assert_eq!(
            negative.validate_for_side(DatasetSide::Lhs),
            Err(StitchError::NegativeErrorValue {
                side: DatasetSide::Lhs,
                index: 0,
                value: -0.5,
            })
        );

        let non_finite = Histogram::new(vec![0.0, 1.0], vec![f64::NAN], vec![0.0]);
        let error = non_finite
            .validate_for_side(DatasetSide::Rhs)
            .expect_err("NaN signal should fail");
        assert!(matches!(
            error,
            StitchError::NonFiniteChannelValue { channel: "y", .. }
        ));
    }

    #[test]
    fn containing_bin_clamps_to_the_grid() {
        let edges = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(containing_bin(&edges, 2.0), 2);
        assert_eq!(containing_bin(&edges, 2.999), 2);
        assert_eq!(containing_bin(&edges, 0.0), 0);
        assert_eq!(containing_bin(&edges, 5.0), 4);
        assert_eq!(containing_bin(&edges, -1.0), 0);
    }

    #[test]
    fn zeroed_histogram_matches_bin_count() {
        let zeroed = Histogram::zeroed(vec![0.0, 0.5, 1.0]);
        assert_eq!(zeroed.bin_count(), 2);
        assert!(!zeroed.has_non_zero_errors());
    }

    #[test]
    fn error_information_is_detected() {
        assert!(unit_histogram().has_non_zero_errors());
        let errorless = Histogram::new(vec![0.0, 1.0], vec![3.0], vec![0.0]);
        assert!(!errorless.has_non_zero_errors());
    }
}
