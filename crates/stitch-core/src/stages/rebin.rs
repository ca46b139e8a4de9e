use crate::domain::{Histogram, StitchError, StitchResult};

/// Fraction of a segment's width under which a generated edge is considered
/// to have reached the segment boundary.
const EDGE_PLACEMENT_TOLERANCE: f64 = 1.0e-12;

/// Rebinning instructions: either a bare step applied across the combined
/// data range, or an explicit boundary/step chain `x0, dx0, x1, dx1, .., xn`.
/// Negative steps request logarithmic spacing.
#[derive(Debug, Clone, PartialEq)]
pub enum RebinParams {
    Step(f64),
    Segments(Vec<f64>),
}

impl RebinParams {
    pub fn from_slice(params: &[f64]) -> StitchResult<Self> {
        for value in params {
            if !value.is_finite() {
                return Err(StitchError::RebinParameterValue {
                    details: format!("entries must be finite, got {value}"),
                });
            }
        }
        match params.len() {
            1 => {
                if params[0] == 0.0 {
                    return Err(StitchError::RebinParameterValue {
                        details: "step must be non-zero".to_string(),
                    });
                }
                Ok(Self::Step(params[0]))
            }
            actual if actual < 3 || actual % 2 == 0 => {
                Err(StitchError::RebinParameterCount { actual })
            }
            _ => Ok(Self::Segments(params.to_vec())),
        }
    }

    /// Generate the common grid. A bare step spans `data_min..data_max`; an
    /// explicit chain ignores the data range.
    pub fn build_edges(&self, data_min: f64, data_max: f64) -> StitchResult<Vec<f64>> {
        match self {
            Self::Step(step) => {
                if data_min >= data_max {
                    return Err(StitchError::RebinParameterValue {
                        details: format!("combined data range {data_min} to {data_max} is empty"),
                    });
                }
                edges_from_segments(&[data_min, *step, data_max])
            }
            Self::Segments(values) => edges_from_segments(values),
        }
    }
}

fn edges_from_segments(segments: &[f64]) -> StitchResult<Vec<f64>> {
    let mut edges = vec![segments[0]];
    let segment_count = segments.len() / 2;

    for segment in 0..segment_count {
        let low = segments[2 * segment];
        let step = segments[2 * segment + 1];
        let high = segments[2 * segment + 2];

        if high <= low {
            return Err(StitchError::RebinParameterValue {
                details: format!("segment boundary {high} is not above {low}"),
            });
        }
        if step == 0.0 {
            return Err(StitchError::RebinParameterValue {
                details: "step must be non-zero".to_string(),
            });
        }
        if step < 0.0 && low <= 0.0 {
            return Err(StitchError::RebinParameterValue {
                details: format!(
                    "logarithmic step {step} needs a positive lower boundary, got {low}"
                ),
            });
        }

        let placement_guard = (high - low) * EDGE_PLACEMENT_TOLERANCE;
        let mut edge = low;
        loop {
            let next = if step > 0.0 {
                edge + step
            } else {
                edge * (1.0 + step.abs())
            };
            if next >= high - placement_guard {
                break;
            }
            edges.push(next);
            edge = next;
        }
        edges.push(high);
    }

    Ok(edges)
}

/// Redistribute a histogram's counts onto a new set of edges. Each input bin
/// contributes to an output bin in proportion to their geometric overlap;
/// uncertainties accumulate in quadrature with the same fractions. Input data
/// outside the new grid is dropped.
pub(super) fn rebin_to_edges(hist: &Histogram, edges: &[f64]) -> StitchResult<Histogram> {
    if edges.len() < 2 {
        return Err(StitchError::RebinParameterValue {
            details: "grid needs at least two edges".to_string(),
        });
    }

    let bins = edges.len() - 1;
    let mut y = vec![0.0; bins];
    let mut variance = vec![0.0; bins];
    let mut target = 0usize;

    for source in 0..hist.bin_count() {
        let source_low = hist.x[source];
        let source_high = hist.x[source + 1];
        let width = source_high - source_low;

        while target + 1 < bins && edges[target + 1] <= source_low {
            target += 1;
        }

        let mut probe = target;
        while probe < bins && edges[probe] < source_high {
            let overlap = source_high.min(edges[probe + 1]) - source_low.max(edges[probe]);
            if overlap > 0.0 {
                let fraction = overlap / width;
                y[probe] += hist.y[source] * fraction;
                let scaled = hist.e[source] * fraction;
                variance[probe] += scaled * scaled;
            }
            probe += 1;
        }
    }

    let e = variance.iter().map(|value| value.sqrt()).collect();
    Ok(Histogram::new(edges.to_vec(), y, e))
}
