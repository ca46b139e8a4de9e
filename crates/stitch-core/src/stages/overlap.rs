use super::RANGE_DECIMAL_PLACES;
use crate::domain::{
    Histogram, OverlapNotice, OverlapRegion, StitchConfig, StitchError, StitchResult,
};
use crate::numerics::round_to_places;

/// Slack applied to configured bounds before the candidate-range check, so a
/// bound sitting exactly on a dataset edge is not rejected by rounding noise.
pub(crate) const RANGE_TOLERANCE: f64 = 1.0e-9;

/// Natural candidate overlap bounds from the unrebinned inputs: the overlap
/// can start where the right-hand dataset begins and must end where the
/// left-hand dataset runs out.
pub fn candidate_intersection(lhs: &Histogram, rhs: &Histogram) -> (f64, f64) {
    (rhs.x_min(), lhs.x_max())
}

/// Numeric overlap bounds after defaulting, plus the advisory notices
/// gathered while resolving them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBounds {
    pub start: f64,
    pub end: f64,
    pub notices: Vec<OverlapNotice>,
}

/// Apply the defaulting rules: an unset bound takes the candidate value; a
/// configured bound is kept (shifted by the tolerance) unless it falls outside
/// the candidate range, in which case it is forced back with a warning.
pub fn resolve_overlap_bounds(
    lhs: &Histogram,
    rhs: &Histogram,
    config: &StitchConfig,
) -> ResolvedBounds {
    let (minimum, maximum) = candidate_intersection(lhs, rhs);
    let mut notices = Vec::new();

    let start = match config.start_overlap {
        Some(requested) => {
            let shifted = requested - RANGE_TOLERANCE;
            if shifted < minimum || shifted > maximum {
                notices.push(OverlapNotice::StartForcedIntoRange {
                    requested,
                    minimum,
                    maximum,
                    forced: minimum,
                });
                minimum
            } else {
                shifted
            }
        }
        None => {
            notices.push(OverlapNotice::StartDefaulted { value: minimum });
            minimum
        }
    };

    let end = match config.end_overlap {
        Some(requested) => {
            let shifted = requested + RANGE_TOLERANCE;
            if shifted < minimum || shifted > maximum {
                notices.push(OverlapNotice::EndForcedIntoRange {
                    requested,
                    minimum,
                    maximum,
                    forced: maximum,
                });
                maximum
            } else {
                shifted
            }
        }
        None => {
            notices.push(OverlapNotice::EndDefaulted { value: maximum });
            maximum
        }
    };

    ResolvedBounds {
        start,
        end,
        notices,
    }
}

/// Convert validated numeric bounds into bin indices on the rebinned grid.
/// Comparisons are rounded to nine decimal places; an overlap that collapses
/// into a single bin is rejected as unresolvable at this binning.
pub fn locate_overlap(grid: &Histogram, start: f64, end: f64) -> StitchResult<OverlapRegion> {
    let x_min = grid.x_min();
    let x_max = grid.x_max();
    let rounded_start = round_to_places(start, RANGE_DECIMAL_PLACES);
    let rounded_end = round_to_places(end, RANGE_DECIMAL_PLACES);

    if rounded_start < round_to_places(x_min, RANGE_DECIMAL_PLACES) {
        return Err(StitchError::StartOutsideRebinnedRange { start, x_min });
    }
    if rounded_end > round_to_places(x_max, RANGE_DECIMAL_PLACES) {
        return Err(StitchError::EndOutsideRebinnedRange { end, x_max });
    }
    if rounded_start > rounded_end {
        return Err(StitchError::StartAfterEnd { start, end });
    }

    let start_bin = grid.containing_bin(start);
    let end_bin = grid.containing_bin(end);
    if start_bin == end_bin {
        return Err(StitchError::OverlapNarrowerThanOneBin {
            start,
            end,
            bin: start_bin,
        });
    }

    Ok(OverlapRegion {
        start_x: start,
        end_x: end,
        start_bin,
        end_bin,
    })
}
