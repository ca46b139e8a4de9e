use super::DatasetSide;

pub type StitchResult<T> = Result<T, StitchError>;

/// Broad failure classes of the stitching pipeline. Every error is fatal and
/// non-retryable with the same input; the category tells the caller which
/// knob to adjust before retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StitchErrorCategory {
    /// Overlap bounds or other parameters disagree with the data range.
    Configuration,
    /// The requested overlap is narrower than the binning can resolve.
    Resolution,
    /// Input arrays are malformed or the two grids do not line up.
    Shape,
}

impl StitchErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Resolution => "resolution",
            Self::Shape => "shape",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StitchError {
    #[error("{side} histogram needs at least 2 bin edges, got {actual}")]
    TooFewBinEdges { side: DatasetSide, actual: usize },
    #[error(
        "{side} histogram is not histogram-shaped: {x_len} edges with {y_len} values and {e_len} errors"
    )]
    BinCountMismatch {
        side: DatasetSide,
        x_len: usize,
        y_len: usize,
        e_len: usize,
    },
    #[error(
        "{side} histogram bin edges must be strictly increasing, edge {index} has {current} after {previous}"
    )]
    NonIncreasingBinEdges {
        side: DatasetSide,
        index: usize,
        previous: f64,
        current: f64,
    },
    #[error("{side} histogram {channel} channel must be finite, index {index} got {value}")]
    NonFiniteChannelValue {
        side: DatasetSide,
        channel: &'static str,
        index: usize,
        value: f64,
    },
    #[error("{side} histogram error at index {index} is negative: {value}")]
    NegativeErrorValue {
        side: DatasetSide,
        index: usize,
        value: f64,
    },
    #[error("histogram grids do not match: {lhs_bins} bins against {rhs_bins}")]
    GridBinCountMismatch { lhs_bins: usize, rhs_bins: usize },
    #[error("histogram grids do not match at edge {index}: {lhs_edge} against {rhs_edge}")]
    GridEdgeMismatch {
        index: usize,
        lhs_edge: f64,
        rhs_edge: f64,
    },
    #[error(
        "rebin parameters must hold a single step or an odd boundary/step list, got {actual} entries"
    )]
    RebinParameterCount { actual: usize },
    #[error("invalid rebin parameters: {details}")]
    RebinParameterValue { details: String },
    #[error("{bound} overlap bound must be finite, got {value}")]
    NonFiniteOverlapBound { bound: &'static str, value: f64 },
    #[error("manual scale factor must be finite and non-negative, got {value}")]
    ManualScaleFactorInvalid { value: f64 },
    #[error("start overlap {start} is outside the x range after rebinning (grid minimum {x_min})")]
    StartOutsideRebinnedRange { start: f64, x_min: f64 },
    #[error("end overlap {end} is outside the x range after rebinning (grid maximum {x_max})")]
    EndOutsideRebinnedRange { end: f64, x_max: f64 },
    #[error("start overlap {start} is greater than end overlap {end}")]
    StartAfterEnd { start: f64, end: f64 },
    #[error(
        "overlap [{start}, {end}] falls entirely inside bin {bin}; supply finer rebin parameters"
    )]
    OverlapNarrowerThanOneBin { start: f64, end: f64, bin: usize },
    #[error("{side} histogram integrates to zero over the overlap; cannot estimate a scale factor")]
    ZeroOverlapIntegral { side: DatasetSide },
}

impl StitchError {
    pub fn category(&self) -> StitchErrorCategory {
        match self {
            Self::TooFewBinEdges { .. }
            | Self::BinCountMismatch { .. }
            | Self::NonIncreasingBinEdges { .. }
            | Self::NonFiniteChannelValue { .. }
            | Self::NegativeErrorValue { .. }
            | Self::GridBinCountMismatch { .. }
            | Self::GridEdgeMismatch { .. } => StitchErrorCategory::Shape,
            Self::RebinParameterCount { .. }
            | Self::RebinParameterValue { .. }
            | Self::NonFiniteOverlapBound { .. }
            | Self::ManualScaleFactorInvalid { .. }
            | Self::StartOutsideRebinnedRange { .. }
            | Self::EndOutsideRebinnedRange { .. }
            | Self::StartAfterEnd { .. }
            | Self::ZeroOverlapIntegral { .. } => StitchErrorCategory::Configuration,
            Self::OverlapNarrowerThanOneBin { .. } => StitchErrorCategory::Resolution,
        }
    }
}
