pub mod errors;
mod histogram;

pub use errors::{StitchError, StitchErrorCategory, StitchResult};
pub use histogram::Histogram;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::Range;

/// Which of the two input datasets an error or operation refers to. The
/// left-hand side is the lower-x dataset by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSide {
    Lhs,
    Rhs,
}

impl DatasetSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lhs => "lhs",
            Self::Rhs => "rhs",
        }
    }
}

impl Display for DatasetSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// A scalar carrying its standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub error: f64,
}

impl Measurement {
    pub const fn new(value: f64, error: f64) -> Self {
        Self { value, error }
    }

    /// A value known exactly, with zero uncertainty.
    pub const fn exact(value: f64) -> Self {
        Self { value, error: 0.0 }
    }
}

pub const DEFAULT_REBIN_STEP: f64 = 0.1;

/// Immutable parameters for one stitch invocation. Unset overlap bounds are
/// derived from the geometry of the two inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StitchConfig {
    pub start_overlap: Option<f64>,
    pub end_overlap: Option<f64>,
    /// Either a single step, or a boundary/step list `x0, dx0, x1, ..., xn`.
    /// Negative steps request logarithmic spacing.
    pub rebin_params: Vec<f64>,
    /// Which side absorbs the multiplicative correction.
    pub scale_rhs: bool,
    pub use_manual_scale_factor: bool,
    /// Used only when `use_manual_scale_factor` is set.
    pub manual_scale_factor: f64,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            start_overlap: None,
            end_overlap: None,
            rebin_params: vec![DEFAULT_REBIN_STEP],
            scale_rhs: true,
            use_manual_scale_factor: false,
            manual_scale_factor: 1.0,
        }
    }
}

/// The resolved overlap between the two rebinned datasets: the numeric bounds
/// and the bins containing them on the common grid. Kept on the outcome for
/// provenance reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapRegion {
    pub start_x: f64,
    pub end_x: f64,
    pub start_bin: usize,
    pub end_bin: usize,
}

impl OverlapRegion {
    /// Bin range averaged between the two sides.
    pub fn overlap_bins(&self) -> Range<usize> {
        self.start_bin..self.end_bin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeSeverity {
    Info,
    Warning,
}

/// Advisory message produced while resolving the overlap bounds. Notices
/// never abort the computation; callers decide how to surface them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum OverlapNotice {
    StartDefaulted {
        value: f64,
    },
    EndDefaulted {
        value: f64,
    },
    StartForcedIntoRange {
        requested: f64,
        minimum: f64,
        maximum: f64,
        forced: f64,
    },
    EndForcedIntoRange {
        requested: f64,
        minimum: f64,
        maximum: f64,
        forced: f64,
    },
}

impl OverlapNotice {
    pub fn severity(&self) -> NoticeSeverity {
        match self {
            Self::StartDefaulted { .. } | Self::EndDefaulted { .. } => NoticeSeverity::Info,
            Self::StartForcedIntoRange { .. } | Self::EndForcedIntoRange { .. } => {
                NoticeSeverity::Warning
            }
        }
    }
}

impl Display for OverlapNotice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StartDefaulted { value } => {
                write!(f, "start overlap calculated to be {value:.6}")
            }
            Self::EndDefaulted { value } => {
                write!(f, "end overlap calculated to be {value:.6}")
            }
            Self::StartForcedIntoRange {
                requested,
                minimum,
                maximum,
                forced,
            } => write!(
                f,
                "requested start overlap {requested:.6} is outside [{minimum:.6}, {maximum:.6}], forced to {forced:.6}"
            ),
            Self::EndForcedIntoRange {
                requested,
                minimum,
                maximum,
                forced,
            } => write!(
                f,
                "requested end overlap {requested:.6} is outside [{minimum:.6}, {maximum:.6}], forced to {forced:.6}"
            ),
        }
    }
}

/// Result of a stitch: the merged histogram, the applied scale factor
/// (computed or manual, always reported), the resolved overlap region and any
/// advisory notices gathered along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StitchOutcome {
    pub merged: Histogram,
    pub scale_factor: f64,
    pub overlap: OverlapRegion,
    pub notices: Vec<OverlapNotice>,
}
