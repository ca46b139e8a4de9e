//! Overlap stitching for 1-D binned datasets.
//!
//! Two histograms covering adjacent, partially overlapping x-ranges are
//! aligned onto a common grid, matched in intensity over the overlap via a
//! multiplicative scale factor, and merged into a single histogram spanning
//! the combined range. The entry points are [`stitch`] and
//! [`stitch_with_ops`]; the individual pipeline stages live in [`stages`].

pub mod domain;
pub mod numerics;
pub mod stages;
pub mod stitch;

pub use domain::{
    DatasetSide, Histogram, Measurement, NoticeSeverity, OverlapNotice, OverlapRegion,
    StitchConfig, StitchError, StitchErrorCategory, StitchOutcome, StitchResult,
};
pub use stages::{
    DenseHistogramOps, HistogramOps, RebinParams, ResolvedBounds, candidate_intersection,
    locate_overlap, mask_after_overlap_start, mask_before_overlap_end, mask_outside_overlap,
    resolve_overlap_bounds,
};
pub use stitch::{stitch, stitch_with_ops, validate_inputs};
