use super::HistogramOps;
use crate::domain::{
    DatasetSide, Histogram, Measurement, OverlapRegion, StitchConfig, StitchError, StitchResult,
};

/// Both inputs after the scale correction, plus the factor for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledPair {
    pub lhs: Histogram,
    pub rhs: Histogram,
    pub scale_factor: f64,
}

/// Estimate (or accept) the multiplicative factor relating the two sides and
/// apply it to the designated histogram.
///
/// Automatic estimation integrates both rebinned histograms over the overlap
/// bins, a plain rectangular sum with quadrature error, and multiplies the
/// designated side by the ratio of the two integrals. A manual factor is a
/// pure scalar multiply with no uncertainty of its own.
pub fn apply_scale<O: HistogramOps>(
    ops: &O,
    lhs: &Histogram,
    rhs: &Histogram,
    region: &OverlapRegion,
    config: &StitchConfig,
) -> StitchResult<ScaledPair> {
    if config.use_manual_scale_factor {
        let factor = Measurement::exact(config.manual_scale_factor);
        let (scaled_lhs, scaled_rhs) = if config.scale_rhs {
            (lhs.clone(), ops.multiply(rhs, factor))
        } else {
            (ops.multiply(lhs, factor), rhs.clone())
        };
        return Ok(ScaledPair {
            lhs: scaled_lhs,
            rhs: scaled_rhs,
            scale_factor: config.manual_scale_factor,
        });
    }

    let lhs_integral = ops.integrate(lhs, region.overlap_bins());
    let rhs_integral = ops.integrate(rhs, region.overlap_bins());

    if config.scale_rhs {
        if rhs_integral.value == 0.0 {
            return Err(StitchError::ZeroOverlapIntegral {
                side: DatasetSide::Rhs,
            });
        }
        let ratio = ops.divide(lhs_integral, rhs_integral);
        Ok(ScaledPair {
            lhs: lhs.clone(),
            rhs: ops.multiply(rhs, ratio),
            scale_factor: ratio.value,
        })
    } else {
        if lhs_integral.value == 0.0 {
            return Err(StitchError::ZeroOverlapIntegral {
                side: DatasetSide::Lhs,
            });
        }
        let ratio = ops.divide(rhs_integral, lhs_integral);
        Ok(ScaledPair {
            lhs: ops.multiply(lhs, ratio),
            rhs: rhs.clone(),
            scale_factor: ratio.value,
        })
    }
}
