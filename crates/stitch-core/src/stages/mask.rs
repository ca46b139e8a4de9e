use crate::domain::Histogram;

fn keep_where(hist: &Histogram, keep: impl Fn(usize) -> bool) -> Histogram {
    let y = hist
        .y
        .iter()
        .enumerate()
        .map(|(index, value)| if keep(index) { *value } else { 0.0 })
        .collect();
    let e = hist
        .e
        .iter()
        .enumerate()
        .map(|(index, value)| if keep(index) { *value } else { 0.0 })
        .collect();
    Histogram::new(hist.x.clone(), y, e)
}

/// Left-hand contribution: zero signal and error for every bin from
/// `start_bin` onward. Bins stay structurally present so the contributions
/// can later be summed bin for bin.
pub fn mask_after_overlap_start(hist: &Histogram, start_bin: usize) -> Histogram {
    keep_where(hist, |index| index < start_bin)
}

/// Right-hand contribution: zero every bin before `end_bin`.
pub fn mask_before_overlap_end(hist: &Histogram, end_bin: usize) -> Histogram {
    keep_where(hist, |index| index >= end_bin)
}

/// Overlap-only variant: keep `[start_bin, end_bin)`, zero both flanks.
pub fn mask_outside_overlap(hist: &Histogram, start_bin: usize, end_bin: usize) -> Histogram {
    keep_where(hist, |index| index >= start_bin && index < end_bin)
}
