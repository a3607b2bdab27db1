//! Edge weighting.
//!
//! Pure functions of the aggregated counts. Changing the weighting method
//! or cutoff never requires re-aggregation; the snapshot builder simply
//! re-scores the same table.

/// Relative co-occurrence frequency, in [0, 1].
pub fn frequency_weight(count: u32, max_count: u32) -> f64 {
    if max_count == 0 {
        return 0.0;
    }
    f64::from(count) / f64::from(max_count)
}

/// Normalized pointwise mutual information, in [-1, 1].
///
/// `(ln p_xy - ln p_x - ln p_y) / (-ln p_xy)`, with the boundary case
/// `p(x,y) = 1` defined as 1 (both terms appear in every document).
/// Symmetric in its marginals.
pub fn npmi(n_x: u32, n_y: u32, n_xy: u32, n_docs: u32) -> f64 {
    debug_assert!(n_xy > 0, "pairs with zero count never reach the table");
    debug_assert!(n_xy <= n_x.min(n_y));
    debug_assert!(n_x.max(n_y) <= n_docs);
    let n = f64::from(n_docs);
    let p_x = f64::from(n_x) / n;
    let p_y = f64::from(n_y) / n;
    let p_xy = f64::from(n_xy) / n;
    if p_xy >= 1.0 {
        return 1.0;
    }
    // Group the marginals so swapping x and y cannot change the floating
    // point rounding; addition commutes, chained subtraction does not.
    let value = (p_xy.ln() - (p_x.ln() + p_y.ln())) / (-p_xy.ln());
    value.clamp(-1.0, 1.0)
}

/// NPMI with a low-support guard: pairs whose marginal document
/// frequencies fall below `min_doc_frequency` cannot score positive,
/// which keeps one-off co-mentions from looking like strong signal.
pub fn clamped_npmi(n_x: u32, n_y: u32, n_xy: u32, n_docs: u32, min_doc_frequency: u32) -> f64 {
    let value = npmi(n_x, n_y, n_xy, n_docs);
    if n_x < min_doc_frequency || n_y < min_doc_frequency {
        value.min(0.0)
    } else {
        value
    }
}
