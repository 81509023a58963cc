use ordered_float::OrderedFloat;

/// Number of decile breakpoints (0th, 10th, ..., 100th percentile).
pub const BREAKPOINT_COUNT: usize = 11;

/// Linear-interpolation quantile over ascending `sorted` values.
///
/// `p` is clamped to `[0, 1]`. Returns `None` for an empty slice.
#[must_use]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let (&first, &last) = (sorted.first()?, sorted.last()?);
    if sorted.len() == 1 || p <= 0.0 {
        return Some(first);
    }
    if p >= 1.0 {
        return Some(last);
    }

    let position = (sorted.len() - 1) as f64 * p;
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;
    let low = sorted[lower];
    let high = sorted[(lower + 1).min(sorted.len() - 1)];
    Some(low + (high - low) * fraction)
}

/// Computes the 11 decile breakpoints of `values`.
///
/// Non-finite inputs are ignored. The 0th breakpoint is never above zero, so
/// a strict `value > breakpoints[0]` keeps every positive value. An empty
/// input yields all-zero breakpoints.
#[must_use]
pub fn decile_breakpoints(values: impl IntoIterator<Item = f64>) -> [f64; BREAKPOINT_COUNT] {
    let mut sorted: Vec<OrderedFloat<f64>> = values
        .into_iter()
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .collect();
    sorted.sort_unstable();
    let sorted: Vec<f64> = sorted.into_iter().map(OrderedFloat::into_inner).collect();

    let mut breakpoints = [0.0; BREAKPOINT_COUNT];
    for (index, slot) in breakpoints.iter_mut().enumerate() {
        let p = index as f64 / (BREAKPOINT_COUNT - 1) as f64;
        *slot = quantile_sorted(&sorted, p).unwrap_or(0.0);
    }
    breakpoints[0] = breakpoints[0].min(0.0);
    breakpoints
}
