// Series extraction - null-tolerant access into parallel value arrays

/// Number of samples in the short-horizon forward window.
pub const FORWARD_WINDOW: usize = 6;

/// Value at `index`, or `None` when the index is negative, past the end of
/// the array, or the sample itself is null.
pub fn value_at(values: &[Option<f64>], index: isize) -> Option<f64> {
    usize::try_from(index)
        .ok()
        .and_then(|i| values.get(i).copied().flatten())
}

/// Non-null samples in the forward window starting at `start`.
pub fn forward_window(values: &[Option<f64>], start: usize) -> impl Iterator<Item = f64> + '_ {
    values.iter().skip(start).take(FORWARD_WINDOW).filter_map(|v| *v)
}

/// Largest non-null value in the window, `None` if there is none.
pub fn window_max(values: &[Option<f64>], start: usize) -> Option<f64> {
    forward_window(values, start).fold(None, |max, v| match max {
        Some(m) if m >= v => Some(m),
        _ => Some(v),
    })
}

/// Sum of non-null values in the window; an all-null window sums to 0.
pub fn window_sum(values: &[Option<f64>], start: usize) -> f64 {
    forward_window(values, start).fold(0.0, |sum, v| sum + v)
}

/// Mean of non-null values in the window rounded to one decimal place.
pub fn window_mean(values: &[Option<f64>], start: usize) -> Option<f64> {
    let (sum, count) = forward_window(values, start).fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        return None;
    }
    Some(round_to_tenth(sum / count as f64))
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
