//! Index-based helpers over time-ordered series.
//!
//! All functions assume the input is already sorted by time; they only reason
//! about positions, never about timestamps.

/// First differences `v[i] - v[i - 1]`. The first element has no predecessor
/// and is `None`.
pub fn first_differences(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(values.windows(2).map(|w| Some(w[1] - w[0])));
    out
}

/// Length of the run of strictly positive differences ending at each index.
///
/// Index 0 is always 0. NaN differences break a run.
pub fn increasing_run_lengths(values: &[f64]) -> Vec<usize> {
    let mut runs = Vec::with_capacity(values.len());
    let mut current = 0usize;
    for diff in first_differences(values) {
        current = match diff {
            Some(d) if d > 0.0 => current + 1,
            _ => 0,
        };
        runs.push(current);
    }
    runs
}

/// Per-index flag: the trailing `window` differences ending here are all
/// strictly positive. A `window` of zero flags nothing.
pub fn trailing_increase_flags(values: &[f64], window: usize) -> Vec<bool> {
    if window == 0 {
        return vec![false; values.len()];
    }
    increasing_run_lengths(values)
        .into_iter()
        .map(|run| run >= window)
        .collect()
}

/// Earliest index whose trailing `window` differences are all increasing.
pub fn first_trailing_increase(values: &[f64], window: usize) -> Option<usize> {
    trailing_increase_flags(values, window)
        .iter()
        .position(|&flag| flag)
}

/// Index of the value with the smallest absolute value.
///
/// Ties resolve to the first occurrence; non-finite values are skipped.
pub fn argmin_abs(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        let a = v.abs();
        match best {
            Some((_, b)) if a >= b => {}
            _ => best = Some((i, a)),
        }
    }
    best.map(|(i, _)| i)
}

/// Position `floor(fraction * len)`, clamped into `0..len`.
///
/// Returns `None` for an empty series.
pub fn percentile_index(len: usize, fraction: f64) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let raw = (fraction.clamp(0.0, 1.0) * len as f64).floor() as usize;
    Some(raw.min(len - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_differences_has_no_leading_value() {
        assert!(first_differences(&[]).is_empty());
        assert_eq!(
            first_differences(&[1.0, 3.0, 2.0]),
            vec![None, Some(2.0), Some(-1.0)]
        );
    }

    #[test]
    fn run_lengths_reset_on_flat_and_nan() {
        let v = [0.0, 1.0, 2.0, 2.0, 3.0, f64::NAN, 5.0, 6.0];
        assert_eq!(increasing_run_lengths(&v), vec![0, 1, 2, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn trailing_window_needs_window_predecessors() {
        // Strictly increasing from frame 0: the first full trailing window of 3
        // differences ends at index 3.
        let v = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            trailing_increase_flags(&v, 3),
            vec![false, false, false, true, true]
        );
        assert_eq!(first_trailing_increase(&v, 3), Some(3));
        assert_eq!(first_trailing_increase(&v, 5), None);
        assert_eq!(first_trailing_increase(&v, 0), None);
    }

    #[test]
    fn argmin_abs_prefers_first_tie() {
        assert_eq!(argmin_abs(&[-0.5, 0.2, -0.2, 0.3]), Some(1));
        assert_eq!(argmin_abs(&[-0.1, 0.1]), Some(0));
        assert_eq!(argmin_abs(&[f64::NAN, 2.0]), Some(1));
        assert_eq!(argmin_abs(&[f64::NAN]), None);
        assert_eq!(argmin_abs(&[]), None);
    }

    #[test]
    fn percentile_index_examples() {
        assert_eq!(percentile_index(4, 0.25), Some(1));
        assert_eq!(percentile_index(4, 0.5), Some(2));
        assert_eq!(percentile_index(4, 0.75), Some(3));
        assert_eq!(percentile_index(1, 0.75), Some(0));
        assert_eq!(percentile_index(41, 0.25), Some(10));
        assert_eq!(percentile_index(41, 0.5), Some(20));
        assert_eq!(percentile_index(41, 0.75), Some(30));
        assert_eq!(percentile_index(0, 0.5), None);
    }

    proptest! {
        #[test]
        fn argmin_abs_is_minimal(values in prop::collection::vec(-10.0f64..10.0, 1..64)) {
            let idx = argmin_abs(&values).unwrap();
            for (i, v) in values.iter().enumerate() {
                prop_assert!(v.abs() >= values[idx].abs());
                if i < idx {
                    prop_assert!(v.abs() > values[idx].abs());
                }
            }
        }

        #[test]
        fn percentile_index_in_bounds(len in 1usize..10_000, fraction in 0.0f64..=1.0) {
            let idx = percentile_index(len, fraction).unwrap();
            prop_assert!(idx < len);
        }
    }
}
