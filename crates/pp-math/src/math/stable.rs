//! Numerically careful scalar helpers.
//!
//! Path lengths are sums of many small, similar-magnitude distances, so they
//! are accumulated with Neumaier's compensated summation. Division helpers
//! return `None` instead of producing infinities or NaN.

/// Compensated (Neumaier) sum of a sequence.
///
/// Non-finite inputs propagate exactly as in a naive sum.
pub fn compensated_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0f64;
    let mut compensation = 0.0f64;
    for v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            compensation += (sum - t) + v;
        } else {
            compensation += (v - t) + sum;
        }
        sum = t;
    }
    if compensation.is_finite() {
        sum + compensation
    } else {
        sum
    }
}

/// Divide `numerator` by `denominator`, returning `None` when the result
/// is undefined (zero or non-finite denominator, non-finite numerator).
pub fn checked_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if !numerator.is_finite() || !denominator.is_finite() || denominator == 0.0 {
        return None;
    }
    let r = numerator / denominator;
    r.is_finite().then_some(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compensated_sum_empty_is_zero() {
        assert_eq!(compensated_sum(std::iter::empty()), 0.0);
    }

    #[test]
    fn compensated_sum_recovers_small_terms() {
        let values = [1e16, 1.0, -1e16];
        assert_eq!(compensated_sum(values), 1.0);
        let naive: f64 = values.iter().sum();
        assert_ne!(naive, 1.0);
    }

    #[test]
    fn compensated_sum_propagates_nan() {
        assert!(compensated_sum([1.0, f64::NAN]).is_nan());
    }

    #[test]
    fn checked_ratio_guards_zero_and_non_finite() {
        assert_eq!(checked_ratio(1.0, 0.0), None);
        assert_eq!(checked_ratio(0.0, 0.0), None);
        assert_eq!(checked_ratio(f64::NAN, 1.0), None);
        assert_eq!(checked_ratio(1.0, f64::INFINITY), None);
        assert_eq!(checked_ratio(3.0, 2.0), Some(1.5));
        assert_eq!(checked_ratio(-3.0, 2.0), Some(-1.5));
    }
}
