//! Numeric helpers for descriptive statistics.
//!
//! All functions take a plain `&[f64]` of present values and return
//! `None` on degenerate input instead of NaN.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation (n − 1 denominator). `None` for fewer than
/// two values.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    let m = mean(data)?;
    let sum_sq: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    Some((sum_sq / (n - 1) as f64).sqrt())
}

/// Smallest value. `None` for an empty slice.
pub fn min(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

/// Largest value. `None` for an empty slice.
pub fn max(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

/// The `p`-th quantile of `data`, `p` in `[0, 1]`.
///
/// Sorts a copy of the input; see [`quantile_sorted`] for the method.
pub fn quantile(data: &[f64], p: f64) -> Option<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    quantile_sorted(&sorted, p)
}

/// The `p`-th quantile of pre-sorted data.
///
/// Linear interpolation between closest ranks (the R-7 method): for `n`
/// values, the quantile sits at rank `h = (n - 1) * p` and interpolates
/// between `floor(h)` and `floor(h) + 1`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let frac = h - lo as f64;
    match sorted.get(lo + 1) {
        Some(hi) => Some(sorted[lo] + frac * (hi - sorted[lo])),
        None => Some(sorted[lo]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_dev_is_sample_std() {
        // Sample variance of [2, 4, 4, 4, 5, 5, 7, 9] is 32/7.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = std_dev(&data).unwrap();
        assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);

        assert_eq!(std_dev(&[1.0]), None);
    }

    #[test]
    fn test_min_max() {
        let data = [3.0, 1.0, 2.0];
        assert_eq!(min(&data), Some(1.0));
        assert_eq!(max(&data), Some(3.0));
        assert_eq!(min(&[]), None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&data, 0.0), Some(1.0));
        assert_eq!(quantile(&data, 0.25), Some(1.75));
        assert_eq!(quantile(&data, 0.5), Some(2.5));
        assert_eq!(quantile(&data, 1.0), Some(4.0));
    }

    #[test]
    fn test_quantile_rejects_bad_p() {
        assert_eq!(quantile(&[1.0, 2.0], 1.5), None);
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile(&[42.0], 0.75), Some(42.0));
    }
}
