//! Pairwise correlation coefficients: Pearson, Spearman, Kendall.
//!
//! Pearson is the strict path: unequal lengths are an input error, since a
//! silently truncated coefficient would hide an integration bug. The rank
//! correlations truncate to the common prefix, matching their use against
//! sources of slightly different history depth.
//!
//! Significance is a Fisher-z pseudo-p: `z = atanh(r)`, `se = 1/sqrt(n-3)`,
//! `t = z/se`, `p = 1/(1 + e^|t|)`. This is a logistic tail used for
//! relative confidence weighting, not a calibrated p-value. Confidence is
//! `|r| * (1 - p)`, so a strong coefficient over a long window approaches
//! its own magnitude.

use sc_common::{Error, Result};

use super::{CorrelationOutcome, DegenerateReason};

/// Pearson correlation of two equal-length series.
///
/// Fails with [`Error::LengthMismatch`] on unequal lengths and
/// [`Error::EmptySeries`] on empty input. Zero variance in either series
/// yields [`CorrelationOutcome::Undefined`].
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<CorrelationOutcome> {
    if xs.len() != ys.len() {
        return Err(Error::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(Error::EmptySeries {
            op: "pearson".to_string(),
        });
    }

    let n = xs.len();
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    if sum_xx < 1e-15 || sum_yy < 1e-15 {
        return Ok(CorrelationOutcome::Undefined(
            DegenerateReason::ZeroVariance,
        ));
    }

    let coefficient = sum_xy / (sum_xx * sum_yy).sqrt();
    let significance = significance(coefficient, n);

    Ok(CorrelationOutcome::Value {
        coefficient,
        confidence: coefficient.abs() * (1.0 - significance),
        significance,
    })
}

/// Fisher-z pseudo-p for a coefficient over `n` samples. Small = strong.
///
/// Returns 1.0 (no evidence) when `n <= 3`, where the standard error is
/// undefined. A coefficient of exactly ±1 gives an infinite z and hence
/// p = 0.
pub fn significance(coefficient: f64, n: usize) -> f64 {
    if n <= 3 {
        return 1.0;
    }
    let z = 0.5 * ((1.0 + coefficient) / (1.0 - coefficient)).ln();
    let se = 1.0 / ((n - 3) as f64).sqrt();
    let t = z / se;
    1.0 / (1.0 + t.abs().exp())
}

/// Spearman rank correlation: rank-transform both series (average ranks for
/// ties), then Pearson on the ranks. Truncates to the shorter series.
pub fn spearman(xs: &[f64], ys: &[f64]) -> Result<CorrelationOutcome> {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return Err(Error::EmptySeries {
            op: "spearman".to_string(),
        });
    }
    let rx = sc_stats::ranks(&xs[..n]).map_err(Error::from)?;
    let ry = sc_stats::ranks(&ys[..n]).map_err(Error::from)?;
    pearson(&rx, &ry)
}

/// Kendall tau-a: concordant minus discordant pairs over C(n, 2).
///
/// Pairs tied in either series count as neither. O(n²), acceptable for the
/// expected series lengths (a few hundred samples). Truncates to the
/// shorter series; needs at least 2 samples.
pub fn kendall(xs: &[f64], ys: &[f64]) -> Result<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return Err(Error::InsufficientSamples { have: n, need: 2 });
    }

    let mut concordant = 0i64;
    let mut discordant = 0i64;
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = xs[i] - xs[j];
            let dy = ys[i] - ys[j];
            let prod = dx * dy;
            if prod > 0.0 {
                concordant += 1;
            } else if prod < 0.0 {
                discordant += 1;
            }
        }
    }

    let pairs = (n * (n - 1) / 2) as f64;
    Ok((concordant - discordant) as f64 / pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coeff(outcome: CorrelationOutcome) -> f64 {
        outcome.coefficient().expect("expected a defined coefficient")
    }

    fn make_noisy(n: usize, seed: u64) -> Vec<f64> {
        let mut state = seed;
        (0..n)
            .map(|i| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let frac = (state >> 33) as f64 / (1u64 << 31) as f64;
                i as f64 + 5.0 * frac
            })
            .collect()
    }

    #[test]
    fn test_pearson_self_is_one() {
        let xs = make_noisy(100, 7);
        let c = coeff(pearson(&xs, &xs).unwrap());
        assert!((c - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_negated_is_minus_one() {
        let xs = make_noisy(100, 7);
        let neg: Vec<f64> = xs.iter().map(|v| -v).collect();
        let c = coeff(pearson(&xs, &neg).unwrap());
        assert!((c + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_length_mismatch_fails() {
        let err = pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            sc_common::Error::LengthMismatch { left: 3, right: 2 }
        ));
    }

    #[test]
    fn test_pearson_zero_variance_is_undefined() {
        let flat = [4.0; 20];
        let xs = make_noisy(20, 3);
        let outcome = pearson(&flat, &xs).unwrap();
        assert!(outcome.is_undefined());
    }

    #[test]
    fn test_scaled_series_confidence_is_high() {
        // error_rate = 2 * cpu_usage: perfect correlation, long window.
        let xs = make_noisy(100, 11);
        let ys: Vec<f64> = xs.iter().map(|v| 2.0 * v).collect();
        match pearson(&xs, &ys).unwrap() {
            CorrelationOutcome::Value {
                coefficient,
                confidence,
                significance,
            } => {
                assert!((coefficient - 1.0).abs() < 1e-9);
                assert!(confidence > 0.8, "confidence {} too low", confidence);
                assert!(significance < 0.2);
            }
            CorrelationOutcome::Undefined(r) => panic!("undefined: {}", r),
        }
    }

    #[test]
    fn test_significance_small_n() {
        assert_eq!(significance(0.9, 3), 1.0);
        assert_eq!(significance(0.9, 2), 1.0);
    }

    #[test]
    fn test_significance_shrinks_with_n() {
        // Same coefficient, more data: stronger evidence, smaller pseudo-p.
        assert!(significance(0.8, 100) < significance(0.8, 10));
    }

    #[test]
    fn test_spearman_self_is_one() {
        let xs = make_noisy(50, 13);
        let c = coeff(spearman(&xs, &xs).unwrap());
        assert!((c - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_spearman_monotone_transform_is_one() {
        // Spearman only sees ranks, so x vs x³ is a perfect fit.
        let xs = make_noisy(50, 17);
        let cubed: Vec<f64> = xs.iter().map(|v| v.powi(3)).collect();
        let c = coeff(spearman(&xs, &cubed).unwrap());
        assert!((c - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_kendall_monotone_is_one() {
        let xs: Vec<f64> = (0..30).map(|i| i as f64).collect();
        assert!((kendall(&xs, &xs).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_kendall_reversed_is_minus_one() {
        let xs: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let rev: Vec<f64> = xs.iter().rev().cloned().collect();
        assert!((kendall(&xs, &rev).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_kendall_too_short() {
        assert!(kendall(&[1.0], &[2.0]).is_err());
    }
}
