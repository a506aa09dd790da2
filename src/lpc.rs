//! Linear prediction analysis
//!
//! Autocorrelation plus the Levinson-Durbin recursion, solving the Toeplitz
//! normal equations for the predictor coefficients a1..aP. Analysis runs in
//! f64; samples are upcast at the frame boundary.

use crate::error::{CodecError, Result};

/// Calculate autocorrelation coefficients r[0..=max_lag] for `x`.
pub fn autocorrelation(x: &[f64], max_lag: usize) -> Vec<f64> {
    let n = x.len();
    let mut r = vec![0.0; max_lag + 1];

    for lag in 0..=max_lag {
        let mut sum = 0.0;
        for i in 0..n.saturating_sub(lag) {
            sum += x[i] * x[i + lag];
        }
        r[lag] = sum;
    }

    r
}

/// Levinson-Durbin recursion for LPC coefficient calculation.
///
/// Returns `a[0..order-1]` corresponding to a1..aP. A zero-energy input
/// (silent frame) yields an all-zero predictor. The prediction error energy
/// is floored at 1e-9 so a numerically degenerate step cannot divide by
/// zero on the next iteration.
pub fn levinson_durbin(r: &[f64], order: usize) -> Result<Vec<f64>> {
    if r.len() < order + 1 {
        return Err(CodecError::LpcIllConditioned {
            lags: r.len(),
            order,
        });
    }

    let mut coeffs = vec![0.0; order];
    let mut error = r[0];
    if error == 0.0 {
        return Ok(coeffs);
    }

    let mut prev = vec![0.0; order];
    for i in 0..order {
        // reflection coefficient for step i
        let mut acc = 0.0;
        for j in 0..i {
            acc += coeffs[j] * r[i - j];
        }
        let k = -(r[i + 1] + acc) / error;

        prev[..i].copy_from_slice(&coeffs[..i]);
        for j in 0..i {
            coeffs[j] = prev[j] + k * prev[i - 1 - j];
        }
        coeffs[i] = k;

        error *= 1.0 - k * k;
        if error <= 0.0 {
            error = 1e-9;
        }
    }

    Ok(coeffs)
}

/// Dot product of the predictor against the `order` samples preceding `n`.
///
/// Samples before the start of `x` come from `history`, where index 0 is the
/// oldest retained sample and index `order - 1` the most recent. Encoder and
/// decoder share this lookup so their prediction windows stay aligned across
/// frame boundaries.
pub(crate) fn predict(coeffs: &[f64], x: &[f64], history: &[f64], n: usize) -> f64 {
    let order = coeffs.len();
    let mut pred = 0.0;

    for k in 1..=order {
        let sample = if n >= k {
            x[n - k]
        } else {
            history[order + n - k]
        };
        pred += coeffs[k - 1] * sample;
    }

    pred
}
