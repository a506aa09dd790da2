//! LPC analysis tests

use burble::error::CodecError;
use burble::lpc::{autocorrelation, levinson_durbin};

// ============================================================================
// Autocorrelation
// ============================================================================

#[test]
fn test_autocorrelation_lag_zero_is_energy() {
    let x: Vec<f64> = (0..100).map(|i| (i as f64 * 0.05).sin()).collect();
    let energy: f64 = x.iter().map(|v| v * v).sum();

    let r = autocorrelation(&x, 8);
    assert_eq!(r.len(), 9);
    assert!((r[0] - energy).abs() < 1e-9);
}

#[test]
fn test_autocorrelation_lag_zero_dominates() {
    let x: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.1).sin()).collect();
    let r = autocorrelation(&x, 10);

    for lag in 1..=10 {
        assert!(r[0] >= r[lag].abs());
    }
}

#[test]
fn test_autocorrelation_short_signal() {
    // lags past the end of the signal sum over nothing
    let r = autocorrelation(&[1.0, 2.0], 4);
    assert_eq!(r.len(), 5);
    assert_eq!(r[0], 5.0);
    assert_eq!(r[1], 2.0);
    assert_eq!(r[2], 0.0);
    assert_eq!(r[3], 0.0);
}

// ============================================================================
// Levinson-Durbin
// ============================================================================

#[test]
fn test_levinson_durbin_zero_energy_gives_zero_predictor() {
    let r = vec![0.0; 11];
    let coeffs = levinson_durbin(&r, 10).unwrap();
    assert_eq!(coeffs, vec![0.0; 10]);
}

#[test]
fn test_levinson_durbin_coefficient_count() {
    let x: Vec<f64> = (0..320).map(|i| (i as f64 * 0.17).sin()).collect();
    for order in [1, 2, 3, 8, 10] {
        let r = autocorrelation(&x, order);
        let coeffs = levinson_durbin(&r, order).unwrap();
        assert_eq!(coeffs.len(), order);
    }
}

#[test]
fn test_levinson_durbin_whitens_a_sine() {
    // a second-order predictor captures a pure tone almost completely
    let x: Vec<f64> = (0..320).map(|i| (i as f64 * 0.17).sin()).collect();
    let r = autocorrelation(&x, 2);
    let coeffs = levinson_durbin(&r, 2).unwrap();

    let mut residual_energy = 0.0;
    for n in 2..x.len() {
        let e = x[n] + coeffs[0] * x[n - 1] + coeffs[1] * x[n - 2];
        residual_energy += e * e;
    }
    let signal_energy: f64 = x.iter().map(|v| v * v).sum();

    assert!(
        residual_energy < 0.01 * signal_energy,
        "residual energy {} vs signal energy {}",
        residual_energy,
        signal_energy
    );
}

#[test]
fn test_levinson_durbin_rejects_short_autocorrelation() {
    let r = vec![1.0, 0.5, 0.2];
    let err = levinson_durbin(&r, 10).unwrap_err();
    assert!(matches!(
        err,
        CodecError::LpcIllConditioned { lags: 3, order: 10 }
    ));
}
