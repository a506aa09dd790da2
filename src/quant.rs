//! Uniform scalar quantizers
//!
//! Symmetric mid-tread quantization to signed integers with a shared float
//! scale. Two concrete widths cover the whole codec: 8 bits for the
//! prediction residual, 16 bits for the predictor coefficients. The scale
//! travels in the frame as a little-endian f32.

/// Smallest scale ever produced or accepted; keeps dequantization away from
/// a division by zero when a frame is exactly flat.
pub(crate) const MIN_SCALE: f64 = 1e-9;

/// Quantize `vs` into signed 8-bit values, returning the scale.
pub fn quantize8(vs: &[f64], out: &mut [i8]) -> f32 {
    debug_assert_eq!(vs.len(), out.len());

    let mut scale = MIN_SCALE;
    for &v in vs {
        let av = v.abs();
        if av > scale {
            scale = av;
        }
    }

    for (q, &v) in out.iter_mut().zip(vs) {
        *q = (v / scale * 127.0).round().clamp(-128.0, 127.0) as i8;
    }

    scale as f32
}

/// Reverse [`quantize8`] given the stored scale.
pub fn dequantize8(scale: f32, qvs: &[i8], out: &mut [f64]) {
    debug_assert_eq!(qvs.len(), out.len());

    let scale = scale as f64;
    for (o, &q) in out.iter_mut().zip(qvs) {
        *o = q as f64 * scale / 127.0;
    }
}

/// Quantize `vs` into signed 16-bit values, returning the scale.
pub fn quantize16(vs: &[f64], out: &mut [i16]) -> f32 {
    debug_assert_eq!(vs.len(), out.len());

    let mut scale = MIN_SCALE;
    for &v in vs {
        let av = v.abs();
        if av > scale {
            scale = av;
        }
    }

    for (q, &v) in out.iter_mut().zip(vs) {
        *q = (v / scale * 32767.0).round().clamp(-32768.0, 32767.0) as i16;
    }

    scale as f32
}

/// Reverse [`quantize16`] given the stored scale.
pub fn dequantize16(scale: f32, qvs: &[i16], out: &mut [f64]) {
    debug_assert_eq!(qvs.len(), out.len());

    let scale = scale as f64;
    for (o, &q) in out.iter_mut().zip(qvs) {
        *o = q as f64 * scale / 32767.0;
    }
}
