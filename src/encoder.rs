//! Frame encoder

use tracing::trace;

use crate::bins::bin;
use crate::entropy::HuffmanWriter;
use crate::error::{CodecError, Result};
use crate::lpc::{autocorrelation, levinson_durbin, predict};
use crate::quant::{quantize16, quantize8};
use crate::silence::SilenceDetector;
use crate::{validate_stream_params, FRAME_MAGIC, SILENT_MAGIC};

/// Streaming speech encoder.
///
/// One instance per stream: the synthesis history, the silence gate's noise
/// floor, and the entropy writer all persist across frames, so frames must
/// be fed in order and an instance must never be shared between streams.
/// All frame-sized scratch is allocated here and reused for every call.
#[derive(Debug)]
pub struct Encoder {
    order: usize,
    frame_size: usize,
    silence: SilenceDetector,
    /// Last `order` input samples of the previous voiced frame, oldest first.
    history: Vec<f64>,
    huffman: HuffmanWriter,
    x: Vec<f64>,
    qlpc: Vec<i16>,
    res: Vec<f64>,
    qres: Vec<i8>,
    qres_binned: Vec<u8>,
}

impl Encoder {
    /// Create an encoder for frames of `frame_size` samples and a predictor
    /// of length `order`. The decoder must be constructed with the same
    /// parameters.
    pub fn new(order: usize, frame_size: usize) -> Result<Self> {
        validate_stream_params(order, frame_size)?;

        Ok(Encoder {
            order,
            frame_size,
            silence: SilenceDetector::new(),
            history: vec![0.0; order],
            huffman: HuffmanWriter::new(frame_size),
            x: vec![0.0; frame_size],
            qlpc: vec![0; order],
            res: vec![0.0; frame_size],
            qres: vec![0; frame_size],
            qres_binned: vec![0; frame_size],
        })
    }

    /// Replace the default silence gate tuning.
    pub fn with_silence_detector(mut self, detector: SilenceDetector) -> Self {
        self.silence = detector;
        self
    }

    /// Predictor order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Samples per frame.
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Last `order` samples retained for cross-frame prediction.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Conservative upper bound on the encoded size of one frame, for
    /// pre-sizing reusable output buffers. Assumes the deflate envelope
    /// falls all the way back to stored blocks.
    pub fn max_frame_bytes(&self) -> usize {
        // magic + order byte + two coefficient blocks + residual scale
        // + length prefix + residual payload
        4 + 1 + 8 + 2 * self.order + 4 + 2 + self.frame_size + 64
    }

    /// Return the stream to its just-constructed state: zero history and a
    /// re-armed noise floor. Tuning survives.
    pub fn reset(&mut self) {
        self.history.fill(0.0);
        self.silence.reset();
    }

    /// Encode one frame into `out`, which is cleared first. Returns the
    /// number of bytes written.
    ///
    /// Silent frames write a 4-byte sentinel and leave the history
    /// untouched, exactly like the decoder will on reading it.
    pub fn encode(&mut self, samples: &[f32], out: &mut Vec<u8>) -> Result<usize> {
        if samples.len() != self.frame_size {
            return Err(CodecError::FrameSizeMismatch {
                expected: self.frame_size,
                actual: samples.len(),
            });
        }
        out.clear();

        if self.silence.is_silence(samples) {
            trace!(
                "silent frame, noise floor {:.3e}",
                self.silence.noise_floor()
            );
            out.extend_from_slice(&SILENT_MAGIC);
            return Ok(SILENT_MAGIC.len());
        }

        for (xi, &s) in self.x.iter_mut().zip(samples) {
            *xi = s as f64;
        }

        let r = autocorrelation(&self.x, self.order);
        let coeffs = levinson_durbin(&r, self.order)?;

        // residual e[n] = x[n] + sum a_k * x[n-k]; the decoder subtracts the
        // same prediction, so the sign must match on both sides
        for n in 0..self.frame_size {
            let pred = predict(&coeffs, &self.x, &self.history, n);
            self.res[n] = self.x[n] + pred;
        }

        let scale_res = quantize8(&self.res, &mut self.qres);
        bin(&self.qres, &mut self.qres_binned);
        let compressed = self.huffman.pack(&self.qres_binned)?;
        debug_assert!(compressed.len() <= u16::MAX as usize);

        out.extend_from_slice(&FRAME_MAGIC);
        out.push(self.order as u8);
        if self.order > 3 {
            // the leading coefficients carry most of the magnitude; the tail
            // gets its own scale so its smaller values keep precision
            write_coeff_block(out, &coeffs[..3], &mut self.qlpc[..3]);
            write_coeff_block(out, &coeffs[3..], &mut self.qlpc[3..]);
        } else {
            write_coeff_block(out, &coeffs, &mut self.qlpc);
        }
        out.extend_from_slice(&scale_res.to_le_bytes());
        out.extend_from_slice(&(compressed.len() as u16).to_le_bytes());
        out.extend_from_slice(compressed);

        self.history
            .copy_from_slice(&self.x[self.frame_size - self.order..]);

        trace!("encoded voiced frame: {} bytes", out.len());
        Ok(out.len())
    }
}

/// Quantize one coefficient block and append its scale plus i16 payload.
fn write_coeff_block(out: &mut Vec<u8>, coeffs: &[f64], qcoeffs: &mut [i16]) {
    let scale = quantize16(coeffs, qcoeffs);
    out.extend_from_slice(&scale.to_le_bytes());
    for &q in qcoeffs.iter() {
        out.extend_from_slice(&q.to_le_bytes());
    }
}
