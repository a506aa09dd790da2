//! Frame decoder

use tracing::trace;

use crate::bins::unbin;
use crate::entropy::HuffmanReader;
use crate::error::{CodecError, Result};
use crate::lpc::predict;
use crate::quant::{dequantize16, dequantize8, MIN_SCALE};
use crate::{validate_stream_params, FRAME_MAGIC, SILENT_MAGIC};

/// Streaming speech decoder.
///
/// Mirrors the encoder's history discipline: voiced frames replace the
/// retained tail with the just-synthesized samples, silent frames leave it
/// alone, and failed frames never advance it. Frames must therefore arrive
/// in encode order.
#[derive(Debug)]
pub struct Decoder {
    order: usize,
    frame_size: usize,
    /// Last `order` reconstructed samples of the previous voiced frame,
    /// oldest first.
    history: Vec<f64>,
    huffman: HuffmanReader,
    x: Vec<f64>,
    lpc: Vec<f64>,
    qlpc: Vec<i16>,
    res: Vec<f64>,
    qres: Vec<i8>,
    qres_binned: Vec<u8>,
}

impl Decoder {
    /// Create a decoder matching an encoder built with the same `order` and
    /// `frame_size`.
    pub fn new(order: usize, frame_size: usize) -> Result<Self> {
        validate_stream_params(order, frame_size)?;

        Ok(Decoder {
            order,
            frame_size,
            history: vec![0.0; order],
            huffman: HuffmanReader::new(),
            x: vec![0.0; frame_size],
            lpc: vec![0.0; order],
            qlpc: vec![0; order],
            res: vec![0.0; frame_size],
            qres: vec![0; frame_size],
            qres_binned: vec![0; frame_size],
        })
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

    /// Return the stream to its just-constructed state.
    pub fn reset(&mut self) {
        self.history.fill(0.0);
    }

    /// Decode one frame into `out`, which must hold exactly one frame of
    /// samples. A silent sentinel zero-fills `out` and leaves history
    /// untouched, matching the encoder.
    pub fn decode(&mut self, frame: &[u8], out: &mut [f32]) -> Result<()> {
        if out.len() != self.frame_size {
            return Err(CodecError::FrameSizeMismatch {
                expected: self.frame_size,
                actual: out.len(),
            });
        }

        let mut cursor = Cursor::new(frame);

        let mut magic = [0u8; 4];
        magic.copy_from_slice(cursor.read_slice(4)?);
        if magic == SILENT_MAGIC {
            trace!("silent frame");
            out.fill(0.0);
            return Ok(());
        }
        if magic != FRAME_MAGIC {
            return Err(CodecError::BadMagic { found: magic });
        }

        // the declared order must match ours: synthesis runs against our
        // history, and a mismatched predictor would silently desync it
        let order = cursor.read_u8()? as usize;
        if order != self.order {
            return Err(CodecError::OrderMismatch {
                expected: self.order,
                actual: order,
            });
        }

        if self.order > 3 {
            read_coeff_block(&mut cursor, &mut self.lpc[..3], &mut self.qlpc[..3])?;
            read_coeff_block(&mut cursor, &mut self.lpc[3..], &mut self.qlpc[3..])?;
        } else {
            read_coeff_block(&mut cursor, &mut self.lpc, &mut self.qlpc)?;
        }

        let mut scale_res = cursor.read_f32_le()?;
        if scale_res == 0.0 {
            scale_res = MIN_SCALE as f32;
        }

        let residual_len = cursor.read_u16_le()? as usize;
        let payload = cursor.read_slice(residual_len)?;
        self.huffman.unpack(payload, &mut self.qres_binned)?;

        unbin(&self.qres_binned, &mut self.qres);
        dequantize8(scale_res, &self.qres, &mut self.res);

        // synthesis x[n] = e[n] - sum a_k * x[n-k], inverting the encoder's
        // residual with our own reconstructed history
        for n in 0..self.frame_size {
            let pred = predict(&self.lpc, &self.x, &self.history, n);
            self.x[n] = self.res[n] - pred;
        }

        self.history
            .copy_from_slice(&self.x[self.frame_size - self.order..]);

        for (o, &v) in out.iter_mut().zip(&self.x) {
            *o = v as f32;
        }

        trace!("decoded voiced frame: {} bytes", frame.len());
        Ok(())
    }
}

/// Read one quantized coefficient block: an f32 scale followed by one i16
/// per coefficient. A stored zero scale is floored so dequantization never
/// divides by zero.
fn read_coeff_block(cursor: &mut Cursor<'_>, coeffs: &mut [f64], qcoeffs: &mut [i16]) -> Result<()> {
    let mut scale = cursor.read_f32_le()?;
    if scale == 0.0 {
        scale = MIN_SCALE as f32;
    }
    for q in qcoeffs.iter_mut() {
        *q = cursor.read_i16_le()?;
    }
    dequantize16(scale, qcoeffs, coeffs);
    Ok(())
}

// cursor helper

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Cursor { data, pos: 0 }
    }

    fn read_slice(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.pos + count > self.data.len() {
            return Err(CodecError::TruncatedFrame {
                needed: self.pos + count - self.data.len(),
            });
        }
        let slice = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_slice(1)?[0])
    }

    fn read_u16_le(&mut self) -> Result<u16> {
        let b = self.read_slice(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_i16_le(&mut self) -> Result<i16> {
        let b = self.read_slice(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    fn read_f32_le(&mut self) -> Result<f32> {
        let b = self.read_slice(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}
