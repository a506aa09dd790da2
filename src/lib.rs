#![allow(clippy::needless_range_loop)]

//! burble — a low-bitrate monophonic speech codec
//!
//! Each frame of normalized f32 samples is whitened by a short linear
//! predictor (autocorrelation + Levinson-Durbin), the prediction residual is
//! quantized and folded into a 20-symbol alphabet, and the symbol stream is
//! packed through a Huffman-only deflate envelope. Frames below an adaptive
//! noise floor collapse to a 4-byte sentinel.
//!
//! Encoder and decoder are stateful stream objects: both carry the last
//! `order` reconstructed samples across frame boundaries so prediction is
//! seamless, which means frames must be decoded in the order they were
//! encoded, by a decoder constructed with the same parameters.
//!
//! ```
//! use burble::{Decoder, Encoder};
//!
//! let mut enc = Encoder::new(10, 320).unwrap();
//! let mut dec = Decoder::new(10, 320).unwrap();
//!
//! let samples: Vec<f32> = (0..320)
//!     .map(|n| (n as f32 * std::f32::consts::TAU * 440.0 / 16000.0).sin())
//!     .collect();
//!
//! let mut packet = Vec::new();
//! enc.encode(&samples, &mut packet).unwrap();
//!
//! let mut out = vec![0.0f32; 320];
//! dec.decode(&packet, &mut out).unwrap();
//! ```

pub mod bins;
pub mod entropy;
pub mod error;
pub mod lpc;
pub mod quant;
pub mod silence;

mod decoder;
mod encoder;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{CodecError, Result};
pub use silence::SilenceDetector;

/// Leading bytes of a voiced frame.
pub const FRAME_MAGIC: [u8; 4] = *b"BBRT";

/// Leading bytes of a silent frame. Silent frames carry nothing else.
pub const SILENT_MAGIC: [u8; 4] = *b"BBRS";

/// Largest predictor order; the frame header stores it in one byte.
pub const MAX_ORDER: usize = 255;

/// Largest frame size; the residual length prefix is 16 bits.
pub const MAX_FRAME_SIZE: usize = u16::MAX as usize;

/// Check stream parameters shared by [`Encoder::new`] and [`Decoder::new`].
pub(crate) fn validate_stream_params(order: usize, frame_size: usize) -> Result<()> {
    if order == 0 || order > MAX_ORDER {
        return Err(CodecError::invalid_configuration(format!(
            "predictor order must be in 1..={MAX_ORDER}, got {order}"
        )));
    }
    if frame_size > MAX_FRAME_SIZE {
        return Err(CodecError::invalid_configuration(format!(
            "frame size must be at most {MAX_FRAME_SIZE}, got {frame_size}"
        )));
    }
    if frame_size <= order {
        return Err(CodecError::invalid_configuration(format!(
            "frame size ({frame_size}) must exceed predictor order ({order})"
        )));
    }
    Ok(())
}
