//! Huffman-only deflate envelope
//!
//! The binned symbol stream travels inside a raw deflate stream with the
//! LZ77 match search disabled: the alphabet has 20 values, so all of the
//! compression comes from the Huffman stage. Both directions are reset per
//! frame over buffers allocated once at stream construction; no dictionary
//! or state survives a frame boundary.

use miniz_oxide::deflate::core::{
    compress, create_comp_flags_from_zip_params, CompressionStrategy, CompressorOxide, TDEFLFlush,
    TDEFLStatus,
};
use miniz_oxide::deflate::CompressionLevel;
use miniz_oxide::inflate::core::inflate_flags::TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF;
use miniz_oxide::inflate::core::{decompress, DecompressorOxide};
use miniz_oxide::inflate::TINFLStatus;

use crate::error::{CodecError, Result};

/// Raw deflate, Huffman stage only. Negative window bits suppress the zlib
/// wrapper; the strategy clears the match-probe budget so no back-references
/// are ever searched for.
fn writer_flags() -> u32 {
    create_comp_flags_from_zip_params(
        CompressionLevel::DefaultLevel as i32,
        -15,
        CompressionStrategy::HuffmanOnly as i32,
    )
}

/// Compressing half of the envelope. One per encoder; owns its output
/// buffer and recycles it every frame.
pub struct HuffmanWriter {
    compressor: Box<CompressorOxide>,
    buf: Vec<u8>,
}

impl std::fmt::Debug for HuffmanWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuffmanWriter")
            .field("buf", &self.buf)
            .finish_non_exhaustive()
    }
}

impl HuffmanWriter {
    /// Create a writer sized for frames of `frame_size` symbols.
    pub fn new(frame_size: usize) -> Self {
        HuffmanWriter {
            compressor: Box::new(CompressorOxide::new(writer_flags())),
            buf: vec![0; frame_size + 64],
        }
    }

    /// Compress one frame of symbols, returning the packed bytes.
    ///
    /// The stream is reset first; output from previous frames is discarded.
    pub fn pack(&mut self, symbols: &[u8]) -> Result<&[u8]> {
        self.compressor.reset();

        let mut in_pos = 0;
        let mut out_pos = 0;
        loop {
            let (status, consumed, written) = compress(
                &mut self.compressor,
                &symbols[in_pos..],
                &mut self.buf[out_pos..],
                TDEFLFlush::Finish,
            );
            in_pos += consumed;
            out_pos += written;

            match status {
                TDEFLStatus::Done => return Ok(&self.buf[..out_pos]),
                TDEFLStatus::Okay => {
                    if out_pos == self.buf.len() {
                        self.buf.resize(self.buf.len() * 2, 0);
                    }
                }
                status => {
                    return Err(CodecError::entropy_encode(format!(
                        "deflate returned {:?}",
                        status
                    )))
                }
            }
        }
    }
}

/// Decompressing half of the envelope. One per decoder, reset per frame.
pub struct HuffmanReader {
    decompressor: Box<DecompressorOxide>,
}

impl std::fmt::Debug for HuffmanReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuffmanReader").finish_non_exhaustive()
    }
}

impl HuffmanReader {
    pub fn new() -> Self {
        HuffmanReader {
            decompressor: Box::new(DecompressorOxide::new()),
        }
    }

    /// Inflate `payload` into `out`, expecting exactly `out.len()` symbols.
    ///
    /// Trailing payload bytes past the end of the deflate stream are
    /// ignored, and so is anything the stream would produce past `out`.
    pub fn unpack(&mut self, payload: &[u8], out: &mut [u8]) -> Result<()> {
        self.decompressor.init();

        let (status, _consumed, written) = decompress(
            &mut self.decompressor,
            payload,
            out,
            0,
            TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF,
        );

        match status {
            TINFLStatus::Done | TINFLStatus::HasMoreOutput if written == out.len() => Ok(()),
            TINFLStatus::Done | TINFLStatus::HasMoreOutput => {
                Err(CodecError::entropy_decode(format!(
                    "payload inflated to {} of {} symbols",
                    written,
                    out.len()
                )))
            }
            status => Err(CodecError::entropy_decode(format!(
                "inflate returned {:?}",
                status
            ))),
        }
    }
}

impl Default for HuffmanReader {
    fn default() -> Self {
        Self::new()
    }
}
