//! Error handling for the codec

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors surfaced by the encoder and decoder.
///
/// Every error is fatal to the current frame and harmless to the stream
/// object itself: history is never advanced on a failed frame, and the
/// caller may continue with subsequent frames.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Stream parameters that cannot produce a working codec.
    #[error("invalid configuration: {details}")]
    InvalidConfiguration { details: String },

    /// Input or output buffer length does not match the configured frame size.
    #[error("frame size mismatch: expected {expected} samples, got {actual}")]
    FrameSizeMismatch { expected: usize, actual: usize },

    /// A frame ended before all of its declared fields could be read.
    #[error("truncated frame: needed {needed} more bytes")]
    TruncatedFrame { needed: usize },

    /// The leading four bytes name neither a voiced nor a silent frame.
    #[error("bad magic: {found:02x?}")]
    BadMagic { found: [u8; 4] },

    /// The frame declares a predictor order other than the stream's.
    #[error("order mismatch: stream uses order {expected}, frame declares {actual}")]
    OrderMismatch { expected: usize, actual: usize },

    /// The residual payload did not inflate to a full frame of symbols.
    #[error("entropy decode failure: {reason}")]
    EntropyDecodeFailure { reason: String },

    /// The deflate stage rejected the symbol stream.
    #[error("entropy encode failure: {reason}")]
    EntropyEncodeFailure { reason: String },

    /// Autocorrelation input carries fewer lags than the predictor needs.
    #[error("ill-conditioned lpc input: {lags} lags for order {order}")]
    LpcIllConditioned { lags: usize, order: usize },
}

impl CodecError {
    /// Create a new invalid configuration error.
    pub fn invalid_configuration(details: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            details: details.into(),
        }
    }

    /// Create a new entropy decode failure.
    pub fn entropy_decode(reason: impl Into<String>) -> Self {
        Self::EntropyDecodeFailure {
            reason: reason.into(),
        }
    }

    /// Create a new entropy encode failure.
    pub fn entropy_encode(reason: impl Into<String>) -> Self {
        Self::EntropyEncodeFailure {
            reason: reason.into(),
        }
    }

    /// Whether the stream can keep processing frames after this error.
    ///
    /// Configuration errors mean the stream was never usable; everything
    /// else condemns only the frame that raised it.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfiguration { .. })
    }
}
