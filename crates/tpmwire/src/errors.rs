//! Codec error types.
//!
//! Every failure in the codec maps to one of the kinds below. The first
//! error anywhere in an encode/decode chain aborts the whole chain; there
//! is no partial-success notion. Response bytes are untrusted, so every
//! declared size is validated against the destination's static capacity
//! before any byte is copied.

use thiserror::Error;

/// Errors produced by the wire codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// A decode needs more bytes than the cursor has remaining.
    #[error("insufficient data: need {needed} bytes, {remaining} remaining")]
    InsufficientData {
        /// Bytes the decode step required.
        needed: usize,
        /// Bytes the cursor had left.
        remaining: usize,
    },

    /// A declared size or element count exceeds the static capacity of
    /// the target field.
    #[error("declared size {size} exceeds static capacity {capacity}")]
    SizeExceeded {
        /// The size or count the wire declared (or the caller requested).
        size: usize,
        /// The destination's compile-time maximum.
        capacity: usize,
    },

    /// A union selector value has no known or implemented variant.
    #[error("union selector {0:#06x} has no known variant")]
    SelectorUnsupported(u32),

    /// A decoded enumerated value is not among the permitted set for its
    /// field.
    #[error("value {value:#x} is not permitted for {field}")]
    ValueOutOfRange {
        /// Name of the offending field or interface type.
        field: &'static str,
        /// The decoded value.
        value: u32,
    },

    /// A length-prefixed envelope's declared length does not equal the
    /// bytes actually consumed by its inner structure.
    #[error("envelope declared {declared} bytes but inner structure consumed {consumed}")]
    LengthMismatch {
        /// The length the 4-byte prefix declared.
        declared: u32,
        /// The bytes the inner decoder actually consumed.
        consumed: u32,
    },

    /// A length-prefixed envelope declared a length of zero.
    #[error("envelope length prefix is zero")]
    ZeroLength,

    /// A source buffer or string is larger than its fixed-capacity
    /// destination.
    #[error("source of {len} bytes exceeds destination capacity {capacity}")]
    InsufficientBuffer {
        /// The source length.
        len: usize,
        /// The destination's capacity.
        capacity: usize,
    },
}

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
