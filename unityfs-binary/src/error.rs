//! Error types for UnityFS decoding

use thiserror::Error;

/// Result type for UnityFS decode operations
pub type Result<T> = std::result::Result<T, BinaryError>;

/// Errors that can occur while decoding a bundle
#[derive(Error, Debug)]
pub enum BinaryError {
    /// I/O errors surfaced by the underlying cursor
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Signature, endianness flag, or another fixed field did not match
    #[error("Invalid format: {0}")]
    Format(String),

    /// A read ran past the end of the available data
    #[error("Truncated input: expected {expected} bytes, {actual} available")]
    TruncatedInput { expected: usize, actual: usize },

    /// Decompression failed
    #[error("Decompression failed: {0}")]
    Decompression(String),

    /// Data is well formed but violates a bound or sanity rule
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// Recognized but unhandled feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

impl BinaryError {
    /// Create a new format error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Self::Format(msg.into())
    }

    /// Create a new truncated input error
    pub fn truncated(expected: usize, actual: usize) -> Self {
        Self::TruncatedInput { expected, actual }
    }

    /// Create a new decompression error
    pub fn decompression<S: Into<String>>(msg: S) -> Self {
        Self::Decompression(msg.into())
    }

    /// Create a new corrupt data error
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        Self::CorruptData(msg.into())
    }

    /// Create a new unsupported feature error
    pub fn unsupported<S: Into<String>>(feature: S) -> Self {
        Self::Unsupported(feature.into())
    }

    /// Check if this error may be absorbed at object scope
    ///
    /// Unsupported features only drop the object that raised them; every
    /// other kind compromises the rest of the decode and must abort it.
    pub fn is_object_local(&self) -> bool {
        matches!(self, BinaryError::Unsupported(_))
    }
}

impl From<lz4_flex::block::DecompressError> for BinaryError {
    fn from(err: lz4_flex::block::DecompressError) -> Self {
        Self::decompression(format!("LZ4 block: {}", err))
    }
}
