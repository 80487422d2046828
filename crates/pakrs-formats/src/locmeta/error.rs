//! Error types for LocMeta decoding

use crate::guid::Guid;
use thiserror::Error;

/// Result type alias for LocMeta operations
pub type LocMetaResult<T> = Result<T, LocMetaError>;

/// Errors that can occur when decoding a LocMeta file
#[derive(Debug, Error)]
pub enum LocMetaError {
    /// File does not start with the LocMeta magic
    #[error("LocMeta file has an invalid magic constant: {0}")]
    InvalidMagic(Guid),

    /// Declared version is newer than this reader implements
    #[error("LocMeta file is too new to be loaded (file version: {found}, loader version: {latest})")]
    UnsupportedVersion {
        /// Version byte declared by the file
        found: u8,
        /// Highest version this reader implements
        latest: u8,
    },

    /// Malformed or truncated binary data
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocMetaError {
    /// Check if this error comes from malformed or truncated input
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::BinRw(_) | Self::Io(_) | Self::InvalidMagic(_))
    }
}
