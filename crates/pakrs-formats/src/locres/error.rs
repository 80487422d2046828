//! Error types for localization resource decoding

use thiserror::Error;

/// Result type alias for LocRes operations
pub type LocResResult<T> = Result<T, LocResError>;

/// Errors that can occur when decoding a localization resource
#[derive(Debug, Error)]
pub enum LocResError {
    /// Declared generation is newer than this reader implements
    #[error("LocRes file is too new to be loaded (file version: {found}, loader version: {latest})")]
    UnsupportedVersion {
        /// Version byte declared by the file
        found: u8,
        /// Highest version this reader implements
        latest: u8,
    },

    /// String pool offset is neither -1 nor a usable position
    #[error("Invalid localized string array offset: {0}")]
    InvalidStringArrayOffset(i64),

    /// Entry references a pool slot that does not exist
    #[error(
        "LocRes has an invalid localized string index {index} for namespace '{namespace}' and key '{key}' (pool holds {pool_len} strings)"
    )]
    InvalidReference {
        /// Namespace of the offending entry
        namespace: String,
        /// Key of the offending entry
        key: String,
        /// Index read from the file
        index: i32,
        /// Number of strings in the pool
        pool_len: usize,
    },

    /// Malformed or truncated binary data
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocResError {
    /// Check if this error comes from malformed or truncated input
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::BinRw(_) | Self::Io(_) | Self::InvalidStringArrayOffset(_)
        )
    }

    /// Check if this error is a broken pool reference
    pub fn is_reference_error(&self) -> bool {
        matches!(self, Self::InvalidReference { .. })
    }

    /// Check if the file is valid but newer than this reader
    pub fn is_version_error(&self) -> bool {
        matches!(self, Self::UnsupportedVersion { .. })
    }
}
