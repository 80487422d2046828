//! Error types for archive indexing and package materialization

use crate::package::PackageRole;
use thiserror::Error;

/// Boxed error produced by external collaborators
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Archive reader result type
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Index operation result type
pub type IndexResult<T> = Result<T, IndexError>;

/// Package operation result type
pub type PackageResult<T> = Result<T, PackageError>;

/// Errors raised by archive reader implementations
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Archive file not found
    #[error("Archive not found: {0}")]
    ArchiveNotFound(String),

    /// Key material missing or rejected
    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    /// Entry locator does not resolve within its archive
    #[error("Entry not found in archive: {0}")]
    EntryNotFound(String),

    /// Container could not be decoded
    #[error("Invalid archive format: {0}")]
    InvalidFormat(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while populating or configuring the package index
#[derive(Debug, Error)]
pub enum IndexError {
    /// Two entries of one package share a non-primary extension
    #[error("Package '{path}' already has an entry with extension '{extension}'")]
    OverflowCollision {
        /// Normalized package path
        path: String,
        /// Colliding extension
        extension: String,
    },

    /// Rejected configuration
    #[error("Invalid index configuration: {0}")]
    InvalidConfig(String),

    /// Archive could not be opened or listed
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}

impl IndexError {
    /// Check if only the current archive is affected, so indexing others can continue
    pub fn is_archive_local(&self) -> bool {
        matches!(self, Self::OverflowCollision { .. } | Self::Archive(_))
    }
}

/// Errors raised while materializing a package
#[derive(Debug, Error)]
pub enum PackageError {
    /// Required role slot has no entry
    #[error("Package has no {0} entry")]
    MissingSlot(PackageRole),

    /// Export-graph decoder failed
    #[error("Export decoding failed: {0}")]
    Decode(#[source] BoxError),

    /// Image materialization failed
    #[error("Image materialization failed: {0}")]
    Image(#[source] BoxError),

    /// Slot stream could not be opened
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackageError {
    /// Check if the package itself is incomplete rather than unreadable
    pub fn is_precondition_failure(&self) -> bool {
        matches!(self, Self::MissingSlot(_))
    }
}
