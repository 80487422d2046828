//! Localization file decoders for packed game assets
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_possible_wrap)] // Intentional for binary operations
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::doc_markdown)] // Many engine-specific terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
//! This crate decodes the two localization formats emitted by the engine's
//! asset cooker:
//!
//! - **LocRes**: namespace → key → localized text tables in three on-disk
//!   generations (legacy, compact, optimized)
//! - **LocMeta**: the native culture and native LocRes path of a localization
//!   target
//!
//! Both are read-only decoders over any `Read + Seek` source. They are
//! single-shot: each call reads one file and leaves the stream positioned
//! after it.

#![warn(missing_docs)]

pub mod guid;
pub mod locmeta;
pub mod locres;
pub mod string;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use guid::Guid;
pub use locmeta::{LocMetaError, LocMetaFile};
pub use locres::{LocResError, LocResFile, LocalizationTable};

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Common entry points shared by every decoder
pub trait UeFormat: Sized {
    /// Error produced by this format
    type Error: From<std::io::Error>;

    /// Decode from the reader's current position
    fn parse<R: Read + Seek>(reader: &mut R) -> Result<Self, Self::Error>;

    /// Decode from an in-memory buffer
    fn from_bytes(data: &[u8]) -> Result<Self, Self::Error> {
        Self::parse(&mut Cursor::new(data))
    }

    /// Decode a file on disk
    fn open<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error> {
        let file = File::open(path)?;
        Self::parse(&mut BufReader::new(file))
    }
}
