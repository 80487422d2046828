//! Capabilities supplied by the archive container and asset decoders
//!
//! The index never parses archive containers or asset data itself. Container
//! readers (decryption, decompression, offset tables), the export-graph
//! decoder, and the texture-to-image step plug in through these traits.

use crate::error::{ArchiveResult, BoxError};
use std::fmt;
use std::io::{Read, Seek};
use std::path::Path;

/// One file listed by an archive reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry<L> {
    /// Path of the entry inside the archive, including its extension
    pub name: String,
    /// Reader-specific position of the payload
    pub locator: L,
}

impl<L> ArchiveEntry<L> {
    /// Create a new entry
    pub fn new(name: impl Into<String>, locator: L) -> Self {
        Self {
            name: name.into(),
            locator,
        }
    }
}

/// An opened archive file
///
/// Readers are shared between every package that has an entry in the archive,
/// so they must be usable from several threads at once.
pub trait ArchiveReader: Send + Sync + Sized {
    /// Opaque payload position handed back to [`ArchiveReader::open_entry`]
    type Locator: Clone + fmt::Debug + Send + Sync;

    /// Decompressed and decrypted payload stream
    type Stream: Read + Seek;

    /// Open an archive file, with optional key material for encrypted indices
    fn open(path: &Path, key: Option<&[u8]>) -> ArchiveResult<Self>;

    /// Every entry in the archive
    fn entries(&self) -> Vec<ArchiveEntry<Self::Locator>>;

    /// Open the payload of one entry
    fn open_entry(&self, locator: &Self::Locator) -> ArchiveResult<Self::Stream>;
}

/// Streams handed to an [`ExportDecoder`]
#[derive(Debug)]
pub struct PackageStreams<S> {
    /// Header (`.uasset`) payload
    pub header: S,
    /// Export data (`.uexp`) payload
    pub export: S,
    /// Bulk data (`.ubulk`) payload, when the package has one
    pub bulk: Option<S>,
}

/// First mip of a texture export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureMip<'a> {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Engine pixel format name, e.g. `PF_DXT5`
    pub pixel_format: &'a str,
    /// Encoded pixel payload
    pub data: &'a [u8],
}

/// One decoded export object
pub trait ExportObject {
    /// First mip and pixel format, if this export carries image data
    fn texture_mip(&self) -> Option<TextureMip<'_>>;
}

/// Turns header, export, and bulk streams into ordered exports
pub trait ExportDecoder {
    /// Decoded export type
    type Export: ExportObject;

    /// Decode every export of one package
    fn decode<S: Read + Seek>(&self, streams: PackageStreams<S>)
    -> Result<Vec<Self::Export>, BoxError>;
}

/// Converts an encoded texture mip into a displayable image
pub trait ImageMaterializer {
    /// Image type produced
    type Image;

    /// Decode pixel data in the given format
    fn materialize(&self, mip: TextureMip<'_>) -> Result<Self::Image, BoxError>;
}
