//! Logical packages assembled from archive entries
//!
//! A cooked asset is split into up to three files that may live in different
//! archives:
//!
//! - `.uasset`: package header (names, imports, export table)
//! - `.uexp`: serialized export data
//! - `.ubulk`: bulk payloads such as texture mips
//!
//! A [`Package`] holds one slot per role, each tied to the reader of the
//! archive the entry came from. Any other extension lands in an overflow table.

use crate::error::{IndexError, IndexResult, PackageError, PackageResult};
use crate::reader::{
    ArchiveEntry, ArchiveReader, ExportDecoder, ExportObject, ImageMaterializer, PackageStreams,
};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Role of an entry within a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PackageRole {
    /// Package header (`.uasset`)
    Header,
    /// Export data (`.uexp`)
    Export,
    /// Bulk data (`.ubulk`)
    Bulk,
}

impl PackageRole {
    /// All roles in slot order
    pub const ALL: [Self; 3] = [Self::Header, Self::Export, Self::Bulk];

    /// Classify a lowercase extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "uasset" => Some(Self::Header),
            "uexp" => Some(Self::Export),
            "ubulk" => Some(Self::Bulk),
            _ => None,
        }
    }

    /// File extension for this role, without the dot
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Header => "uasset",
            Self::Export => "uexp",
            Self::Bulk => "ubulk",
        }
    }
}

impl fmt::Display for PackageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Header => "header",
            Self::Export => "export",
            Self::Bulk => "bulk",
        };
        f.write_str(name)
    }
}

/// An archive entry together with the reader of the archive holding it
pub struct PackageSlot<R: ArchiveReader> {
    entry: ArchiveEntry<R::Locator>,
    reader: Arc<R>,
}

impl<R: ArchiveReader> PackageSlot<R> {
    pub(crate) fn new(entry: ArchiveEntry<R::Locator>, reader: Arc<R>) -> Self {
        Self { entry, reader }
    }

    /// Entry name as listed by the archive, original case preserved
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// The archive entry
    pub fn entry(&self) -> &ArchiveEntry<R::Locator> {
        &self.entry
    }

    /// Reader of the archive that owns this entry
    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }

    /// Open the payload stream through the owning reader
    pub fn open(&self) -> PackageResult<R::Stream> {
        Ok(self.reader.open_entry(&self.entry.locator)?)
    }
}

impl<R: ArchiveReader> Clone for PackageSlot<R> {
    fn clone(&self) -> Self {
        Self {
            entry: self.entry.clone(),
            reader: Arc::clone(&self.reader),
        }
    }
}

impl<R: ArchiveReader> fmt::Debug for PackageSlot<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageSlot")
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}

/// One logical asset merged from entries across archives
pub struct Package<R: ArchiveReader> {
    path: String,
    header: Option<PackageSlot<R>>,
    export: Option<PackageSlot<R>>,
    bulk: Option<PackageSlot<R>>,
    overflow: BTreeMap<String, PackageSlot<R>>,
}

impl<R: ArchiveReader> Package<R> {
    pub(crate) fn new(path: String) -> Self {
        Self {
            path,
            header: None,
            export: None,
            bulk: None,
            overflow: BTreeMap::new(),
        }
    }

    /// Place an entry by its lowercase extension
    ///
    /// Primary roles overwrite whatever the slot held. A second entry for the
    /// same overflow extension is rejected and leaves the package unchanged.
    pub(crate) fn insert(&mut self, extension: &str, slot: PackageSlot<R>) -> IndexResult<()> {
        match PackageRole::from_extension(extension) {
            Some(role) => {
                if let Some(previous) = self.slot(role) {
                    debug!(
                        path = %self.path,
                        %role,
                        replaced = previous.name(),
                        "overwriting package slot"
                    );
                }
                *self.slot_mut(role) = Some(slot);
            }
            None => {
                if self.overflow.contains_key(extension) {
                    return Err(IndexError::OverflowCollision {
                        path: self.path.clone(),
                        extension: extension.to_string(),
                    });
                }
                self.overflow.insert(extension.to_string(), slot);
            }
        }
        Ok(())
    }

    fn slot_mut(&mut self, role: PackageRole) -> &mut Option<PackageSlot<R>> {
        match role {
            PackageRole::Header => &mut self.header,
            PackageRole::Export => &mut self.export,
            PackageRole::Bulk => &mut self.bulk,
        }
    }

    /// Normalized package path (lowercase, no extension)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Slot for a primary role
    pub fn slot(&self, role: PackageRole) -> Option<&PackageSlot<R>> {
        match role {
            PackageRole::Header => self.header.as_ref(),
            PackageRole::Export => self.export.as_ref(),
            PackageRole::Bulk => self.bulk.as_ref(),
        }
    }

    /// Header (`.uasset`) slot
    pub fn header(&self) -> Option<&PackageSlot<R>> {
        self.header.as_ref()
    }

    /// Export data (`.uexp`) slot
    pub fn export(&self) -> Option<&PackageSlot<R>> {
        self.export.as_ref()
    }

    /// Bulk data (`.ubulk`) slot
    pub fn bulk(&self) -> Option<&PackageSlot<R>> {
        self.bulk.as_ref()
    }

    /// Overflow entry for a non-primary extension (case-insensitive)
    pub fn overflow(&self, extension: &str) -> Option<&PackageSlot<R>> {
        self.overflow.get(&extension.to_lowercase())
    }

    /// Overflow extensions in ascending order
    pub fn overflow_extensions(&self) -> impl Iterator<Item = &str> {
        self.overflow.keys().map(String::as_str)
    }

    /// Whether header and export slots are both populated
    pub fn is_decodable(&self) -> bool {
        self.header.is_some() && self.export.is_some()
    }

    fn required(&self, role: PackageRole) -> PackageResult<&PackageSlot<R>> {
        self.slot(role).ok_or(PackageError::MissingSlot(role))
    }

    /// Open the header stream
    pub fn open_header(&self) -> PackageResult<R::Stream> {
        self.required(PackageRole::Header)?.open()
    }

    /// Open the export data stream
    pub fn open_export(&self) -> PackageResult<R::Stream> {
        self.required(PackageRole::Export)?.open()
    }

    /// Open the bulk data stream, if the package has one
    pub fn open_bulk(&self) -> PackageResult<Option<R::Stream>> {
        self.bulk.as_ref().map(PackageSlot::open).transpose()
    }

    /// Decode every export of this package
    ///
    /// Streams are reopened and the decoder runs on every call. Callers that
    /// need the result more than once should keep it.
    pub fn exports<D: ExportDecoder>(&self, decoder: &D) -> PackageResult<Vec<D::Export>> {
        let header = self.open_header()?;
        let export = self.open_export()?;
        let bulk = self.open_bulk()?;

        debug!(path = %self.path, has_bulk = bulk.is_some(), "decoding package exports");

        decoder
            .decode(PackageStreams {
                header,
                export,
                bulk,
            })
            .map_err(PackageError::Decode)
    }

    /// First export, if the package has any
    pub fn first_object<D: ExportDecoder>(&self, decoder: &D) -> PackageResult<Option<D::Export>> {
        Ok(self.exports(decoder)?.into_iter().next())
    }

    /// Image of the first export
    ///
    /// Returns `Ok(None)` when the package has no exports or the first export
    /// carries no mip data.
    pub fn first_texture<D, M>(&self, decoder: &D, materializer: &M) -> PackageResult<Option<M::Image>>
    where
        D: ExportDecoder,
        M: ImageMaterializer,
    {
        let Some(object) = self.first_object(decoder)? else {
            return Ok(None);
        };
        let Some(mip) = object.texture_mip() else {
            return Ok(None);
        };

        materializer
            .materialize(mip)
            .map(Some)
            .map_err(PackageError::Image)
    }

    /// Write the raw primary payloads into `dir`
    ///
    /// Files are named after the last path component with the role's
    /// extension. Header and export are required, bulk is written when
    /// present. Returns the paths written.
    pub fn extract_to<P: AsRef<Path>>(&self, dir: P) -> PackageResult<Vec<PathBuf>> {
        let header = self.required(PackageRole::Header)?;
        let export = self.required(PackageRole::Export)?;

        let dir = dir.as_ref();
        let stem = self.path.rsplit('/').next().unwrap_or(&self.path);
        let mut written = Vec::with_capacity(3);

        let slots = [
            (PackageRole::Header, Some(header)),
            (PackageRole::Export, Some(export)),
            (PackageRole::Bulk, self.bulk.as_ref()),
        ];
        for (role, slot) in slots {
            let Some(slot) = slot else { continue };
            let target = dir.join(format!("{stem}.{}", role.extension()));
            let mut stream = slot.open()?;
            let mut file = File::create(&target)?;
            io::copy(&mut stream, &mut file)?;
            written.push(target);
        }

        debug!(path = %self.path, dir = %dir.display(), files = written.len(), "extracted package");
        Ok(written)
    }
}

impl<R: ArchiveReader> Clone for Package<R> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            header: self.header.clone(),
            export: self.export.clone(),
            bulk: self.bulk.clone(),
            overflow: self.overflow.clone(),
        }
    }
}

impl<R: ArchiveReader> fmt::Debug for Package<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("path", &self.path)
            .field("header", &self.header)
            .field("export", &self.export)
            .field("bulk", &self.bulk)
            .field("overflow", &self.overflow)
            .finish()
    }
}
