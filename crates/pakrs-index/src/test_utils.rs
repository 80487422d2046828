//! In-memory collaborators for unit tests

use crate::error::{ArchiveError, ArchiveResult, BoxError};
use crate::reader::{
    ArchiveEntry, ArchiveReader, ExportDecoder, ExportObject, ImageMaterializer, PackageStreams,
    TextureMip,
};
use dashmap::DashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Archive whose entries are held in memory
///
/// The locator is the entry's position in insertion order. Every
/// `open_entry` call is counted per entry name.
#[derive(Debug, Default)]
pub struct MemoryArchive {
    files: Vec<(String, Vec<u8>)>,
    opens: DashMap<String, usize>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, data: &[u8]) -> Self {
        self.files.push((name.to_string(), data.to_vec()));
        self
    }

    pub fn open_count(&self, name: &str) -> usize {
        self.opens.get(name).map_or(0, |count| *count)
    }
}

impl ArchiveReader for MemoryArchive {
    type Locator = usize;
    type Stream = Cursor<Vec<u8>>;

    fn open(path: &Path, _key: Option<&[u8]>) -> ArchiveResult<Self> {
        Err(ArchiveError::ArchiveNotFound(path.display().to_string()))
    }

    fn entries(&self) -> Vec<ArchiveEntry<usize>> {
        self.files
            .iter()
            .enumerate()
            .map(|(index, (name, _))| ArchiveEntry::new(name.clone(), index))
            .collect()
    }

    fn open_entry(&self, locator: &usize) -> ArchiveResult<Self::Stream> {
        let (name, data) = self
            .files
            .get(*locator)
            .ok_or_else(|| ArchiveError::EntryNotFound(locator.to_string()))?;
        *self.opens.entry(name.clone()).or_insert(0) += 1;
        Ok(Cursor::new(data.clone()))
    }
}

/// Export produced by [`NameDecoder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedExport {
    pub name: String,
    pub mip: Option<(u32, u32, String, Vec<u8>)>,
}

impl ExportObject for NamedExport {
    fn texture_mip(&self) -> Option<TextureMip<'_>> {
        self.mip
            .as_ref()
            .map(|(width, height, format, data)| TextureMip {
                width: *width,
                height: *height,
                pixel_format: format,
                data,
            })
    }
}

/// Decoder producing a single export named after the header text
///
/// A header of the form `texture WxH FORMAT` yields a texture whose mip is
/// the bulk payload. An empty header fails.
#[derive(Debug, Clone, Copy)]
pub struct NameDecoder;

impl ExportDecoder for NameDecoder {
    type Export = NamedExport;

    fn decode<S: Read + Seek>(
        &self,
        mut streams: PackageStreams<S>,
    ) -> Result<Vec<NamedExport>, BoxError> {
        let mut name = String::new();
        streams.header.read_to_string(&mut name)?;
        if name.is_empty() {
            return Err("empty package header".into());
        }

        let mip = match name.strip_prefix("texture ") {
            Some(rest) => {
                let (size, format) = rest.split_once(' ').ok_or("missing pixel format")?;
                let (width, height) = size.split_once('x').ok_or("missing size")?;
                let mut data = Vec::new();
                if let Some(bulk) = streams.bulk.as_mut() {
                    bulk.read_to_end(&mut data)?;
                }
                Some((width.parse()?, height.parse()?, format.to_string(), data))
            }
            None => None,
        };

        Ok(vec![NamedExport { name, mip }])
    }
}

/// Materializer returning the mip fields unchanged
#[derive(Debug, Clone, Copy)]
pub struct PassthroughImage;

impl ImageMaterializer for PassthroughImage {
    type Image = (u32, u32, String, Vec<u8>);

    fn materialize(&self, mip: TextureMip<'_>) -> Result<Self::Image, BoxError> {
        Ok((
            mip.width,
            mip.height,
            mip.pixel_format.to_string(),
            mip.data.to_vec(),
        ))
    }
}
