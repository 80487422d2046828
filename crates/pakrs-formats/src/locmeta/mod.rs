//! LocMeta decoding
//!
//! A LocMeta file names the native culture of a localization target and the
//! LocRes file holding its source text:
//!
//! ```text
//! [GUID magic][u8 version][string native culture][string native LocRes]
//! ```
//!
//! Unlike LocRes there is no legacy layout, so a magic mismatch is an error.

mod error;

pub use error::{LocMetaError, LocMetaResult};

use crate::UeFormat;
use crate::guid::Guid;
use crate::string::FString;
use binrw::io::{Read, Seek};
use binrw::{BinRead, BinReaderExt};
use tracing::debug;

/// Magic GUID at the start of every LocMeta file
pub const LOCMETA_MAGIC: Guid = Guid::new(0xA14C_EE4F, 0x8355_4868, 0xBD46_4C6C, 0x7C50_DA70);

/// Known LocMeta versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LocMetaVersion {
    /// Initial layout
    Initial = 0,
}

impl LocMetaVersion {
    /// Highest version this reader implements
    pub const LATEST: Self = Self::Initial;

    /// Map a declared version byte to a known version
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Initial),
            _ => None,
        }
    }

    /// Numeric version byte
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, BinRead)]
#[br(little)]
struct LocMetaPrefix {
    magic: Guid,
    version: u8,
}

/// Decoded LocMeta header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocMetaFile {
    native_culture: String,
    native_locres: String,
}

impl LocMetaFile {
    /// Culture the source text was authored in, e.g. `en`
    pub fn native_culture(&self) -> &str {
        &self.native_culture
    }

    /// Path of the LocRes file holding the native text
    pub fn native_locres(&self) -> &str {
        &self.native_locres
    }

    /// Consume into `(native culture, native LocRes)`
    pub fn into_parts(self) -> (String, String) {
        (self.native_culture, self.native_locres)
    }
}

impl UeFormat for LocMetaFile {
    type Error = LocMetaError;

    fn parse<R: Read + Seek>(reader: &mut R) -> LocMetaResult<Self> {
        let prefix: LocMetaPrefix = reader.read_le()?;
        if prefix.magic != LOCMETA_MAGIC {
            return Err(LocMetaError::InvalidMagic(prefix.magic));
        }

        let version =
            LocMetaVersion::from_u8(prefix.version).ok_or(LocMetaError::UnsupportedVersion {
                found: prefix.version,
                latest: LocMetaVersion::LATEST.to_u8(),
            })?;

        let native_culture = reader.read_le::<FString>()?.into_string();
        let native_locres = reader.read_le::<FString>()?.into_string();

        debug!(?version, %native_culture, %native_locres, "decoded LocMeta");

        Ok(Self {
            native_culture,
            native_locres,
        })
    }
}
