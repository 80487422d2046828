//! Localization resource (LocRes) decoding
//!
//! A LocRes file maps `(namespace, key)` pairs to translated text for one
//! culture. Three generations share a single reader:
//!
//! ```text
//! Legacy:    [u32 ns count] { [string ns] [u32 key count] { [string key] [u32 src hash] [string text] } }
//! Compact:   [GUID magic][u8 1][i64 pool offset]
//!            [u32 ns count] { [string ns] [u32 key count] { [string key] [u32 src hash] [i32 pool index] } }
//! Optimized: [GUID magic][u8 2][i64 pool offset][u32 entry count]
//!            [u32 ns count] { [u32 hash][string ns] [u32 key count] { [u32 hash][string key] [u32 src hash] [i32 pool index] } }
//! ```
//!
//! The pool blob lives at `pool offset` relative to where decoding started.
//! Its elements are bare strings in Compact files and `(string, i32 refcount)`
//! pairs in Optimized files.
//!
//! # Example
//!
//! ```rust,no_run
//! use pakrs_formats::UeFormat;
//! use pakrs_formats::locres::LocResFile;
//!
//! let locres = LocResFile::open("Game.locres")?;
//! if let Some(text) = locres.get("UI", "PlayButton") {
//!     println!("{text}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod key;
mod pool;
mod version;

pub use error::{LocResError, LocResResult};
pub use key::TextKey;
pub use pool::UNTRACKED;
pub use version::{KeyEncoding, LocResVersion, PoolElementShape};

use crate::UeFormat;
use crate::guid::Guid;
use crate::string::FString;
use binrw::BinReaderExt;
use binrw::io::{Read, Seek, SeekFrom};
use pool::{EntryPos, StringPool, Taken};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Magic GUID that precedes the version byte in Compact and newer files
pub const LOCRES_MAGIC: Guid = Guid::new(0x7574_140E, 0xFC03_4A67, 0x9D90_154A, 0x1B7F_37C3);

/// Pool offset meaning "this file has no string pool"
const NO_STRING_POOL: i64 = -1;

/// Upper bound on capacity reserved from an untrusted element count
pub(crate) const MAX_PREALLOC: usize = 4096;

/// Namespace → key → localized text
pub type LocalizationTable = HashMap<String, HashMap<String, String>>;

/// One decoded `(namespace, key)` entry before it is folded into the table
#[derive(Debug)]
struct LocResEntry {
    key: TextKey,
    source_string_hash: u32,
    localized: String,
}

/// Decoded localization resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocResFile {
    version: LocResVersion,
    entries: LocalizationTable,
}

impl LocResFile {
    /// Generation the file was written in
    pub fn version(&self) -> LocResVersion {
        self.version
    }

    /// Full namespace → key → text table
    pub fn entries(&self) -> &LocalizationTable {
        &self.entries
    }

    /// Consume into the table
    pub fn into_entries(self) -> LocalizationTable {
        self.entries
    }

    /// Look up one localized string
    pub fn get(&self, namespace: &str, key: &str) -> Option<&str> {
        self.entries
            .get(namespace)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    /// All keys of one namespace
    pub fn namespace(&self, namespace: &str) -> Option<&HashMap<String, String>> {
        self.entries.get(namespace)
    }

    /// Namespace names, in no particular order
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Total number of localized entries across all namespaces
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Whether the table holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }
}

impl UeFormat for LocResFile {
    type Error = LocResError;

    fn parse<R: Read + Seek>(reader: &mut R) -> LocResResult<Self> {
        let start = reader.stream_position()?;
        let version = read_version(reader, start)?;

        let mut pool = StringPool::default();
        if let Some(shape) = version.string_pool() {
            let offset: i64 = reader.read_le()?;
            if offset != NO_STRING_POOL {
                let offset = u64::try_from(offset)
                    .ok()
                    .filter(|&o| o <= i32::MAX as u64)
                    .ok_or(LocResError::InvalidStringArrayOffset(offset))?;

                let resume = reader.stream_position()?;
                reader.seek(SeekFrom::Start(start + offset))?;
                pool = StringPool::read(reader, shape)?;
                reader.seek(SeekFrom::Start(resume))?;
            }
        }

        if version.has_entry_count_hint() {
            let entry_count: u32 = reader.read_le()?;
            trace!(entry_count, "entry count hint");
        }

        let namespace_count: u32 = reader.read_le()?;
        let mut namespaces: Vec<(TextKey, Vec<LocResEntry>)> =
            Vec::with_capacity((namespace_count as usize).min(MAX_PREALLOC));

        for namespace_pos in 0..namespace_count as usize {
            let namespace = TextKey::read(reader, version.key_encoding())?;
            let key_count: u32 = reader.read_le()?;
            let mut keys: Vec<LocResEntry> =
                Vec::with_capacity((key_count as usize).min(MAX_PREALLOC));

            for entry_pos in 0..key_count as usize {
                let pos = EntryPos {
                    namespace: namespace_pos,
                    entry: entry_pos,
                };
                // Text of an entry that already took a pooled string
                let received = |at: EntryPos| {
                    let earlier = if at.namespace == namespace_pos {
                        keys.get(at.entry)
                    } else {
                        namespaces
                            .get(at.namespace)
                            .and_then(|(_, entries)| entries.get(at.entry))
                    };
                    earlier.map(|entry| entry.localized.clone())
                };

                let entry = read_entry(reader, version, &mut pool, &namespace, pos, received)?;
                trace!(
                    namespace = namespace.as_str(),
                    key = entry.key.as_str(),
                    source_string_hash = entry.source_string_hash,
                    "decoded entry"
                );
                keys.push(entry);
            }

            namespaces.push((namespace, keys));
        }

        let mut entries: LocalizationTable = HashMap::with_capacity(namespaces.len());
        for (namespace, keys) in namespaces {
            let keys: HashMap<String, String> = keys
                .into_iter()
                .map(|entry| (entry.key.into_string(), entry.localized))
                .collect();
            if entries.insert(namespace.into_string(), keys).is_some() {
                debug!("duplicate namespace replaced an earlier one");
            }
        }

        debug!(
            %version,
            namespaces = entries.len(),
            pooled_strings = pool.len(),
            "decoded localization resource"
        );

        Ok(Self { version, entries })
    }
}

/// Detect the generation, rewinding to `start` for legacy files
fn read_version<R: Read + Seek>(reader: &mut R, start: u64) -> LocResResult<LocResVersion> {
    let mut probe = Vec::with_capacity(Guid::SIZE);
    reader
        .by_ref()
        .take(Guid::SIZE as u64)
        .read_to_end(&mut probe)?;

    if probe.as_slice() != LOCRES_MAGIC.to_le_bytes() {
        reader.seek(SeekFrom::Start(start))?;
        return Ok(LocResVersion::Legacy);
    }

    let declared: u8 = reader.read_le()?;
    LocResVersion::from_u8(declared).ok_or(LocResError::UnsupportedVersion {
        found: declared,
        latest: LocResVersion::LATEST.to_u8(),
    })
}

fn read_entry<R: Read + Seek>(
    reader: &mut R,
    version: LocResVersion,
    pool: &mut StringPool,
    namespace: &TextKey,
    pos: EntryPos,
    received: impl FnOnce(EntryPos) -> Option<String>,
) -> LocResResult<LocResEntry> {
    let key = TextKey::read(reader, version.key_encoding())?;
    let source_string_hash: u32 = reader.read_le()?;

    let localized = if version.string_pool().is_some() {
        let index: i32 = reader.read_le()?;
        let text = match pool.take(index, pos) {
            Some(Taken::Moved(value) | Taken::Copied(value)) => Some(value),
            // Referenced more often than its count declared
            Some(Taken::MovedTo(receiver)) => received(receiver),
            None => None,
        };
        match text {
            Some(text) => text,
            None => {
                return Err(LocResError::InvalidReference {
                    namespace: namespace.to_string(),
                    key: key.into_string(),
                    index,
                    pool_len: pool.len(),
                });
            }
        }
    } else {
        reader.read_le::<FString>()?.into_string()
    };

    Ok(LocResEntry {
        key,
        source_string_hash,
        localized,
    })
}
