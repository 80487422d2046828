//! Fixture writers for decoder tests
//!
//! Decoding is read-only, so tests assemble their input byte by byte. The
//! [`LocResFixture`] builder lays out a complete resource in any generation,
//! deduplicating localized strings into a pool with accurate reference counts.

use crate::guid::Guid;
use crate::locmeta::LOCMETA_MAGIC;
use crate::locres::{LOCRES_MAGIC, LocResVersion, PoolElementShape};
use std::collections::HashMap;

/// Little-endian byte sink
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn i32(&mut self, value: i32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn i64(&mut self, value: i64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn guid(&mut self, value: Guid) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Write a string, as UTF-16 when it is not pure ASCII
    pub fn fstring(&mut self, value: &str) -> &mut Self {
        if value.is_empty() {
            return self.i32(0);
        }
        if value.is_ascii() {
            self.i32((value.len() + 1) as i32);
            self.buf.extend_from_slice(value.as_bytes());
            self.buf.push(0);
        } else {
            let units: Vec<u16> = value.encode_utf16().chain(std::iter::once(0)).collect();
            self.i32(-(units.len() as i32));
            for unit in units {
                self.buf.extend_from_slice(&unit.to_le_bytes());
            }
        }
        self
    }

    pub fn patch_i64(&mut self, at: usize, value: i64) {
        self.buf[at..at + 8].copy_from_slice(&value.to_le_bytes());
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Builder for a complete localization resource
#[derive(Debug, Clone)]
pub struct LocResFixture {
    version: LocResVersion,
    namespaces: Vec<(String, Vec<(String, String)>)>,
}

impl LocResFixture {
    pub fn new(version: LocResVersion) -> Self {
        Self {
            version,
            namespaces: Vec::new(),
        }
    }

    pub fn namespace(mut self, name: &str, entries: &[(&str, &str)]) -> Self {
        self.namespaces.push((
            name.to_string(),
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        ));
        self
    }

    fn key(&self, w: &mut ByteWriter, text: &str) {
        if self.version >= LocResVersion::Optimized {
            w.u32(text.len() as u32);
        }
        w.fstring(text);
    }

    /// Distinct localized strings in first-use order with their use counts
    fn pool(&self) -> Vec<(String, i32)> {
        let mut order: Vec<(String, i32)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (_, entries) in &self.namespaces {
            for (_, text) in entries {
                if let Some(&i) = positions.get(text.as_str()) {
                    order[i].1 += 1;
                } else {
                    positions.insert(text.as_str(), order.len());
                    order.push((text.clone(), 1));
                }
            }
        }
        order
    }

    pub fn build(&self) -> Vec<u8> {
        let mut w = ByteWriter::new();
        if self.version > LocResVersion::Legacy {
            w.guid(LOCRES_MAGIC).u8(self.version.to_u8());
        }

        let pool = self.pool();
        let shape = self.version.string_pool();
        let offset_at = w.position();
        if shape.is_some() {
            w.i64(-1);
        }

        if self.version.has_entry_count_hint() {
            let total: usize = self.namespaces.iter().map(|(_, e)| e.len()).sum();
            w.u32(total as u32);
        }

        w.u32(self.namespaces.len() as u32);
        for (namespace, entries) in &self.namespaces {
            self.key(&mut w, namespace);
            w.u32(entries.len() as u32);
            for (key, text) in entries {
                self.key(&mut w, key);
                w.u32(0x1234_5678);
                if shape.is_some() {
                    let index = pool.iter().position(|(s, _)| s == text).unwrap_or(0);
                    w.i32(index as i32);
                } else {
                    w.fstring(text);
                }
            }
        }

        if let Some(shape) = shape {
            let pool_at = w.position();
            w.patch_i64(offset_at, pool_at as i64);
            w.u32(pool.len() as u32);
            for (text, ref_count) in &pool {
                w.fstring(text);
                if shape == PoolElementShape::RefCounted {
                    w.i32(*ref_count);
                }
            }
        }

        w.into_inner()
    }
}

/// Complete LocMeta file
pub fn locmeta_bytes(version: u8, native_culture: &str, native_locres: &str) -> Vec<u8> {
    let mut w = ByteWriter::new();
    w.guid(LOCMETA_MAGIC)
        .u8(version)
        .fstring(native_culture)
        .fstring(native_locres);
    w.into_inner()
}
