//! Concurrent package index
//!
//! Entries from every added archive are grouped by normalized path: the name
//! up to the final `.` of its last component, lowercased. Each path maps to a
//! shared [`Package`] snapshot. Merging copies a snapshot only when a reader
//! still holds it, so lookups never observe a half-merged package.

use crate::config::PackageIndexConfig;
use crate::error::{IndexError, IndexResult};
use crate::package::{Package, PackageSlot};
use crate::reader::ArchiveReader;
use dashmap::DashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Split an entry name into normalized package path and lowercase extension
///
/// Only the last path component is searched for the `.`, so dots in
/// directory names never start an extension. A name whose last component has
/// no `.` yields an empty extension.
pub fn split_entry_name(name: &str) -> (String, String) {
    let last_component = name.rfind('/').map_or(0, |slash| slash + 1);
    match name[last_component..].rfind('.') {
        Some(dot) => {
            let dot = last_component + dot;
            (name[..dot].to_lowercase(), name[dot + 1..].to_lowercase())
        }
        None => (name.to_lowercase(), String::new()),
    }
}

/// Path-addressable index of packages across archives
///
/// Archives may be added from several threads at once. Merges into one path
/// are serialized by the map's per-shard lock; distinct paths proceed in
/// parallel.
pub struct PackageIndex<R: ArchiveReader> {
    packages: DashMap<String, Arc<Package<R>>>,
}

impl<R: ArchiveReader> PackageIndex<R> {
    /// Create an empty index with default configuration
    pub fn new() -> Self {
        Self {
            packages: DashMap::new(),
        }
    }

    /// Create an empty index with the given configuration
    pub fn with_config(config: &PackageIndexConfig) -> IndexResult<Self> {
        config.validate().map_err(IndexError::InvalidConfig)?;

        let packages = match config.shard_amount {
            Some(shards) => DashMap::with_capacity_and_shard_amount(config.initial_capacity, shards),
            None => DashMap::with_capacity(config.initial_capacity),
        };
        Ok(Self { packages })
    }

    /// Open an archive and index its entries
    ///
    /// Returns the number of entries indexed.
    pub fn add_archive<P: AsRef<Path>>(&self, path: P, key: Option<&[u8]>) -> IndexResult<usize> {
        let path = path.as_ref();
        let reader = R::open(path, key).inspect_err(|e| {
            warn!(archive = %path.display(), error = %e, "failed to open archive");
        })?;
        let added = self.add_reader(Arc::new(reader))?;
        info!(archive = %path.display(), entries = added, packages = self.len(), "indexed archive");
        Ok(added)
    }

    /// Index the entries of an already opened archive
    ///
    /// Stops at the first overflow collision. Entries merged before the
    /// collision stay in the index.
    pub fn add_reader(&self, reader: Arc<R>) -> IndexResult<usize> {
        let entries = reader.entries();
        let total = entries.len();
        let mut created = 0usize;

        for entry in entries {
            let (path, extension) = split_entry_name(&entry.name);
            let slot = PackageSlot::new(entry, Arc::clone(&reader));

            let mut record = self.packages.entry(path.clone()).or_insert_with(|| {
                created += 1;
                Arc::new(Package::new(path))
            });
            Arc::make_mut(record.value_mut())
                .insert(&extension, slot)
                .inspect_err(|e| warn!(error = %e, "overflow collision while indexing"))?;
        }

        debug!(entries = total, new_packages = created, "merged archive entries");
        Ok(total)
    }

    /// Look up a package by path, ignoring case
    pub fn get_package(&self, name: &str) -> Option<Arc<Package<R>>> {
        self.packages
            .get(&name.to_lowercase())
            .map(|package| Arc::clone(package.value()))
    }

    /// Whether a package exists at the path, ignoring case
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(&name.to_lowercase())
    }

    /// Number of packages
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether no package has been indexed
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// All package paths, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.packages.iter().map(|p| p.key().clone()).collect();
        paths.sort_unstable();
        paths
    }

    /// Iterate over `(path, package)` pairs in no particular order
    ///
    /// Each call starts a fresh pass over the current contents.
    pub fn iter(&self) -> Iter<'_, R> {
        Iter {
            inner: self.packages.iter(),
        }
    }
}

impl<R: ArchiveReader> Default for PackageIndex<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ArchiveReader> fmt::Debug for PackageIndex<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageIndex")
            .field("packages", &self.packages.len())
            .finish()
    }
}

/// Iterator over index contents
pub struct Iter<'a, R: ArchiveReader> {
    inner: dashmap::iter::Iter<'a, String, Arc<Package<R>>>,
}

impl<R: ArchiveReader> Iterator for Iter<'_, R> {
    type Item = (String, Arc<Package<R>>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|item| (item.key().clone(), Arc::clone(item.value())))
    }
}

impl<'a, R: ArchiveReader> IntoIterator for &'a PackageIndex<R> {
    type Item = (String, Arc<Package<R>>);
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
