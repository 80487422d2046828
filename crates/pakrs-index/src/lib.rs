//! Cross-archive package index for cooked game assets
//!
//! A cooked asset is stored as separate header (`.uasset`), export
//! (`.uexp`), and bulk (`.ubulk`) entries, and patch archives routinely ship
//! only some of them. [`PackageIndex`] merges entries from any number of
//! archives into one [`Package`] per normalized path, and materializes
//! exports on demand through pluggable decoders.
//!
//! Container parsing, export decoding, and pixel decoding are supplied by
//! implementations of [`ArchiveReader`], [`ExportDecoder`], and
//! [`ImageMaterializer`].
//!
//! # Example
//!
//! ```no_run
//! use pakrs_index::{ArchiveReader, PackageIndex};
//!
//! fn index_all<R: ArchiveReader>(archives: &[&str]) -> PackageIndex<R> {
//!     let index = PackageIndex::new();
//!     for archive in archives {
//!         // A bad archive is skipped, the rest still get indexed
//!         if let Err(e) = index.add_archive(archive, None) {
//!             eprintln!("skipping {archive}: {e}");
//!         }
//!     }
//!     index
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod index;
pub mod package;
pub mod reader;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
pub(crate) mod test_utils;

pub use config::PackageIndexConfig;
pub use error::{
    ArchiveError, ArchiveResult, BoxError, IndexError, IndexResult, PackageError, PackageResult,
};
pub use index::{Iter, PackageIndex};
pub use package::{Package, PackageRole, PackageSlot};
pub use reader::{
    ArchiveEntry, ArchiveReader, ExportDecoder, ExportObject, ImageMaterializer, PackageStreams,
    TextureMip,
};
