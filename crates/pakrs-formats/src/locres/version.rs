//! LocRes format generations and their per-generation layout

use std::fmt;

/// On-disk generations of the localization resource format
///
/// Each generation is a superset of the previous one's capabilities. A file
/// declares its generation with the byte that follows the magic GUID; files
/// without the magic are [`LocResVersion::Legacy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LocResVersion {
    /// No magic, no string pool, strings stored inline
    Legacy = 0,
    /// Localized strings deduplicated into a pool referenced by index
    Compact = 1,
    /// Pre-hashed keys, entry count hint, and per-string reference counts
    Optimized = 2,
}

/// How namespace and key identifiers are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    /// `[string]`
    Plain,
    /// `[u32 hash][string]`
    Hashed,
}

/// Shape of one element in the localized string pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolElementShape {
    /// `[string]`; reference counts are synthesized as untracked
    Bare,
    /// `[string][i32 refcount]`
    RefCounted,
}

impl LocResVersion {
    /// Highest generation this reader implements
    pub const LATEST: Self = Self::Optimized;

    /// Map a declared version byte to a known generation
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Legacy),
            1 => Some(Self::Compact),
            2 => Some(Self::Optimized),
            _ => None,
        }
    }

    /// Numeric version byte
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Namespace/key layout for this generation
    pub const fn key_encoding(self) -> KeyEncoding {
        match self {
            Self::Legacy | Self::Compact => KeyEncoding::Plain,
            Self::Optimized => KeyEncoding::Hashed,
        }
    }

    /// Pool element layout, or `None` when localized strings are inline
    pub const fn string_pool(self) -> Option<PoolElementShape> {
        match self {
            Self::Legacy => None,
            Self::Compact => Some(PoolElementShape::Bare),
            Self::Optimized => Some(PoolElementShape::RefCounted),
        }
    }

    /// Whether a total entry count precedes the namespace table
    pub const fn has_entry_count_hint(self) -> bool {
        matches!(self, Self::Optimized)
    }
}

impl fmt::Display for LocResVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "Legacy (0)"),
            Self::Compact => write!(f, "Compact (1)"),
            Self::Optimized => write!(f, "Optimized (2)"),
        }
    }
}
