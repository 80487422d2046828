//! 128-bit identifiers used as file magics

use binrw::{BinRead, BinWrite};
use std::fmt;

/// Four little-endian 32-bit words compared structurally
///
/// The engine stores these as its `FGuid` type. In the formats handled here
/// they only act as fixed-width magic values in front of a version byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, BinRead, BinWrite)]
#[brw(little)]
pub struct Guid {
    /// First word
    pub a: u32,
    /// Second word
    pub b: u32,
    /// Third word
    pub c: u32,
    /// Fourth word
    pub d: u32,
}

impl Guid {
    /// Size of a serialized GUID in bytes
    pub const SIZE: usize = 16;

    /// Create a GUID from its four words
    pub const fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self { a, b, c, d }
    }

    /// Serialized little-endian representation
    pub fn to_le_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.a.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.b.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.c.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.d.to_le_bytes());
        bytes
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08X}-{:08X}-{:08X}-{:08X}",
            self.a, self.b, self.c, self.d
        )
    }
}
