//! Namespace and key identifiers

use crate::locres::version::KeyEncoding;
use crate::string::FString;
use binrw::io::{Read, Seek};
use binrw::{BinReaderExt, BinResult};
use std::fmt;

/// A namespace or key identifier
///
/// Optimized files store a precomputed hash ahead of the text. The hash is
/// kept as read; older generations have none.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextKey {
    hash: Option<u32>,
    text: String,
}

impl TextKey {
    /// Create a key without a stored hash
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            hash: None,
            text: text.into(),
        }
    }

    /// Read a key in the given layout
    pub fn read<R: Read + Seek>(reader: &mut R, encoding: KeyEncoding) -> BinResult<Self> {
        let hash = match encoding {
            KeyEncoding::Plain => None,
            KeyEncoding::Hashed => Some(reader.read_le::<u32>()?),
        };
        let text = reader.read_le::<FString>()?.into_string();
        Ok(Self { hash, text })
    }

    /// Stored hash, if the generation carries one
    pub fn hash(&self) -> Option<u32> {
        self.hash
    }

    /// Identifier text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume into the identifier text
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for TextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
