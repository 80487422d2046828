//! Length-prefixed engine strings
//!
//! Strings are stored as a signed 32-bit length followed by the character data:
//!
//! - `len == 0`: empty string, no payload
//! - `len > 0`: `len` bytes of 8-bit (Latin-1) text whose last byte is the
//!   terminator, so `len - 1` bytes carry content
//! - `len < 0`: `|len|` little-endian UTF-16 code units, terminator included
//!
//! Every decoded value is passed through [`trim_nul`] so terminators that
//! survive decoding never reach callers.

use binrw::io::{Read, Seek};
use binrw::{BinRead, BinReaderExt, BinResult, Endian};
use std::fmt;
use std::ops::Deref;

/// Strip trailing NUL code points
///
/// Empty input is returned unchanged. Stripping every trailing NUL rather than
/// only the last keeps the operation idempotent.
pub fn trim_nul(value: &str) -> &str {
    value.trim_end_matches('\0')
}

/// A decoded length-prefixed string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FString(pub String);

impl FString {
    /// Consume into the owned string
    pub fn into_string(self) -> String {
        self.0
    }

    /// Borrow as `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for FString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<FString> for String {
    fn from(value: FString) -> Self {
        value.0
    }
}

impl BinRead for FString {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        _endian: Endian,
        (): Self::Args<'_>,
    ) -> BinResult<Self> {
        let pos = reader.stream_position()?;
        let len: i32 = reader.read_le()?;

        let mut value = match len {
            0 => String::new(),
            n if n < 0 => read_utf16(reader, pos, n.unsigned_abs())?,
            n => read_latin1(reader, n.unsigned_abs())?,
        };

        let trimmed = trim_nul(&value).len();
        value.truncate(trimmed);
        Ok(Self(value))
    }
}

/// Read exactly `len` bytes without trusting `len` for the allocation size
fn read_payload<R: Read>(reader: &mut R, len: u64) -> BinResult<Vec<u8>> {
    let mut buf = Vec::new();
    reader.by_ref().take(len).read_to_end(&mut buf)?;
    if (buf.len() as u64) < len {
        return Err(binrw::Error::Io(std::io::Error::from(
            std::io::ErrorKind::UnexpectedEof,
        )));
    }
    Ok(buf)
}

fn read_utf16<R: Read>(reader: &mut R, pos: u64, units: u32) -> BinResult<String> {
    let bytes = read_payload(reader, u64::from(units) * 2)?;
    let code_units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    String::from_utf16(&code_units).map_err(|e| binrw::Error::AssertFail {
        pos,
        message: format!("invalid UTF-16 string of {units} units: {e}"),
    })
}

fn read_latin1<R: Read>(reader: &mut R, len: u32) -> BinResult<String> {
    let bytes = read_payload(reader, u64::from(len))?;
    // Last byte is the terminator
    let content = &bytes[..bytes.len() - 1];
    Ok(content.iter().map(|&b| char::from(b)).collect())
}
