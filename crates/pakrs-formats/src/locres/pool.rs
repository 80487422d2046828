//! Deduplicated localized string pool
//!
//! Compact and newer files store each distinct localized string once and
//! reference it by index from every entry that uses it. Optimized files also
//! record how many entries reference each string so the last reader can take
//! the storage instead of copying it.

use crate::locres::MAX_PREALLOC;
use crate::locres::version::PoolElementShape;
use crate::string::FString;
use binrw::io::{Read, Seek};
use binrw::{BinReaderExt, BinResult};
use tracing::trace;

/// Reference count of elements synthesized from pools without counts
pub const UNTRACKED: i32 = -1;

/// Position of a decoded entry: namespace ordinal and entry ordinal within it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EntryPos {
    pub(crate) namespace: usize,
    pub(crate) entry: usize,
}

/// One pooled string and the number of readers still expected
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PooledString {
    /// `None` once the storage has been transferred to its last reader
    value: Option<String>,
    ref_count: i32,
    /// Entry that received the storage
    receiver: Option<EntryPos>,
}

impl PooledString {
    pub(crate) fn new(value: String, ref_count: i32) -> Self {
        Self {
            value: Some(value),
            ref_count,
            receiver: None,
        }
    }
}

/// Value handed out by [`StringPool::take`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Taken {
    /// Storage moved out; this was the last expected reader
    Moved(String),
    /// Storage copied; the slot stays readable
    Copied(String),
    /// Storage already moved to the entry at this position, which holds the text
    MovedTo(EntryPos),
}

/// Localized strings for one decode call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct StringPool {
    slots: Vec<PooledString>,
}

impl StringPool {
    /// Read a `[u32 count]`-prefixed pool blob
    pub(crate) fn read<R: Read + Seek>(reader: &mut R, shape: PoolElementShape) -> BinResult<Self> {
        let count: u32 = reader.read_le()?;
        let mut slots = Vec::with_capacity((count as usize).min(MAX_PREALLOC));

        for _ in 0..count {
            let value = reader.read_le::<FString>()?.into_string();
            let ref_count = match shape {
                PoolElementShape::Bare => UNTRACKED,
                PoolElementShape::RefCounted => reader.read_le::<i32>()?,
            };
            slots.push(PooledString::new(value, ref_count));
        }

        Ok(Self { slots })
    }

    #[cfg(test)]
    pub(crate) fn from_slots(slots: Vec<PooledString>) -> Self {
        Self { slots }
    }

    /// Number of pooled strings
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Hand out the string at `index` to the entry at `reader`
    ///
    /// A slot whose count is exactly 1 gives up its storage to that entry and
    /// drops to 0. Counts above 1 are decremented and the value copied.
    /// Untracked slots, and slots already at 0 or below, are copied without
    /// touching the count, so no slot can fall back into the untracked
    /// sentinel. Reading a slot after its storage moved points back at the
    /// receiving entry. Returns `None` when `index` is outside the pool.
    pub(crate) fn take(&mut self, index: i32, reader: EntryPos) -> Option<Taken> {
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| self.slots.get_mut(i))?;

        if slot.value.is_none() {
            return slot.receiver.map(Taken::MovedTo);
        }

        if slot.ref_count == 1 {
            slot.ref_count = 0;
            slot.receiver = Some(reader);
            trace!(index, "transferred pooled string to its last reader");
            return slot.value.take().map(Taken::Moved);
        }

        if slot.ref_count > 1 {
            slot.ref_count -= 1;
        }
        slot.value.clone().map(Taken::Copied)
    }
}
