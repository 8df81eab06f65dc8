//! Data model for decoded Rich Headers.

use serde::{Deserialize, Serialize};

/// One decoded (identifier, count) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RichEntry {
    /// Opaque tool/version code ("compid").
    pub identifier: u32,
    /// Number of object files that contributed this identifier.
    pub count: u32,
}

impl RichEntry {
    pub fn new(identifier: u32, count: u32) -> Self {
        Self { identifier, count }
    }

    /// Product id (high 16 bits of the identifier)
    pub fn product_id(&self) -> u16 {
        (self.identifier >> 16) as u16
    }

    /// Build number (low 16 bits of the identifier)
    pub fn build_number(&self) -> u16 {
        (self.identifier & 0xFFFF) as u16
    }
}

/// Identifier to count table with unique identifiers.
///
/// Entries keep the position at which their identifier was first inserted;
/// inserting an identifier again replaces its count in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryTable {
    entries: Vec<RichEntry>,
}

impl EntryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the previous count for `identifier`, if any.
    pub fn insert(&mut self, identifier: u32, count: u32) -> Option<u32> {
        // Tables are tens of entries at most, a linear scan beats hashing here.
        match self.entries.iter_mut().find(|e| e.identifier == identifier) {
            Some(existing) => Some(std::mem::replace(&mut existing.count, count)),
            None => {
                self.entries.push(RichEntry::new(identifier, count));
                None
            }
        }
    }

    pub fn get(&self, identifier: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.identifier == identifier)
            .map(|e| e.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RichEntry> {
        self.entries.iter()
    }

    /// (identifier, count) pairs in table order.
    pub fn pairs(&self) -> Vec<(u32, u32)> {
        self.entries.iter().map(|e| (e.identifier, e.count)).collect()
    }
}

impl<'a> IntoIterator for &'a EntryTable {
    type Item = &'a RichEntry;
    type IntoIter = std::slice::Iter<'a, RichEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(u32, u32)> for EntryTable {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let mut table = EntryTable::new();
        for (identifier, count) in iter {
            table.insert(identifier, count);
        }
        table
    }
}

/// Complete result of one Rich Header parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichHeader {
    /// Offset of the start marker (the first byte of the block).
    pub offset: usize,
    /// Offset of the "Rich" tag.
    pub rich_offset: usize,
    /// Bytes from the start marker through the checksum after "Rich".
    pub size: usize,
    /// Decoded entries.
    pub entries: EntryTable,
    /// Checksum stored after the "Rich" tag (also the XOR key).
    pub stored_checksum: u32,
    /// Checksum recomputed from the header bytes and the decoded entries.
    pub computed_checksum: u32,
    /// Whether the two checksums agree.
    pub checksum_valid: bool,
}

impl RichHeader {
    /// Entry pairs in table order and the checksum verdict.
    pub fn results(&self) -> (Vec<(u32, u32)>, bool) {
        (self.entries.pairs(), self.checksum_valid)
    }

    /// Hex SHA-256 over the decoded entries, for grouping binaries built by
    /// the same toolchain. The XOR key is left out since it depends on the
    /// DOS stub and the entries rather than on the toolchain alone.
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        for entry in &self.entries {
            hasher.update(entry.identifier.to_le_bytes());
            hasher.update(entry.count.to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
