use std::fmt;

use sha1::{Digest, Sha1};

/// Git-compatible blob digest, shown in the `index` header line.
///
/// A `BlobId` is the SHA-1 of `blob <len>\0` followed by the content, so the
/// same buffer always yields the id `git hash-object` would print. The null
/// id (all zeros) stands for an absent side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlobId([u8; 20]);

impl BlobId {
    /// Number of hex digits used in abbreviated form.
    pub const ABBREV_LEN: usize = 7;

    /// Digest a buffer the way git digests a blob.
    pub fn for_content(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(format!("blob {}\0", data.len()).as_bytes());
        hasher.update(data);
        let mut digest = [0u8; 20];
        digest.copy_from_slice(&hasher.finalize());
        Self(digest)
    }

    /// The null id. Represents "no blob".
    pub const fn null() -> Self {
        Self([0u8; 20])
    }

    /// Returns `true` if this is the null id.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// The raw 20-byte digest.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Full 40-digit hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Abbreviated hex form, as printed by `git diff`.
    pub fn short_hex(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(Self::ABBREV_LEN);
        hex
    }
}

impl fmt::Debug for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobId({})", self.short_hex())
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
