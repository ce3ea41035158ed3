//! Patch generation between two optional buffers.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blob_id::BlobId;
use crate::config::DiffConfig;
use crate::content::{looks_binary, split_lines, ByteContent};
use crate::error::{PatchError, PatchResult};
use crate::hunk::{build_hunks, Hunk, LineEdit};
use crate::render::render;

/// Label used when neither side names a path.
pub const DEFAULT_LABEL: &str = "file";

/// What happened to the file between the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Old side absent.
    Added,
    /// New side absent.
    Deleted,
    /// Both sides present.
    Modified,
}

impl ChangeKind {
    /// Single-letter status as printed by `git diff --name-status`.
    pub fn status_char(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Modified => 'M',
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Deleted => write!(f, "deleted"),
            Self::Modified => write!(f, "modified"),
        }
    }
}

/// Line counts over every hunk of a patch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    /// Unchanged lines shown around changes.
    pub context: usize,
    /// Lines prefixed with `+`.
    pub additions: usize,
    /// Lines prefixed with `-`.
    pub deletions: usize,
}

/// A rendered unified diff between two buffers.
///
/// The patch owns copies of every line it shows, so the buffers it was
/// computed from can be dropped right after [`compute_patch`] returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patch {
    kind: ChangeKind,
    old_label: String,
    new_label: String,
    old_id: BlobId,
    new_id: BlobId,
    binary: bool,
    hunks: Vec<Hunk>,
    data: Vec<u8>,
}

impl Patch {
    /// Whether the file was added, deleted or modified.
    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// Label shown after `a/` in the header.
    pub fn old_label(&self) -> &str {
        &self.old_label
    }

    /// Label shown after `b/` in the header.
    pub fn new_label(&self) -> &str {
        &self.new_label
    }

    /// Blob id of the old side; null when the old side is absent.
    pub fn old_id(&self) -> BlobId {
        self.old_id
    }

    /// Blob id of the new side; null when the new side is absent.
    pub fn new_id(&self) -> BlobId {
        self.new_id
    }

    /// `true` when either side was detected as binary. Binary patches carry
    /// no hunks.
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Hunks in old-content order; empty for binary or identical content.
    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    /// `true` when the patch renders to nothing (identical buffers).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Exact rendered bytes. Content lines keep their original encoding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Rendered patch decoded as UTF-8, replacing invalid sequences with
    /// U+FFFD.
    ///
    /// This view is lossy: for content that is not UTF-8 it cannot be turned
    /// back into the original bytes. Use [`Patch::data`] when the exact
    /// content matters.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Size of the rendered patch in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Context, added and deleted line counts summed over all hunks.
    pub fn line_stats(&self) -> LineStats {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .fold(LineStats::default(), |mut stats, line| {
                match line.edit {
                    LineEdit::Context(_) => stats.context += 1,
                    LineEdit::Insertion(_) => stats.additions += 1,
                    LineEdit::Deletion(_) => stats.deletions += 1,
                }
                stats
            })
    }
}

/// Compute the unified diff turning `old` into `new`.
///
/// An absent side describes a creation or deletion; both sides absent is
/// rejected. Labels are cosmetic: a missing label borrows the other side's,
/// falling back to [`DEFAULT_LABEL`].
pub fn compute_patch<'o, 'n>(
    old: impl Into<ByteContent<'o>>,
    new: impl Into<ByteContent<'n>>,
    old_label: Option<&str>,
    new_label: Option<&str>,
    config: &DiffConfig,
) -> PatchResult<Patch> {
    let old = old.into();
    let new = new.into();

    let kind = match (old, new) {
        (ByteContent::Absent, ByteContent::Absent) => {
            return Err(PatchError::invalid(
                "old and new content cannot both be absent",
            ));
        }
        (ByteContent::Absent, ByteContent::Present(_)) => ChangeKind::Added,
        (ByteContent::Present(_), ByteContent::Absent) => ChangeKind::Deleted,
        (ByteContent::Present(_), ByteContent::Present(_)) => ChangeKind::Modified,
    };

    let old_bytes = old.as_bytes().unwrap_or_default();
    let new_bytes = new.as_bytes().unwrap_or_default();
    let identical = kind == ChangeKind::Modified && old_bytes == new_bytes;
    let binary = looks_binary(old_bytes) || looks_binary(new_bytes);

    let hunks = if binary || identical {
        Vec::new()
    } else {
        build_hunks(&split_lines(old_bytes), &split_lines(new_bytes), config)
    };

    let (old_label, new_label) = match (old_label, new_label) {
        (Some(o), Some(n)) => (o, n),
        (Some(o), None) => (o, o),
        (None, Some(n)) => (n, n),
        (None, None) => (DEFAULT_LABEL, DEFAULT_LABEL),
    };

    let mut patch = Patch {
        kind,
        old_label: old_label.to_owned(),
        new_label: new_label.to_owned(),
        old_id: old.as_bytes().map_or(BlobId::null(), BlobId::for_content),
        new_id: new.as_bytes().map_or(BlobId::null(), BlobId::for_content),
        binary,
        hunks,
        data: Vec::new(),
    };
    patch.data = render(&patch, identical);

    debug!(
        kind = %patch.kind,
        old = %patch.old_id.short_hex(),
        new = %patch.new_id.short_hex(),
        hunks = patch.hunks.len(),
        binary,
        bytes = patch.data.len(),
        "computed patch"
    );

    Ok(patch)
}
