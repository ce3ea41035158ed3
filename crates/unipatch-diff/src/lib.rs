//! Unified diff engine.
//!
//! Compares two optional byte buffers and renders the result as a git-style
//! unified diff. An absent side stands for a file that does not exist, so
//! one call covers additions, deletions and modifications alike.
//!
//! # Key Types
//!
//! - [`compute_patch`] -- the single entry point
//! - [`ByteContent`] -- one side of the comparison (`Absent` or `Present`)
//! - [`DiffConfig`] -- context and inter-hunk line counts
//! - [`Patch`] / [`Hunk`] / [`HunkLine`] / [`LineEdit`] -- the rendered result
//! - [`BlobId`] -- git blob digest shown in the `index` line
//!
//! # Example
//!
//! ```
//! use unipatch_diff::{compute_patch, ChangeKind, DiffConfig};
//!
//! let patch = compute_patch(
//!     None::<&[u8]>,
//!     b"foo bar\n",
//!     Some("file"),
//!     Some("file"),
//!     &DiffConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(patch.kind(), ChangeKind::Added);
//! assert!(patch.text().contains("--- /dev/null\n+++ b/file\n@@ -0,0 +1 @@\n+foo bar\n"));
//! ```
//!
//! # Encoding
//!
//! [`Patch::data`] holds the exact bytes, content lines included verbatim.
//! [`Patch::text`] decodes them as UTF-8 with replacement characters, which
//! is irreversible for non-UTF-8 input.

pub mod blob_id;
pub mod config;
pub mod content;
pub mod error;
pub mod hunk;
pub mod patch;
mod render;

pub use blob_id::BlobId;
pub use config::DiffConfig;
pub use content::ByteContent;
pub use error::{PatchError, PatchResult};
pub use hunk::{Hunk, HunkLine, LineEdit};
pub use patch::{compute_patch, ChangeKind, LineStats, Patch, DEFAULT_LABEL};
