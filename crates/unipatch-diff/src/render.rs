//! Unified-diff rendering in the layout `git diff` produces.

use std::io::Write;

use crate::hunk::Hunk;
use crate::patch::{ChangeKind, Patch};

/// Mode recorded for every side; buffers carry no file mode of their own.
const REGULAR_FILE_MODE: &str = "100644";
const DEV_NULL: &str = "/dev/null";
const NO_NEWLINE_MARKER: &[u8] = b"\\ No newline at end of file\n";

/// Render a patch to its exact byte form.
///
/// A modification between identical buffers renders as nothing at all.
pub(crate) fn render(patch: &Patch, identical: bool) -> Vec<u8> {
    let mut out = Vec::new();
    if patch.kind() == ChangeKind::Modified && identical {
        return out;
    }

    let old_path = format!("a/{}", patch.old_label());
    let new_path = format!("b/{}", patch.new_label());
    let old_side = match patch.kind() {
        ChangeKind::Added => DEV_NULL,
        _ => old_path.as_str(),
    };
    let new_side = match patch.kind() {
        ChangeKind::Deleted => DEV_NULL,
        _ => new_path.as_str(),
    };

    // Writes into a Vec cannot fail.
    let _ = writeln!(out, "diff --git {old_path} {new_path}");
    match patch.kind() {
        ChangeKind::Added => {
            let _ = writeln!(out, "new file mode {REGULAR_FILE_MODE}");
        }
        ChangeKind::Deleted => {
            let _ = writeln!(out, "deleted file mode {REGULAR_FILE_MODE}");
        }
        ChangeKind::Modified => {}
    }
    let _ = write!(
        out,
        "index {}..{}",
        patch.old_id().short_hex(),
        patch.new_id().short_hex()
    );
    if patch.kind() == ChangeKind::Modified {
        let _ = write!(out, " {REGULAR_FILE_MODE}");
    }
    out.push(b'\n');

    if patch.is_binary() {
        let _ = writeln!(out, "Binary files {old_side} and {new_side} differ");
        return out;
    }
    if patch.hunks().is_empty() {
        return out;
    }

    let _ = writeln!(out, "--- {old_side}");
    let _ = writeln!(out, "+++ {new_side}");
    for hunk in patch.hunks() {
        render_hunk(&mut out, hunk);
    }
    out
}

fn render_hunk(out: &mut Vec<u8>, hunk: &Hunk) {
    out.extend_from_slice(hunk.header().as_bytes());
    out.push(b'\n');
    for line in &hunk.lines {
        out.push(line.edit.origin());
        out.extend_from_slice(line.edit.content());
        out.push(b'\n');
        if !line.has_newline {
            out.extend_from_slice(NO_NEWLINE_MARKER);
        }
    }
}
