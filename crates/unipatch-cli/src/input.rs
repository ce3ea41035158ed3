//! Reading one side of a comparison from the filesystem.

use std::fs;
use std::path::Path;

use anyhow::Context;
use unipatch_diff::PatchError;

/// Path that names an absent side, as with `git diff --no-index`.
pub const DEV_NULL: &str = "/dev/null";

/// Load a side: `None` for `/dev/null`, the file's bytes otherwise.
///
/// Anything that exists but is not a regular file is a type mismatch.
pub fn read_side(path: &Path) -> anyhow::Result<Option<Vec<u8>>> {
    if path == Path::new(DEV_NULL) {
        return Ok(None);
    }

    let meta = fs::metadata(path).with_context(|| format!("cannot stat {}", path.display()))?;
    if !meta.is_file() {
        let kind = if meta.is_dir() { "directory" } else { "special file" };
        return Err(PatchError::type_mismatch(format!("{kind} {}", path.display())).into());
    }

    let data = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read input");
    Ok(Some(data))
}

/// Label for a side: the explicit one, else the path unless it is `/dev/null`.
pub fn label_for(explicit: Option<&str>, path: &Path) -> Option<String> {
    match explicit {
        Some(label) => Some(label.to_owned()),
        None if path == Path::new(DEV_NULL) => None,
        None => Some(path.to_string_lossy().into_owned()),
    }
}
