//! Output serialization and persistence for reshaped statistics.

use std::fs::{self, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TransformError;
use crate::stats::ReshapedDocument;

/// Serializes the document to compact JSON bytes.
pub fn to_json_bytes(doc: &ReshapedDocument) -> Result<Vec<u8>, TransformError> {
    serde_json::to_vec(doc).map_err(TransformError::Serialize)
}

/// Writes the document as JSON to `path`, replacing any existing file.
///
/// The JSON is produced in memory and written to a temporary file in the
/// target directory, which is then renamed over `path`. An existing output
/// is left untouched if any step fails. A symlinked output is written through
/// to the file it points at, and an existing file keeps its permissions; a
/// new file gets the process umask default.
pub fn write_json(path: &Path, doc: &ReshapedDocument) -> Result<(), TransformError> {
    let bytes = to_json_bytes(doc)?;
    let write_err = |source| TransformError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let existing = fs::metadata(&target).ok().map(|m| m.permissions());
    let dir = parent_dir(&target);
    debug!(
        path = %target.display(),
        bytes = bytes.len(),
        replacing = existing.is_some(),
        "Writing output"
    );

    let mut builder = tempfile::Builder::new();
    builder.prefix(".xcontest_stats");
    if existing.is_none() {
        if let Some(perms) = new_file_permissions() {
            builder.permissions(perms);
        }
    }

    let mut tmp = builder.tempfile_in(&dir).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    if let Some(perms) = existing {
        tmp.as_file().set_permissions(perms).map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(&target).map_err(|e| write_err(e.error))?;

    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Mode requested for a fresh output; the umask is applied on creation.
#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
