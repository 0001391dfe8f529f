//! Crash-safe file replacement.
//!
//! Content is written to a temporary file in the destination directory and
//! renamed over the target, so readers see either the old or the new file.
//! The result carries the target's previous permissions, or the usual
//! umask-filtered defaults for a new file.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::{Builder, NamedTempFile};

use crate::error::DoclabelError;

/// Writes `path` atomically using `write` to produce the content.
///
/// The parent directory is created if needed. If `write` fails, the
/// temporary file is discarded and the previous `path` stays untouched.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<(), DoclabelError>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<(), DoclabelError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(DoclabelError::Io)?;

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // filtered by the process umask, same as fs::write
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(DoclabelError::Io)?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(DoclabelError::Io)?;
    }
    {
        let mut writer = BufWriter::new(&mut tmp);
        write(&mut writer)?;
        writer.flush().map_err(DoclabelError::Io)?;
    }
    tmp.as_file().sync_all().map_err(DoclabelError::Io)?;
    tmp.persist(path)
        .map_err(|err| DoclabelError::Io(err.error))?;
    Ok(())
}

/// Writes a byte buffer atomically.
pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> Result<(), DoclabelError> {
    write_atomic(path, |writer| writer.write_all(bytes).map_err(DoclabelError::Io))
}
