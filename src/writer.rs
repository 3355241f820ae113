use crate::error::{AnnotateError, Result};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| AnnotateError::io(dir, e))
        }
        _ => Ok(()),
    }
}

/// Write `path` through `fill` into a temporary file in the same directory and
/// move it over `path` only once `fill` succeeded. On error the destination is untouched.
pub fn write_atomic<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| AnnotateError::io(dir, e))?;
    {
        let mut w = BufWriter::new(&mut tmp);
        fill(&mut w).map_err(|e| AnnotateError::io(path, e))?;
        w.flush().map_err(|e| AnnotateError::io(path, e))?;
    }
    tmp.persist(path).map_err(|e| AnnotateError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
