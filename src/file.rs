// src/file.rs

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::core::sanitize::normalize_text;
use crate::error::{MlstError, Result};

/// Normalize `raw` and write it to `path`, replacing any existing file.
/// Goes through a temp file in the same directory; on failure the temp file is
/// removed and `path` is left as it was.
pub fn write_report(path: &Path, raw: &str) -> Result<()> {
    let dir = parent_dir(path);
    ensure_directory(dir)?;

    let tmp = NamedTempFile::new_in(dir)
        .map_err(|e| MlstError::io("cannot create temporary file in", dir, e))?;
    {
        let mut out = BufWriter::new(tmp.as_file());
        out.write_all(normalize_text(raw).as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| MlstError::io("cannot write", tmp.path(), e))?;
    }
    tmp.persist(path)
        .map_err(|e| MlstError::io("cannot write", path, e.error))?;
    logf!("Wrote {}", path.display());
    Ok(())
}

/// Keep the raw response around so it can be replayed with `--from-html`.
pub fn save_html(path: &Path, body: &str) -> Result<()> {
    ensure_directory(parent_dir(path))?;
    fs::write(path, body).map_err(|e| MlstError::io("cannot write", path, e))?;
    logf!("Saved response to {}", path.display());
    Ok(())
}

pub fn read_html(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| MlstError::io("cannot read", path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(MlstError::io(
            "not a directory:",
            dir,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| MlstError::io("cannot create directory", dir, e))?;
    }
    Ok(())
}
