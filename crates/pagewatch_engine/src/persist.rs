use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot use {path} as a directory: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ensure `dir` exists and is a directory; create it (and parents) if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let output_dir = |reason: String| PersistError::OutputDir {
        path: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(output_dir("path is not a directory".into())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| output_dir(e.to_string()))
        }
        Err(err) => Err(output_dir(err.to_string())),
    }
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
///
/// An existing file with the same name is replaced.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let write_err = |source: io::Error| PersistError::Write {
            path: target.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.as_file_mut().sync_all().map_err(write_err)?;

        tmp.persist(&target).map_err(|e| write_err(e.error))?;
        Ok(target)
    }
}
