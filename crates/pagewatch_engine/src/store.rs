use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use engine_logging::engine_debug;

use crate::filename::{diff_filename, snapshot_filename, SNAPSHOT_EXT};
use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("cannot list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-page snapshot history on disk.
///
/// Layout:
/// ```text
/// root/
///   <page id>/
///     20240101_120000.dat    # baseline (oldest snapshot)
///     20240102_120000.dat
///     20240102_120000.diff   # baseline vs. the snapshot of the same stem
/// ```
/// Snapshots are never modified or removed. Two captures of the same page
/// within one second share a name and the later one replaces the earlier.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn page_dir(&self, page_id: &str) -> PathBuf {
        self.root.join(page_id)
    }

    pub fn write_snapshot(
        &self,
        page_id: &str,
        captured_at: NaiveDateTime,
        content: &str,
    ) -> Result<PathBuf, StoreError> {
        let writer = AtomicFileWriter::new(self.page_dir(page_id));
        let path = writer.write(&snapshot_filename(captured_at), content)?;
        engine_debug!("stored snapshot {} ({} bytes)", path.display(), content.len());
        Ok(path)
    }

    /// Store the diff text under the timestamp of the snapshot it was computed for.
    pub fn write_diff(
        &self,
        page_id: &str,
        captured_at: NaiveDateTime,
        diff: &str,
    ) -> Result<PathBuf, StoreError> {
        let writer = AtomicFileWriter::new(self.page_dir(page_id));
        let path = writer.write(&diff_filename(captured_at), diff)?;
        engine_debug!("stored diff {}", path.display());
        Ok(path)
    }

    /// All snapshot files of a page, oldest first. A missing directory is an empty history.
    pub fn snapshots(&self, page_id: &str) -> Result<Vec<PathBuf>, StoreError> {
        let dir = self.page_dir(page_id);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::List { path: dir, source }),
        };

        let mut names: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .map(|e| e.file_name())
            .filter(|name| Path::new(name).extension().and_then(|s| s.to_str()) == Some(SNAPSHOT_EXT))
            .collect();
        names.sort();
        Ok(names.into_iter().map(|name| dir.join(name)).collect())
    }

    /// The baseline: the snapshot with the smallest file name, if any.
    pub fn baseline(&self, page_id: &str) -> Result<Option<PathBuf>, StoreError> {
        Ok(self.snapshots(page_id)?.into_iter().next())
    }
}
