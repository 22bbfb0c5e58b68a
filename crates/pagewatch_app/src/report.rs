use std::fs;
use std::io::{self, Write};
use std::path::Path;

use pagewatch_core::{PageId, RunResult};
use pagewatch_engine::{SnapshotStore, StoreError, DIFF_EXT};

/// One `<pageId>: <message>` line per page, in run order.
pub fn write_results(out: &mut impl Write, results: &[(PageId, RunResult)]) -> io::Result<()> {
    for (id, result) in results {
        writeln!(out, "{id}: {}", result.msg)?;
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Lists snapshots oldest first with their state relative to the baseline.
pub fn write_history(
    out: &mut impl Write,
    store: &SnapshotStore,
    page_id: &str,
) -> Result<(), HistoryError> {
    let snapshots = store.snapshots(page_id)?;
    if snapshots.is_empty() {
        writeln!(out, "{page_id}: no snapshots in {}", store.page_dir(page_id).display())?;
        return Ok(());
    }
    for (index, snapshot) in snapshots.iter().enumerate() {
        let name = snapshot
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let state = if index == 0 {
            "baseline"
        } else {
            diff_state(snapshot)
        };
        writeln!(out, "{page_id}: {name} {state}")?;
    }
    Ok(())
}

fn diff_state(snapshot: &Path) -> &'static str {
    match fs::metadata(snapshot.with_extension(DIFF_EXT)) {
        Ok(meta) if meta.len() == 0 => "unchanged",
        Ok(_) => "changed",
        Err(_) => "not compared",
    }
}
