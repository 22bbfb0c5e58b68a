use std::fmt;
use std::path::{Path, PathBuf};

use crate::Stage;

/// Successful end of a check cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// This run's snapshot is the first one stored for the page.
    InitialCaptured,
    /// The new snapshot matches the baseline.
    NoChange,
    /// The new snapshot differs from the baseline; the diff was written to `diff_path`.
    Changed { diff_path: PathBuf },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Misspelling is part of the output format consumers match on.
            Outcome::InitialCaptured => write!(f, "Inital page captured"),
            Outcome::NoChange => write!(f, "No change"),
            Outcome::Changed { diff_path } => write!(f, "CHANGE! - {}", diff_path.display()),
        }
    }
}

/// Failed end of a check cycle, tagged with the step that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFailure {
    Fetch(String),
    Extract(String),
    StoreSnapshot(String),
    BaselineNotFound,
    Diff(String),
    StoreDiff(String),
}

impl PageFailure {
    pub fn stage(&self) -> Stage {
        match self {
            PageFailure::Fetch(_) => Stage::Fetching,
            PageFailure::Extract(_) => Stage::Extracting,
            PageFailure::StoreSnapshot(_) => Stage::StoringSnapshot,
            PageFailure::BaselineNotFound => Stage::LocatingBaseline,
            PageFailure::Diff(_) => Stage::Diffing,
            PageFailure::StoreDiff(_) => Stage::StoringDiff,
        }
    }
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageFailure::Fetch(msg) => write!(f, "Fetch failed: {msg}"),
            PageFailure::Extract(msg) => write!(f, "Extract failed: {msg}"),
            PageFailure::StoreSnapshot(msg) => write!(f, "Store page failed: {msg}"),
            PageFailure::BaselineNotFound => write!(f, "Initial page not found"),
            PageFailure::Diff(msg) => write!(f, "Diffing failed: {msg}"),
            PageFailure::StoreDiff(msg) => write!(f, "Store diff failed: {msg}"),
        }
    }
}

impl std::error::Error for PageFailure {}

/// Per-page summary printed after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub ok: bool,
    pub msg: String,
}

impl RunResult {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            ok: true,
            msg: msg.into(),
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            msg: msg.into(),
        }
    }
}

impl From<Result<Outcome, PageFailure>> for RunResult {
    fn from(result: Result<Outcome, PageFailure>) -> Self {
        match result {
            Ok(outcome) => RunResult::success(outcome.to_string()),
            Err(failure) => RunResult::failure(failure.to_string()),
        }
    }
}

/// What the baseline lookup means for the snapshot that was just written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineDecision {
    /// Nothing was found, not even the new snapshot.
    Missing,
    /// The new snapshot is itself the baseline.
    NewSnapshotIsBaseline,
    /// An earlier snapshot exists and the new one must be diffed against it.
    DiffAgainst(PathBuf),
}

pub fn classify_baseline(baseline: Option<&Path>, written: &Path) -> BaselineDecision {
    match baseline {
        None => BaselineDecision::Missing,
        Some(path) if path == written => BaselineDecision::NewSnapshotIsBaseline,
        Some(path) => BaselineDecision::DiffAgainst(path.to_path_buf()),
    }
}
