use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use engine_logging::{engine_debug, engine_info, engine_warn, enter_page};
use pagewatch_core::{
    classify_baseline, BaselineDecision, Outcome, Page, PageFailure, PageId, RunResult, Stage,
};

use crate::diff::DiffEngine;
use crate::extract::{Extractor, SelectorExtractor};
use crate::fetch::Fetcher;
use crate::store::SnapshotStore;

/// Source of capture timestamps.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// UTC wall-clock time. Local time would repeat an hour when clocks go back,
/// letting a later capture sort before the baseline.
pub fn system_clock() -> Clock {
    Arc::new(|| Utc::now().naive_utc())
}

/// Drives the check cycle of one page at a time:
/// fetch, extract, store snapshot, locate baseline, diff, store diff.
///
/// The page id is installed as the logging context for the duration of a
/// cycle, so the runner must be polled from a single thread.
pub struct PageRunner {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    store: SnapshotStore,
    diff: DiffEngine,
    clock: Clock,
}

impl PageRunner {
    pub fn new(fetcher: Arc<dyn Fetcher>, store: SnapshotStore) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(SelectorExtractor),
            store,
            diff: DiffEngine::default(),
            clock: system_clock(),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Check every page in order. A failing page never stops the ones after it.
    pub async fn run_all(&self, pages: &[Page]) -> Vec<(PageId, RunResult)> {
        let mut results = Vec::with_capacity(pages.len());
        for page in pages {
            let result = self.run(page).await;
            results.push((page.id.clone(), result));
        }
        results
    }

    /// Run one complete cycle for `page`. Every failure is folded into the result.
    pub async fn run(&self, page: &Page) -> RunResult {
        let _context = enter_page(&page.id);
        let result = self.check(page).await;
        match &result {
            Ok(outcome) => engine_info!("{outcome}"),
            Err(failure) => engine_warn!("stopped at {}: {failure}", failure.stage()),
        }
        RunResult::from(result)
    }

    async fn check(&self, page: &Page) -> Result<Outcome, PageFailure> {
        let captured_at = (self.clock)();

        enter_stage(Stage::Fetching);
        let fetched = self
            .fetcher
            .fetch(&page.url)
            .await
            .map_err(|err| PageFailure::Fetch(err.to_string()))?;
        let body = fetched
            .text()
            .map_err(|err| PageFailure::Fetch(err.to_string()))?;

        enter_stage(Stage::Extracting);
        let content = self
            .extractor
            .extract(&body.text, &page.selectors)
            .map_err(|err| PageFailure::Extract(err.to_string()))?;

        enter_stage(Stage::StoringSnapshot);
        let snapshot = self
            .store
            .write_snapshot(&page.id, captured_at, &content)
            .map_err(|err| PageFailure::StoreSnapshot(err.to_string()))?;

        enter_stage(Stage::LocatingBaseline);
        let baseline = match self.store.baseline(&page.id) {
            Ok(baseline) => baseline,
            Err(err) => {
                engine_warn!("baseline lookup failed: {err}");
                None
            }
        };
        let baseline = match classify_baseline(baseline.as_deref(), &snapshot) {
            BaselineDecision::Missing => return Err(PageFailure::BaselineNotFound),
            BaselineDecision::NewSnapshotIsBaseline => return Ok(Outcome::InitialCaptured),
            BaselineDecision::DiffAgainst(path) => path,
        };
        engine_debug!("baseline is {}", baseline.display());

        enter_stage(Stage::Diffing);
        let diff = self
            .diff
            .diff_files(&baseline, &snapshot)
            .map_err(|err| PageFailure::Diff(err.to_string()))?;

        enter_stage(Stage::StoringDiff);
        let diff_path = self
            .store
            .write_diff(&page.id, captured_at, &diff)
            .map_err(|err| PageFailure::StoreDiff(err.to_string()))?;

        enter_stage(Stage::Done);
        if diff.is_empty() {
            Ok(Outcome::NoChange)
        } else {
            Ok(Outcome::Changed { diff_path })
        }
    }
}

fn enter_stage(stage: Stage) {
    engine_debug!("stage: {stage}");
}
