//! Pagewatch core: page configuration and the per-page check-cycle vocabulary.
mod outcome;
mod page;
mod stage;

pub use outcome::{classify_baseline, BaselineDecision, Outcome, PageFailure, RunResult};
pub use page::{validate_pages, ConfigError, Page, PageId};
pub use stage::Stage;
