use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use engine_logging::engine_info;
use pagewatch_core::{validate_pages, Page};

/// Read and validate the page list. Loaded once per process.
pub fn load_pages(path: &Path) -> Result<Vec<Page>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read page list {}", path.display()))?;
    let pages: Vec<Page> = serde_json::from_str(&content)
        .with_context(|| format!("invalid page list {}", path.display()))?;
    validate_pages(&pages).with_context(|| format!("invalid page list {}", path.display()))?;
    engine_info!("loaded {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

/// Keep only the pages named in `only`, in page-list order. Empty `only` keeps all.
pub fn select_pages(pages: Vec<Page>, only: &[String]) -> Result<Vec<Page>> {
    if only.is_empty() {
        return Ok(pages);
    }
    if let Some(unknown) = only.iter().find(|id| !pages.iter().any(|p| &p.id == *id)) {
        bail!("no page with id {unknown:?} in the page list");
    }
    Ok(pages
        .into_iter()
        .filter(|page| only.contains(&page.id))
        .collect())
}
