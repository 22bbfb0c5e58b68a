use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

pub type PageId = String;

/// A monitored page as read from the page list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub url: String,
    /// Selector expressions evaluated in order; empty disables extraction.
    #[serde(default, alias = "xpaths")]
    pub selectors: Vec<String>,
}

impl Page {
    pub fn new(id: impl Into<PageId>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            selectors: Vec::new(),
        }
    }

    pub fn with_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selectors = selectors.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("page id must not be empty")]
    EmptyId,
    #[error("page id {0:?} cannot be used as a directory name")]
    UnsafeId(String),
    #[error("page id {0:?} is configured more than once")]
    DuplicateId(String),
    #[error("page {id:?} has an invalid url {url:?}: {reason}")]
    InvalidUrl {
        id: String,
        url: String,
        reason: String,
    },
}

/// Checks the page list before any page is run.
///
/// Ids become directory names under the store root, so they must be unique and
/// free of path separators and characters that are not portable in file names.
pub fn validate_pages(pages: &[Page]) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(pages.len());
    for page in pages {
        validate_id(&page.id)?;
        if !seen.insert(page.id.as_str()) {
            return Err(ConfigError::DuplicateId(page.id.clone()));
        }
        validate_url(page)?;
    }
    Ok(())
}

fn validate_id(id: &str) -> Result<(), ConfigError> {
    if id.trim().is_empty() {
        return Err(ConfigError::EmptyId);
    }
    if id == "." || id == ".." || id.chars().any(is_forbidden) {
        return Err(ConfigError::UnsafeId(id.to_string()));
    }
    Ok(())
}

fn validate_url(page: &Page) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        id: page.id.clone(),
        url: page.url.clone(),
        reason,
    };
    let parsed = Url::parse(page.url.trim()).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
