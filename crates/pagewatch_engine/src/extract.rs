use scraper::{Html, Selector};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("no element matches {0:?}")]
    NoMatch(String),
}

pub trait Extractor: Send + Sync {
    /// Reduce a page body to the text that gets snapshotted.
    fn extract(&self, body: &str, selectors: &[String]) -> Result<String, ExtractError>;
}

/// Evaluates CSS selectors against the parsed document:
/// - no selectors yields an empty string without parsing
/// - each selector contributes the outer HTML of its first match
/// - fragments are joined with `,` in selector order
/// - an invalid or unmatched selector fails the whole extraction
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectorExtractor;

impl Extractor for SelectorExtractor {
    fn extract(&self, body: &str, selectors: &[String]) -> Result<String, ExtractError> {
        if selectors.is_empty() {
            return Ok(String::new());
        }

        let doc = Html::parse_document(body);
        let mut sections = Vec::with_capacity(selectors.len());
        for raw in selectors {
            let selector = Selector::parse(raw).map_err(|err| ExtractError::InvalidSelector {
                selector: raw.clone(),
                reason: err.to_string(),
            })?;
            let node = doc
                .select(&selector)
                .next()
                .ok_or_else(|| ExtractError::NoMatch(raw.clone()))?;
            sections.push(node.html());
        }
        Ok(sections.join(","))
    }
}
