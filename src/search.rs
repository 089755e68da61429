//! Discovery of document index pages through the company browse page.
//!
//! # Examples
//!
//! ```ignore
//! use xbrl_filings::{Edgar, SearchOperations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let edgar = Edgar::new("your_app_name contact@example.com")?;
//!
//!     for url in edgar.document_page_urls("AAPL", "10-Q").await? {
//!         println!("{}", url);
//!     }
//!     Ok(())
//! }
//! ```

use super::Edgar;
use super::error::Result;
use super::fetch::Transport;
use super::options::BrowseOptions;
use super::parsing::search::parse_document_page_links;
use super::traits::SearchOperations;
use async_trait::async_trait;

/// Document index page URLs in browse page order.
///
/// A single pass over one browse page: finite, and not restartable. The
/// consumer may stop pulling at any point.
#[derive(Debug)]
pub struct DocumentPageUrls {
    inner: std::vec::IntoIter<String>,
}

impl DocumentPageUrls {
    pub(crate) fn new(urls: Vec<String>) -> Self {
        Self {
            inner: urls.into_iter(),
        }
    }
}

impl Iterator for DocumentPageUrls {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for DocumentPageUrls {}

impl<T: Transport> Edgar<T> {
    /// Builds the browse page URL for `options`.
    pub fn browse_page_url(&self, options: &BrowseOptions) -> Result<String> {
        Ok(format!("{}?{}", self.browse_url, options.to_query_string()?))
    }
}

#[async_trait]
impl<T: Transport> SearchOperations for Edgar<T> {
    async fn document_page_urls(
        &self,
        entity_id: &str,
        filing_category: &str,
    ) -> Result<DocumentPageUrls> {
        self.document_page_urls_with_options(&BrowseOptions::new(entity_id, filing_category))
            .await
    }

    /// Fetches the browse page and keeps the rows flagged "Interactive Data".
    ///
    /// # Errors
    ///
    /// * Fetch errors from the resilient fetcher
    /// * `EdgarError::Parse` - a flagged row has no documents link
    async fn document_page_urls_with_options(
        &self,
        options: &BrowseOptions,
    ) -> Result<DocumentPageUrls> {
        let url = self.browse_page_url(options)?;
        let page = self.get(&url).await?;
        let links = parse_document_page_links(&page, &self.www_url)?;

        tracing::debug!(
            "Found {} XBRL filings of type {} for {}",
            links.len(),
            options.filing_category,
            options.entity_id
        );
        Ok(DocumentPageUrls::new(links))
    }
}
