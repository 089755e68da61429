use super::Edgar;
use super::collection::{Filing, FilingCollection};
use super::error::Result;
use super::fetch::Transport;
use super::options::BrowseOptions;
use super::parsing::document::parse_filing_page;
use super::traits::{FilingOperations, SearchOperations};
use async_trait::async_trait;

/// Filing retrieval for the Edgar client.
///
/// Every filing of an entity is fetched and parsed one page at a time. A page
/// that fails to parse aborts the whole retrieval: the caller gets the error
/// and no collection, never a collection with a missing or wrong filing.
///
/// # Examples
///
/// ```ignore
/// use xbrl_filings::{Edgar, FilingOperations};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let edgar = Edgar::new("my_app/1.0 (email@example.com)")?;
/// let filings = edgar.get_filings("AAPL", "10-Q").await?;
///
/// for filing in filings.chain() {
///     println!("{} {}", filing.date, filing.document_reference);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
impl<T: Transport> FilingOperations for Edgar<T> {
    /// Fetches a document index page and parses it into a `Filing`.
    ///
    /// # Errors
    ///
    /// * Fetch errors from the resilient fetcher
    /// * `EdgarError::Parse` - the filing date is missing or malformed
    /// * `EdgarError::NoStructuredDataLink` - no XBRL instance link on the page
    async fn parse_filing(&self, document_page_url: &str) -> Result<Filing> {
        let page = self.get(document_page_url).await?;
        parse_filing_page(&page, document_page_url, &self.www_url)
    }

    async fn get_filings(
        &self,
        entity_id: &str,
        filing_category: &str,
    ) -> Result<FilingCollection> {
        self.get_filings_with_options(&BrowseOptions::new(entity_id, filing_category))
            .await
    }

    /// Discovers, parses, orders and links the filings matching `options`.
    ///
    /// Links are assigned only after every filing has been inserted. An
    /// entity without XBRL filings yields an empty collection.
    async fn get_filings_with_options(&self, options: &BrowseOptions) -> Result<FilingCollection> {
        let mut filings = FilingCollection::new();

        for url in self.document_page_urls_with_options(options).await? {
            let filing = self.parse_filing(&url).await.inspect_err(|e| {
                tracing::warn!(
                    "Aborting {} {} filings at {}: {}",
                    options.entity_id,
                    options.filing_category,
                    url,
                    e
                )
            })?;
            filings.insert(filing);
        }
        filings.link();

        tracing::info!(
            "Retrieved {} {} filings for {}",
            filings.len(),
            options.filing_category,
            options.entity_id
        );
        Ok(filings)
    }

    async fn filing_document(&self, filing: &Filing) -> Result<String> {
        self.get(&filing.document_reference).await
    }
}
