//! Trait definitions grouping the client's operations.
//!
//! `SearchOperations` finds the document index pages of an entity's filings;
//! `FilingOperations` turns those pages into an ordered, linked
//! [`FilingCollection`]. `Edgar` implements both for any transport.

use super::collection::{Filing, FilingCollection};
use super::error::Result;
use super::options::BrowseOptions;
use super::search::DocumentPageUrls;
use async_trait::async_trait;

/// Operations on the company browse page.
#[async_trait]
pub trait SearchOperations {
    /// Document index page URLs of the entity's XBRL filings of one category.
    async fn document_page_urls(
        &self,
        entity_id: &str,
        filing_category: &str,
    ) -> Result<DocumentPageUrls>;
    /// Same as `document_page_urls`, with full control over the browse query.
    async fn document_page_urls_with_options(
        &self,
        options: &BrowseOptions,
    ) -> Result<DocumentPageUrls>;
}

/// Operations producing [`Filing`]s.
#[async_trait]
pub trait FilingOperations {
    /// Fetches a document index page and parses it into a filing.
    async fn parse_filing(&self, document_page_url: &str) -> Result<Filing>;
    /// All XBRL filings of an entity, ordered by date and linked forward.
    async fn get_filings(&self, entity_id: &str, filing_category: &str)
    -> Result<FilingCollection>;
    /// Same as `get_filings`, with full control over the browse query.
    async fn get_filings_with_options(&self, options: &BrowseOptions) -> Result<FilingCollection>;
    /// Raw text of a filing's XBRL instance document.
    async fn filing_document(&self, filing: &Filing) -> Result<String>;
}
