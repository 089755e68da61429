//! Parser for the company browse page (`browse-edgar?action=getcompany`).
//!
//! The page lists one filing per table row. Rows for filings that carry XBRL
//! show an "Interactive Data" button next to the "Documents" button; only
//! those rows are of interest.

use super::utils::{element_text, resolve_href};
use crate::{EdgarError, Result};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

/// Text that marks a row as having XBRL data.
pub const INTERACTIVE_DATA_MARKER: &str = "Interactive Data";

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to compile ROW_SELECTOR"));

static DOCUMENTS_BUTTON_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a#documentsbutton").expect("Failed to compile DOCUMENTS_BUTTON_SELECTOR")
});

/// Extracts the absolute document index page URLs of all XBRL rows.
///
/// Rows are taken in page order. Only innermost rows are considered, so a
/// layout table wrapping the results does not produce duplicates.
///
/// # Errors
///
/// * `EdgarError::Parse` - a flagged row has no documents button or the button has no `href`
/// * `EdgarError::InvalidUrl` - the `href` cannot be resolved against `base`
pub fn parse_document_page_links(html: &str, base: &Url) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for row in document.select(&ROW_SELECTOR) {
        if row.select(&ROW_SELECTOR).next().is_some() {
            continue;
        }
        if !element_text(&row).contains(INTERACTIVE_DATA_MARKER) {
            continue;
        }

        let href = row
            .select(&DOCUMENTS_BUTTON_SELECTOR)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .ok_or_else(|| {
                EdgarError::Parse(
                    "Interactive Data row without a documents link".to_string(),
                )
            })?;

        links.push(resolve_href(base, href)?);
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.sec.gov").unwrap()
    }

    #[test]
    fn selects_only_interactive_data_rows() {
        let html = r#"
<table class="tableFile2">
  <tr><th>Filings</th><th>Format</th><th>Description</th><th>Filing Date</th></tr>
  <tr>
    <td>10-Q</td>
    <td nowrap="nowrap"><a href="/Archives/edgar/data/320193/000119312513300670/0001193125-13-300670-index.htm" id="documentsbutton">&nbsp;Documents</a>&nbsp; <a href="/cgi-bin/viewer?action=view&amp;cik=320193&amp;accession_number=0001193125-13-300670" id="interactiveDataBtn">&nbsp;Interactive Data</a></td>
    <td>Quarterly report</td>
    <td>2013-07-24</td>
  </tr>
  <tr>
    <td>10-Q</td>
    <td nowrap="nowrap"><a href="/Archives/edgar/data/320193/000119312509153165/0001193125-09-153165-index.htm" id="documentsbutton">&nbsp;Documents</a></td>
    <td>Quarterly report</td>
    <td>2009-07-22</td>
  </tr>
</table>"#;

        let links = parse_document_page_links(html, &base()).unwrap();

        assert_eq!(
            links,
            vec![
                "https://www.sec.gov/Archives/edgar/data/320193/000119312513300670/0001193125-13-300670-index.htm"
            ]
        );
    }

    #[test]
    fn no_matching_rows_is_empty() {
        let html = "<table><tr><td>No matching filings.</td></tr></table>";
        let links = parse_document_page_links(html, &base()).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn layout_rows_do_not_duplicate_results() {
        let html = r#"
<table><tr><td>
  <table>
    <tr><td><a id="documentsbutton" href="/a-index.htm">Documents</a> Interactive Data</td></tr>
    <tr><td><a id="documentsbutton" href="/b-index.htm">Documents</a> Interactive Data</td></tr>
  </table>
</td></tr></table>"#;

        let links = parse_document_page_links(html, &base()).unwrap();

        assert_eq!(
            links,
            vec!["https://www.sec.gov/a-index.htm", "https://www.sec.gov/b-index.htm"]
        );
    }

    #[test]
    fn flagged_row_without_documents_link_is_an_error() {
        let html = "<table><tr><td>10-K</td><td>Interactive Data</td></tr></table>";
        let result = parse_document_page_links(html, &base());
        assert!(matches!(result, Err(EdgarError::Parse(_))));
    }
}
