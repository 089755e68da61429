//! Parser for a filing's document index page (`...-index.htm`).
//!
//! The page has a "Filing Date" label followed by a `div.info` value, and a
//! document table where each row pairs a link to a file with the file's type
//! code. The XBRL instance document is the `.xml` link whose row is typed
//! `EX-101.INS`.

use super::utils::{element_text, resolve_href};
use crate::collection::Filing;
use crate::{EdgarError, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use url::Url;

/// Label preceding the filing date value.
pub const FILING_DATE_LABEL: &str = "Filing Date";

/// Document type code of the XBRL instance document.
pub const INSTANCE_TYPE_MARKER: &str = "EX-101.INS";

static XML_LINK_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.xml$").expect("Failed to compile XML_LINK_TEXT_RE"));

// Instance documents end in the period date (abc-20120504.xml); schema and
// linkbase files carry a suffix (abc-20120504_def.xml).
static INSTANCE_FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d\.xml$").expect("Failed to compile INSTANCE_FILENAME_RE"));

/// Parses a document index page into a [`Filing`].
///
/// `page_url` is recorded on the filing and used in error messages; links are
/// resolved against `base`.
///
/// # Errors
///
/// * `EdgarError::Parse` - the filing date label or value is missing or malformed
/// * `EdgarError::NoStructuredDataLink` - no instance document link passes the filename rule
/// * `EdgarError::InvalidUrl` - the selected link cannot be resolved
pub fn parse_filing_page(html: &str, page_url: &str, base: &Url) -> Result<Filing> {
    let document = Html::parse_document(html);

    let date = parse_filing_date(&document)?;
    let href = select_instance_href(&document).ok_or_else(|| EdgarError::NoStructuredDataLink {
        page: page_url.to_string(),
    })?;
    let document_reference = resolve_href(base, &href)?;

    tracing::debug!("Parsed filing of {} from {}", date, page_url);
    Ok(Filing::new(date, document_reference, page_url))
}

/// Reads the value following the "Filing Date" label.
pub fn parse_filing_date(document: &Html) -> Result<NaiveDate> {
    let elements: Vec<ElementRef<'_>> = document_order(document).collect();

    let label = elements
        .iter()
        .position(|el| element_text(el) == FILING_DATE_LABEL)
        .ok_or_else(|| EdgarError::Parse(format!("No '{}' label found", FILING_DATE_LABEL)))?;

    let value = elements[label + 1..]
        .iter()
        .find(|el| el.value().classes().any(|class| class == "info"))
        .ok_or_else(|| EdgarError::Parse(format!("No value after '{}'", FILING_DATE_LABEL)))?;

    parse_date_text(&element_text(value))
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date_text(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|e| EdgarError::Parse(format!("Invalid filing date '{}': {}", text.trim(), e)))
}

/// Whether `href` names an instance document rather than a schema or linkbase.
pub fn is_instance_filename(href: &str) -> bool {
    INSTANCE_FILENAME_RE.is_match(href)
}

/// Picks the instance document link.
///
/// For every `EX-101.INS` cell, in page order, the candidate is the nearest
/// `.xml` link before it. The first candidate passing
/// [`is_instance_filename`] wins.
pub fn select_instance_href(document: &Html) -> Option<String> {
    let mut preceding_xml_href: Option<&str> = None;

    for element in document_order(document) {
        match element.value().name() {
            "a" => {
                if let Some(href) = element.value().attr("href") {
                    if XML_LINK_TEXT_RE.is_match(&element_text(&element)) {
                        preceding_xml_href = Some(href);
                    }
                }
            }
            "td" if element_text(&element) == INSTANCE_TYPE_MARKER => match preceding_xml_href {
                Some(href) if is_instance_filename(href) => return Some(href.to_string()),
                Some(href) => tracing::debug!("Skipping non-instance XBRL file {}", href),
                None => tracing::debug!("{} cell without a preceding XML link", INSTANCE_TYPE_MARKER),
            },
            _ => {}
        }
    }

    None
}

fn document_order(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.root_element().descendants().filter_map(ElementRef::wrap)
}
