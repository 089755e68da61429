use crate::Result;
use scraper::ElementRef;
use url::Url;

/// Concatenated text of an element and its descendants, trimmed.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Resolves an `href` found on an EDGAR page against the filings host.
pub fn resolve_href(base: &Url, href: &str) -> Result<String> {
    Ok(base.join(href.trim())?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn resolves_site_relative_links() {
        let base = Url::parse("https://www.sec.gov").unwrap();
        let resolved = resolve_href(
            &base,
            "/Archives/edgar/data/320193/000119312513300670/0001193125-13-300670-index.htm",
        )
        .unwrap();
        assert_eq!(
            resolved,
            "https://www.sec.gov/Archives/edgar/data/320193/000119312513300670/0001193125-13-300670-index.htm"
        );
    }

    #[test]
    fn keeps_absolute_links() {
        let base = Url::parse("https://www.sec.gov").unwrap();
        let resolved = resolve_href(&base, "https://example.com/a.xml").unwrap();
        assert_eq!(resolved, "https://example.com/a.xml");
    }

    #[test]
    fn element_text_is_trimmed() {
        let html = Html::parse_fragment("<div class=\"info\">\n  2013-01-29 </div>");
        let selector = Selector::parse("div").unwrap();
        let div = html.select(&selector).next().unwrap();
        assert_eq!(element_text(&div), "2013-01-29");
    }
}
