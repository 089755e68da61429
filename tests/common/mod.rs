use async_trait::async_trait;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use xbrl_filings::{Edgar, EdgarConfig, EdgarError, Result, Transport};

pub const ATEC_BROWSE_URL: &str = "https://www.sec.gov/cgi-bin/browse-edgar?action=getcompany&CIK=ATEC&type=10-Q&dateb=&owner=exclude&count=100";

pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

pub fn archive_url(accession: &str, file: &str) -> String {
    format!(
        "https://www.sec.gov/Archives/edgar/data/1350653/{}/{}",
        accession.replace('-', ""),
        file
    )
}

/// Serves fixture files for known URLs and 404s everything else.
#[derive(Default)]
pub struct FixtureTransport {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, fixture: &str) -> Self {
        self.pages.insert(url.into(), read_fixture(fixture));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn get_text(&self, url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or(EdgarError::NotFound)
    }
}

#[allow(dead_code)]
pub fn edgar(transport: FixtureTransport) -> Edgar<FixtureTransport> {
    Edgar::with_transport(EdgarConfig::default(), transport).unwrap()
}

/// The ATEC browse page wired to the three parseable document pages.
#[allow(dead_code)]
pub fn atec_transport() -> FixtureTransport {
    FixtureTransport::new()
        .with_page(ATEC_BROWSE_URL, "browse/atec_10q.html")
        .with_page(
            archive_url("0001350653-16-000097", "0001350653-16-000097-index.htm"),
            "documents/atec-20160630-index.htm",
        )
        .with_page(
            archive_url("0001350653-16-000070", "0001350653-16-000070-index.htm"),
            "documents/atec-20160331-index.htm",
        )
        .with_page(
            archive_url("0001350653-15-000150", "0001350653-15-000150-index.htm"),
            "documents/atec-20150930-index.htm",
        )
}
