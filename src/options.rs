use chrono::NaiveDate;
use serde::Serialize;

/// Which filings by insiders (owners) the browse page lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerFilter {
    Include,
    #[default]
    Exclude,
    Only,
}

/// Query for the company browse page.
///
/// Defaults match what the browse page uses for a plain company search:
/// no date bound, owner filings excluded, 100 rows.
#[derive(Debug, Clone)]
pub struct BrowseOptions {
    pub entity_id: String,
    pub filing_category: String,
    /// Only list filings made before this date
    pub before: Option<NaiveDate>,
    pub owner: OwnerFilter,
    pub count: u32,
}

#[derive(Serialize)]
struct BrowseQuery<'a> {
    action: &'static str,
    #[serde(rename = "CIK")]
    cik: &'a str,
    #[serde(rename = "type")]
    filing_type: &'a str,
    dateb: String,
    owner: OwnerFilter,
    count: u32,
}

impl BrowseOptions {
    pub fn new(entity_id: impl Into<String>, filing_category: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            filing_category: filing_category.into(),
            before: None,
            owner: OwnerFilter::default(),
            count: 100,
        }
    }

    pub fn with_before(mut self, before: NaiveDate) -> Self {
        self.before = Some(before);
        self
    }

    pub fn with_owner(mut self, owner: OwnerFilter) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Encodes the options as the browse page query string.
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(BrowseQuery {
            action: "getcompany",
            cik: &self.entity_id,
            filing_type: &self.filing_category,
            dateb: self
                .before
                .map(|d| d.format("%Y%m%d").to_string())
                .unwrap_or_default(),
            owner: self.owner,
            count: self.count,
        })
    }
}
