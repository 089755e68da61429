//! Filings of one entity, kept in filing-date order and linked forward.
//!
//! A [`FilingCollection`] is an arena: filings live in a `Vec` sorted by
//! date, and each filing's `next_filing` is the index of its successor in
//! that `Vec`. Links are assigned in a single pass by
//! [`FilingCollection::link`] once every filing has been inserted.

use chrono::NaiveDate;
use serde::Serialize;
use std::ops::Index;

/// One filing with an XBRL instance document.
#[derive(Debug, Clone, Serialize)]
pub struct Filing {
    /// Date the filing was made
    pub date: NaiveDate,
    /// Absolute URL of the XBRL instance document
    pub document_reference: String,
    /// Absolute URL of the document index page the filing was read from
    pub document_page: String,
    #[serde(skip)]
    next_filing: Option<usize>,
}

impl Filing {
    pub fn new(
        date: NaiveDate,
        document_reference: impl Into<String>,
        document_page: impl Into<String>,
    ) -> Self {
        Self {
            date,
            document_reference: document_reference.into(),
            document_page: document_page.into(),
            next_filing: None,
        }
    }

    /// Index of the chronologically next filing in the owning collection.
    ///
    /// `None` for the latest filing, and for every filing of a collection
    /// that has not been linked yet.
    pub fn next_filing(&self) -> Option<usize> {
        self.next_filing
    }
}

/// Identity is the filing date and the instance document.
impl PartialEq for Filing {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date && self.document_reference == other.document_reference
    }
}

impl Eq for Filing {}

/// Filings sorted by date ascending.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilingCollection {
    filings: Vec<Filing>,
    #[serde(skip)]
    linked: bool,
}

impl FilingCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `filing` at its date position and returns that position.
    ///
    /// Filings with equal dates keep insertion order. Inserting shifts
    /// indices, so any links from a previous [`link`](Self::link) are cleared.
    pub fn insert(&mut self, mut filing: Filing) -> usize {
        if self.linked {
            self.unlink();
        }
        filing.next_filing = None;
        let position = self.filings.partition_point(|f| f.date <= filing.date);
        self.filings.insert(position, filing);
        position
    }

    /// Points every filing except the last at its successor.
    pub fn link(&mut self) {
        let len = self.filings.len();
        for (i, filing) in self.filings.iter_mut().enumerate() {
            filing.next_filing = if i + 1 < len { Some(i + 1) } else { None };
        }
        self.linked = true;
    }

    fn unlink(&mut self) {
        for filing in &mut self.filings {
            filing.next_filing = None;
        }
        self.linked = false;
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn len(&self) -> usize {
        self.filings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Filing> {
        self.filings.get(index)
    }

    /// The earliest filing.
    pub fn first(&self) -> Option<&Filing> {
        self.filings.first()
    }

    /// The latest filing.
    pub fn last(&self) -> Option<&Filing> {
        self.filings.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filing> {
        self.filings.iter()
    }

    /// Follows `filing`'s forward link within this collection.
    pub fn next_filing(&self, filing: &Filing) -> Option<&Filing> {
        filing.next_filing.and_then(|i| self.filings.get(i))
    }

    /// Walks the forward links starting at the earliest filing.
    ///
    /// Yields nothing beyond the first filing until the collection is linked.
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            collection: self,
            current: self.filings.first(),
        }
    }

    /// The latest filing made on or before `date`.
    pub fn latest_on_or_before(&self, date: NaiveDate) -> Option<&Filing> {
        let end = self.filings.partition_point(|f| f.date <= date);
        end.checked_sub(1).map(|i| &self.filings[i])
    }

    pub fn into_vec(self) -> Vec<Filing> {
        self.filings
    }
}

impl Index<usize> for FilingCollection {
    type Output = Filing;

    fn index(&self, index: usize) -> &Filing {
        &self.filings[index]
    }
}

impl IntoIterator for FilingCollection {
    type Item = Filing;
    type IntoIter = std::vec::IntoIter<Filing>;

    fn into_iter(self) -> Self::IntoIter {
        self.filings.into_iter()
    }
}

impl<'a> IntoIterator for &'a FilingCollection {
    type Item = &'a Filing;
    type IntoIter = std::slice::Iter<'a, Filing>;

    fn into_iter(self) -> Self::IntoIter {
        self.filings.iter()
    }
}

impl FromIterator<Filing> for FilingCollection {
    /// Collects and links in one go.
    fn from_iter<I: IntoIterator<Item = Filing>>(iter: I) -> Self {
        let mut collection = FilingCollection::new();
        for filing in iter {
            collection.insert(filing);
        }
        collection.link();
        collection
    }
}

/// Iterator over a collection's forward links.
pub struct Chain<'a> {
    collection: &'a FilingCollection,
    current: Option<&'a Filing>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Filing;

    fn next(&mut self) -> Option<Self::Item> {
        let filing = self.current?;
        self.current = self.collection.next_filing(filing);
        Some(filing)
    }
}
