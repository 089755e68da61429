//! # xbrl-filings - XBRL filing discovery for SEC EDGAR
//!
//! Finds the XBRL filings of a company through the EDGAR company browse page
//! and returns them as a date-ordered, forward-linked collection.
//!
//! ## Pipeline
//!
//! - **Resilient fetch** - rate-limited GET with linear backoff on connection failures
//! - **Browse page** - rows flagged "Interactive Data" lead to document index pages
//! - **Document index page** - filing date and the `EX-101.INS` instance document link
//! - **Filing collection** - sorted by filing date, each filing linked to the next one
//!
//! ## Requirements
//!
//! The client is async and needs a runtime; [tokio](https://tokio.rs) is
//! used throughout. Requests are issued one at a time.
//!
//! ## Basic Usage
//!
//! ```ignore
//! use xbrl_filings::{Edgar, FilingOperations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Initialize with a proper user agent (required by SEC.gov)
//!     let edgar = Edgar::new("YourAppName contact@example.com")?;
//!
//!     let filings = edgar.get_filings("AAPL", "10-Q").await?;
//!
//!     for filing in filings.chain() {
//!         println!("{} {}", filing.date, filing.document_reference);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod collection;
mod config;
mod error;
mod fetch;
mod filings;
mod options;
pub mod parsing;
mod search;
mod traits;

pub use client::{Edgar, HttpTransport};
pub use collection::{Chain, Filing, FilingCollection};
pub use config::{EdgarConfig, EdgarUrls, RetryPolicy};
pub use error::{EdgarError, Result};
pub use fetch::{ResilientFetcher, Transport};
pub use options::{BrowseOptions, OwnerFilter};
pub use search::DocumentPageUrls;
pub use traits::{FilingOperations, SearchOperations};

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
