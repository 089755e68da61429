//! HTML parsers for the EDGAR pages the client reads.
//!
//! Parsers take page text and return plain values; fetching is done by the
//! client, so everything here can be exercised on saved pages.

pub mod document;
pub mod search;
pub mod utils;
