// src/fetch/mod.rs
//
// Page acquisition, kept behind one narrow interface so extraction and
// merging stay testable without network or browser access.

mod browser;
mod fetch_error;
mod http;
mod snapshot;

pub use browser::{fetch_rendered, fetch_rendered_pages, BrowserPlan};
pub use fetch_error::FetchError;
pub use http::HttpFetcher;
pub use snapshot::read_snapshots;

use std::path::PathBuf;
use std::time::Duration;

/// How a source obtains its raw page content.
pub enum FetchPlan {
    /// Plain GETs over a known page sequence, with a fixed self-throttle
    /// delay. `stop_on_empty` ends open-ended sequences at the first page
    /// that yields no listings.
    Http {
        urls: Vec<String>,
        delay: Duration,
        stop_on_empty: bool,
    },
    /// One JavaScript-rendered page driven through a "load more" control.
    Browser(BrowserPlan),
    /// A rendered, paginated URL sequence.
    BrowserPages { urls: Vec<String>, settle: Duration },
    /// Locally saved HTML files.
    Snapshots { paths: Vec<PathBuf> },
}
