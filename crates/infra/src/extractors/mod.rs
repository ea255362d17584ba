//! Per-platform progress extractors
//!
//! One implementation per supported platform, all behind the
//! `ProgressExtractor` port. The LeetCode extractor talks to a structured
//! API and fails loudly; the two page-scraping extractors swallow errors
//! and self-default.

pub mod geeksforgeeks;
pub mod hackerrank;
mod html;
pub mod leetcode;

use std::sync::Arc;
use std::time::Duration;

pub use geeksforgeeks::GeeksForGeeksExtractor;
pub use hackerrank::HackerRankExtractor;
pub use leetcode::LeetCodeExtractor;
use solvetrack_core::sync::ports::ProgressExtractor;
use solvetrack_domain::{Result, ScrapeConfig};

use crate::http::client::HttpClient;

/// Build the full extractor set in fixed platform order.
pub fn build_extractors(scrape: &ScrapeConfig) -> Result<Vec<Arc<dyn ProgressExtractor>>> {
    let timeout = Duration::from_secs(scrape.http_timeout_seconds);

    // The GraphQL call identifies itself; page fetches use a browser-like UA
    let api_client = HttpClient::builder().timeout(timeout).build()?;
    let page_client =
        HttpClient::builder().timeout(timeout).user_agent(&scrape.user_agent).build()?;

    Ok(vec![
        Arc::new(LeetCodeExtractor::new(api_client)),
        Arc::new(HackerRankExtractor::new(page_client.clone())),
        Arc::new(GeeksForGeeksExtractor::new(page_client)),
    ])
}
