//! HackerRank progress extractor
//!
//! HackerRank has no public API, so this extractor fetches the profile page
//! and scans it for labeled statistics. Any failure is swallowed: the
//! extractor logs and returns an all-default snapshot, so the sync result
//! still reports success for the platform. This intentionally differs from
//! the LeetCode extractor's fail-loud policy.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use solvetrack_core::patterns::{parse_count_text, parse_rank_text};
use solvetrack_core::sync::ports::ProgressExtractor;
use solvetrack_domain::{Badge, Platform, ProgressSnapshot, Result, SolveTrackError};
use tracing::warn;

use super::html;
use crate::http::client::HttpClient;

/// HackerRank extractor backed by profile page scraping
pub struct HackerRankExtractor {
    http: HttpClient,
}

impl HackerRankExtractor {
    /// Create a new extractor; the client should carry a browser-like
    /// user-agent or the page serves a bot wall
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    async fn scrape(
        &self,
        user_id: &str,
        profile_url: &str,
        scraped_at: i64,
    ) -> Result<ProgressSnapshot> {
        let response = self.http.send(self.http.request(Method::GET, profile_url)).await?;

        if !response.status().is_success() {
            return Err(SolveTrackError::Network(format!(
                "HackerRank profile fetch failed: HTTP {}",
                response.status()
            )));
        }

        let page = response
            .text()
            .await
            .map_err(|err| SolveTrackError::Network(format!("failed to read profile page: {err}")))?;

        Ok(parse_profile(user_id, &page, scraped_at))
    }
}

#[async_trait]
impl ProgressExtractor for HackerRankExtractor {
    fn platform(&self) -> Platform {
        Platform::Hackerrank
    }

    async fn extract(&self, user_id: &str, profile_url: &str) -> Result<ProgressSnapshot> {
        let scraped_at = Utc::now().timestamp();

        match self.scrape(user_id, profile_url, scraped_at).await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                warn!(profile_url, error = %err, "HackerRank scraping error, returning default snapshot");
                Ok(ProgressSnapshot::empty(user_id, Platform::Hackerrank, scraped_at))
            }
        }
    }
}

fn parse_profile(user_id: &str, page: &str, scraped_at: i64) -> ProgressSnapshot {
    let mut snapshot = ProgressSnapshot::empty(user_id, Platform::Hackerrank, scraped_at);

    // HackerRank has no per-difficulty breakdown; only the total is scraped
    for (label, value) in html::labeled_stats(page, "stat-value", "stat-label") {
        if label.contains("challenges solved") || label.contains("problems solved") {
            snapshot.total_solved = parse_count_text(&value);
        }
    }

    snapshot.badges = html::texts_by_class(page, "badge-title")
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(|name| Badge { name, count: 1 })
        .collect();

    if let Some(rank_text) = html::first_text_by_class(page, "profile-rank") {
        snapshot.ranking = parse_rank_text(&rank_text);
    }

    snapshot
}
