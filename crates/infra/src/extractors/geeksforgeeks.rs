//! GeeksForGeeks progress extractor
//!
//! Scrapes the profile page for score-card and difficulty-count elements.
//! GFG has shipped two generations of class names for the score cards; both
//! are scanned. Same swallow-and-default failure policy as the HackerRank
//! extractor.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use solvetrack_core::patterns::{parse_count_text, parse_rank_text};
use solvetrack_core::sync::ports::ProgressExtractor;
use solvetrack_domain::{Platform, ProgressSnapshot, Result, SolveTrackError};
use tracing::warn;

use super::html;
use crate::http::client::HttpClient;

/// GeeksForGeeks extractor backed by profile page scraping
pub struct GeeksForGeeksExtractor {
    http: HttpClient,
}

impl GeeksForGeeksExtractor {
    /// Create a new extractor
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
                "GeeksForGeeks profile fetch failed: HTTP {}",
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
impl ProgressExtractor for GeeksForGeeksExtractor {
    fn platform(&self) -> Platform {
        Platform::Geeksforgeeks
    }

    async fn extract(&self, user_id: &str, profile_url: &str) -> Result<ProgressSnapshot> {
        let scraped_at = Utc::now().timestamp();

        match self.scrape(user_id, profile_url, scraped_at).await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                warn!(profile_url, error = %err, "GeeksForGeeks scraping error, returning default snapshot");
                Ok(ProgressSnapshot::empty(user_id, Platform::Geeksforgeeks, scraped_at))
            }
        }
    }
}

fn parse_profile(user_id: &str, page: &str, scraped_at: i64) -> ProgressSnapshot {
    let mut snapshot = ProgressSnapshot::empty(user_id, Platform::Geeksforgeeks, scraped_at);

    let mut score_cards = html::labeled_stats(page, "score_card_value", "score_card_name");
    score_cards.extend(html::labeled_stats(
        page,
        "scoreCard_head_left--score__oSi_x",
        "scoreCard_head_left--text__oXh_R",
    ));

    for (label, value) in score_cards {
        if label.contains("overall coding score") || label.contains("total problems") {
            snapshot.total_solved = parse_count_text(&value);
        }
        if label.contains("streak") {
            snapshot.streak = parse_count_text(&value);
        }
    }

    for (label, value) in html::labeled_stats(page, "difficulty_value", "difficulty_name") {
        if label.contains("easy") {
            snapshot.easy_solved = parse_count_text(&value);
        }
        if label.contains("medium") {
            snapshot.medium_solved = parse_count_text(&value);
        }
        if label.contains("hard") {
            snapshot.hard_solved = parse_count_text(&value);
        }
    }

    let rank_text = html::first_text_by_class(page, "rank_badge")
        .or_else(|| html::first_text_by_class(page, "profilePg_head_userRankContainer__ZZT_Z"));
    if let Some(text) = rank_text {
        snapshot.ranking = parse_rank_text(&text);
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const PROFILE_PAGE: &str = r#"
        <html><body>
        <div class="score_cards">
            <div class="card">
                <span class="score_card_name">Overall Coding Score</span>
                <span class="score_card_value">612</span>
            </div>
            <div class="card">
                <span class="score_card_name">Current Streak</span>
                <span class="score_card_value">37</span>
            </div>
        </div>
        <div class="problems">
            <div class="difficulty_count">
                <span class="difficulty_name">Easy</span>
                <span class="difficulty_value">80</span>
            </div>
            <div class="difficulty_count">
                <span class="difficulty_name">Medium</span>
                <span class="difficulty_value">45</span>
            </div>
            <div class="difficulty_count">
                <span class="difficulty_name">Hard</span>
                <span class="difficulty_value">9</span>
            </div>
        </div>
        <div class="rank_badge">Institute Rank 12</div>
        </body></html>
    "#;

    const REDESIGNED_PAGE: &str = r#"
        <html><body>
        <div class="scoreCard_head_left--text__oXh_R">Total Problems Solved</div>
        <div class="scoreCard_head_left--score__oSi_x">134</div>
        <div class="profilePg_head_userRankContainer__ZZT_Z">Rank 987</div>
        </body></html>
    "#;

    fn extractor() -> GeeksForGeeksExtractor {
        GeeksForGeeksExtractor::new(HttpClient::new().expect("http client"))
    }

    #[test]
    fn parses_score_cards_difficulties_and_rank() {
        let snapshot = parse_profile("u1", PROFILE_PAGE, 100);

        assert_eq!(snapshot.total_solved, 612);
        assert_eq!(snapshot.streak, 37);
        assert_eq!(snapshot.easy_solved, 80);
        assert_eq!(snapshot.medium_solved, 45);
        assert_eq!(snapshot.hard_solved, 9);
        assert_eq!(snapshot.ranking, Some(12));
    }

    #[test]
    fn parses_redesigned_class_names() {
        let snapshot = parse_profile("u1", REDESIGNED_PAGE, 100);

        assert_eq!(snapshot.total_solved, 134);
        assert_eq!(snapshot.ranking, Some(987));
    }

    #[test]
    fn unfamiliar_markup_degrades_to_defaults() {
        let snapshot = parse_profile("u1", "<html><body>nothing here</body></html>", 100);

        assert_eq!(snapshot.total_solved, 0);
        assert_eq!(snapshot.streak, 0);
        assert_eq!(snapshot.ranking, None);
    }

    #[tokio::test]
    async fn successful_fetch_yields_parsed_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PROFILE_PAGE))
            .mount(&server)
            .await;

        let snapshot = extractor()
            .extract("u1", &format!("{}/user/someone", server.uri()))
            .await
            .expect("always ok");

        assert_eq!(snapshot.total_solved, 612);
        assert_eq!(snapshot.platform, Platform::Geeksforgeeks);
    }

    #[tokio::test]
    async fn fetch_failure_returns_default_snapshot_not_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let snapshot = extractor()
            .extract("u1", &format!("http://{addr}/user/someone"))
            .await
            .expect("swallow-and-default policy");

        assert_eq!(snapshot.total_solved, 0);
        assert!(snapshot.badges.is_empty());
    }
}
