//! LeetCode progress extractor
//!
//! LeetCode exposes a public GraphQL endpoint, so this extractor issues one
//! structured query instead of scraping markup. Unlike the page-scraping
//! extractors it fails loudly: any network or parse problem propagates to
//! the orchestrator, which records it for the platform and moves on.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::REFERER;
use reqwest::Method;
use solvetrack_core::patterns::username_from_url;
use solvetrack_core::sync::ports::ProgressExtractor;
use solvetrack_domain::{Platform, ProgressSnapshot, RecentSubmission, Result, SolveTrackError};
use serde::Deserialize;

use crate::http::client::HttpClient;

const LEETCODE_GRAPHQL_ENDPOINT: &str = "https://leetcode.com/graphql";

/// Recent submissions are capped at the query's fetch limit.
const RECENT_SUBMISSION_LIMIT: usize = 10;

const PROFILE_QUERY: &str = r#"
query getUserProfile($username: String!) {
  matchedUser(username: $username) {
    username
    submitStats {
      acSubmissionNum {
        difficulty
        count
      }
    }
    profile {
      ranking
      reputation
    }
  }
  recentSubmissionList(username: $username, limit: 10) {
    title
    timestamp
    statusDisplay
  }
}
"#;

/// LeetCode extractor backed by the public GraphQL endpoint
pub struct LeetCodeExtractor {
    http: HttpClient,
    endpoint: String,
}

impl LeetCodeExtractor {
    /// Create an extractor pointed at the public endpoint
    pub fn new(http: HttpClient) -> Self {
        Self { http, endpoint: LEETCODE_GRAPHQL_ENDPOINT.to_string() }
    }

    /// Point the extractor at a different endpoint (tests)
    pub fn with_endpoint(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self { http, endpoint: endpoint.into() }
    }
}

#[async_trait]
impl ProgressExtractor for LeetCodeExtractor {
    fn platform(&self) -> Platform {
        Platform::Leetcode
    }

    async fn extract(&self, user_id: &str, profile_url: &str) -> Result<ProgressSnapshot> {
        let username = username_from_url(profile_url).ok_or_else(|| {
            SolveTrackError::Extraction(format!("no username in LeetCode URL: {profile_url}"))
        })?;

        let body = serde_json::json!({
            "query": PROFILE_QUERY,
            "variables": { "username": username },
        });

        let response = self
            .http
            .send(
                self.http
                    .request(Method::POST, &self.endpoint)
                    .header(REFERER, "https://leetcode.com")
                    .json(&body),
            )
            .await
            .map_err(|err| extraction_error(err.to_string()))?;

        if !response.status().is_success() {
            return Err(extraction_error(format!("HTTP {}", response.status())));
        }

        let payload: GraphQlResponse =
            response.json().await.map_err(|err| extraction_error(err.to_string()))?;

        let data = payload.data.unwrap_or_default();
        let Some(matched_user) = data.matched_user else {
            return Err(SolveTrackError::Extraction("User not found on LeetCode".into()));
        };

        let mut snapshot =
            ProgressSnapshot::empty(user_id, Platform::Leetcode, Utc::now().timestamp());

        for bucket in &matched_user.submit_stats.ac_submission_num {
            match bucket.difficulty.as_str() {
                "Easy" => snapshot.easy_solved = bucket.count,
                "Medium" => snapshot.medium_solved = bucket.count,
                "Hard" => snapshot.hard_solved = bucket.count,
                "All" => snapshot.total_solved = bucket.count,
                _ => {}
            }
        }

        // Ranking 0 means unranked on LeetCode
        snapshot.ranking = matched_user.profile.ranking.filter(|rank| *rank != 0);
        snapshot.reputation = matched_user.profile.reputation.unwrap_or(0);

        snapshot.recent_submissions = data
            .recent_submission_list
            .unwrap_or_default()
            .into_iter()
            .take(RECENT_SUBMISSION_LIMIT)
            .map(|submission| RecentSubmission {
                title: submission.title,
                // The query does not return per-submission difficulty
                difficulty: "Unknown".into(),
                timestamp: submission.timestamp.parse().unwrap_or(0),
                status: submission.status_display,
            })
            .collect();

        Ok(snapshot)
    }
}

fn extraction_error(detail: String) -> SolveTrackError {
    SolveTrackError::Extraction(format!("Failed to scrape LeetCode profile: {detail}"))
}

#[derive(Debug, Default, Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
}

#[derive(Debug, Default, Deserialize)]
struct GraphQlData {
    #[serde(rename = "matchedUser")]
    matched_user: Option<MatchedUser>,
    #[serde(rename = "recentSubmissionList")]
    recent_submission_list: Option<Vec<RawSubmission>>,
}

#[derive(Debug, Deserialize)]
struct MatchedUser {
    #[serde(rename = "submitStats")]
    submit_stats: SubmitStats,
    profile: PublicProfile,
}

#[derive(Debug, Deserialize)]
struct SubmitStats {
    #[serde(rename = "acSubmissionNum")]
    ac_submission_num: Vec<SubmissionBucket>,
}

#[derive(Debug, Deserialize)]
struct SubmissionBucket {
    difficulty: String,
    count: i64,
}

#[derive(Debug, Deserialize)]
struct PublicProfile {
    ranking: Option<i64>,
    reputation: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawSubmission {
    title: String,
    /// Epoch seconds, returned as a string by the API
    timestamp: String,
    #[serde(rename = "statusDisplay")]
    status_display: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn extractor(server: &MockServer) -> LeetCodeExtractor {
        LeetCodeExtractor::with_endpoint(
            HttpClient::new().expect("http client"),
            format!("{}/graphql", server.uri()),
        )
    }

    fn matched_user_payload() -> serde_json::Value {
        json!({
            "data": {
                "matchedUser": {
                    "username": "someuser",
                    "submitStats": {
                        "acSubmissionNum": [
                            { "difficulty": "Easy", "count": 10 },
                            { "difficulty": "Medium", "count": 5 },
                            { "difficulty": "Hard", "count": 2 },
                            { "difficulty": "All", "count": 17 }
                        ]
                    },
                    "profile": { "ranking": 123456, "reputation": 42 }
                },
                "recentSubmissionList": [
                    {
                        "title": "Two Sum",
                        "timestamp": "1700000000",
                        "statusDisplay": "Accepted"
                    },
                    {
                        "title": "Add Two Numbers",
                        "timestamp": "1699990000",
                        "statusDisplay": "Wrong Answer"
                    }
                ]
            }
        })
    }

    #[tokio::test]
    async fn difficulty_buckets_map_to_counters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "variables": { "username": "someuser" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(matched_user_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = extractor(&server)
            .extract("u1", "https://leetcode.com/someuser")
            .await
            .expect("extraction succeeds");

        assert_eq!(snapshot.easy_solved, 10);
        assert_eq!(snapshot.medium_solved, 5);
        assert_eq!(snapshot.hard_solved, 2);
        assert_eq!(snapshot.total_solved, 17);
        assert_eq!(snapshot.ranking, Some(123456));
        assert_eq!(snapshot.reputation, 42);
        assert_eq!(snapshot.platform, Platform::Leetcode);
    }

    #[tokio::test]
    async fn recent_submissions_carry_parsed_timestamps() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(matched_user_payload()))
            .mount(&server)
            .await;

        let snapshot = extractor(&server)
            .extract("u1", "https://leetcode.com/someuser")
            .await
            .expect("extraction succeeds");

        assert_eq!(snapshot.recent_submissions.len(), 2);
        let first = &snapshot.recent_submissions[0];
        assert_eq!(first.title, "Two Sum");
        assert_eq!(first.timestamp, 1_700_000_000);
        assert_eq!(first.status, "Accepted");
        assert_eq!(first.difficulty, "Unknown");
    }

    #[tokio::test]
    async fn missing_matched_user_is_user_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "matchedUser": null, "recentSubmissionList": null }
            })))
            .mount(&server)
            .await;

        let err = extractor(&server)
            .extract("u1", "https://leetcode.com/ghost")
            .await
            .expect_err("extraction fails");

        match err {
            SolveTrackError::Extraction(message) => {
                assert!(message.contains("User not found on LeetCode"));
            }
            other => panic!("expected extraction error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn server_error_propagates_as_extraction_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = extractor(&server)
            .extract("u1", "https://leetcode.com/someuser")
            .await
            .expect_err("extraction fails");

        assert!(matches!(err, SolveTrackError::Extraction(_)));
    }

    #[tokio::test]
    async fn zero_ranking_is_normalized_to_null() {
        let server = MockServer::start().await;
        let mut payload = matched_user_payload();
        payload["data"]["matchedUser"]["profile"]["ranking"] = json!(0);
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&server)
            .await;

        let snapshot = extractor(&server)
            .extract("u1", "https://leetcode.com/someuser")
            .await
            .expect("extraction succeeds");

        assert_eq!(snapshot.ranking, None);
    }

    #[tokio::test]
    async fn username_is_final_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "variables": { "username": "nested" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(matched_user_payload()))
            .expect(1)
            .mount(&server)
            .await;

        extractor(&server)
            .extract("u1", "https://leetcode.com/u/nested/")
            .await
            .expect("extraction succeeds");
    }
}
