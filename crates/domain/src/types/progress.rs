//! Progress snapshot types
//!
//! One snapshot per (user, platform); every sync fully replaces the previous
//! snapshot for that platform.

use serde::{Deserialize, Serialize};

use crate::errors::SolveTrackError;

/// Supported competitive-programming platforms.
///
/// Closed set; adding a platform is a code change, not a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Leetcode,
    Hackerrank,
    Geeksforgeeks,
}

impl Platform {
    /// Fixed processing order used by the sync orchestrator.
    pub const ALL: [Platform; 3] = [Platform::Leetcode, Platform::Hackerrank, Platform::Geeksforgeeks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Leetcode => "leetcode",
            Platform::Hackerrank => "hackerrank",
            Platform::Geeksforgeeks => "geeksforgeeks",
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = SolveTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leetcode" => Ok(Platform::Leetcode),
            "hackerrank" => Ok(Platform::Hackerrank),
            "geeksforgeeks" => Ok(Platform::Geeksforgeeks),
            other => Err(SolveTrackError::InvalidInput(format!("unknown platform: {other}"))),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge earned on a platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    pub count: i64,
}

/// One recently submitted problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSubmission {
    pub title: String,
    pub difficulty: String,
    /// Epoch seconds
    pub timestamp: i64,
    pub status: String,
}

/// Full progress record for one (user, platform) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub user_id: String,
    pub platform: Platform,
    pub total_solved: i64,
    pub easy_solved: i64,
    pub medium_solved: i64,
    pub hard_solved: i64,
    pub ranking: Option<i64>,
    pub reputation: i64,
    pub streak: i64,
    pub acceptance_rate: f64,
    pub badges: Vec<Badge>,
    pub recent_submissions: Vec<RecentSubmission>,
    /// Epoch seconds of the scrape that produced this snapshot
    pub last_scraped: i64,
}

impl ProgressSnapshot {
    /// All-zero/null snapshot, used by the self-defaulting extractors when a
    /// scrape fails.
    pub fn empty(user_id: impl Into<String>, platform: Platform, last_scraped: i64) -> Self {
        Self {
            user_id: user_id.into(),
            platform,
            total_solved: 0,
            easy_solved: 0,
            medium_solved: 0,
            hard_solved: 0,
            ranking: None,
            reputation: 0,
            streak: 0,
            acceptance_rate: 0.0,
            badges: Vec::new(),
            recent_submissions: Vec::new(),
            last_scraped,
        }
    }
}
