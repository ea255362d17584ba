//! Port interfaces for progress extraction and storage

use async_trait::async_trait;
use solvetrack_domain::{Platform, ProgressSnapshot, Result};

/// Capability interface implemented once per platform.
///
/// Implementations differ in failure policy: the LeetCode extractor fails
/// loudly on any network/parse problem, while the HackerRank and
/// GeeksForGeeks extractors swallow errors and return an all-default
/// snapshot. The orchestrator treats both uniformly and records whatever
/// comes back.
#[async_trait]
pub trait ProgressExtractor: Send + Sync {
    /// Which platform this extractor serves
    fn platform(&self) -> Platform;

    /// Turn a profile URL into a normalized snapshot for `user_id`
    async fn extract(&self, user_id: &str, profile_url: &str) -> Result<ProgressSnapshot>;
}

/// Trait for progress snapshot persistence; at most one row per
/// (user, platform)
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Insert or fully replace the snapshot for (user, platform)
    async fn upsert(&self, snapshot: ProgressSnapshot) -> Result<()>;

    /// All snapshots for one user, in platform order
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ProgressSnapshot>>;

    /// Snapshots for a set of users, optionally narrowed to one platform
    async fn list_by_users(
        &self,
        user_ids: &[String],
        platform: Option<Platform>,
    ) -> Result<Vec<ProgressSnapshot>>;
}
