//! Port interfaces for profile link storage

use async_trait::async_trait;
use solvetrack_domain::{Profile, Result};

/// Trait for profile persistence; one row per user
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Get the profile owned by a user
    async fn get_by_user(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Create a profile row
    async fn create(&self, profile: Profile) -> Result<()>;

    /// Replace the profile row for `profile.user_id`
    async fn update(&self, profile: Profile) -> Result<()>;
}
