//! Profile management - core business logic

use std::sync::Arc;

use chrono::Utc;
use solvetrack_domain::{Platform, Profile, ProfileLinks, Result};

use super::ports::ProfileRepository;
use crate::utils::patterns::validate_profile_url;

/// Profile link service
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    /// Create a new profile service
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Fetch the user's profile, creating an empty row on first access.
    pub async fn get_or_create(&self, user_id: &str) -> Result<Profile> {
        if let Some(profile) = self.profiles.get_by_user(user_id).await? {
            return Ok(profile);
        }

        let profile = Profile::empty(user_id, Utc::now().timestamp());
        self.profiles.create(profile.clone()).await?;
        Ok(profile)
    }

    /// Update the user's platform links.
    ///
    /// Each provided URL is validated against its platform's domain pattern.
    /// Absent or empty values keep the stored link; `last_updated` is bumped
    /// on every call.
    ///
    /// # Errors
    /// `Validation` naming the expected domain when a URL fails its pattern.
    pub async fn update_links(&self, user_id: &str, links: ProfileLinks) -> Result<Profile> {
        if let Some(url) = links.leetcode_url.as_deref() {
            validate_profile_url(Platform::Leetcode, url)?;
        }
        if let Some(url) = links.hackerrank_url.as_deref() {
            validate_profile_url(Platform::Hackerrank, url)?;
        }
        if let Some(url) = links.geeksforgeeks_url.as_deref() {
            validate_profile_url(Platform::Geeksforgeeks, url)?;
        }

        let now = Utc::now().timestamp();

        match self.profiles.get_by_user(user_id).await? {
            Some(mut profile) => {
                profile.leetcode_url = merge_link(links.leetcode_url, profile.leetcode_url);
                profile.hackerrank_url = merge_link(links.hackerrank_url, profile.hackerrank_url);
                profile.geeksforgeeks_url =
                    merge_link(links.geeksforgeeks_url, profile.geeksforgeeks_url);
                profile.last_updated = now;
                self.profiles.update(profile.clone()).await?;
                Ok(profile)
            }
            None => {
                let profile = Profile {
                    user_id: user_id.to_string(),
                    leetcode_url: links.leetcode_url.filter(|u| !u.is_empty()),
                    hackerrank_url: links.hackerrank_url.filter(|u| !u.is_empty()),
                    geeksforgeeks_url: links.geeksforgeeks_url.filter(|u| !u.is_empty()),
                    last_updated: now,
                };
                self.profiles.create(profile.clone()).await?;
                Ok(profile)
            }
        }
    }
}

/// New link wins unless absent or empty, in which case the stored one stays.
fn merge_link(incoming: Option<String>, stored: Option<String>) -> Option<String> {
    match incoming {
        Some(url) if !url.is_empty() => Some(url),
        _ => stored,
    }
}
