//! Student profile link types

use serde::{Deserialize, Serialize};

use super::progress::Platform;

/// Platform profile links for one user (unique on user)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub leetcode_url: Option<String>,
    pub hackerrank_url: Option<String>,
    pub geeksforgeeks_url: Option<String>,
    /// Epoch seconds of the last link update
    pub last_updated: i64,
}

impl Profile {
    /// Profile with no linked platforms, created lazily on first fetch.
    pub fn empty(user_id: impl Into<String>, now: i64) -> Self {
        Self {
            user_id: user_id.into(),
            leetcode_url: None,
            hackerrank_url: None,
            geeksforgeeks_url: None,
            last_updated: now,
        }
    }

    /// The stored URL for a platform, if linked.
    pub fn url_for(&self, platform: Platform) -> Option<&str> {
        let url = match platform {
            Platform::Leetcode => self.leetcode_url.as_deref(),
            Platform::Hackerrank => self.hackerrank_url.as_deref(),
            Platform::Geeksforgeeks => self.geeksforgeeks_url.as_deref(),
        };
        url.filter(|u| !u.is_empty())
    }
}

/// Incoming link update; `None` fields keep the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileLinks {
    pub leetcode_url: Option<String>,
    pub hackerrank_url: Option<String>,
    pub geeksforgeeks_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_treats_empty_string_as_unlinked() {
        let mut profile = Profile::empty("u1", 0);
        profile.leetcode_url = Some(String::new());
        profile.hackerrank_url = Some("https://www.hackerrank.com/someone".into());

        assert_eq!(profile.url_for(Platform::Leetcode), None);
        assert_eq!(
            profile.url_for(Platform::Hackerrank),
            Some("https://www.hackerrank.com/someone")
        );
        assert_eq!(profile.url_for(Platform::Geeksforgeeks), None);
    }
}
