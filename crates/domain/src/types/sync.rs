//! Sync result types

use serde::{Deserialize, Serialize};

use super::progress::Platform;

/// Per-platform outcome of one sync request, in processing order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub platform: Platform,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncOutcome {
    pub fn ok(platform: Platform) -> Self {
        Self { platform, success: true, error: None }
    }

    pub fn failed(platform: Platform, error: impl Into<String>) -> Self {
        Self { platform, success: false, error: Some(error.into()) }
    }
}
