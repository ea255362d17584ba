//! Sync orchestrator - core business logic
//!
//! One sync request walks the caller's linked platforms in a fixed order,
//! invokes each platform's extractor sequentially, and persists every
//! successful snapshot independently. A single platform failure is recorded
//! in the result list and never aborts the remaining platforms.

use std::sync::Arc;

use solvetrack_domain::{Platform, Result, SolveTrackError, SyncOutcome};
use tracing::{info, warn};

use super::ports::{ProgressExtractor, ProgressRepository};
use crate::profiles::ports::ProfileRepository;

/// Progress sync service
pub struct SyncService {
    profiles: Arc<dyn ProfileRepository>,
    progress: Arc<dyn ProgressRepository>,
    extractors: Vec<Arc<dyn ProgressExtractor>>,
}

impl SyncService {
    /// Create a new sync service
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        progress: Arc<dyn ProgressRepository>,
        extractors: Vec<Arc<dyn ProgressExtractor>>,
    ) -> Self {
        Self { profiles, progress, extractors }
    }

    /// Refresh the caller's snapshots from every linked platform.
    ///
    /// Platforms are processed strictly sequentially in the fixed order
    /// LeetCode, HackerRank, GeeksForGeeks. Each successful extraction is
    /// upserted keyed by (user, platform), fully replacing the prior
    /// snapshot. Returns one outcome per linked platform in processing
    /// order.
    ///
    /// # Errors
    /// Fails with `NotFound` when the user has no profile row; no extractor
    /// is invoked in that case.
    pub async fn sync_progress(&self, user_id: &str) -> Result<Vec<SyncOutcome>> {
        let profile = self.profiles.get_by_user(user_id).await?.ok_or_else(|| {
            SolveTrackError::NotFound("Please add your profile links first".into())
        })?;

        let mut results = Vec::new();

        for platform in Platform::ALL {
            let Some(url) = profile.url_for(platform) else {
                continue;
            };

            let outcome = match self.extractor_for(platform) {
                Some(extractor) => self.sync_platform(&*extractor, user_id, url).await,
                None => SyncOutcome::failed(platform, format!("no extractor for {platform}")),
            };
            results.push(outcome);
        }

        info!(user_id, platforms = results.len(), "progress sync completed");
        Ok(results)
    }

    async fn sync_platform(
        &self,
        extractor: &dyn ProgressExtractor,
        user_id: &str,
        url: &str,
    ) -> SyncOutcome {
        let platform = extractor.platform();

        match extractor.extract(user_id, url).await {
            Ok(snapshot) => match self.progress.upsert(snapshot).await {
                Ok(()) => SyncOutcome::ok(platform),
                Err(err) => {
                    warn!(user_id, %platform, error = %err, "failed to persist snapshot");
                    SyncOutcome::failed(platform, err.to_string())
                }
            },
            Err(err) => {
                warn!(user_id, %platform, error = %err, "extraction failed");
                SyncOutcome::failed(platform, err.to_string())
            }
        }
    }

    fn extractor_for(&self, platform: Platform) -> Option<Arc<dyn ProgressExtractor>> {
        self.extractors.iter().find(|e| e.platform() == platform).cloned()
    }
}
