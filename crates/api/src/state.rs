//! Application state wiring
//!
//! Builds the repository/service graph once at startup; handlers reach
//! everything through cheap `Arc` clones.

use std::sync::Arc;

use solvetrack_core::sync::ports::{ProgressExtractor, ProgressRepository};
use solvetrack_core::users::ports::UserRepository;
use solvetrack_core::{
    AnalyticsService, FeedbackService, ProfileRepository, ProfileService, SyncService,
};
use solvetrack_domain::{Config, Result};
use solvetrack_infra::extractors::build_extractors;
use solvetrack_infra::{
    DbManager, SqliteFeedbackRepository, SqliteProfileRepository, SqliteProgressRepository,
    SqliteUserRepository,
};

use crate::auth::jwt::JwtService;
use crate::auth::password::{Argon2Hasher, Hasher};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbManager>,
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub profile_service: Arc<ProfileService>,
    pub sync_service: Arc<SyncService>,
    pub feedback_service: Arc<FeedbackService>,
    pub analytics: Arc<AnalyticsService>,
    pub tokens: Arc<JwtService>,
    pub hasher: Arc<dyn Hasher>,
}

impl AppState {
    /// Wire the full application from configuration.
    pub fn build(config: &Config) -> Result<Self> {
        let extractors = build_extractors(&config.scrape)?;
        Self::build_with_extractors(config, extractors)
    }

    /// Wire the application with a caller-supplied extractor set (tests).
    pub fn build_with_extractors(
        config: &Config,
        extractors: Vec<Arc<dyn ProgressExtractor>>,
    ) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(db.clone()));
        let profiles: Arc<dyn ProfileRepository> =
            Arc::new(SqliteProfileRepository::new(db.clone()));
        let progress: Arc<dyn ProgressRepository> =
            Arc::new(SqliteProgressRepository::new(db.clone()));
        let feedback = Arc::new(SqliteFeedbackRepository::new(db.clone()));

        let profile_service = Arc::new(ProfileService::new(profiles.clone()));
        let sync_service =
            Arc::new(SyncService::new(profiles.clone(), progress.clone(), extractors));
        let feedback_service = Arc::new(FeedbackService::new(users.clone(), feedback));
        let analytics = Arc::new(AnalyticsService::new(users.clone(), progress.clone()));

        let tokens =
            Arc::new(JwtService::new(&config.auth.jwt_secret, config.auth.token_ttl_seconds));
        let hasher: Arc<dyn Hasher> = Arc::new(Argon2Hasher::new());

        Ok(Self {
            db,
            users,
            profiles,
            progress,
            profile_service,
            sync_service,
            feedback_service,
            analytics,
            tokens,
            hasher,
        })
    }
}
