//! SolveTrack server binary

use chrono::Utc;
use solvetrack_app::auth::password::Hasher as _;
use solvetrack_app::{build_router, AppState};
use solvetrack_core::users::ports::UserRepository as _;
use solvetrack_domain::{Role, SolveTrackError, UserAccount};
use tracing::{info, warn};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = solvetrack_infra::config::load()?;
    let state = AppState::build(&config)?;

    seed_admin(&state).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "server listening");

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}

/// Create the initial admin account when none exists.
///
/// Credentials come from `SOLVETRACK_ADMIN_EMAIL` / `SOLVETRACK_ADMIN_PASSWORD`;
/// without them the instance starts admin-less and approvals are impossible,
/// so a warning is logged.
async fn seed_admin(state: &AppState) -> Result<(), SolveTrackError> {
    if !state.users.list(Some(Role::Admin)).await?.is_empty() {
        return Ok(());
    }

    let (Ok(email), Ok(password)) = (
        std::env::var("SOLVETRACK_ADMIN_EMAIL"),
        std::env::var("SOLVETRACK_ADMIN_PASSWORD"),
    ) else {
        warn!("no admin account exists and SOLVETRACK_ADMIN_EMAIL/PASSWORD are unset");
        return Ok(());
    };

    let now = Utc::now().timestamp();
    let admin = UserAccount {
        id: Uuid::new_v4().to_string(),
        name: "Admin User".into(),
        email: email.trim().to_lowercase(),
        password_hash: state
            .hasher
            .hash(&password)
            .map_err(|err| SolveTrackError::Internal(format!("failed to hash password: {err}")))?,
        role: Role::Admin,
        batch: None,
        assigned_teacher: None,
        is_approved: true,
        created_at: now,
        updated_at: now,
    };
    state.users.create(admin).await?;
    info!(%email, "admin user created");

    Ok(())
}
