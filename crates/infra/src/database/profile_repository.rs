//! Profile repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Row};
use solvetrack_core::profiles::ports::ProfileRepository;
use solvetrack_domain::{Profile, Result as DomainResult, SolveTrackError};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use super::user_repository::map_join_error;

/// SQLite-backed implementation of `ProfileRepository`
pub struct SqliteProfileRepository {
    db: Arc<DbManager>,
}

impl SqliteProfileRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn get_by_user(&self, user_id: &str) -> DomainResult<Option<Profile>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Profile>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                "SELECT user_id, leetcode_url, hackerrank_url, geeksforgeeks_url, last_updated
                 FROM profiles WHERE user_id = ?1",
                params![&user_id],
                map_profile_row,
            );

            match result {
                Ok(profile) => Ok(Some(profile)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, profile: Profile) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO profiles (user_id, leetcode_url, hackerrank_url,
                        geeksforgeeks_url, last_updated)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    &profile.user_id,
                    &profile.leetcode_url,
                    &profile.hackerrank_url,
                    &profile.geeksforgeeks_url,
                    profile.last_updated,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, profile: Profile) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE profiles SET leetcode_url = ?1, hackerrank_url = ?2,
                            geeksforgeeks_url = ?3, last_updated = ?4
                     WHERE user_id = ?5",
                    params![
                        &profile.leetcode_url,
                        &profile.hackerrank_url,
                        &profile.geeksforgeeks_url,
                        profile.last_updated,
                        &profile.user_id,
                    ],
                )
                .map_err(map_sql_error)?;

            if changed == 0 {
                return Err(SolveTrackError::NotFound(format!(
                    "profile for user {} not found",
                    profile.user_id
                )));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

/// Map a row to a Profile
fn map_profile_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        user_id: row.get(0)?,
        leetcode_url: row.get(1)?,
        hackerrank_url: row.get(2)?,
        geeksforgeeks_url: row.get(3)?,
        last_updated: row.get(4)?,
    })
}
