//! Progress snapshot repository implementation using SQLite
//!
//! Badges and recent submissions are stored as JSON-valued text columns;
//! the row itself is the unit of replacement on upsert.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Row, ToSql};
use solvetrack_core::sync::ports::ProgressRepository;
use solvetrack_domain::{
    Badge, Platform, ProgressSnapshot, RecentSubmission, Result as DomainResult, SolveTrackError,
};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use super::user_repository::map_join_error;
use crate::errors::InfraError;

const PROGRESS_COLUMNS: &str = "user_id, platform, total_solved, easy_solved, medium_solved,
             hard_solved, ranking, reputation, streak, acceptance_rate, badges,
             recent_submissions, last_scraped";

/// SQLite-backed implementation of `ProgressRepository`
pub struct SqliteProgressRepository {
    db: Arc<DbManager>,
}

impl SqliteProgressRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProgressRepository for SqliteProgressRepository {
    async fn upsert(&self, snapshot: ProgressSnapshot) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let badges = serde_json::to_string(&snapshot.badges)
                .map_err(|err| SolveTrackError::from(InfraError::from(err)))?;
            let submissions = serde_json::to_string(&snapshot.recent_submissions)
                .map_err(|err| SolveTrackError::from(InfraError::from(err)))?;

            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO progress (user_id, platform, total_solved, easy_solved,
                        medium_solved, hard_solved, ranking, reputation, streak,
                        acceptance_rate, badges, recent_submissions, last_scraped)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                 ON CONFLICT(user_id, platform) DO UPDATE SET
                    total_solved = excluded.total_solved,
                    easy_solved = excluded.easy_solved,
                    medium_solved = excluded.medium_solved,
                    hard_solved = excluded.hard_solved,
                    ranking = excluded.ranking,
                    reputation = excluded.reputation,
                    streak = excluded.streak,
                    acceptance_rate = excluded.acceptance_rate,
                    badges = excluded.badges,
                    recent_submissions = excluded.recent_submissions,
                    last_scraped = excluded.last_scraped",
                params![
                    &snapshot.user_id,
                    snapshot.platform.as_str(),
                    snapshot.total_solved,
                    snapshot.easy_solved,
                    snapshot.medium_solved,
                    snapshot.hard_solved,
                    snapshot.ranking,
                    snapshot.reputation,
                    snapshot.streak,
                    snapshot.acceptance_rate,
                    &badges,
                    &submissions,
                    snapshot.last_scraped,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_by_user(&self, user_id: &str) -> DomainResult<Vec<ProgressSnapshot>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<ProgressSnapshot>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {PROGRESS_COLUMNS} FROM progress WHERE user_id = ?1
                     ORDER BY platform"
                ))
                .map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params![&user_id], map_progress_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_by_users(
        &self,
        user_ids: &[String],
        platform: Option<Platform>,
    ) -> DomainResult<Vec<ProgressSnapshot>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let db = Arc::clone(&self.db);
        let user_ids = user_ids.to_vec();

        task::spawn_blocking(move || -> DomainResult<Vec<ProgressSnapshot>> {
            let conn = db.get_connection()?;

            let placeholders: Vec<String> =
                (1..=user_ids.len()).map(|i| format!("?{i}")).collect();
            let mut sql = format!(
                "SELECT {PROGRESS_COLUMNS} FROM progress WHERE user_id IN ({})",
                placeholders.join(", ")
            );

            let mut params_vec: Vec<Box<dyn ToSql>> =
                user_ids.iter().map(|id| Box::new(id.clone()) as Box<dyn ToSql>).collect();
            if let Some(platform) = platform {
                params_vec.push(Box::new(platform.as_str().to_string()));
                sql.push_str(&format!(" AND platform = ?{}", params_vec.len()));
            }
            sql.push_str(" ORDER BY user_id, platform");

            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
            let rows = stmt
                .query_map(params_refs.as_slice(), map_progress_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }
}

/// Map a row to a ProgressSnapshot
fn map_progress_row(row: &Row<'_>) -> rusqlite::Result<ProgressSnapshot> {
    let platform_text: String = row.get(1)?;
    let platform = Platform::from_str(&platform_text).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            format!("unknown platform: {platform_text}").into(),
        )
    })?;

    let badges_json: String = row.get(10)?;
    let badges: Vec<Badge> = serde_json::from_str(&badges_json).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(10, rusqlite::types::Type::Text, err.into())
    })?;

    let submissions_json: String = row.get(11)?;
    let recent_submissions: Vec<RecentSubmission> = serde_json::from_str(&submissions_json)
        .map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(11, rusqlite::types::Type::Text, err.into())
        })?;

    Ok(ProgressSnapshot {
        user_id: row.get(0)?,
        platform,
        total_solved: row.get(2)?,
        easy_solved: row.get(3)?,
        medium_solved: row.get(4)?,
        hard_solved: row.get(5)?,
        ranking: row.get(6)?,
        reputation: row.get(7)?,
        streak: row.get(8)?,
        acceptance_rate: row.get(9)?,
        badges,
        recent_submissions,
        last_scraped: row.get(12)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use solvetrack_core::users::ports::UserRepository;
    use solvetrack_domain::{Role, UserAccount};
    use tempfile::TempDir;

    use super::super::user_repository::SqliteUserRepository;
    use super::*;

    async fn setup(user_ids: &[&str]) -> (Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let manager = DbManager::new(db_path.to_str().unwrap(), 5).expect("create db manager");
        manager.run_migrations().expect("run migrations");
        let db = Arc::new(manager);

        let users = SqliteUserRepository::new(db.clone());
        let now = Utc::now().timestamp();
        for id in user_ids {
            users
                .create(UserAccount {
                    id: (*id).into(),
                    name: "Student".into(),
                    email: format!("{id}@example.com"),
                    password_hash: "hash".into(),
                    role: Role::Student,
                    batch: None,
                    assigned_teacher: None,
                    is_approved: true,
                    created_at: now,
                    updated_at: now,
                })
                .await
                .expect("seed user");
        }

        (db, temp_dir)
    }

    fn snapshot(user_id: &str, platform: Platform, total: i64, scraped: i64) -> ProgressSnapshot {
        let mut snapshot = ProgressSnapshot::empty(user_id, platform, scraped);
        snapshot.total_solved = total;
        snapshot.badges = vec![Badge { name: "Gold".into(), count: 1 }];
        snapshot.recent_submissions = vec![RecentSubmission {
            title: "Two Sum".into(),
            difficulty: "Unknown".into(),
            timestamp: 1_700_000_000,
            status: "Accepted".into(),
        }];
        snapshot
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn upsert_round_trips_json_columns() {
        let (db, _temp_dir) = setup(&["u1"]).await;
        let repo = SqliteProgressRepository::new(db);

        repo.upsert(snapshot("u1", Platform::Leetcode, 17, 100)).await.expect("upsert");

        let rows = repo.list_by_user("u1").await.expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_solved, 17);
        assert_eq!(rows[0].badges[0].name, "Gold");
        assert_eq!(rows[0].recent_submissions[0].title, "Two Sum");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn repeated_upsert_keeps_a_single_row_and_replaces_it() {
        let (db, _temp_dir) = setup(&["u1"]).await;
        let repo = SqliteProgressRepository::new(db);

        repo.upsert(snapshot("u1", Platform::Leetcode, 10, 100)).await.unwrap();
        let mut second = ProgressSnapshot::empty("u1", Platform::Leetcode, 200);
        second.total_solved = 12;
        repo.upsert(second).await.unwrap();

        let rows = repo.list_by_user("u1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_solved, 12);
        assert_eq!(rows[0].last_scraped, 200);
        // Full replace: the earlier badges are gone
        assert!(rows[0].badges.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn snapshots_for_different_platforms_coexist() {
        let (db, _temp_dir) = setup(&["u1"]).await;
        let repo = SqliteProgressRepository::new(db);

        repo.upsert(snapshot("u1", Platform::Leetcode, 10, 100)).await.unwrap();
        repo.upsert(snapshot("u1", Platform::Hackerrank, 5, 100)).await.unwrap();

        let rows = repo.list_by_user("u1").await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn list_by_users_filters_by_platform() {
        let (db, _temp_dir) = setup(&["u1", "u2"]).await;
        let repo = SqliteProgressRepository::new(db);

        repo.upsert(snapshot("u1", Platform::Leetcode, 10, 100)).await.unwrap();
        repo.upsert(snapshot("u2", Platform::Hackerrank, 5, 100)).await.unwrap();

        let all = repo
            .list_by_users(&["u1".to_string(), "u2".to_string()], None)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let leetcode_only = repo
            .list_by_users(&["u1".to_string(), "u2".to_string()], Some(Platform::Leetcode))
            .await
            .unwrap();
        assert_eq!(leetcode_only.len(), 1);
        assert_eq!(leetcode_only[0].user_id, "u1");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_user_set_short_circuits() {
        let (db, _temp_dir) = setup(&[]).await;
        let repo = SqliteProgressRepository::new(db);

        let rows = repo.list_by_users(&[], None).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn deleting_user_cascades_progress() {
        let (db, _temp_dir) = setup(&["u1"]).await;
        let users = SqliteUserRepository::new(db.clone());
        let repo = SqliteProgressRepository::new(db);

        repo.upsert(snapshot("u1", Platform::Leetcode, 10, 100)).await.unwrap();
        users.delete("u1").await.unwrap();

        let rows = repo.list_by_user("u1").await.unwrap();
        assert!(rows.is_empty());
    }
}
