//! Feedback repository implementation using SQLite

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Row};
use solvetrack_core::feedback::ports::FeedbackRepository;
use solvetrack_domain::{Feedback, FeedbackCategory, Result as DomainResult};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use super::user_repository::{bool_to_int, int_to_bool, map_join_error};

const FEEDBACK_COLUMNS: &str =
    "id, student_id, teacher_id, message, category, is_read, created_at";

/// SQLite-backed implementation of `FeedbackRepository`
pub struct SqliteFeedbackRepository {
    db: Arc<DbManager>,
}

impl SqliteFeedbackRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn list_by_column(&self, column: &str, value: &str) -> DomainResult<Vec<Feedback>> {
        let db = Arc::clone(&self.db);
        let sql = format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE {column} = ?1 ORDER BY created_at DESC"
        );
        let value = value.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<Feedback>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params![&value], map_feedback_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl FeedbackRepository for SqliteFeedbackRepository {
    async fn create(&self, feedback: Feedback) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO feedback (id, student_id, teacher_id, message, category,
                        is_read, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    &feedback.id,
                    &feedback.student_id,
                    &feedback.teacher_id,
                    &feedback.message,
                    feedback.category.as_str(),
                    bool_to_int(feedback.is_read),
                    feedback.created_at,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_by_teacher(&self, teacher_id: &str) -> DomainResult<Vec<Feedback>> {
        self.list_by_column("teacher_id", teacher_id).await
    }

    async fn list_by_student(&self, student_id: &str) -> DomainResult<Vec<Feedback>> {
        self.list_by_column("student_id", student_id).await
    }
}

/// Map a row to a Feedback entry
fn map_feedback_row(row: &Row<'_>) -> rusqlite::Result<Feedback> {
    let category_text: String = row.get(4)?;
    let category = FeedbackCategory::from_str(&category_text).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown feedback category: {category_text}").into(),
        )
    })?;

    Ok(Feedback {
        id: row.get(0)?,
        student_id: row.get(1)?,
        teacher_id: row.get(2)?,
        message: row.get(3)?,
        category,
        is_read: int_to_bool(row.get(5)?),
        created_at: row.get(6)?,
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

    async fn setup() -> (Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let manager = DbManager::new(db_path.to_str().unwrap(), 5).expect("create db manager");
        manager.run_migrations().expect("run migrations");
        let db = Arc::new(manager);

        let users = SqliteUserRepository::new(db.clone());
        let now = Utc::now().timestamp();
        for (id, role) in [("s1", Role::Student), ("t1", Role::Teacher)] {
            users
                .create(UserAccount {
                    id: id.into(),
                    name: id.into(),
                    email: format!("{id}@example.com"),
                    password_hash: "hash".into(),
                    role,
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

    fn entry(id: &str, created_at: i64) -> Feedback {
        Feedback {
            id: id.into(),
            student_id: "s1".into(),
            teacher_id: "t1".into(),
            message: "Solve more mediums".into(),
            category: FeedbackCategory::Improvement,
            is_read: false,
            created_at,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn listings_are_newest_first() {
        let (db, _temp_dir) = setup().await;
        let repo = SqliteFeedbackRepository::new(db);

        repo.create(entry("f1", 100)).await.unwrap();
        repo.create(entry("f2", 200)).await.unwrap();

        let by_teacher = repo.list_by_teacher("t1").await.unwrap();
        assert_eq!(by_teacher.len(), 2);
        assert_eq!(by_teacher[0].id, "f2");

        let by_student = repo.list_by_student("s1").await.unwrap();
        assert_eq!(by_student.len(), 2);
        assert_eq!(by_student[0].category, FeedbackCategory::Improvement);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unknown_ids_list_empty() {
        let (db, _temp_dir) = setup().await;
        let repo = SqliteFeedbackRepository::new(db);

        assert!(repo.list_by_teacher("ghost").await.unwrap().is_empty());
    }
}
