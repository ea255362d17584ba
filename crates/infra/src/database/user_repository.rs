//! User account repository implementation using SQLite

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Row, ToSql};
use solvetrack_core::users::ports::{StudentFilter, UserRepository};
use solvetrack_domain::{Result as DomainResult, Role, SolveTrackError, UserAccount};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use crate::errors::InfraError;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, batch, assigned_teacher,
             is_approved, created_at, updated_at";

/// SQLite-backed implementation of `UserRepository`
pub struct SqliteUserRepository {
    db: Arc<DbManager>,
}

impl SqliteUserRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn get_by_id(&self, id: &str) -> DomainResult<Option<UserAccount>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<UserAccount>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![&id],
                map_user_row,
            );

            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<Option<UserAccount>> {
        let db = Arc::clone(&self.db);
        let email = email.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<UserAccount>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                params![&email],
                map_user_row,
            );

            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, user: UserAccount) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO users (id, name, email, password_hash, role, batch,
                        assigned_teacher, is_approved, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    &user.id,
                    &user.name,
                    &user.email,
                    &user.password_hash,
                    user.role.as_str(),
                    &user.batch,
                    &user.assigned_teacher,
                    bool_to_int(user.is_approved),
                    user.created_at,
                    user.updated_at,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, user: UserAccount) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE users SET
                        name = ?1, email = ?2, password_hash = ?3, role = ?4, batch = ?5,
                        assigned_teacher = ?6, is_approved = ?7, updated_at = ?8
                     WHERE id = ?9",
                    params![
                        &user.name,
                        &user.email,
                        &user.password_hash,
                        user.role.as_str(),
                        &user.batch,
                        &user.assigned_teacher,
                        bool_to_int(user.is_approved),
                        user.updated_at,
                        &user.id,
                    ],
                )
                .map_err(map_sql_error)?;

            if changed == 0 {
                return Err(SolveTrackError::NotFound(format!("user {} not found", user.id)));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            // Profile, progress and feedback rows cascade via foreign keys
            conn.execute("DELETE FROM users WHERE id = ?1", params![&id])
                .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self, role: Option<Role>) -> DomainResult<Vec<UserAccount>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<UserAccount>> {
            let conn = db.get_connection()?;

            let (sql, params_vec): (String, Vec<Box<dyn ToSql>>) = match role {
                Some(role) => (
                    format!("SELECT {USER_COLUMNS} FROM users WHERE role = ?1 ORDER BY created_at"),
                    vec![Box::new(role.as_str().to_string())],
                ),
                None => {
                    (format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at"), Vec::new())
                }
            };

            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
            let rows = stmt
                .query_map(params_refs.as_slice(), map_user_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_students(&self, filter: &StudentFilter) -> DomainResult<Vec<UserAccount>> {
        let db = Arc::clone(&self.db);
        let filter = filter.clone();

        task::spawn_blocking(move || -> DomainResult<Vec<UserAccount>> {
            let conn = db.get_connection()?;

            let mut sql = format!("SELECT {USER_COLUMNS} FROM users WHERE role = 'student'");
            let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

            if let Some(teacher_id) = &filter.assigned_teacher {
                params_vec.push(Box::new(teacher_id.clone()));
                sql.push_str(&format!(" AND assigned_teacher = ?{}", params_vec.len()));
            }
            if let Some(batch) = &filter.batch {
                params_vec.push(Box::new(batch.clone()));
                sql.push_str(&format!(" AND batch = ?{}", params_vec.len()));
            }
            if filter.approved_only {
                sql.push_str(" AND is_approved = 1");
            }
            sql.push_str(" ORDER BY created_at");

            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
            let rows = stmt
                .query_map(params_refs.as_slice(), map_user_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn assign_teacher(
        &self,
        teacher_id: &str,
        student_ids: &[String],
    ) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);
        let teacher_id = teacher_id.to_string();
        let student_ids = student_ids.to_vec();

        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            let mut changed = 0;
            for student_id in &student_ids {
                changed += conn
                    .execute(
                        "UPDATE users SET assigned_teacher = ?1
                         WHERE id = ?2 AND role = 'student'",
                        params![&teacher_id, student_id],
                    )
                    .map_err(map_sql_error)?;
            }
            Ok(changed)
        })
        .await
        .map_err(map_join_error)?
    }
}

/// Map a row to a UserAccount
fn map_user_row(row: &Row<'_>) -> rusqlite::Result<UserAccount> {
    let role_text: String = row.get(4)?;
    let role = Role::from_str(&role_text).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown role: {role_text}").into(),
        )
    })?;

    Ok(UserAccount {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        role,
        batch: row.get(5)?,
        assigned_teacher: row.get(6)?,
        is_approved: int_to_bool(row.get(7)?),
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

pub(crate) fn map_join_error(err: task::JoinError) -> SolveTrackError {
    SolveTrackError::from(InfraError::from(err))
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

pub(crate) fn int_to_bool(value: i64) -> bool {
    value != 0
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;

    fn setup_test_db() -> (Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let manager = DbManager::new(db_path.to_str().unwrap(), 5).expect("create db manager");
        manager.run_migrations().expect("run migrations");
        (Arc::new(manager), temp_dir)
    }

    fn test_user(id: &str, email: &str, role: Role) -> UserAccount {
        let now = Utc::now().timestamp();
        UserAccount {
            id: id.into(),
            name: "Test User".into(),
            email: email.into(),
            password_hash: "$argon2id$stub".into(),
            role,
            batch: Some("2026".into()),
            assigned_teacher: None,
            is_approved: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn create_and_get_by_id() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteUserRepository::new(db);
        let user = test_user("u1", "u1@example.com", Role::Student);

        repo.create(user.clone()).await.expect("create user");

        let retrieved = repo.get_by_id("u1").await.expect("get user").unwrap();
        assert_eq!(retrieved.email, user.email);
        assert_eq!(retrieved.role, Role::Student);
        assert!(!retrieved.is_approved);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn duplicate_email_is_a_conflict() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteUserRepository::new(db);

        repo.create(test_user("u1", "same@example.com", Role::Student)).await.unwrap();
        let err =
            repo.create(test_user("u2", "same@example.com", Role::Student)).await.unwrap_err();

        assert!(matches!(err, SolveTrackError::Conflict(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn list_students_honors_filters() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteUserRepository::new(db);

        repo.create(test_user("t1", "t1@example.com", Role::Teacher)).await.unwrap();
        let mut s1 = test_user("s1", "s1@example.com", Role::Student);
        s1.assigned_teacher = Some("t1".into());
        s1.is_approved = true;
        repo.create(s1).await.unwrap();
        let mut s2 = test_user("s2", "s2@example.com", Role::Student);
        s2.batch = Some("2027".into());
        repo.create(s2).await.unwrap();

        let assigned = repo
            .list_students(&StudentFilter {
                assigned_teacher: Some("t1".into()),
                batch: None,
                approved_only: true,
            })
            .await
            .unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].id, "s1");

        let batch_2027 = repo
            .list_students(&StudentFilter {
                assigned_teacher: None,
                batch: Some("2027".into()),
                approved_only: false,
            })
            .await
            .unwrap();
        assert_eq!(batch_2027.len(), 1);
        assert_eq!(batch_2027[0].id, "s2");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn assign_teacher_counts_changed_rows() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteUserRepository::new(db);

        repo.create(test_user("t1", "t1@example.com", Role::Teacher)).await.unwrap();
        repo.create(test_user("s1", "s1@example.com", Role::Student)).await.unwrap();
        repo.create(test_user("s2", "s2@example.com", Role::Student)).await.unwrap();

        let changed = repo
            .assign_teacher("t1", &["s1".to_string(), "s2".to_string(), "missing".to_string()])
            .await
            .unwrap();

        assert_eq!(changed, 2);
        let s1 = repo.get_by_id("s1").await.unwrap().unwrap();
        assert_eq!(s1.assigned_teacher.as_deref(), Some("t1"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn update_missing_user_is_not_found() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteUserRepository::new(db);

        let err = repo.update(test_user("ghost", "g@example.com", Role::Student)).await.unwrap_err();
        assert!(matches!(err, SolveTrackError::NotFound(_)));
    }
}
