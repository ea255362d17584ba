//! Port interfaces for user account storage
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for user account operations.

use async_trait::async_trait;
use solvetrack_domain::{Result, Role, UserAccount};

/// Narrowing applied when listing student accounts
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    /// Only students assigned to this teacher
    pub assigned_teacher: Option<String>,
    /// Only students in this batch
    pub batch: Option<String>,
    /// Only approved accounts
    pub approved_only: bool,
}

/// Trait for user account persistence and retrieval
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<UserAccount>>;

    /// Get a user by email
    async fn get_by_email(&self, email: &str) -> Result<Option<UserAccount>>;

    /// Create a new user
    async fn create(&self, user: UserAccount) -> Result<()>;

    /// Update an existing user
    async fn update(&self, user: UserAccount) -> Result<()>;

    /// Delete a user; associated profile, progress and feedback rows
    /// cascade with it
    async fn delete(&self, id: &str) -> Result<()>;

    /// List all users, optionally narrowed to one role
    async fn list(&self, role: Option<Role>) -> Result<Vec<UserAccount>>;

    /// List student accounts matching the filter
    async fn list_students(&self, filter: &StudentFilter) -> Result<Vec<UserAccount>>;

    /// Point the given students at a teacher; returns how many rows changed
    async fn assign_teacher(&self, teacher_id: &str, student_ids: &[String]) -> Result<usize>;
}
