//! Port interfaces for feedback storage

use async_trait::async_trait;
use solvetrack_domain::{Feedback, Result};

/// Trait for feedback persistence
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Store a new feedback entry
    async fn create(&self, feedback: Feedback) -> Result<()>;

    /// Feedback authored by a teacher, newest first
    async fn list_by_teacher(&self, teacher_id: &str) -> Result<Vec<Feedback>>;

    /// Feedback addressed to a student, newest first
    async fn list_by_student(&self, student_id: &str) -> Result<Vec<Feedback>>;
}
