//! Feedback service - core business logic

use std::sync::Arc;

use chrono::Utc;
use solvetrack_domain::{Feedback, FeedbackCategory, Result, Role, SolveTrackError};
use uuid::Uuid;

use super::ports::FeedbackRepository;
use crate::users::ports::UserRepository;

/// Teacher-to-student feedback service
pub struct FeedbackService {
    users: Arc<dyn UserRepository>,
    feedback: Arc<dyn FeedbackRepository>,
}

impl FeedbackService {
    /// Create a new feedback service
    pub fn new(users: Arc<dyn UserRepository>, feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { users, feedback }
    }

    /// Record feedback from a teacher for one of their assigned students.
    ///
    /// # Errors
    /// `Validation` for an empty message; `NotFound` when the target is not
    /// a student assigned to the calling teacher.
    pub async fn create(
        &self,
        teacher_id: &str,
        student_id: &str,
        message: &str,
        category: Option<FeedbackCategory>,
    ) -> Result<Feedback> {
        if message.trim().is_empty() {
            return Err(SolveTrackError::Validation("Please provide feedback message".into()));
        }

        let assigned = self
            .users
            .get_by_id(student_id)
            .await?
            .filter(|user| user.role == Role::Student)
            .filter(|user| user.assigned_teacher.as_deref() == Some(teacher_id))
            .is_some();

        if !assigned {
            return Err(SolveTrackError::NotFound(
                "Student not found or not assigned to you".into(),
            ));
        }

        let feedback = Feedback {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            teacher_id: teacher_id.to_string(),
            message: message.trim().to_string(),
            category: category.unwrap_or_default(),
            is_read: false,
            created_at: Utc::now().timestamp(),
        };

        self.feedback.create(feedback.clone()).await?;
        Ok(feedback)
    }

    /// Feedback authored by a teacher, newest first.
    pub async fn list_for_teacher(&self, teacher_id: &str) -> Result<Vec<Feedback>> {
        self.feedback.list_by_teacher(teacher_id).await
    }

    /// Feedback addressed to a student, newest first.
    pub async fn list_for_student(&self, student_id: &str) -> Result<Vec<Feedback>> {
        self.feedback.list_by_student(student_id).await
    }
}
