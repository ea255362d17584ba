//! Teacher-to-student feedback types

use serde::{Deserialize, Serialize};

use crate::errors::SolveTrackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    Improvement,
    Appreciation,
    Suggestion,
    Warning,
}

impl FeedbackCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackCategory::Improvement => "improvement",
            FeedbackCategory::Appreciation => "appreciation",
            FeedbackCategory::Suggestion => "suggestion",
            FeedbackCategory::Warning => "warning",
        }
    }
}

impl Default for FeedbackCategory {
    fn default() -> Self {
        FeedbackCategory::Suggestion
    }
}

impl std::str::FromStr for FeedbackCategory {
    type Err = SolveTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "improvement" => Ok(FeedbackCategory::Improvement),
            "appreciation" => Ok(FeedbackCategory::Appreciation),
            "suggestion" => Ok(FeedbackCategory::Suggestion),
            "warning" => Ok(FeedbackCategory::Warning),
            other => {
                Err(SolveTrackError::InvalidInput(format!("unknown feedback category: {other}")))
            }
        }
    }
}

/// Feedback left by a teacher for an assigned student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub student_id: String,
    pub teacher_id: String,
    pub message: String,
    pub category: FeedbackCategory,
    pub is_read: bool,
    pub created_at: i64,
}
