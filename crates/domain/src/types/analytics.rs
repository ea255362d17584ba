//! Aggregated analytics types for teacher and admin dashboards

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::progress::Platform;

/// Optional narrowing applied before aggregation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsFilter {
    pub batch: Option<String>,
    pub platform: Option<Platform>,
}

/// Summed counters for one platform across the matching students
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformTotals {
    pub total_solved: i64,
    pub easy_solved: i64,
    pub medium_solved: i64,
    pub hard_solved: i64,
    pub student_count: i64,
}

/// Rounded per-snapshot averages over the matching progress rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AverageProgress {
    pub total_solved: i64,
    pub easy_solved: i64,
    pub medium_solved: i64,
    pub hard_solved: i64,
}

/// One entry of the top-performers list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPerformer {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub batch: Option<String>,
    /// Summed across all of the student's platforms
    pub total_solved: i64,
}

/// Aggregated view over a set of students' snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub total_students: i64,
    /// Keyed by platform name; BTreeMap keeps the output order stable
    pub platforms: BTreeMap<String, PlatformTotals>,
    pub average_progress: AverageProgress,
    pub top_performers: Vec<TopPerformer>,
}
