//! Analytics aggregation - core business logic
//!
//! Pure aggregation over user accounts and progress snapshots. The teacher
//! dashboard sees a cohort report scoped to their assigned students; admins
//! get a system-wide report on top of that.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use solvetrack_domain::{
    AnalyticsFilter, AnalyticsReport, AverageProgress, PlatformTotals, ProgressSnapshot, Result,
    Role, TopPerformer, UserAccount,
};

use crate::sync::ports::ProgressRepository;
use crate::users::ports::{StudentFilter, UserRepository};

const TOP_PERFORMER_LIMIT: usize = 10;

/// Which students a cohort report covers
#[derive(Debug, Clone)]
pub enum AnalyticsScope {
    /// Every approved student
    AllStudents,
    /// Students assigned to this teacher
    Teacher(String),
}

/// System-wide counters for the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct SystemReport {
    pub total_users: i64,
    pub total_students: i64,
    pub total_teachers: i64,
    pub pending_approvals: i64,
    pub total_progress_records: i64,
    /// Keyed by platform name
    pub platforms: BTreeMap<String, PlatformTotals>,
    /// Keyed by batch label: (student count, approved count)
    pub batches: BTreeMap<String, (i64, i64)>,
}

/// Analytics service
pub struct AnalyticsService {
    users: Arc<dyn UserRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl AnalyticsService {
    /// Create a new analytics service
    pub fn new(users: Arc<dyn UserRepository>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { users, progress }
    }

    /// Aggregate progress for the students in scope.
    pub async fn cohort_report(
        &self,
        scope: AnalyticsScope,
        filter: AnalyticsFilter,
    ) -> Result<AnalyticsReport> {
        let student_filter = StudentFilter {
            assigned_teacher: match &scope {
                AnalyticsScope::Teacher(id) => Some(id.clone()),
                AnalyticsScope::AllStudents => None,
            },
            batch: filter.batch.clone(),
            approved_only: true,
        };

        let students = self.users.list_students(&student_filter).await?;
        let ids: Vec<String> = students.iter().map(|s| s.id.clone()).collect();
        let rows = self.progress.list_by_users(&ids, filter.platform).await?;

        Ok(aggregate_cohort(&students, &rows))
    }

    /// System-wide counters across every account and snapshot.
    pub async fn system_report(&self) -> Result<SystemReport> {
        let users = self.users.list(None).await?;
        let student_ids: Vec<String> = users
            .iter()
            .filter(|u| u.role == Role::Student)
            .map(|u| u.id.clone())
            .collect();
        let rows = self.progress.list_by_users(&student_ids, None).await?;

        Ok(aggregate_system(&users, &rows))
    }
}

fn aggregate_cohort(students: &[UserAccount], rows: &[ProgressSnapshot]) -> AnalyticsReport {
    let mut platforms: BTreeMap<String, PlatformTotals> = BTreeMap::new();
    for row in rows {
        let entry = platforms.entry(row.platform.as_str().to_string()).or_default();
        entry.total_solved += row.total_solved;
        entry.easy_solved += row.easy_solved;
        entry.medium_solved += row.medium_solved;
        entry.hard_solved += row.hard_solved;
        entry.student_count += 1;
    }

    let average_progress = if rows.is_empty() {
        AverageProgress::default()
    } else {
        let len = rows.len() as f64;
        let round = |sum: i64| (sum as f64 / len).round() as i64;
        AverageProgress {
            total_solved: round(rows.iter().map(|r| r.total_solved).sum()),
            easy_solved: round(rows.iter().map(|r| r.easy_solved).sum()),
            medium_solved: round(rows.iter().map(|r| r.medium_solved).sum()),
            hard_solved: round(rows.iter().map(|r| r.hard_solved).sum()),
        }
    };

    let mut by_student: BTreeMap<&str, i64> = BTreeMap::new();
    for row in rows {
        *by_student.entry(row.user_id.as_str()).or_default() += row.total_solved;
    }

    let mut top: Vec<TopPerformer> = by_student
        .into_iter()
        .filter_map(|(student_id, total_solved)| {
            students.iter().find(|s| s.id == student_id).map(|student| TopPerformer {
                student_id: student.id.clone(),
                name: student.name.clone(),
                email: student.email.clone(),
                batch: student.batch.clone(),
                total_solved,
            })
        })
        .collect();
    top.sort_by(|a, b| b.total_solved.cmp(&a.total_solved));
    top.truncate(TOP_PERFORMER_LIMIT);

    AnalyticsReport {
        total_students: students.len() as i64,
        platforms,
        average_progress,
        top_performers: top,
    }
}

fn aggregate_system(users: &[UserAccount], rows: &[ProgressSnapshot]) -> SystemReport {
    let mut platforms: BTreeMap<String, PlatformTotals> = BTreeMap::new();
    for row in rows {
        let entry = platforms.entry(row.platform.as_str().to_string()).or_default();
        entry.total_solved += row.total_solved;
        entry.easy_solved += row.easy_solved;
        entry.medium_solved += row.medium_solved;
        entry.hard_solved += row.hard_solved;
        entry.student_count += 1;
    }

    let mut batches: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    for user in users.iter().filter(|u| u.role == Role::Student) {
        if let Some(batch) = &user.batch {
            let entry = batches.entry(batch.clone()).or_default();
            entry.0 += 1;
            if user.is_approved {
                entry.1 += 1;
            }
        }
    }

    SystemReport {
        total_users: users.len() as i64,
        total_students: users.iter().filter(|u| u.role == Role::Student).count() as i64,
        total_teachers: users.iter().filter(|u| u.role == Role::Teacher).count() as i64,
        pending_approvals: users
            .iter()
            .filter(|u| !u.is_approved && u.role != Role::Admin)
            .count() as i64,
        total_progress_records: rows.len() as i64,
        platforms,
        batches,
    }
}
