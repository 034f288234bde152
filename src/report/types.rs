use serde::Serialize;

use super::status::EffectiveStatus;
use super::trend::Trend;

/// Status-count table. Counts always sum to the scope total: every
/// project/task lands in exactly one bucket.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusCounts {
    #[serde(rename = "To Do")]
    pub to_do: u64,
    #[serde(rename = "In Progress")]
    pub in_progress: u64,
    #[serde(rename = "Done")]
    pub done: u64,
    #[serde(rename = "Overdue")]
    pub overdue: u64,
}

impl StatusCounts {
    pub fn record(&mut self, status: EffectiveStatus) {
        match status {
            EffectiveStatus::ToDo => self.to_do += 1,
            EffectiveStatus::InProgress => self.in_progress += 1,
            EffectiveStatus::Done => self.done += 1,
            EffectiveStatus::Overdue => self.overdue += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.to_do + self.in_progress + self.done + self.overdue
    }
}

/// Percentage table derived from [`StatusCounts`]. Entries are rounded
/// independently and need not sum to exactly 100.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusPercentages {
    #[serde(rename = "To Do")]
    pub to_do: f64,
    #[serde(rename = "In Progress")]
    pub in_progress: f64,
    #[serde(rename = "Done")]
    pub done: f64,
    #[serde(rename = "Overdue")]
    pub overdue: f64,
}

impl StatusPercentages {
    pub fn from_counts(counts: &StatusCounts, total: u64) -> Self {
        StatusPercentages {
            to_do: super::safe_pct(counts.to_do, total),
            in_progress: super::safe_pct(counts.in_progress, total),
            done: super::safe_pct(counts.done, total),
            overdue: super::safe_pct(counts.overdue, total),
        }
    }
}

/// A member listed on an overdue task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedMember {
    pub id: String,
    pub name: Option<String>,
}

/// One overdue task in the flat per-project listing. `assigned_members`
/// is restricted to the reporting department when the report has one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueRecord {
    pub task_id: String,
    pub title: String,
    pub deadline: String,
    pub days_past_due: i64,
    pub assigned_members: Vec<AssignedMember>,
}

/// A task referenced from a department's responsibility group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueTaskRef {
    pub task_id: String,
    pub title: String,
}

/// Overdue tasks attributable to one department's members. A task is
/// deduplicated within the department but may appear in several groups
/// when its assignees span departments.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentOverdueGroup {
    pub department_id: String,
    pub department_name: String,
    pub overdue_tasks: Vec<OverdueTaskRef>,
    pub count: u64,
}

/// One project row in the milestone view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub project_id: String,
    pub project_name: String,
    pub status: EffectiveStatus,
    pub deadline: Option<String>,
    pub overdue_responsibility: Vec<DepartmentOverdueGroup>,
    pub has_overdue_from_other_depts: bool,
}

/// Overdue tasks grouped under their owning project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverdue {
    pub project_id: String,
    pub project_name: String,
    pub overdue_tasks: Vec<OverdueRecord>,
    pub overdue_count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScopeReport {
    pub total_projects: u64,
    pub project_status_counts: StatusCounts,
    pub project_status_percentages: StatusPercentages,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskScopeReport {
    pub total_tasks: u64,
    pub task_status_counts: StatusCounts,
    pub task_status_percentages: StatusPercentages,
    pub overdue_count: u64,
    pub overdue_percentage: f64,
    pub overdue_tasks_by_project: Vec<ProjectOverdue>,
}

/// Per-person performance row. `tasks_involved` is always exactly
/// `todo + in_progress + completed`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPerformance {
    pub user_id: String,
    pub name: String,
    pub role: Option<String>,
    pub todo: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub tasks_involved: u64,
    pub overdue_tasks: u64,
    pub overdue_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPerformance {
    pub team_size: u64,
    pub department_team: Vec<MemberPerformance>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeInfo {
    pub scope_id: String,
    pub scope_name: String,
}

/// The assembled report document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub avg_task_completion_days: f64,
    pub avg_project_completion_days: f64,
    pub productivity_trend: Trend,
    pub completion_rate_this_month: f64,
    pub completion_rate_last_month: f64,
    pub project_scope: ProjectScopeReport,
    pub task_scope: TaskScopeReport,
    pub team_performance: TeamPerformance,
    pub scope_info: ScopeInfo,
}
