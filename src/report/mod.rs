pub mod overdue;
pub mod status;
pub mod team;
pub mod time;
pub mod trend;
pub mod types;

pub use trend::Trend;
pub use types::*;

use chrono::{DateTime, Datelike, Utc};

use crate::date_util;
use crate::model::{Task, TaskStatus};
use crate::scope::ScopeView;

/// Round to one decimal place (the report's percentage precision).
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Percentage of `count` in `total`, `0` when the denominator is zero.
pub(crate) fn safe_pct(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(count as f64 / total as f64 * 100.0)
    }
}

/// Assemble the full report for one scoped view.
///
/// Pure and deterministic: `now` is the only clock, nothing is cached
/// between calls, and empty scopes produce zeroed sections rather than
/// errors.
pub fn assemble(view: &ScopeView, now: DateTime<Utc>) -> Report {
    let today = now.date_naive();
    log::debug!(
        "assembling report for scope {} ({} projects, {} tasks, {} users)",
        view.scope_id,
        view.projects.len(),
        view.tasks.len(),
        view.users.len()
    );

    // Project status table + milestone rows, in input order
    let mut project_counts = StatusCounts::default();
    let mut milestones = Vec::with_capacity(view.projects.len());
    for project in &view.projects {
        let project_tasks: Vec<&Task> = view
            .tasks
            .iter()
            .copied()
            .filter(|t| t.project_id() == Some(project.id.as_str()))
            .collect();
        let statuses: Vec<TaskStatus> = project_tasks.iter().map(|t| t.status).collect();
        let project_status = status::classify(&statuses, project.deadline_day(), today);
        project_counts.record(project_status);

        let project_overdue = overdue::find_overdue(&project_tasks, today);
        let responsibility = overdue::attribute_by_department(&project_overdue, view.departments);
        let has_other =
            overdue::has_other_departments(&responsibility, view.department_id.as_deref());
        milestones.push(Milestone {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            status: project_status,
            deadline: project
                .deadline_day()
                .map(|d| d.format("%Y-%m-%d").to_string()),
            overdue_responsibility: responsibility,
            has_overdue_from_other_depts: has_other,
        });
    }
    let total_projects = view.projects.len() as u64;
    debug_assert_eq!(project_counts.total(), total_projects);
    let project_percentages = StatusPercentages::from_counts(&project_counts, total_projects);

    // Task status table over per-task effective status
    let mut task_counts = StatusCounts::default();
    for task in &view.tasks {
        task_counts.record(status::classify_task(
            task.status,
            task.deadline_day(),
            today,
        ));
    }
    let total_tasks = view.tasks.len() as u64;
    debug_assert_eq!(task_counts.total(), total_tasks);
    let task_percentages = StatusPercentages::from_counts(&task_counts, total_tasks);

    // Overdue analysis
    let all_overdue = overdue::find_overdue(&view.tasks, today);
    let overdue_count = all_overdue.len() as u64;
    let overdue_percentage = safe_pct(overdue_count, total_tasks);
    let mut overdue_by_project = Vec::new();
    for project in &view.projects {
        let for_project: Vec<overdue::OverdueTask> = all_overdue
            .iter()
            .filter(|o| o.task.project_id() == Some(project.id.as_str()))
            .cloned()
            .collect();
        if for_project.is_empty() {
            continue;
        }
        let records = overdue::to_records(&for_project, view.department_id.as_deref());
        overdue_by_project.push(ProjectOverdue {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            overdue_count: records.len() as u64,
            overdue_tasks: records,
        });
    }

    // Per-person performance
    let department_team = team::aggregate(&view.users, &view.tasks, today);
    let team_size = view.users.len() as u64;

    // Time metrics
    let avg_task_completion_days = time::avg_task_completion_days(&view.tasks);
    let avg_project_completion_days =
        time::avg_project_completion_days(&view.projects, &view.tasks, now);

    // Completion rates for the current and previous calendar month,
    // feeding the trend signal
    let (completion_rate_this_month, completion_rate_last_month) =
        completion_rates(&view.tasks, now);
    let productivity_trend =
        trend::classify(completion_rate_this_month, completion_rate_last_month);

    Report {
        avg_task_completion_days,
        avg_project_completion_days,
        productivity_trend,
        completion_rate_this_month,
        completion_rate_last_month,
        project_scope: ProjectScopeReport {
            total_projects,
            project_status_counts: project_counts,
            project_status_percentages: project_percentages,
            milestones,
        },
        task_scope: TaskScopeReport {
            total_tasks,
            task_status_counts: task_counts,
            task_status_percentages: task_percentages,
            overdue_count,
            overdue_percentage,
            overdue_tasks_by_project: overdue_by_project,
        },
        team_performance: TeamPerformance {
            team_size,
            department_team,
        },
        scope_info: ScopeInfo {
            scope_id: view.scope_id.clone(),
            scope_name: view.scope_name.clone(),
        },
    }
}

/// Share of the scoped tasks completed in the calendar month of `now`,
/// and in the month before it.
fn completion_rates(tasks: &[&Task], now: DateTime<Utc>) -> (f64, f64) {
    let total = tasks.len() as u64;
    let today = now.date_naive();
    let (this_year, this_month) = (today.year(), today.month());
    let (last_year, last_month) = date_util::previous_month(this_year, this_month);

    let completed_in = |year: i32, month: u32| {
        tasks
            .iter()
            .filter(|t| {
                t.completed_instant()
                    .is_some_and(|c| date_util::in_month(c.date_naive(), year, month))
            })
            .count() as u64
    };

    (
        safe_pct(completed_in(this_year, this_month), total),
        safe_pct(completed_in(last_year, last_month), total),
    )
}
