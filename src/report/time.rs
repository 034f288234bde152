use chrono::{DateTime, Utc};

use crate::date_util;
use crate::model::{Project, Task, TaskStatus};

/// Mean days from creation to completion over the `Done` tasks with a
/// valid timestamp pair. Tasks missing either timestamp (or carrying
/// an unparseable one) are excluded from the average, not zeroed.
pub fn avg_task_completion_days(tasks: &[&Task]) -> f64 {
    let spans: Vec<f64> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .filter_map(|t| {
            let created = t.created_instant()?;
            let completed = t.completed_instant()?;
            Some(date_util::span_days(created, completed))
        })
        .collect();
    finite_avg(&spans)
}

/// Mean days from project creation to its latest task completion, over
/// projects whose (non-empty) scoped task set is fully `Done`. When no
/// task in a completed project carries a valid completion timestamp,
/// `now` approximates the finish. Spans clamp at zero; a project with
/// an unparseable creation timestamp is excluded.
pub fn avg_project_completion_days(
    projects: &[&Project],
    tasks: &[&Task],
    now: DateTime<Utc>,
) -> f64 {
    let mut spans = Vec::new();

    for project in projects {
        let project_tasks: Vec<&&Task> = tasks
            .iter()
            .filter(|t| t.project_id() == Some(project.id.as_str()))
            .collect();
        if project_tasks.is_empty()
            || !project_tasks.iter().all(|t| t.status == TaskStatus::Done)
        {
            continue;
        }
        let Some(created) = project.created_instant() else {
            log::debug!(
                "project {} has no parseable createdAt, excluded from completion average",
                project.id
            );
            continue;
        };
        let finished = project_tasks
            .iter()
            .filter_map(|t| t.completed_instant())
            .max()
            .unwrap_or(now);
        spans.push(date_util::span_days(created, finished).max(0.0));
    }

    finite_avg(&spans)
}

/// Average rounded to a tenth of a day; any numeric instability (empty
/// input, non-finite arithmetic) resolves to `0`.
fn finite_avg(spans: &[f64]) -> f64 {
    if spans.is_empty() {
        return 0.0;
    }
    let avg = spans.iter().sum::<f64>() / spans.len() as f64;
    let rounded = super::round1(avg);
    if rounded.is_finite() {
        rounded
    } else {
        0.0
    }
}
