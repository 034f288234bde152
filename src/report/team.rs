use chrono::NaiveDate;

use super::overdue;
use super::types::MemberPerformance;
use crate::model::{Task, TaskStatus, User};

/// Aggregate per-person performance over the scoped task set.
///
/// A person's tasks are the scoped tasks listing them as an assignee;
/// each task lands in exactly one status bucket, so `tasks_involved`
/// is exactly the sum of the three counts. `overdue_rate` is the share
/// of involved tasks currently overdue, `0` for people with no tasks.
pub fn aggregate(users: &[&User], tasks: &[&Task], now: NaiveDate) -> Vec<MemberPerformance> {
    users
        .iter()
        .map(|user| {
            let mut todo = 0u64;
            let mut in_progress = 0u64;
            let mut completed = 0u64;
            let mut overdue_tasks = 0u64;

            for task in tasks.iter().filter(|t| t.is_assigned_to(&user.id)) {
                match task.status {
                    TaskStatus::ToDo => todo += 1,
                    TaskStatus::InProgress => in_progress += 1,
                    TaskStatus::Done => completed += 1,
                }
                if overdue::is_overdue(task, now) {
                    overdue_tasks += 1;
                }
            }

            let tasks_involved = todo + in_progress + completed;
            MemberPerformance {
                user_id: user.id.clone(),
                name: user.name.clone(),
                role: user.role.clone(),
                todo,
                in_progress,
                completed,
                tasks_involved,
                overdue_tasks,
                overdue_rate: super::safe_pct(overdue_tasks, tasks_involved),
            }
        })
        .collect()
}
