use chrono::NaiveDate;

use super::types::{AssignedMember, DepartmentOverdueGroup, OverdueRecord, OverdueTaskRef};
use crate::date_util;
use crate::model::{department_name, Department, Task, TaskStatus};

/// An overdue task with its day-granularity lateness. `days_past_due`
/// is always >= 1: a task due earlier today is not overdue yet.
#[derive(Debug, Clone)]
pub struct OverdueTask<'a> {
    pub task: &'a Task,
    pub deadline: NaiveDate,
    pub days_past_due: i64,
}

/// The overdue predicate: has a parseable deadline, is not `Done`, and
/// the reference day is past the deadline day.
pub fn is_overdue(task: &Task, now: NaiveDate) -> bool {
    if task.status == TaskStatus::Done {
        return false;
    }
    task.deadline_day()
        .is_some_and(|d| date_util::is_past_day(d, now))
}

/// Collect the overdue tasks in input order.
pub fn find_overdue<'a>(tasks: &[&'a Task], now: NaiveDate) -> Vec<OverdueTask<'a>> {
    tasks
        .iter()
        .copied()
        .filter_map(|t| {
            if t.status == TaskStatus::Done {
                return None;
            }
            let deadline = t.deadline_day()?;
            if !date_util::is_past_day(deadline, now) {
                return None;
            }
            Some(OverdueTask {
                task: t,
                deadline,
                days_past_due: date_util::days_between(deadline, now),
            })
        })
        .collect()
}

/// Flatten overdue tasks to report records. When `scope_department` is
/// given, the listed assignees are restricted to that department;
/// organization-wide reports list everyone.
pub fn to_records(overdue: &[OverdueTask], scope_department: Option<&str>) -> Vec<OverdueRecord> {
    overdue
        .iter()
        .map(|o| OverdueRecord {
            task_id: o.task.id.clone(),
            title: o.task.title.clone(),
            deadline: o.deadline.format("%Y-%m-%d").to_string(),
            days_past_due: o.days_past_due,
            assigned_members: o
                .task
                .assigned_team_members
                .iter()
                .filter(|m| match scope_department {
                    Some(dept) => m.department.as_ref().is_some_and(|d| d.id == dept),
                    None => true,
                })
                .map(|m| AssignedMember {
                    id: m.id.clone(),
                    name: m.name.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Attribute overdue tasks to the departments of their assignees.
///
/// A task counts once per distinct department it touches; two assignees
/// from the same department do not double-count it. Assignees without a
/// resolved department attribute nothing. Groups keep first-appearance
/// order so identical inputs serialize identically.
pub fn attribute_by_department(
    overdue: &[OverdueTask],
    departments: &[Department],
) -> Vec<DepartmentOverdueGroup> {
    let mut groups: Vec<DepartmentOverdueGroup> = Vec::new();

    for o in overdue {
        for member in &o.task.assigned_team_members {
            let Some(dept) = member.department.as_ref() else {
                continue;
            };
            let idx = match groups.iter().position(|g| g.department_id == dept.id) {
                Some(i) => i,
                None => {
                    groups.push(DepartmentOverdueGroup {
                        department_id: dept.id.clone(),
                        department_name: department_name(Some(dept), departments),
                        overdue_tasks: Vec::new(),
                        count: 0,
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[idx];
            if !group.overdue_tasks.iter().any(|t| t.task_id == o.task.id) {
                group.overdue_tasks.push(OverdueTaskRef {
                    task_id: o.task.id.clone(),
                    title: o.task.title.clone(),
                });
                group.count += 1;
            }
        }
    }

    groups
}

/// True if any attributed department differs from the report's own.
/// An organization-wide report has no own department and never flags.
pub fn has_other_departments(
    groups: &[DepartmentOverdueGroup],
    scope_department: Option<&str>,
) -> bool {
    match scope_department {
        Some(dept) => groups.iter().any(|g| g.department_id != dept),
        None => false,
    }
}
