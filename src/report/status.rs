use chrono::NaiveDate;
use serde::Serialize;

use crate::date_util;
use crate::model::TaskStatus;

/// Derived status for a project or task. Unlike [`TaskStatus`] this
/// includes `Overdue`, which is never persisted — it is computed
/// against the report's reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EffectiveStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
    Overdue,
}

impl EffectiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveStatus::ToDo => "To Do",
            EffectiveStatus::InProgress => "In Progress",
            EffectiveStatus::Done => "Done",
            EffectiveStatus::Overdue => "Overdue",
        }
    }
}

impl std::fmt::Display for EffectiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a status from a set of child task statuses and a deadline.
///
/// Precedence, in order:
/// 1. no tasks → `To Do`
/// 2. past deadline with work remaining → `Overdue` (dominates)
/// 3. everything done → `Done`
/// 4. anything in flight → `In Progress`
/// 5. nothing started → `To Do`
/// 6. mixed Done/To Do with nothing in flight → `In Progress`
///
/// Rule 6 is the historical behavior of the tracking system and is
/// asserted by its tests; do not "fix" it without product confirmation.
pub fn classify(
    statuses: &[TaskStatus],
    deadline: Option<NaiveDate>,
    now: NaiveDate,
) -> EffectiveStatus {
    if statuses.is_empty() {
        return EffectiveStatus::ToDo;
    }

    let all_done = statuses.iter().all(|s| *s == TaskStatus::Done);
    let all_todo = statuses.iter().all(|s| *s == TaskStatus::ToDo);
    let any_in_progress = statuses.iter().any(|s| *s == TaskStatus::InProgress);
    let past_deadline = deadline.is_some_and(|d| date_util::is_past_day(d, now));

    if past_deadline && !all_done {
        EffectiveStatus::Overdue
    } else if all_done {
        EffectiveStatus::Done
    } else if any_in_progress {
        EffectiveStatus::InProgress
    } else if all_todo {
        EffectiveStatus::ToDo
    } else {
        EffectiveStatus::InProgress
    }
}

/// Effective status of a single task from its own status and deadline.
/// This is the one-element case of [`classify`]: a `Done` task can
/// never come out `Overdue`, whatever its deadline says.
pub fn classify_task(
    status: TaskStatus,
    deadline: Option<NaiveDate>,
    now: NaiveDate,
) -> EffectiveStatus {
    classify(&[status], deadline, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now_day() -> NaiveDate {
        day(2025, 6, 15)
    }

    #[test]
    fn test_empty_is_to_do() {
        assert_eq!(classify(&[], None, now_day()), EffectiveStatus::ToDo);
        // Even past a deadline: nothing to be late on
        assert_eq!(
            classify(&[], Some(day(2025, 1, 1)), now_day()),
            EffectiveStatus::ToDo
        );
    }

    #[test]
    fn test_all_done() {
        let statuses = [TaskStatus::Done, TaskStatus::Done];
        assert_eq!(classify(&statuses, None, now_day()), EffectiveStatus::Done);
        // A finished project is never overdue
        assert_eq!(
            classify(&statuses, Some(day(2025, 1, 1)), now_day()),
            EffectiveStatus::Done
        );
    }

    #[test]
    fn test_overdue_dominates() {
        let statuses = [TaskStatus::Done, TaskStatus::InProgress];
        assert_eq!(
            classify(&statuses, Some(day(2025, 6, 1)), now_day()),
            EffectiveStatus::Overdue
        );
        let statuses = [TaskStatus::ToDo];
        assert_eq!(
            classify(&statuses, Some(day(2025, 6, 1)), now_day()),
            EffectiveStatus::Overdue
        );
    }

    #[test]
    fn test_deadline_today_is_not_overdue() {
        let statuses = [TaskStatus::InProgress];
        assert_eq!(
            classify(&statuses, Some(now_day()), now_day()),
            EffectiveStatus::InProgress
        );
    }

    #[test]
    fn test_any_in_progress() {
        let statuses = [TaskStatus::ToDo, TaskStatus::InProgress];
        assert_eq!(
            classify(&statuses, None, now_day()),
            EffectiveStatus::InProgress
        );
    }

    #[test]
    fn test_all_to_do() {
        let statuses = [TaskStatus::ToDo, TaskStatus::ToDo];
        assert_eq!(classify(&statuses, None, now_day()), EffectiveStatus::ToDo);
    }

    #[test]
    fn test_mixed_done_and_to_do_falls_back_to_in_progress() {
        // Done/Done/To Do with no deadline: not Done, not To Do
        let statuses = [TaskStatus::Done, TaskStatus::Done, TaskStatus::ToDo];
        assert_eq!(
            classify(&statuses, None, now_day()),
            EffectiveStatus::InProgress
        );
    }

    #[test]
    fn test_classify_task_done_never_overdue() {
        assert_eq!(
            classify_task(TaskStatus::Done, Some(day(2024, 1, 1)), now_day()),
            EffectiveStatus::Done
        );
    }

    #[test]
    fn test_classify_task_past_deadline() {
        assert_eq!(
            classify_task(TaskStatus::InProgress, Some(day(2025, 6, 10)), now_day()),
            EffectiveStatus::Overdue
        );
        assert_eq!(
            classify_task(TaskStatus::ToDo, Some(day(2025, 6, 10)), now_day()),
            EffectiveStatus::Overdue
        );
        assert_eq!(
            classify_task(TaskStatus::ToDo, None, now_day()),
            EffectiveStatus::ToDo
        );
    }
}
