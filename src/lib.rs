pub mod date_util;
pub mod error;
pub mod model;
pub mod report;
pub mod scope;
pub mod snapshot;

pub use error::{Error, Result};
pub use model::{Department, EntityRef, MemberRef, Project, Subtask, Task, TaskStatus, User};
pub use report::{
    DepartmentOverdueGroup, MemberPerformance, Milestone, OverdueRecord, Report, Trend,
};
pub use report::status::EffectiveStatus;
pub use scope::{Scope, ScopeView};
pub use snapshot::Snapshot;

use chrono::{DateTime, Utc};

/// Main entry point: a report engine bound to one entity snapshot.
///
/// The engine is a pure function of its snapshot and the reference
/// instant passed to each call; it never reads a clock and never
/// writes anything back, so concurrent report requests need no
/// coordination.
pub struct ReportEngine {
    snapshot: Snapshot,
}

impl ReportEngine {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Access the underlying snapshot (for direct inspection in the CLI).
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Compute the report for an already-validated scope.
    pub fn report(&self, scope: &Scope, now: DateTime<Utc>) -> Report {
        let view = ScopeView::new(&self.snapshot, scope);
        report::assemble(&view, now)
    }

    /// Compute the report for a single department.
    ///
    /// The identifier is validated up front: empty or malformed ids are
    /// caller errors. A well-formed id that matches no department still
    /// produces a (all-zero) report — an empty department is a valid
    /// state, not a lookup failure.
    pub fn department_report(&self, department_id: &str, now: DateTime<Utc>) -> Result<Report> {
        let scope = Scope::department(department_id)?;
        Ok(self.report(&scope, now))
    }

    /// Compute the report for the whole organization.
    pub fn organization_report(&self, now: DateTime<Utc>) -> Report {
        self.report(&Scope::Organization, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot::from_json_str(
            r#"{
                "departments": [{ "_id": "64d000000000000000000001", "name": "Engineering" }],
                "projects": [{
                    "_id": "p1", "name": "Portal",
                    "department": "64d000000000000000000001"
                }],
                "tasks": [{
                    "_id": "t1", "title": "Build", "status": "To Do",
                    "assignedProject": "p1"
                }],
                "users": [{
                    "_id": "u1", "name": "Ada",
                    "department": "64d000000000000000000001"
                }]
            }"#,
        )
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        date_util::parse_instant("2025-06-15T00:00:00Z").unwrap()
    }

    #[test]
    fn test_department_report_validates_scope() {
        let engine = ReportEngine::new(snapshot());
        assert!(matches!(
            engine.department_report("", now()),
            Err(Error::MissingScope)
        ));
        assert!(matches!(
            engine.department_report("dept-1", now()),
            Err(Error::InvalidScope(_))
        ));

        let report = engine
            .department_report("64d000000000000000000001", now())
            .unwrap();
        assert_eq!(report.scope_info.scope_name, "Engineering");
        assert_eq!(report.task_scope.total_tasks, 1);
    }

    #[test]
    fn test_organization_report() {
        let engine = ReportEngine::new(snapshot());
        let report = engine.organization_report(now());
        assert_eq!(report.scope_info.scope_id, "organization");
        assert_eq!(report.project_scope.total_projects, 1);
        assert_eq!(report.team_performance.team_size, 1);
    }
}
