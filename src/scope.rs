use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Department, Project, Task, User};
use crate::snapshot::Snapshot;

static RE_OBJECT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());

/// Check if a string looks like a persisted object id (24 hex chars).
pub fn is_object_id(s: &str) -> bool {
    RE_OBJECT_ID.is_match(s)
}

/// The unit one report is computed over: a single department, or the
/// whole organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Organization,
    Department(String),
}

impl Scope {
    /// Validate a department identifier into a scope. An empty id is a
    /// missing-scope error, a non-object-id is malformed; both are
    /// caller-input errors raised before any computation starts. An id
    /// that is well-formed but matches no department is NOT an error —
    /// an empty department is a valid reporting state.
    pub fn department(id: &str) -> Result<Self> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::MissingScope);
        }
        if !is_object_id(id) {
            return Err(Error::InvalidScope(id.to_string()));
        }
        Ok(Scope::Department(id.to_string()))
    }

    pub fn department_id(&self) -> Option<&str> {
        match self {
            Scope::Organization => None,
            Scope::Department(id) => Some(id),
        }
    }
}

/// A borrowed, filtered view of a snapshot for one report request.
///
/// Department scope selects the projects owned by the department, the
/// tasks of those projects (their assignees may sit in other
/// departments — that is what cross-department attribution reports
/// on), and the users who belong to the department.
pub struct ScopeView<'a> {
    pub scope_id: String,
    pub scope_name: String,
    pub department_id: Option<String>,
    pub projects: Vec<&'a Project>,
    pub tasks: Vec<&'a Task>,
    pub users: Vec<&'a User>,
    pub departments: &'a [Department],
}

impl<'a> ScopeView<'a> {
    pub fn new(snapshot: &'a Snapshot, scope: &Scope) -> Self {
        match scope {
            Scope::Organization => ScopeView {
                scope_id: "organization".to_string(),
                scope_name: "Organization".to_string(),
                department_id: None,
                projects: snapshot.projects.iter().collect(),
                tasks: snapshot.tasks.iter().collect(),
                users: snapshot.users.iter().collect(),
                departments: &snapshot.departments,
            },
            Scope::Department(id) => {
                let scope_name = snapshot
                    .departments
                    .iter()
                    .find(|d| &d.id == id)
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| "Unknown Department".to_string());

                let projects: Vec<&Project> = snapshot
                    .projects
                    .iter()
                    .filter(|p| p.owned_by(id))
                    .collect();
                let project_ids: HashSet<&str> =
                    projects.iter().map(|p| p.id.as_str()).collect();

                let tasks: Vec<&Task> = snapshot
                    .tasks
                    .iter()
                    .filter(|t| t.project_id().is_some_and(|pid| project_ids.contains(pid)))
                    .collect();

                let users: Vec<&User> = snapshot
                    .users
                    .iter()
                    .filter(|u| u.department.as_ref().is_some_and(|d| &d.id == id))
                    .collect();

                ScopeView {
                    scope_id: id.clone(),
                    scope_name,
                    department_id: Some(id.clone()),
                    projects,
                    tasks,
                    users,
                    departments: &snapshot.departments,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> Snapshot {
        Snapshot::from_json_str(
            r#"{
                "departments": [
                    { "_id": "64d000000000000000000001", "name": "Engineering" },
                    { "_id": "64d000000000000000000002", "name": "Design" }
                ],
                "projects": [
                    { "_id": "p1", "name": "Portal", "department": "64d000000000000000000001" },
                    { "_id": "p2", "name": "Brand", "department": ["64d000000000000000000002"] },
                    { "_id": "p3", "name": "Shared", "department": [
                        "64d000000000000000000001", "64d000000000000000000002"
                    ] }
                ],
                "tasks": [
                    { "_id": "t1", "title": "a", "status": "To Do", "assignedProject": "p1" },
                    { "_id": "t2", "title": "b", "status": "Done", "assignedProject": "p2" },
                    { "_id": "t3", "title": "c", "status": "To Do", "assignedProject": "p3" },
                    { "_id": "t4", "title": "orphan", "status": "To Do" }
                ],
                "users": [
                    { "_id": "u1", "name": "Ada", "department": "64d000000000000000000001" },
                    { "_id": "u2", "name": "Mel", "department": "64d000000000000000000002" },
                    { "_id": "u3", "name": "Kim" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_scope_validation() {
        assert!(matches!(Scope::department(""), Err(Error::MissingScope)));
        assert!(matches!(Scope::department("   "), Err(Error::MissingScope)));
        assert!(matches!(
            Scope::department("not-an-id"),
            Err(Error::InvalidScope(_))
        ));
        assert!(matches!(
            // Too short
            Scope::department("64d00000"),
            Err(Error::InvalidScope(_))
        ));
        let scope = Scope::department("64d000000000000000000001").unwrap();
        assert_eq!(scope.department_id(), Some("64d000000000000000000001"));
    }

    #[test]
    fn test_is_object_id() {
        assert!(is_object_id("64d000000000000000000001"));
        assert!(is_object_id("ABCDEFabcdef012345678901"));
        assert!(!is_object_id(""));
        assert!(!is_object_id("64d0000000000000000000001")); // 25 chars
        assert!(!is_object_id("zzz000000000000000000001"));
    }

    #[test]
    fn test_organization_view_takes_everything() {
        let snapshot = sample_snapshot();
        let view = ScopeView::new(&snapshot, &Scope::Organization);
        assert_eq!(view.scope_id, "organization");
        assert_eq!(view.scope_name, "Organization");
        assert_eq!(view.projects.len(), 3);
        assert_eq!(view.tasks.len(), 4);
        assert_eq!(view.users.len(), 3);
        assert!(view.department_id.is_none());
    }

    #[test]
    fn test_department_view_filters_by_ownership() {
        let snapshot = sample_snapshot();
        let scope = Scope::department("64d000000000000000000001").unwrap();
        let view = ScopeView::new(&snapshot, &scope);

        assert_eq!(view.scope_name, "Engineering");
        // p1 owned outright, p3 co-owned
        let project_ids: Vec<&str> = view.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(project_ids, vec!["p1", "p3"]);
        // Tasks of those projects only; the orphan task has no project
        let task_ids: Vec<&str> = view.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(task_ids, vec!["t1", "t3"]);
        // Users by department membership
        assert_eq!(view.users.len(), 1);
        assert_eq!(view.users[0].name, "Ada");
    }

    #[test]
    fn test_unresolvable_department_is_empty_not_error() {
        let snapshot = sample_snapshot();
        let scope = Scope::department("64d0000000000000000000ff").unwrap();
        let view = ScopeView::new(&snapshot, &scope);
        assert_eq!(view.scope_name, "Unknown Department");
        assert!(view.projects.is_empty());
        assert!(view.tasks.is_empty());
        assert!(view.users.is_empty());
    }
}
