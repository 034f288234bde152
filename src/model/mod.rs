//! Snapshot entity types.
//!
//! These mirror the documents handed over by the persistence layer. The
//! export format is loose: reference fields arrive either as a bare id
//! string or as a populated subdocument, a project's `department` may be
//! a single ref or an array of refs, and timestamp fields are strings
//! that may be missing or unparseable. All of that is normalized here,
//! once, so the report code never branches on shape.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use crate::date_util;

/// Display name for an absent or unresolvable department reference.
pub const UNASSIGNED: &str = "Unassigned";

/// Persisted task status (the schema enum of the tracking system).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

/// A reference to another entity, normalized from either a bare id
/// string or a populated `{ "_id": ..., "name": ... }` document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRef")]
pub struct EntityRef {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRef {
    Id(String),
    Doc {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<RawRef> for EntityRef {
    fn from(raw: RawRef) -> Self {
        match raw {
            RawRef::Id(id) => EntityRef { id, name: None },
            RawRef::Doc { id, name } => EntityRef { id, name },
        }
    }
}

/// A task assignee, normalized from a bare id or a populated user doc.
/// An unpopulated member carries no department and therefore never
/// participates in overdue attribution.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawMember")]
pub struct MemberRef {
    pub id: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub department: Option<EntityRef>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMember {
    Id(String),
    Doc {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        role: Option<String>,
        #[serde(default)]
        department: Option<EntityRef>,
    },
}

impl From<RawMember> for MemberRef {
    fn from(raw: RawMember) -> Self {
        match raw {
            RawMember::Id(id) => MemberRef {
                id,
                name: None,
                role: None,
                department: None,
            },
            RawMember::Doc {
                id,
                name,
                role,
                department,
            } => MemberRef {
                id,
                name,
                role,
                department,
            },
        }
    }
}

/// An embedded subtask. Subtasks ride along in the snapshot and are
/// summarized by the CLI, but the report tables aggregate over tasks.
#[derive(Debug, Clone, Deserialize)]
pub struct Subtask {
    #[serde(default)]
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub assigned_project: Option<EntityRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assigned_team_members: Vec<MemberRef>,
    #[serde(default)]
    pub created_by: Option<EntityRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn deadline_day(&self) -> Option<NaiveDate> {
        self.deadline.as_deref().and_then(date_util::parse_day)
    }

    pub fn created_instant(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(date_util::parse_instant)
    }

    pub fn completed_instant(&self) -> Option<DateTime<Utc>> {
        self.completed_at
            .as_deref()
            .and_then(date_util::parse_instant)
    }

    pub fn project_id(&self) -> Option<&str> {
        self.assigned_project.as_ref().map(|r| r.id.as_str())
    }

    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_team_members.iter().any(|m| m.id == user_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Owning department(s). The legacy scalar form is coerced to a
    /// one-element list at deserialization.
    #[serde(default, deserialize_with = "dept_list")]
    pub department: Vec<EntityRef>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub team_members: Vec<EntityRef>,
    #[serde(default)]
    pub created_by: Option<EntityRef>,
}

impl Project {
    pub fn deadline_day(&self) -> Option<NaiveDate> {
        self.deadline.as_deref().and_then(date_util::parse_day)
    }

    pub fn created_instant(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(date_util::parse_instant)
    }

    pub fn owned_by(&self, department_id: &str) -> bool {
        self.department.iter().any(|d| d.id == department_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub department: Option<EntityRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Resolve a department reference to a display name: populated name
/// first, then the departments list, then [`UNASSIGNED`].
pub fn department_name(dept: Option<&EntityRef>, departments: &[Department]) -> String {
    match dept {
        Some(r) => r
            .name
            .clone()
            .or_else(|| {
                departments
                    .iter()
                    .find(|d| d.id == r.id)
                    .map(|d| d.name.clone())
            })
            .unwrap_or_else(|| UNASSIGNED.to_string()),
        None => UNASSIGNED.to_string(),
    }
}

fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

fn dept_list<'de, D>(de: D) -> Result<Vec<EntityRef>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(EntityRef),
        Many(Vec<EntityRef>),
    }

    Ok(match Option::<OneOrMany>::deserialize(de)? {
        None => Vec::new(),
        Some(OneOrMany::One(r)) => vec![r],
        Some(OneOrMany::Many(rs)) => rs,
    })
}
