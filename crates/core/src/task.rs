//! Task Domain Types
//!
//! The task entity as owned by storage, plus the draft shape the creation
//! path produces before an id is assigned. Serde field names match the
//! storage column names (`due_date`, `estimated_duration`).

use serde::{Deserialize, Serialize};

/// Task priority. Always one of the three enumerated literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse a free-form label from an extraction payload.
    ///
    /// Lenient on case; returns None for anything that is not one of the
    /// three literals so the caller can apply its own default.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    /// The canonical display literal
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task status. Always one of the three enumerated literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl Status {
    /// The canonical display literal
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::ToDo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    /// Parse the canonical literal back from storage
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "To Do" => Some(Status::ToDo),
            "In Progress" => Some(Status::InProgress),
            "Done" => Some(Status::Done),
            _ => None,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::ToDo
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A task as read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Storage-assigned identifier
    pub id: String,
    /// Short title of the task
    pub summary: String,
    /// Optional longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RFC 3339 date-time, always parseable
    pub due_date: String,
    /// Free-form duration string, e.g. "2h", "1d"
    pub estimated_duration: String,
    pub priority: Priority,
    pub status: Status,
    pub category: String,
    /// Ordered list of external URLs attached to the task
    #[serde(default)]
    pub external_links: Vec<String>,
    /// Optional folder reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    /// RFC 3339 creation timestamp, set by the store
    pub created_at: String,
}

/// The creation-path payload before the store assigns an id and owner.
///
/// Field mapping for persistence: `due_date` and `estimated_duration` land
/// in the columns of the same name; status defaults to "To Do"; the folder
/// reference defaults to none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: String,
    pub estimated_duration: String,
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    pub category: String,
    #[serde(default)]
    pub external_links: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// Partial update for an existing task. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_label() {
        assert_eq!(Priority::from_label("High"), Some(Priority::High));
        assert_eq!(Priority::from_label("  medium "), Some(Priority::Medium));
        assert_eq!(Priority::from_label("LOW"), Some(Priority::Low));
        assert_eq!(Priority::from_label("critical"), None);
    }

    #[test]
    fn test_priority_serialization() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
        let parsed: Priority = serde_json::from_str("\"Medium\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
    }

    #[test]
    fn test_status_serialization_uses_literals() {
        assert_eq!(serde_json::to_string(&Status::ToDo).unwrap(), "\"To Do\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"In Progress\""
        );
        let parsed: Status = serde_json::from_str("\"To Do\"").unwrap();
        assert_eq!(parsed, Status::ToDo);
    }

    #[test]
    fn test_status_from_label_round_trip() {
        for status in [Status::ToDo, Status::InProgress, Status::Done] {
            assert_eq!(Status::from_label(status.as_str()), Some(status));
        }
        assert_eq!(Status::from_label("Blocked"), None);
    }

    #[test]
    fn test_draft_defaults() {
        let json = r#"{
            "summary": "Write report",
            "due_date": "2026-09-06T10:00:00Z",
            "estimated_duration": "2h",
            "priority": "Medium",
            "category": "Work"
        }"#;
        let draft: TaskDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.status, Status::ToDo);
        assert!(draft.folder_id.is_none());
        assert!(draft.external_links.is_empty());
    }
}
