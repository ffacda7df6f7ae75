//! Todo entity, classification enums, and mutation payloads.
//!
//! The backend owns every [`Todo`]; the client only caches copies and
//! sends [`TodoInput`] payloads for create/update. Status transitions are
//! not constrained here: the client reflects whatever the backend assigns.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a todo title in characters.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Maximum length of a todo description in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_OPEN: &str = "open";
pub const STATUS_STARTED: &str = "started";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Lifecycle status of a todo as reported by the backend.
///
/// Unrecognised wire values are kept in [`TodoStatus::Unknown`] so a single
/// odd row never fails decoding of a whole page. A `null` status decodes as
/// [`TodoStatus::Open`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub enum TodoStatus {
    #[default]
    Open,
    Started,
    Completed,
    Cancelled,
    Unknown(String),
}

impl TodoStatus {
    /// Return the wire representation of a status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => STATUS_OPEN,
            Self::Started => STATUS_STARTED,
            Self::Completed => STATUS_COMPLETED,
            Self::Cancelled => STATUS_CANCELLED,
            Self::Unknown(raw) => raw,
        }
    }

    /// Completed and cancelled todos are terminal; they are never overdue.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl From<String> for TodoStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            STATUS_OPEN => Self::Open,
            STATUS_STARTED => Self::Started,
            STATUS_COMPLETED => Self::Completed,
            STATUS_CANCELLED => Self::Cancelled,
            _ => Self::Unknown(raw),
        }
    }
}

impl<'de> Deserialize<'de> for TodoStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?
            .map(Self::from)
            .unwrap_or_default())
    }
}

impl From<TodoStatus> for String {
    fn from(status: TodoStatus) -> Self {
        match status {
            TodoStatus::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Urgent,
    NotUrgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Important,
    NotImportant,
}

/// Eisenhower quadrant of a fully classified todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// Urgent and important.
    Do,
    /// Important, not urgent.
    Schedule,
    /// Urgent, not important.
    Delegate,
    /// Neither urgent nor important.
    Eliminate,
}

impl Quadrant {
    /// Quadrant for a given urgency/importance pair.
    pub fn classify(urgency: Urgency, importance: Importance) -> Self {
        match (urgency, importance) {
            (Urgency::Urgent, Importance::Important) => Self::Do,
            (Urgency::NotUrgent, Importance::Important) => Self::Schedule,
            (Urgency::Urgent, Importance::NotImportant) => Self::Delegate,
            (Urgency::NotUrgent, Importance::NotImportant) => Self::Eliminate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Do => "Do first",
            Self::Schedule => "Schedule",
            Self::Delegate => "Delegate",
            Self::Eliminate => "Eliminate",
        }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A todo record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TodoStatus,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub importance: Option<Importance>,
    #[serde(default)]
    pub due_date: Option<Date>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub project_id: Option<DbId>,
    #[serde(default)]
    pub organization_id: Option<DbId>,
}

impl Todo {
    /// A todo is unclassified iff both urgency and importance are absent.
    pub fn is_unclassified(&self) -> bool {
        self.urgency.is_none() && self.importance.is_none()
    }

    /// Quadrant of the todo, or `None` unless both axes are set.
    pub fn quadrant(&self) -> Option<Quadrant> {
        match (self.urgency, self.importance) {
            (Some(u), Some(i)) => Some(Quadrant::classify(u, i)),
            _ => None,
        }
    }
}

/// Read-only project lookup used for list headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub organization_id: Option<DbId>,
}

/// Read-only organization lookup used for list headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Payload for creating or updating a todo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoInput {
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub category: Option<String>,
    pub urgency: Option<Urgency>,
    pub importance: Option<Importance>,
    pub due_date: Option<Date>,
    pub project_id: Option<DbId>,
    pub organization_id: Option<DbId>,
}

impl TodoInput {
    /// Minimal open todo with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_project(mut self, project_id: DbId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_due_date(mut self, due_date: Date) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Copy the editable fields of an existing todo.
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            status: todo.status.clone(),
            category: todo.category.clone(),
            urgency: todo.urgency,
            importance: todo.importance,
            due_date: todo.due_date,
            project_id: todo.project_id,
            organization_id: todo.organization_id,
        }
    }

    /// Validate the payload before it is sent to the backend.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        if let Some(ref desc) = self.description {
            validate_description(desc)?;
        }
        Ok(())
    }
}

/// Urgency/importance assignment made from the "plan" dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanInput {
    pub urgency: Urgency,
    pub importance: Importance,
    /// Replaces the due date when set; otherwise the current one is kept.
    pub due_date: Option<Date>,
}

impl PlanInput {
    /// Apply the plan on top of an existing todo, yielding an update payload.
    pub fn apply_to(&self, todo: &Todo) -> TodoInput {
        let mut input = TodoInput::from_todo(todo);
        input.urgency = Some(self.urgency);
        input.importance = Some(self.importance);
        if self.due_date.is_some() {
            input.due_date = self.due_date;
        }
        input
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Title must be non-blank and within [`MAX_TITLE_LENGTH`].
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Description may be empty but must stay within [`MAX_DESCRIPTION_LENGTH`].
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample() -> Todo {
        Todo {
            id: 7,
            title: "Write report".to_string(),
            description: Some("<p>Quarterly</p>".to_string()),
            status: TodoStatus::Started,
            category: Some("work".to_string()),
            urgency: None,
            importance: None,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 5),
            created_at: Utc.with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap(),
            project_id: Some(3),
            organization_id: None,
        }
    }

    // -- status --------------------------------------------------------------

    #[test]
    fn status_decodes_known_values() {
        let status: TodoStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, TodoStatus::Completed);
    }

    #[test]
    fn status_keeps_unknown_values() {
        let status: TodoStatus = serde_json::from_str("\"blocked\"").unwrap();
        assert_eq!(status, TodoStatus::Unknown("blocked".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"blocked\"");
    }

    #[test]
    fn null_status_decodes_as_open() {
        let json = r#"{"id":1,"title":"t","created_at":"2025-01-01T00:00:00Z","status":null}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.status, TodoStatus::Open);
    }

    #[test]
    fn terminal_statuses() {
        assert!(TodoStatus::Completed.is_terminal());
        assert!(TodoStatus::Cancelled.is_terminal());
        assert!(!TodoStatus::Open.is_terminal());
        assert!(!TodoStatus::Started.is_terminal());
        assert!(!TodoStatus::Unknown("x".into()).is_terminal());
    }

    // -- classification ------------------------------------------------------

    #[test]
    fn unclassified_requires_both_axes_absent() {
        let mut todo = sample();
        assert!(todo.is_unclassified());

        todo.urgency = Some(Urgency::Urgent);
        assert!(!todo.is_unclassified());

        todo.urgency = None;
        todo.importance = Some(Importance::NotImportant);
        assert!(!todo.is_unclassified());
    }

    #[test]
    fn quadrant_needs_full_classification() {
        let mut todo = sample();
        todo.urgency = Some(Urgency::Urgent);
        assert_eq!(todo.quadrant(), None);

        todo.importance = Some(Importance::Important);
        assert_eq!(todo.quadrant(), Some(Quadrant::Do));
    }

    #[test]
    fn quadrant_classify_covers_all_pairs() {
        assert_eq!(
            Quadrant::classify(Urgency::NotUrgent, Importance::Important),
            Quadrant::Schedule
        );
        assert_eq!(
            Quadrant::classify(Urgency::Urgent, Importance::NotImportant),
            Quadrant::Delegate
        );
        assert_eq!(
            Quadrant::classify(Urgency::NotUrgent, Importance::NotImportant),
            Quadrant::Eliminate
        );
    }

    // -- decoding ------------------------------------------------------------

    #[test]
    fn todo_decodes_with_missing_optional_fields() {
        let json = r#"{"id": 1, "title": "t", "created_at": "2025-01-01T00:00:00Z"}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.status, TodoStatus::Open);
        assert!(todo.is_unclassified());
        assert!(todo.due_date.is_none());
    }

    #[test]
    fn todo_decodes_classification() {
        let json = r#"{"id": 1, "title": "t", "created_at": "2025-01-01T00:00:00Z",
            "urgency": "not_urgent", "importance": "important", "due_date": "2025-02-03"}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.urgency, Some(Urgency::NotUrgent));
        assert_eq!(todo.importance, Some(Importance::Important));
        assert_eq!(todo.due_date, NaiveDate::from_ymd_opt(2025, 2, 3));
    }

    // -- validation ----------------------------------------------------------

    #[test]
    fn blank_title_rejected() {
        assert!(TodoInput::new("   ").validate().is_err());
        assert!(TodoInput::new("").validate().is_err());
    }

    #[test]
    fn long_title_rejected() {
        let title = "a".repeat(MAX_TITLE_LENGTH + 1);
        let err = validate_title(&title).unwrap_err();
        assert!(err.to_string().contains("maximum length"));
    }

    #[test]
    fn long_description_rejected() {
        let mut input = TodoInput::new("ok");
        input.description = Some("d".repeat(MAX_DESCRIPTION_LENGTH + 1));
        assert!(input.validate().is_err());
    }

    #[test]
    fn valid_input_accepted() {
        assert!(TodoInput::new("Buy milk").with_project(1).validate().is_ok());
    }

    // -- plan ----------------------------------------------------------------

    #[test]
    fn plan_sets_classification_and_keeps_other_fields() {
        let todo = sample();
        let plan = PlanInput {
            urgency: Urgency::Urgent,
            importance: Importance::NotImportant,
            due_date: None,
        };

        let input = plan.apply_to(&todo);
        assert_eq!(input.urgency, Some(Urgency::Urgent));
        assert_eq!(input.importance, Some(Importance::NotImportant));
        assert_eq!(input.title, todo.title);
        assert_eq!(input.status, TodoStatus::Started);
        assert_eq!(input.due_date, todo.due_date);
        assert_eq!(input.project_id, Some(3));
    }

    #[test]
    fn plan_replaces_due_date_when_given() {
        let todo = sample();
        let new_due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let plan = PlanInput {
            urgency: Urgency::NotUrgent,
            importance: Importance::Important,
            due_date: Some(new_due),
        };
        assert_eq!(plan.apply_to(&todo).due_date, Some(new_due));
    }
}
