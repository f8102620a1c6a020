//! Append-only collection history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of change recorded in a collection's history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HistoryAction {
    Created,
    Updated,
    DocumentAdded,
    DocumentRemoved,
    DocumentUploaded,
    GuideAttached,
    CollaboratorAdded,
    CollaboratorRemoved,
    /// Action name the client does not model explicitly
    Other(String),
}

impl HistoryAction {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::DocumentAdded => "document_added",
            Self::DocumentRemoved => "document_removed",
            Self::DocumentUploaded => "document_uploaded",
            Self::GuideAttached => "guide_attached",
            Self::CollaboratorAdded => "collaborator_added",
            Self::CollaboratorRemoved => "collaborator_removed",
            Self::Other(action) => action,
        }
    }
}

impl From<String> for HistoryAction {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "created" => Self::Created,
            "updated" => Self::Updated,
            "document_added" => Self::DocumentAdded,
            "document_removed" => Self::DocumentRemoved,
            "document_uploaded" => Self::DocumentUploaded,
            "guide_attached" => Self::GuideAttached,
            "collaborator_added" => Self::CollaboratorAdded,
            "collaborator_removed" => Self::CollaboratorRemoved,
            _ => Self::Other(value),
        }
    }
}

impl From<HistoryAction> for String {
    fn from(value: HistoryAction) -> Self {
        value.as_str().to_string()
    }
}

/// One history log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: HistoryAction,
    /// Display name of the acting user
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub details: Option<String>,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(
        action: HistoryAction,
        user: impl Into<String>,
        timestamp: DateTime<Utc>,
        details: Option<String>,
    ) -> Self {
        Self {
            action,
            user: user.into(),
            timestamp,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_known_names_round_trip() {
        let action = HistoryAction::from("document_uploaded".to_string());
        assert_eq!(action, HistoryAction::DocumentUploaded);
        assert_eq!(String::from(action), "document_uploaded");
    }

    #[test]
    fn test_action_keeps_unknown_names() {
        let action = HistoryAction::from("exported".to_string());
        assert_eq!(action, HistoryAction::Other("exported".to_string()));
        assert_eq!(action.as_str(), "exported");
    }
}
