//! Document (checklist item) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::string_id;
use crate::util::is_blank;

string_id!(
    /// Identifier of a document within a collection.
    DocumentId
);

impl DocumentId {
    /// Generate a client-side id for a checklist item created before the
    /// backend has assigned one (UUID v7, time-sortable).
    #[must_use]
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7().to_string())
    }
}

/// Upload state of a checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// No file uploaded yet
    #[default]
    Pending,
    /// File uploaded
    Completed,
}

impl DocumentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Parse a wire value, accepting the Spanish spellings the backend uses.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Some(Self::Pending),
            "completed" | "completado" | "completada" | "uploaded" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Instructional attachment that accompanies a checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guide {
    pub id: String,
    pub file_name: String,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub uploaded_by: Option<String>,
}

/// One required file within a collection's checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Backend or client-generated identifier
    pub id: DocumentId,
    /// Display name of the required document
    pub name: String,
    /// Upload status
    pub status: DocumentStatus,
    /// Stored file name, once uploaded
    pub file_name: Option<String>,
    /// Who uploaded the file
    pub uploaded_by: Option<String>,
    /// When the file was uploaded
    pub uploaded_at: Option<DateTime<Utc>>,
    /// Optional guide attachment
    pub guide: Option<Guide>,
}

impl Document {
    /// Create a pending checklist item with a client-generated id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(DocumentId::generate(), name)
    }

    /// Create a pending checklist item with a known id.
    #[must_use]
    pub fn with_id(id: DocumentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: DocumentStatus::Pending,
            file_name: None,
            uploaded_by: None,
            uploaded_at: None,
            guide: None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == DocumentStatus::Completed
    }

    /// `true` when a non-blank file name is known for this item.
    #[must_use]
    pub fn has_file(&self) -> bool {
        !is_blank(self.file_name.as_deref())
    }

    /// Record a successful upload.
    pub fn mark_uploaded(
        &mut self,
        file_name: impl Into<String>,
        uploaded_by: impl Into<String>,
        uploaded_at: DateTime<Utc>,
    ) {
        self.file_name = Some(file_name.into());
        self.uploaded_by = Some(uploaded_by.into());
        self.uploaded_at = Some(uploaded_at);
        self.status = DocumentStatus::Completed;
    }

    /// Replace the guide attachment.
    pub fn attach_guide(&mut self, guide: Guide) {
        self.guide = Some(guide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new_is_pending() {
        let doc = Document::new("Acta constitutiva");
        assert_eq!(doc.status, DocumentStatus::Pending);
        assert!(!doc.is_completed());
        assert!(!doc.has_file());
        assert!(!doc.id.as_str().is_empty());
    }

    #[test]
    fn test_generated_ids_unique() {
        assert_ne!(DocumentId::generate(), DocumentId::generate());
    }

    #[test]
    fn test_mark_uploaded_completes() {
        let mut doc = Document::with_id("7".into(), "RFC");
        let at = Utc::now();
        doc.mark_uploaded("rfc.pdf", "ana", at);

        assert!(doc.is_completed());
        assert!(doc.has_file());
        assert_eq!(doc.uploaded_by.as_deref(), Some("ana"));
        assert_eq!(doc.uploaded_at, Some(at));
    }

    #[test]
    fn test_blank_file_name_is_not_a_file() {
        let mut doc = Document::with_id("1".into(), "CV");
        doc.file_name = Some("   ".to_string());
        assert!(!doc.has_file());
    }

    #[test]
    fn test_status_from_wire() {
        assert_eq!(DocumentStatus::from_wire("Completado"), Some(DocumentStatus::Completed));
        assert_eq!(DocumentStatus::from_wire("pending"), Some(DocumentStatus::Pending));
        assert_eq!(DocumentStatus::from_wire("archived"), None);
    }

    #[test]
    fn test_document_id_parse_rejects_blank() {
        assert!(" ".parse::<DocumentId>().is_err());
        assert_eq!("  42 ".parse::<DocumentId>().unwrap().as_str(), "42");
    }

    #[test]
    fn test_document_id_conversions_agree_on_whitespace() {
        let parsed = " 42".parse::<DocumentId>().unwrap();
        assert_eq!(DocumentId::from(" 42"), parsed);
        assert_eq!(DocumentId::from(" 42\n".to_string()), parsed);
        assert_eq!(DocumentId::new("42 "), parsed);
    }
}
