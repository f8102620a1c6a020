//! Collection ("convocatoria") model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::collaborator::{Collaborator, CollaboratorId};
use super::document::{Document, DocumentId, Guide};
use super::history::{HistoryAction, HistoryEntry};
use super::id::string_id;
use crate::error::{Error, Result};

string_id!(
    /// Identifier of a collection.
    CollectionId
);

/// A grant/application-tracking entity with its document checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Checklist, in display order
    pub documents: Vec<Document>,
    pub collaborators: Vec<Collaborator>,
    /// Append-only change log
    pub history: Vec<HistoryEntry>,
}

impl Collection {
    /// Create an empty collection.
    #[must_use]
    pub fn new(id: CollectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            created_at: None,
            start_date: None,
            end_date: None,
            documents: Vec::new(),
            collaborators: Vec::new(),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn document(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|doc| &doc.id == id)
    }

    fn document_mut(&mut self, id: &DocumentId) -> Result<&mut Document> {
        self.documents
            .iter_mut()
            .find(|doc| &doc.id == id)
            .ok_or_else(|| Error::NotFound(format!("document {id}")))
    }

    /// Add a pending checklist item. Names must be unique (case-insensitive).
    pub fn add_checklist_item(
        &mut self,
        name: &str,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<&Document> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Checklist item name cannot be empty".to_string(),
            ));
        }
        let lowered = name.to_lowercase();
        if self
            .documents
            .iter()
            .any(|doc| doc.name.trim().to_lowercase() == lowered)
        {
            return Err(Error::Conflict(format!("checklist item '{name}' already exists")));
        }

        self.documents.push(Document::new(name));
        self.record(HistoryAction::DocumentAdded, actor, at, Some(name.to_string()));
        Ok(&self.documents[self.documents.len() - 1])
    }

    /// Remove a checklist item, returning it.
    pub fn remove_document(
        &mut self,
        id: &DocumentId,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<Document> {
        let index = self
            .documents
            .iter()
            .position(|doc| &doc.id == id)
            .ok_or_else(|| Error::NotFound(format!("document {id}")))?;
        let removed = self.documents.remove(index);
        self.record(
            HistoryAction::DocumentRemoved,
            actor,
            at,
            Some(removed.name.clone()),
        );
        Ok(removed)
    }

    /// Record an upload against a checklist item.
    pub fn mark_document_uploaded(
        &mut self,
        id: &DocumentId,
        file_name: &str,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(Error::InvalidInput("File name cannot be empty".to_string()));
        }
        let doc = self.document_mut(id)?;
        doc.mark_uploaded(file_name, actor, at);
        let details = format!("{}: {file_name}", doc.name);
        self.record(HistoryAction::DocumentUploaded, actor, at, Some(details));
        Ok(())
    }

    /// Attach or replace the guide of a checklist item.
    pub fn attach_guide(
        &mut self,
        id: &DocumentId,
        guide: Guide,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let doc = self.document_mut(id)?;
        let details = format!("{}: {}", doc.name, guide.file_name);
        doc.attach_guide(guide);
        self.record(HistoryAction::GuideAttached, actor, at, Some(details));
        Ok(())
    }

    /// Add a collaborator. Emails are unique within a collection.
    pub fn add_collaborator(
        &mut self,
        collaborator: Collaborator,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<()> {
        if self
            .collaborators
            .iter()
            .any(|existing| existing.email == collaborator.email)
        {
            return Err(Error::Conflict(format!(
                "{} is already a collaborator",
                collaborator.email
            )));
        }
        let details = format!("{} ({})", collaborator.email, collaborator.role.as_str());
        self.collaborators.push(collaborator);
        self.record(HistoryAction::CollaboratorAdded, actor, at, Some(details));
        Ok(())
    }

    /// Remove a collaborator, returning it.
    pub fn remove_collaborator(
        &mut self,
        id: &CollaboratorId,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<Collaborator> {
        let index = self
            .collaborators
            .iter()
            .position(|collaborator| &collaborator.id == id)
            .ok_or_else(|| Error::NotFound(format!("collaborator {id}")))?;
        let removed = self.collaborators.remove(index);
        self.record(
            HistoryAction::CollaboratorRemoved,
            actor,
            at,
            Some(removed.email.clone()),
        );
        Ok(removed)
    }

    fn record(
        &mut self,
        action: HistoryAction,
        actor: &str,
        at: DateTime<Utc>,
        details: Option<String>,
    ) {
        self.history.push(HistoryEntry::new(action, actor, at, details));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CollaboratorRole, DocumentStatus};

    fn sample() -> Collection {
        let mut collection = Collection::new("conv-1".into(), "Beca 2026");
        collection.documents.push(Document::with_id("d1".into(), "Acta"));
        collection
    }

    #[test]
    fn test_ids_parse_and_convert_alike() {
        let id = " conv-9 ".parse::<CollectionId>().unwrap();
        assert_eq!(id, CollectionId::from("conv-9"));
        assert!("".parse::<CollectionId>().is_err());

        let collaborator = "c1\t".parse::<CollaboratorId>().unwrap();
        assert_eq!(collaborator.as_str(), "c1");
        assert!("  ".parse::<CollaboratorId>().is_err());
    }

    #[test]
    fn test_add_checklist_item_appends_history() {
        let mut collection = sample();
        let now = Utc::now();
        let added = collection
            .add_checklist_item("  Comprobante  ", "ana", now)
            .unwrap()
            .clone();

        assert_eq!(added.name, "Comprobante");
        assert_eq!(added.status, DocumentStatus::Pending);
        assert_eq!(collection.documents.len(), 2);
        assert_eq!(collection.history.len(), 1);
        assert_eq!(collection.history[0].action, HistoryAction::DocumentAdded);
    }

    #[test]
    fn test_add_checklist_item_rejects_duplicates_and_blank() {
        let mut collection = sample();
        let now = Utc::now();
        assert!(matches!(
            collection.add_checklist_item("ACTA", "ana", now),
            Err(Error::Conflict(_))
        ));
        assert!(matches!(
            collection.add_checklist_item("  ", "ana", now),
            Err(Error::InvalidInput(_))
        ));
        assert!(collection.history.is_empty());
    }

    #[test]
    fn test_mark_uploaded_and_remove() {
        let mut collection = sample();
        let now = Utc::now();
        let id = DocumentId::from("d1");

        collection
            .mark_document_uploaded(&id, "acta.pdf", "ana", now)
            .unwrap();
        assert!(collection.document(&id).unwrap().is_completed());

        let removed = collection.remove_document(&id, "ana", now).unwrap();
        assert_eq!(removed.file_name.as_deref(), Some("acta.pdf"));
        assert!(collection.documents.is_empty());
        assert_eq!(collection.history.len(), 2);

        assert!(matches!(
            collection.remove_document(&id, "ana", now),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_attach_guide() {
        let mut collection = sample();
        let guide = Guide {
            id: "g1".to_string(),
            file_name: "instructivo.pdf".to_string(),
            uploaded_at: None,
            uploaded_by: None,
        };
        collection
            .attach_guide(&"d1".into(), guide, "admin", Utc::now())
            .unwrap();
        let doc = collection.document(&"d1".into()).unwrap();
        assert_eq!(doc.guide.as_ref().unwrap().file_name, "instructivo.pdf");
        assert_eq!(collection.history[0].action, HistoryAction::GuideAttached);
    }

    #[test]
    fn test_collaborators_unique_by_email() {
        let mut collection = sample();
        let now = Utc::now();
        let ana = Collaborator::new("c1".into(), "Ana", "ana@example.com", CollaboratorRole::Editor, now)
            .unwrap();
        let again = Collaborator::new("c2".into(), "Ana B", "ANA@example.com", CollaboratorRole::Admin, now)
            .unwrap();

        collection.add_collaborator(ana, "admin", now).unwrap();
        assert!(matches!(
            collection.add_collaborator(again, "admin", now),
            Err(Error::Conflict(_))
        ));

        let removed = collection
            .remove_collaborator(&"c1".into(), "admin", now)
            .unwrap();
        assert_eq!(removed.email, "ana@example.com");
        assert!(collection.collaborators.is_empty());
    }
}
