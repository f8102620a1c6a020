//! Data models for Convoca

mod collaborator;
mod collection;
mod document;
mod history;
mod id;
mod user;

pub use collaborator::{Collaborator, CollaboratorId, CollaboratorRole};
pub use collection::{Collection, CollectionId};
pub use document::{Document, DocumentId, DocumentStatus, Guide};
pub use history::{HistoryAction, HistoryEntry};
pub use user::UserProfile;
