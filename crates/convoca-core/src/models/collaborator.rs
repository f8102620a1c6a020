//! Collaborator model

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::id::string_id;
use crate::error::{Error, Result};

string_id!(
    /// Identifier of a collaborator assignment.
    CollaboratorId
);

/// Access level granted to a collaborator on one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorRole {
    /// Can upload and edit checklist documents
    Editor,
    /// Can also manage the collection itself
    Admin,
}

impl CollaboratorRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "editor" => Some(Self::Editor),
            "admin" | "administrador" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// A user granted access to one specific collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: CollaboratorId,
    pub name: String,
    pub email: String,
    pub role: CollaboratorRole,
    pub added_at: DateTime<Utc>,
}

impl Collaborator {
    /// Create a collaborator record, validating name and email.
    pub fn new(
        id: CollaboratorId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: CollaboratorRole,
        added_at: DateTime<Utc>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_lowercase();

        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Collaborator name cannot be empty".to_string(),
            ));
        }
        if !is_valid_email(&email) {
            return Err(Error::InvalidInput(format!(
                "Collaborator email is not valid: {email}"
            )));
        }

        Ok(Self {
            id,
            name,
            email,
            role,
            added_at,
        })
    }
}

/// Loose structural email check (`local@domain.tld`).
pub fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid regex"))
        .is_match(value.trim())
}
