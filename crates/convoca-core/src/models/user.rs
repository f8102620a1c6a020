//! Signed-in user profile

use serde::{Deserialize, Serialize};

/// Profile of the user operating the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

impl UserProfile {
    /// Name recorded in history entries for this user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.email.as_deref().unwrap_or(&self.id)
        } else {
            &self.name
        }
    }
}
