//! Permission evaluation.
//!
//! Capabilities are derived only from whether the user is a global admin and
//! whether they are an assigned collaborator of the target collection. There
//! are no per-collection overrides.

use serde::{Deserialize, Serialize};

use crate::models::CollectionId;

/// Access summary reported by the backend for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessInfo {
    pub is_admin: bool,
    pub is_collaborator: bool,
    pub assigned_collection_ids: Vec<CollectionId>,
}

impl AccessInfo {
    /// `true` when the user collaborates on `collection_id`.
    #[must_use]
    pub fn is_assigned(&self, collection_id: &CollectionId) -> bool {
        self.is_collaborator && self.assigned_collection_ids.contains(collection_id)
    }
}

/// Fixed capability set for one (user, collection) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct PermissionRecord {
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_add_collaborators: bool,
    pub can_remove_collaborators: bool,
    pub can_upload_documents: bool,
    pub can_delete_documents: bool,
    pub can_manage_checklist: bool,
    pub can_view_history: bool,
}

impl PermissionRecord {
    pub const ADMIN: Self = Self {
        can_view: true,
        can_create: true,
        can_edit: true,
        can_delete: true,
        can_add_collaborators: true,
        can_remove_collaborators: true,
        can_upload_documents: true,
        can_delete_documents: true,
        can_manage_checklist: true,
        can_view_history: true,
    };

    pub const COLLABORATOR: Self = Self {
        can_view: true,
        can_create: false,
        can_edit: true,
        can_delete: false,
        can_add_collaborators: false,
        can_remove_collaborators: false,
        can_upload_documents: true,
        can_delete_documents: false,
        can_manage_checklist: false,
        can_view_history: true,
    };

    pub const NONE: Self = Self {
        can_view: false,
        can_create: false,
        can_edit: false,
        can_delete: false,
        can_add_collaborators: false,
        can_remove_collaborators: false,
        can_upload_documents: false,
        can_delete_documents: false,
        can_manage_checklist: false,
        can_view_history: false,
    };

    /// Name of the template this record equals, if any.
    #[must_use]
    pub fn template_name(&self) -> Option<&'static str> {
        if *self == Self::ADMIN {
            Some("admin")
        } else if *self == Self::COLLABORATOR {
            Some("collaborator")
        } else if *self == Self::NONE {
            Some("none")
        } else {
            None
        }
    }
}

/// Select the permission template for `collection_id`.
///
/// Without a collection id only admins get anything: assignment is always
/// per collection.
#[must_use]
pub fn get_permissions(
    access: &AccessInfo,
    collection_id: Option<&CollectionId>,
) -> PermissionRecord {
    if access.is_admin {
        return PermissionRecord::ADMIN;
    }

    match collection_id {
        Some(id) if access.is_assigned(id) => PermissionRecord::COLLABORATOR,
        _ => PermissionRecord::NONE,
    }
}
