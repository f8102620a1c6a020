//! Explicit application state shared by every client surface.
//!
//! One `AppState` is created at startup and handed to whatever needs it.
//! It owns the document cache, the signed-in user and their access summary.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{DocumentCache, RefreshTicket};
use crate::models::{CollectionId, Document, DocumentId, UserProfile};
use crate::permissions::{get_permissions, AccessInfo, PermissionRecord};

#[derive(Debug, Default)]
struct StateInner {
    cache: DocumentCache,
    access: AccessInfo,
    user: Option<UserProfile>,
}

/// Cloneable handle to the shared client state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    inner: Arc<RwLock<StateInner>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the signed-in user and their access summary.
    pub async fn sign_in(&self, user: UserProfile, access: AccessInfo) {
        let mut inner = self.inner.write().await;
        tracing::debug!(user = %user.id, admin = access.is_admin, "signed in");
        inner.user = Some(user);
        inner.access = access;
    }

    /// Forget the user, their access and every cached document.
    pub async fn sign_out(&self) {
        let mut inner = self.inner.write().await;
        inner.user = None;
        inner.access = AccessInfo::default();
        inner.cache.clear_all();
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.inner.read().await.user.clone()
    }

    pub async fn access(&self) -> AccessInfo {
        self.inner.read().await.access.clone()
    }

    pub async fn set_access(&self, access: AccessInfo) {
        self.inner.write().await.access = access;
    }

    pub async fn permissions_for(&self, collection_id: Option<&CollectionId>) -> PermissionRecord {
        get_permissions(&self.inner.read().await.access, collection_id)
    }

    pub async fn begin_refresh(&self) -> RefreshTicket {
        self.inner.write().await.cache.begin_refresh()
    }

    pub async fn cache_document(&self, collection_id: &CollectionId, document: &Document) {
        self.inner.write().await.cache.cache(collection_id, document);
    }

    pub async fn cached_document(
        &self,
        collection_id: &CollectionId,
        document_id: &DocumentId,
    ) -> Option<Document> {
        self.inner
            .read()
            .await
            .cache
            .get(collection_id, document_id)
            .cloned()
    }

    pub async fn cached_documents(&self, collection_id: &CollectionId) -> Vec<Document> {
        self.inner.read().await.cache.documents(collection_id)
    }

    pub async fn merge_documents(
        &self,
        collection_id: &CollectionId,
        server_docs: &[Document],
    ) -> Vec<Document> {
        self.inner.write().await.cache.merge(collection_id, server_docs)
    }

    pub async fn merge_documents_with_ticket(
        &self,
        ticket: RefreshTicket,
        collection_id: &CollectionId,
        server_docs: &[Document],
    ) -> Vec<Document> {
        self.inner
            .write()
            .await
            .cache
            .merge_with_ticket(ticket, collection_id, server_docs)
    }

    pub async fn remove_document(
        &self,
        collection_id: &CollectionId,
        document_id: &DocumentId,
    ) -> Option<Document> {
        self.inner.write().await.cache.remove(collection_id, document_id)
    }

    pub async fn invalidate(&self, collection_id: &CollectionId) {
        self.inner.write().await.cache.invalidate(collection_id);
    }
}
