//! REST client for the collections backend.

use reqwest::{Client, RequestBuilder};

use super::error::ApiError;
use super::wire;
use crate::cache::RefreshTicket;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{Collection, CollectionId, Document};
use crate::permissions::AccessInfo;
use crate::state::AppState;

const COLLECTIONS_PATH: &str = "/convocatorias";
const ACCESS_PATH: &str = "/auth/access";

/// Thin JSON client. Every response passes through the decoding boundary in
/// [`wire`]; nothing here interprets payloads directly.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    access_token: Option<String>,
    client: Client,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.resolved_base_url()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ApiError::from)?;

        tracing::info!(base_url = %base_url, "configured API client");
        Ok(Self {
            base_url,
            access_token: config.access_token(),
            client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_collections(&self) -> Result<Vec<Collection>> {
        let body = self.get_text(COLLECTIONS_PATH).await?;
        wire::decode_collections(&body)
    }

    pub async fn get_collection(&self, id: &CollectionId) -> Result<Collection> {
        let body = self.get_text(&collection_path(id)).await?;
        wire::decode_collection(&body)
    }

    pub async fn list_documents(&self, id: &CollectionId) -> Result<Vec<Document>> {
        let body = self.get_text(&documents_path(id)).await?;
        wire::decode_documents(&body)
    }

    pub async fn get_access_info(&self) -> Result<AccessInfo> {
        let body = self.get_text(ACCESS_PATH).await?;
        wire::decode_access_info(&body)
    }

    /// Fetch a collection's documents and merge them through the shared cache.
    ///
    /// The refresh ticket is taken before the request goes out, so a slower
    /// earlier refresh cannot overwrite the result of a later one. On failure
    /// the cache is left untouched.
    pub async fn refresh_documents(
        &self,
        state: &AppState,
        id: &CollectionId,
    ) -> Result<Vec<Document>> {
        let ticket: RefreshTicket = state.begin_refresh().await;
        match self.list_documents(id).await {
            Ok(documents) => Ok(state
                .merge_documents_with_ticket(ticket, id, &documents)
                .await),
            Err(error) => {
                tracing::warn!(collection = %id, "document refresh failed: {}", error);
                Err(error)
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_text(&self, path: &str) -> std::result::Result<String, ApiError> {
        let request = self.authorize(
            self.client
                .get(self.url(path))
                .header(reqwest::header::ACCEPT, "application/json"),
        );

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let error = ApiError::from_status(status.as_u16(), &body);
            tracing::warn!(path, status = status.as_u16(), "backend request failed");
            return Err(error);
        }
        Ok(body)
    }
}

fn collection_path(id: &CollectionId) -> String {
    format!(
        "{COLLECTIONS_PATH}/{}",
        urlencoding::encode(id.as_str())
    )
}

fn documents_path(id: &CollectionId) -> String {
    format!("{}/documentos", collection_path(id))
}
