use chrono::NaiveDate;
use convoca_core::api::ApiClient;
use convoca_core::config::ClientConfig;
use convoca_core::dashboard::{summarize_collection, CollectionSummary};
use convoca_core::models::{Collection, CollectionId, Document};
use convoca_core::permissions::PermissionRecord;
use convoca_core::AppState;
use serde::Serialize;

use crate::commands::common::{
    format_checklist_lines, format_summary_lines, normalize_collection_id,
};
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct FetchOutput {
    pub summary: CollectionSummary,
    pub permissions: PermissionRecord,
    pub documents: Vec<Document>,
}

/// Profile values overlaid with `CONVOCA_*` environment variables.
pub fn resolve_client_config(
    config: &CliProfilesConfig,
    profile_name: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, CliError> {
    let profile_name = config.resolve_profile_name(profile_name);
    let client_config = config
        .profile(&profile_name)
        .map(CliProfile::to_client_config)
        .unwrap_or_default()
        .with_overrides(lookup);

    if client_config.api_base_url.is_none() {
        return Err(CliError::ApiNotConfigured);
    }
    Ok(client_config)
}

/// Load the collection and merge its documents through the shared cache.
pub async fn fetch_collection(
    client: &ApiClient,
    state: &AppState,
    id: &CollectionId,
) -> Result<Collection, CliError> {
    let mut collection = client.get_collection(id).await?;
    for document in &collection.documents {
        state.cache_document(id, document).await;
    }
    collection.documents = client.refresh_documents(state, id).await?;
    Ok(collection)
}

pub async fn run_fetch(
    id: &str,
    as_json: bool,
    profile_name: Option<&str>,
    today: NaiveDate,
) -> Result<(), CliError> {
    let collection_id = normalize_collection_id(id)?;
    let profiles = CliProfilesConfig::load().map_err(CliError::Config)?;
    let client_config =
        resolve_client_config(&profiles, profile_name, |key| std::env::var(key).ok())?;
    let client = ApiClient::new(&client_config)?;
    let state = AppState::new();

    match client.get_access_info().await {
        Ok(access) => state.set_access(access).await,
        Err(error) => tracing::warn!("could not load access info: {}", error),
    }

    let collection = fetch_collection(&client, &state, &collection_id).await?;
    let output = FetchOutput {
        summary: summarize_collection(&collection, today),
        permissions: state.permissions_for(Some(&collection_id)).await,
        documents: collection.documents,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for line in format_summary_lines(&output.summary) {
        println!("{line}");
    }
    println!(
        "Permisos: {}",
        output.permissions.template_name().unwrap_or("custom")
    );
    println!();
    for line in format_checklist_lines(&output.documents) {
        println!("{line}");
    }

    Ok(())
}
