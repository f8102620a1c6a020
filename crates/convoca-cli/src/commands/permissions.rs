use convoca_core::permissions::{get_permissions, AccessInfo, PermissionRecord};

use crate::commands::common::{format_permission_lines, normalize_collection_id};
use crate::error::CliError;

pub fn build_access_info(
    admin: bool,
    collaborator: bool,
    assigned: &[String],
) -> Result<AccessInfo, CliError> {
    let assigned_collection_ids = assigned
        .iter()
        .map(|id| normalize_collection_id(id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AccessInfo {
        is_admin: admin,
        is_collaborator: collaborator,
        assigned_collection_ids,
    })
}

pub fn evaluate_permissions(
    admin: bool,
    collaborator: bool,
    assigned: &[String],
    collection: Option<&str>,
) -> Result<PermissionRecord, CliError> {
    let access = build_access_info(admin, collaborator, assigned)?;
    let collection_id = collection.map(normalize_collection_id).transpose()?;
    Ok(get_permissions(&access, collection_id.as_ref()))
}

pub fn run_permissions(
    admin: bool,
    collaborator: bool,
    assigned: &[String],
    collection: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let record = evaluate_permissions(admin, collaborator, assigned, collection)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        for line in format_permission_lines(&record) {
            println!("{line}");
        }
    }

    Ok(())
}
