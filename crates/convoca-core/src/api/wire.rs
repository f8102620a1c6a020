//! Typed decoding of backend payloads.
//!
//! Every response shape has exactly one wire type here and converts into one
//! canonical model type. The backend spells the same field several ways
//! (`document_name`, `documentName`, `nombre`, ...); those spellings are
//! folded into one canonical key per field before deserializing, and
//! nowhere else. When a record carries several spellings of one field the
//! first non-empty value wins. Missing required fields,
//! malformed dates and unknown enum values are rejected with
//! [`Error::Decode`]. Keys the client does not model are logged and dropped.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{
    Collaborator, CollaboratorRole, Collection, CollectionId, Document, DocumentStatus, Guide,
    HistoryEntry,
};
use crate::permissions::AccessInfo;
use crate::util::{is_blank, normalize_text_option};

type UnknownKeys = BTreeMap<String, Value>;

/// Identifier sent either as a string or as a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl WireId {
    fn into_string(self, kind: &str) -> Result<String> {
        let value = match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Number(number) => number.to_string(),
        };
        if value.is_empty() {
            return Err(Error::Decode(format!("{kind}: empty id")));
        }
        Ok(value)
    }
}

/// Accepted spellings per canonical field, in precedence order.
type FieldSpellings = &'static [(&'static str, &'static [&'static str])];

const GUIDE_FIELDS: FieldSpellings = &[
    ("id", &["_id", "guide_id", "guideId"]),
    ("file_name", &["fileName", "filename", "nombre_archivo"]),
    ("uploaded_at", &["uploadedAt", "fecha_subida"]),
    ("uploaded_by", &["uploadedBy", "user", "user_name"]),
];

const DOCUMENT_FIELDS: FieldSpellings = &[
    ("id", &["_id", "document_id", "documentId"]),
    ("name", &["document_name", "documentName", "nombre"]),
    ("status", &["estado"]),
    ("file_name", &["fileName", "filename", "nombre_archivo"]),
    ("uploaded_by", &["uploadedBy", "user", "user_name"]),
    ("uploaded_at", &["uploadedAt", "fecha_subida"]),
    ("guide", &["guia"]),
];

const COLLABORATOR_FIELDS: FieldSpellings = &[
    ("id", &["_id", "collaborator_id", "collaboratorId"]),
    ("name", &["user_name", "userName", "nombre"]),
    ("email", &["correo"]),
    ("role", &["rol"]),
    ("added_at", &["addedAt", "created_at", "createdAt"]),
];

const HISTORY_FIELDS: FieldSpellings = &[
    ("action", &["accion", "type"]),
    ("user", &["user_name", "userName", "usuario"]),
    ("timestamp", &["created_at", "createdAt", "fecha"]),
    ("details", &["detalles", "description"]),
];

const COLLECTION_FIELDS: FieldSpellings = &[
    ("id", &["_id", "convocatoria_id", "convocatoriaId"]),
    ("name", &["nombre", "title"]),
    ("description", &["descripcion"]),
    ("created_at", &["createdAt", "fecha_creacion"]),
    ("start_date", &["startDate", "fecha_inicio"]),
    ("end_date", &["endDate", "fecha_fin", "fecha_cierre"]),
    ("documents", &["documentos", "checklist"]),
    ("collaborators", &["colaboradores"]),
    ("history", &["historial"]),
];

const ACCESS_FIELDS: FieldSpellings = &[
    ("is_admin", &["isAdmin"]),
    ("is_collaborator", &["isCollaborator"]),
    (
        "assigned",
        &[
            "assigned_collection_ids",
            "assignedConvocatorias",
            "convocatorias_asignadas",
        ],
    ),
];

/// Wire type whose alternate key spellings are folded before serde sees it.
trait WireShape: DeserializeOwned {
    fn canonicalize(value: &mut Value);
}

#[derive(Debug, Deserialize)]
pub struct WireGuide {
    id: WireId,
    file_name: String,
    #[serde(default)]
    uploaded_at: Option<String>,
    #[serde(default)]
    uploaded_by: Option<String>,
    #[serde(flatten)]
    unknown: UnknownKeys,
}

#[derive(Debug, Deserialize)]
pub struct WireDocument {
    id: WireId,
    name: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    uploaded_by: Option<String>,
    #[serde(default)]
    uploaded_at: Option<String>,
    #[serde(default)]
    guide: Option<WireGuide>,
    #[serde(flatten)]
    unknown: UnknownKeys,
}

#[derive(Debug, Deserialize)]
pub struct WireCollaborator {
    id: WireId,
    name: String,
    email: String,
    role: String,
    added_at: String,
    #[serde(flatten)]
    unknown: UnknownKeys,
}

#[derive(Debug, Deserialize)]
pub struct WireHistoryEntry {
    action: String,
    user: String,
    timestamp: String,
    #[serde(default)]
    details: Option<String>,
    #[serde(flatten)]
    unknown: UnknownKeys,
}

#[derive(Debug, Deserialize)]
pub struct WireCollection {
    id: WireId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    documents: Vec<WireDocument>,
    #[serde(default)]
    collaborators: Vec<WireCollaborator>,
    #[serde(default)]
    history: Vec<WireHistoryEntry>,
    #[serde(flatten)]
    unknown: UnknownKeys,
}

#[derive(Debug, Deserialize)]
pub struct WireAccessInfo {
    is_admin: bool,
    #[serde(default)]
    is_collaborator: bool,
    #[serde(default)]
    assigned: Vec<WireId>,
    #[serde(flatten)]
    unknown: UnknownKeys,
}

impl WireShape for WireGuide {
    fn canonicalize(value: &mut Value) {
        canonicalize_keys(value, GUIDE_FIELDS);
    }
}

impl WireShape for WireDocument {
    fn canonicalize(value: &mut Value) {
        canonicalize_keys(value, DOCUMENT_FIELDS);
        if let Some(guide) = value.get_mut("guide") {
            WireGuide::canonicalize(guide);
        }
    }
}

impl WireShape for WireCollaborator {
    fn canonicalize(value: &mut Value) {
        canonicalize_keys(value, COLLABORATOR_FIELDS);
    }
}

impl WireShape for WireHistoryEntry {
    fn canonicalize(value: &mut Value) {
        canonicalize_keys(value, HISTORY_FIELDS);
    }
}

impl WireShape for WireCollection {
    fn canonicalize(value: &mut Value) {
        canonicalize_keys(value, COLLECTION_FIELDS);
        canonicalize_each::<WireDocument>(value, "documents");
        canonicalize_each::<WireCollaborator>(value, "collaborators");
        canonicalize_each::<WireHistoryEntry>(value, "history");
    }
}

impl WireShape for WireAccessInfo {
    fn canonicalize(value: &mut Value) {
        canonicalize_keys(value, ACCESS_FIELDS);
    }
}

/// Fold every spelling of a field into its canonical key.
///
/// The first non-empty value in precedence order wins; `null`, blank
/// strings and empty arrays only survive when no spelling carries anything
/// else.
fn canonicalize_keys(value: &mut Value, fields: FieldSpellings) {
    let Value::Object(object) = value else {
        return;
    };

    for (canonical, aliases) in fields {
        let mut chosen: Option<Value> = None;
        for key in std::iter::once(canonical).chain(aliases.iter()) {
            let Some(candidate) = object.remove(*key) else {
                continue;
            };
            let replace = match &chosen {
                None => true,
                Some(current) => is_empty_value(current) && !is_empty_value(&candidate),
            };
            if replace {
                chosen = Some(candidate);
            }
        }
        if let Some(chosen) = chosen {
            object.insert((*canonical).to_string(), chosen);
        }
    }
}

fn canonicalize_each<W: WireShape>(value: &mut Value, field: &str) {
    if let Some(Value::Array(items)) = value.get_mut(field) {
        items.iter_mut().for_each(W::canonicalize);
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

impl TryFrom<WireGuide> for Guide {
    type Error = Error;

    fn try_from(value: WireGuide) -> Result<Self> {
        log_unknown_keys("guide", &value.unknown);
        Ok(Self {
            id: value.id.into_string("guide")?,
            file_name: value.file_name.trim().to_string(),
            uploaded_at: parse_optional_timestamp(value.uploaded_at, "guide.uploaded_at")?,
            uploaded_by: normalize_text_option(value.uploaded_by),
        })
    }
}

impl TryFrom<WireDocument> for Document {
    type Error = Error;

    fn try_from(value: WireDocument) -> Result<Self> {
        log_unknown_keys("document", &value.unknown);

        let file_name = normalize_text_option(value.file_name);
        let status = match normalize_text_option(value.status) {
            Some(raw) => DocumentStatus::from_wire(&raw)
                .ok_or_else(|| Error::Decode(format!("document: unknown status '{raw}'")))?,
            None if !is_blank(file_name.as_deref()) => DocumentStatus::Completed,
            None => DocumentStatus::Pending,
        };

        Ok(Self {
            id: value.id.into_string("document")?.into(),
            name: value.name.trim().to_string(),
            status,
            file_name,
            uploaded_by: normalize_text_option(value.uploaded_by),
            uploaded_at: parse_optional_timestamp(value.uploaded_at, "document.uploaded_at")?,
            guide: value.guide.map(Guide::try_from).transpose()?,
        })
    }
}

impl TryFrom<WireCollaborator> for Collaborator {
    type Error = Error;

    fn try_from(value: WireCollaborator) -> Result<Self> {
        log_unknown_keys("collaborator", &value.unknown);

        let role = CollaboratorRole::from_wire(&value.role).ok_or_else(|| {
            Error::Decode(format!("collaborator: unknown role '{}'", value.role))
        })?;
        let added_at = parse_timestamp(&value.added_at, "collaborator.added_at")?;

        Self::new(
            value.id.into_string("collaborator")?.into(),
            value.name,
            value.email,
            role,
            added_at,
        )
        .map_err(|error| Error::Decode(format!("collaborator: {error}")))
    }
}

impl TryFrom<WireHistoryEntry> for HistoryEntry {
    type Error = Error;

    fn try_from(value: WireHistoryEntry) -> Result<Self> {
        log_unknown_keys("history", &value.unknown);
        Ok(Self::new(
            value.action.into(),
            value.user.trim(),
            parse_timestamp(&value.timestamp, "history.timestamp")?,
            normalize_text_option(value.details),
        ))
    }
}

impl TryFrom<WireCollection> for Collection {
    type Error = Error;

    fn try_from(value: WireCollection) -> Result<Self> {
        log_unknown_keys("collection", &value.unknown);

        Ok(Self {
            id: value.id.into_string("collection")?.into(),
            name: value.name.trim().to_string(),
            description: value.description.unwrap_or_default().trim().to_string(),
            created_at: parse_optional_timestamp(value.created_at, "collection.created_at")?,
            start_date: parse_optional_date(value.start_date, "collection.start_date")?,
            end_date: parse_optional_date(value.end_date, "collection.end_date")?,
            documents: convert_all(value.documents)?,
            collaborators: convert_all(value.collaborators)?,
            history: convert_all(value.history)?,
        })
    }
}

impl TryFrom<WireAccessInfo> for AccessInfo {
    type Error = Error;

    fn try_from(value: WireAccessInfo) -> Result<Self> {
        log_unknown_keys("access", &value.unknown);
        let assigned_collection_ids = value
            .assigned
            .into_iter()
            .map(|id| id.into_string("access.assigned").map(Into::into))
            .collect::<Result<Vec<CollectionId>>>()?;

        Ok(Self {
            is_admin: value.is_admin,
            is_collaborator: value.is_collaborator,
            assigned_collection_ids,
        })
    }
}

/// Decode a single collection payload.
pub fn decode_collection(payload: &str) -> Result<Collection> {
    let wire = parse_wire::<WireCollection>(parse_json(payload, "collection")?, "collection")?;
    wire.try_into()
}

/// Decode a list of collections (bare array or `{ "data": [...] }`).
pub fn decode_collections(payload: &str) -> Result<Vec<Collection>> {
    decode_list::<WireCollection, Collection>(payload, "collections")
}

/// Decode a list of documents (bare array or `{ "data": [...] }`).
pub fn decode_documents(payload: &str) -> Result<Vec<Document>> {
    decode_list::<WireDocument, Document>(payload, "documents")
}

/// Decode the signed-in user's access summary.
pub fn decode_access_info(payload: &str) -> Result<AccessInfo> {
    let wire = parse_wire::<WireAccessInfo>(parse_json(payload, "access")?, "access")?;
    wire.try_into()
}

fn parse_json(payload: &str, kind: &str) -> Result<Value> {
    serde_json::from_str(payload).map_err(|error| Error::Decode(format!("{kind}: {error}")))
}

fn parse_wire<W: WireShape>(mut value: Value, kind: &str) -> Result<W> {
    W::canonicalize(&mut value);
    serde_json::from_value(value).map_err(|error| Error::Decode(format!("{kind}: {error}")))
}

fn decode_list<W, T>(payload: &str, kind: &str) -> Result<Vec<T>>
where
    W: WireShape,
    T: TryFrom<W, Error = Error>,
{
    let value = parse_json(payload, kind)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Error::Decode(format!(
                    "{kind}: expected an array or an object with a `data` array"
                )))
            }
        },
        _ => return Err(Error::Decode(format!("{kind}: expected an array"))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let wire = parse_wire::<W>(item, &format!("{kind}[{index}]"))?;
            T::try_from(wire)
        })
        .collect()
}

fn convert_all<W, T>(items: Vec<W>) -> Result<Vec<T>>
where
    T: TryFrom<W, Error = Error>,
{
    items.into_iter().map(T::try_from).collect()
}

fn log_unknown_keys(kind: &str, unknown: &UnknownKeys) {
    if !unknown.is_empty() {
        tracing::warn!(
            kind,
            keys = ?unknown.keys().collect::<Vec<_>>(),
            "ignoring unknown keys in backend payload"
        );
    }
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DD[ T]HH:MM:SS[.f]`
/// (taken as UTC), or a bare date (midnight UTC).
pub fn parse_timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(Error::Decode(format!("{field}: invalid timestamp '{raw}'")))
}

/// Parse a calendar date; full timestamps are truncated to their UTC date.
pub fn parse_date(raw: &str, field: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_timestamp(trimmed, field).map(|timestamp| timestamp.date_naive())
}

fn parse_optional_timestamp(raw: Option<String>, field: &str) -> Result<Option<DateTime<Utc>>> {
    normalize_text_option(raw)
        .map(|raw| parse_timestamp(&raw, field))
        .transpose()
}

fn parse_optional_date(raw: Option<String>, field: &str) -> Result<Option<NaiveDate>> {
    normalize_text_option(raw)
        .map(|raw| parse_date(&raw, field))
        .transpose()
}

#[cfg(test)]
mod tests;
