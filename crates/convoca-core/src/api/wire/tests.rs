use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;

use super::*;
use crate::models::{CollectionId, HistoryAction};

const COLLECTION: &str = r#"
{
  "id": 12,
  "nombre": "Beca de investigación 2026",
  "descripcion": "  Convocatoria anual  ",
  "createdAt": "2026-01-05T10:00:00Z",
  "fecha_inicio": "2026-02-01",
  "endDate": "2026-03-31T23:59:59-06:00",
  "documentos": [
    {
      "id": "d1",
      "document_name": "Acta constitutiva",
      "status": "completed",
      "fileName": "acta.pdf",
      "user_name": "Ana",
      "uploaded_at": "2026-02-03 08:15:00",
      "guide": { "id": 9, "filename": "instructivo.pdf" }
    },
    { "_id": 2, "documentName": "CV", "estado": "pendiente" }
  ],
  "colaboradores": [
    {
      "id": "c1",
      "user_name": "Luis",
      "email": "Luis@Example.com",
      "rol": "editor",
      "added_at": "2026-01-06"
    }
  ],
  "historial": [
    { "accion": "document_uploaded", "usuario": "Ana", "fecha": "2026-02-03T08:15:00Z", "detalles": "acta.pdf" }
  ]
}
"#;

#[test]
fn decode_collection_accepts_alternate_key_spellings() {
    let collection = decode_collection(COLLECTION).unwrap();

    assert_eq!(collection.id, CollectionId::from("12"));
    assert_eq!(collection.name, "Beca de investigación 2026");
    assert_eq!(collection.description, "Convocatoria anual");
    assert_eq!(
        collection.created_at,
        Some(Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap())
    );
    assert_eq!(collection.start_date, NaiveDate::from_ymd_opt(2026, 2, 1));
    assert_eq!(collection.end_date, NaiveDate::from_ymd_opt(2026, 4, 1));

    let acta = &collection.documents[0];
    assert_eq!(acta.name, "Acta constitutiva");
    assert_eq!(acta.status, DocumentStatus::Completed);
    assert_eq!(acta.file_name.as_deref(), Some("acta.pdf"));
    assert_eq!(acta.uploaded_by.as_deref(), Some("Ana"));
    assert_eq!(
        acta.uploaded_at,
        Some(Utc.with_ymd_and_hms(2026, 2, 3, 8, 15, 0).unwrap())
    );
    let guide = acta.guide.as_ref().unwrap();
    assert_eq!(guide.id, "9");
    assert_eq!(guide.file_name, "instructivo.pdf");

    let cv = &collection.documents[1];
    assert_eq!(cv.id.as_str(), "2");
    assert_eq!(cv.status, DocumentStatus::Pending);

    assert_eq!(collection.collaborators[0].email, "luis@example.com");
    assert_eq!(collection.collaborators[0].role, CollaboratorRole::Editor);
    assert_eq!(collection.history[0].action, HistoryAction::DocumentUploaded);
    assert_eq!(collection.history[0].details.as_deref(), Some("acta.pdf"));
}

#[test]
fn status_defaults_from_file_presence() {
    let documents = decode_documents(
        r#"[
            { "id": 1, "name": "A", "file_name": "a.pdf" },
            { "id": 2, "name": "B", "file_name": "  " }
        ]"#,
    )
    .unwrap();

    assert_eq!(documents[0].status, DocumentStatus::Completed);
    assert_eq!(documents[1].status, DocumentStatus::Pending);
    assert_eq!(documents[1].file_name, None);
}

#[test]
fn decode_documents_accepts_data_envelope() {
    let documents =
        decode_documents(r#"{ "data": [ { "id": "x", "name": "Carta" } ], "total": 1 }"#).unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].name, "Carta");
}

#[test]
fn decode_rejects_missing_required_fields() {
    let error = decode_documents(r#"[ { "id": 1 } ]"#).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("documents[0]"), "{message}");
    assert!(message.contains("name"), "{message}");
}

#[test]
fn decode_rejects_unknown_status_and_role() {
    assert!(matches!(
        decode_documents(r#"[ { "id": 1, "name": "A", "status": "archived" } ]"#),
        Err(Error::Decode(_))
    ));

    let payload = r#"{
        "id": 1, "name": "X",
        "collaborators": [ { "id": 1, "name": "L", "email": "l@x.io", "role": "owner", "added_at": "2026-01-01" } ]
    }"#;
    assert!(matches!(decode_collection(payload), Err(Error::Decode(_))));
}

#[test]
fn decode_rejects_malformed_dates() {
    let payload = r#"{ "id": 1, "name": "X", "end_date": "31/03/2026" }"#;
    let error = decode_collection(payload).unwrap_err();
    assert!(error.to_string().contains("collection.end_date"));
}

#[test]
fn decode_rejects_non_list_payloads() {
    assert!(decode_collections(r#"{ "items": [] }"#).is_err());
    assert!(decode_collections("42").is_err());
    assert!(decode_collections("not json").is_err());
}

#[test]
fn unknown_keys_are_collected_not_used() {
    let wire: WireDocument =
        serde_json::from_str(r#"{ "id": 1, "name": "A", "color": "red", "prioridad": 3 }"#).unwrap();
    assert_eq!(
        wire.unknown.keys().cloned().collect::<Vec<_>>(),
        vec!["color".to_string(), "prioridad".to_string()]
    );

    let document = Document::try_from(wire).unwrap();
    assert_eq!(document.name, "A");
}

#[test]
fn decode_access_info_variants() {
    let access = decode_access_info(
        r#"{ "isAdmin": false, "isCollaborator": true, "assignedConvocatorias": [3, "7"] }"#,
    )
    .unwrap();
    assert!(!access.is_admin);
    assert!(access.is_collaborator);
    assert_eq!(
        access.assigned_collection_ids,
        vec![CollectionId::from("3"), CollectionId::from("7")]
    );

    let admin = decode_access_info(r#"{ "is_admin": true }"#).unwrap();
    assert!(admin.is_admin);
    assert!(admin.assigned_collection_ids.is_empty());
}

#[test]
fn empty_ids_are_rejected() {
    assert!(matches!(
        decode_documents(r#"[ { "id": "  ", "name": "A" } ]"#),
        Err(Error::Decode(_))
    ));
}

#[test]
fn parse_timestamp_formats() {
    let expected = Utc.with_ymd_and_hms(2026, 5, 1, 12, 30, 0).unwrap();
    assert_eq!(parse_timestamp("2026-05-01T12:30:00Z", "t").unwrap(), expected);
    assert_eq!(parse_timestamp("2026-05-01T14:30:00+02:00", "t").unwrap(), expected);
    assert_eq!(parse_timestamp("2026-05-01 12:30:00", "t").unwrap(), expected);
    assert_eq!(parse_timestamp("2026-05-01T12:30:00.000", "t").unwrap(), expected);
    assert_eq!(
        parse_timestamp("2026-05-01", "t").unwrap(),
        Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap()
    );
    assert!(parse_timestamp("yesterday", "t").is_err());
}

#[test]
fn duplicate_spellings_of_one_field_are_folded() {
    let documents = decode_documents(
        r#"[
          { "id": 1, "name": "Acta", "document_name": "Acta", "status": "pending" },
          { "id": 2, "name": "CV", "fileName": "cv.pdf", "file_name": "cv.pdf" }
        ]"#,
    )
    .unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].name, "Acta");
    assert_eq!(documents[1].file_name.as_deref(), Some("cv.pdf"));
    assert_eq!(documents[1].status, DocumentStatus::Completed);
}

#[test]
fn first_non_empty_spelling_wins() {
    let documents = decode_documents(
        r#"[
          { "id": 1, "name": "", "documentName": "Acta", "nombre": "Otro",
            "file_name": null, "fileName": "  ", "filename": "acta.pdf" },
          { "id": 2, "_id": 3, "name": "CV", "file_name": "", "fileName": "" }
        ]"#,
    )
    .unwrap();

    assert_eq!(documents[0].name, "Acta");
    assert_eq!(documents[0].file_name.as_deref(), Some("acta.pdf"));
    assert_eq!(documents[1].id.as_str(), "2");
    assert_eq!(documents[1].file_name, None);
}

#[test]
fn nested_records_fold_their_spellings() {
    let collection = decode_collection(
        r#"{
          "id": 5, "name": "Beca", "nombre": "Beca",
          "documents": [],
          "documentos": [
            { "id": "d1", "nombre": "Acta",
              "guia": { "id": 1, "fileName": "guia.pdf", "filename": "guia.pdf" } }
          ],
          "historial": [
            { "action": "created", "accion": "created", "user": "Ana",
              "created_at": "2026-01-01T00:00:00Z", "fecha": "2026-01-01T00:00:00Z" }
          ]
        }"#,
    )
    .unwrap();

    assert_eq!(collection.name, "Beca");
    assert_eq!(collection.documents.len(), 1);
    assert_eq!(
        collection.documents[0].guide.as_ref().map(|guide| guide.file_name.as_str()),
        Some("guia.pdf")
    );
    assert_eq!(collection.history.len(), 1);
    assert_eq!(collection.history[0].action, HistoryAction::Created);
}

#[test]
fn access_info_folds_duplicate_flags() {
    let access = decode_access_info(
        r#"{ "is_admin": null, "isAdmin": true, "assigned": [], "assignedConvocatorias": [4] }"#,
    )
    .unwrap();
    assert!(access.is_admin);
    assert_eq!(access.assigned_collection_ids, vec![CollectionId::from("4")]);
}
