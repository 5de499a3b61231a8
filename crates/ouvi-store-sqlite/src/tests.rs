//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use ouvi_core::{
  classify::{Analysis, Sentiment},
  media::MediaKind,
  store::SubmissionStore,
  submission::{NewSubmission, SubmissionInput, SubmissionStatus},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_submission(protocol: &str) -> NewSubmission {
  NewSubmission {
    protocol:    protocol.to_owned(),
    input:       SubmissionInput {
      category: "Denuncia".into(),
      subject: "Saude".into(),
      body_text: "atendimento ruim".into(),
      citizen_name: Some("Ana".into()),
      email: Some("ana@example.com".into()),
      occurrence_date: NaiveDate::from_ymd_opt(2026, 8, 1),
      ..Default::default()
    },
    media_path:  None,
    media_type:  None,
    status:      SubmissionStatus::Received,
    ai_analysis: Some(Analysis {
      service:    "IZA_AI_V1".into(),
      sentiment:  Sentiment::Negative,
      confidence: 0.9,
      topics:     BTreeSet::from(["general".to_owned()]),
    }),
  }
}

#[tokio::test]
async fn create_assigns_id_and_created_at() {
  let s = store().await;

  let a = s.create(new_submission("OUV-2026-AAAAAA")).await.unwrap();
  let b = s.create(new_submission("OUV-2026-BBBBBB")).await.unwrap();

  assert!(a.id > 0);
  assert!(b.id > a.id);
  assert_eq!(a.status, SubmissionStatus::Received);
  assert_eq!(a.protocol, "OUV-2026-AAAAAA");
}

#[tokio::test]
async fn round_trips_every_field() {
  let s = store().await;

  let created = s.create(new_submission("OUV-2026-CCCCCC")).await.unwrap();
  let fetched = s
    .get_by_protocol("OUV-2026-CCCCCC")
    .await
    .unwrap()
    .expect("row exists");

  assert_eq!(fetched.id, created.id);
  assert_eq!(fetched.category, "Denuncia");
  assert_eq!(fetched.subject, "Saude");
  assert_eq!(fetched.body_text, "atendimento ruim");
  assert_eq!(fetched.citizen_name.as_deref(), Some("Ana"));
  assert_eq!(fetched.email.as_deref(), Some("ana@example.com"));
  assert_eq!(fetched.occurrence_date, NaiveDate::from_ymd_opt(2026, 8, 1));
  assert_eq!(fetched.created_at, created.created_at);

  let analysis = fetched.ai_analysis.expect("analysis round-trips");
  assert_eq!(analysis.sentiment, Sentiment::Negative);
  assert_eq!(analysis.confidence, 0.9);
}

#[tokio::test]
async fn media_columns_round_trip() {
  let s = store().await;

  let mut new = new_submission("OUV-2026-DDDDDD");
  new.media_path = Some("uploads/OUV-2026-DDDDDD_foto.png".into());
  new.media_type = Some(MediaKind::Image);

  let created = s.create(new).await.unwrap();
  assert_eq!(created.media_type, Some(MediaKind::Image));
  assert_eq!(
    created.media_path.as_deref(),
    Some("uploads/OUV-2026-DDDDDD_foto.png")
  );
}

#[tokio::test]
async fn absent_optionals_stay_null() {
  let s = store().await;

  let mut new = new_submission("OUV-2026-EEEEEE");
  new.input.citizen_name = None;
  new.input.email = None;
  new.input.occurrence_date = None;
  new.ai_analysis = None;

  let created = s.create(new).await.unwrap();
  assert!(created.citizen_name.is_none());
  assert!(created.email.is_none());
  assert!(created.occurrence_date.is_none());
  assert!(created.media_path.is_none());
  assert!(created.media_type.is_none());
  assert!(created.ai_analysis.is_none());
}

#[tokio::test]
async fn duplicate_protocol_is_rejected() {
  let s = store().await;

  s.create(new_submission("OUV-2026-FFFFFF")).await.unwrap();
  let err = s.create(new_submission("OUV-2026-FFFFFF")).await.unwrap_err();

  assert!(matches!(err, Error::ProtocolTaken(p) if p == "OUV-2026-FFFFFF"));

  // The failed insert must not have left a second row behind.
  let found = s.get_by_protocol("OUV-2026-FFFFFF").await.unwrap();
  assert!(found.is_some());
}

#[tokio::test]
async fn unknown_protocol_returns_none() {
  let s = store().await;
  let found = s.get_by_protocol("OUV-2026-ZZZZZZ").await.unwrap();
  assert!(found.is_none());
}
