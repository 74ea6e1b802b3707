//! End-to-end tests of the change-tracking reconciler against a recording transport.
//!
//! The transport stands in for the collection API: it records every request it receives and
//! replies with a scripted result.

use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use lotus::model::{
    entity::Entity,
    reconciler::{EntityTransport, ReconcileError, Reconciler, SaveOutcome},
    schema::Collection,
};
use serde_json::{json, Value};

fn entity(value: Value) -> Entity {
    Entity::try_from(value).unwrap()
}

/// Transport recording each `(id, payload)` request and replying with `reply`
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<(i64, Entity)>>,
    reply: Option<Result<Value, String>>,
}

impl RecordingTransport {
    fn replying(reply: Result<Value, String>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: Some(reply),
        }
    }

    fn requests(&self) -> Vec<(i64, Entity)> {
        self.requests.lock().unwrap().clone()
    }
}

impl EntityTransport for RecordingTransport {
    fn update(&self, id: i64, payload: Entity) -> impl Future<Output = Result<Entity, String>> {
        self.requests.lock().unwrap().push((id, payload.clone()));
        let reply = match &self.reply {
            Some(Ok(value)) => Ok(entity(value.clone())),
            Some(Err(message)) => Err(message.clone()),
            None => Ok(payload),
        };

        async move { reply }
    }
}

fn staff_profile() -> Value {
    json!({
        "id": 4,
        "email": "ann@example.com",
        "firstName": "Ann",
        "primary_phone": "555-0100",
        "role": "staff",
        "updatedAt": "2024-01-10T09:00:00.000Z",
    })
}

/// Tests that saving without edits never reaches the transport.
///
/// Expected: SaveOutcome::Unchanged and no request
#[tokio::test]
async fn unchanged_entity_makes_no_request() {
    let transport = RecordingTransport::default();
    let mut reconciler = Reconciler::for_collection(Collection::Users);
    reconciler.load_backend(entity(staff_profile()));

    reconciler
        .set_field("firstName", json!("Annie"))
        .unwrap();
    reconciler.set_field("firstName", json!("Ann")).unwrap();
    let outcome = reconciler.save(&transport).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Unchanged);
    assert!(transport.requests().is_empty());
}

/// Tests that a save sends only the changed fields, translated, plus the identity field.
///
/// Expected: PATCH payload {"primary_phone", "email"} and a clean reconciler afterwards
#[tokio::test]
async fn sends_translated_delta_with_identity() {
    let transport = RecordingTransport::replying(Ok(json!({
        "id": 4,
        "email": "ann@example.com",
        "primary_phone": "555-0177",
        "updatedAt": "2024-03-01T10:00:00.000Z",
    })));
    let mut reconciler = Reconciler::for_collection(Collection::Users);
    reconciler.load_backend(entity(staff_profile()));

    reconciler
        .set_field("primaryPhone", json!("555-0177"))
        .unwrap();
    let outcome = reconciler.save(&transport).await.unwrap();

    assert_eq!(
        transport.requests(),
        vec![(
            4,
            entity(json!({ "primary_phone": "555-0177", "email": "ann@example.com" }))
        )]
    );
    let SaveOutcome::Saved(saved) = outcome else {
        panic!("expected a saved outcome, got {:?}", outcome);
    };
    assert_eq!(saved.get("primaryPhone"), Some(&json!("555-0177")));
    assert!(!reconciler.has_changes());
    assert!(reconciler.error().is_none());
}

/// Tests that edits made while a save is in flight survive the server's reply.
///
/// Expected: the in-flight field is re-baselined and the later edit is still pending
#[tokio::test]
async fn keeps_edits_made_during_save() {
    let mut reconciler = Reconciler::for_collection(Collection::Users);
    reconciler.load_backend(entity(staff_profile()));

    reconciler
        .set_field("firstName", json!("Annie"))
        .unwrap();
    let pending = reconciler.begin_save().unwrap().unwrap();
    assert!(reconciler.is_saving());

    reconciler
        .set_field("primaryPhone", json!("555-0188"))
        .unwrap();
    let outcome = reconciler.complete_save(
        pending,
        Ok(entity(json!({ "id": 4, "firstName": "Annie" }))),
    );

    assert!(matches!(outcome, SaveOutcome::Saved(_)));
    assert!(!reconciler.is_saving());
    assert!(reconciler.has_changes());
    assert_eq!(
        reconciler.compute_delta(),
        entity(json!({ "primaryPhone": "555-0188" }))
    );
}

/// Tests a transport failure.
///
/// Expected: SaveOutcome::Failed, error recorded, edits kept and the error callback invoked
#[tokio::test]
async fn failed_save_keeps_edits() {
    let failures = Arc::new(Mutex::new(Vec::<String>::new()));
    let recorded = failures.clone();
    let transport = RecordingTransport::replying(Err("backend unavailable".to_string()));
    let mut reconciler = Reconciler::for_collection(Collection::Clients)
        .on_error(move |message| recorded.lock().unwrap().push(message.to_string()));
    reconciler.load_backend(entity(json!({ "id": 9, "firstName": "Sam", "zip_code": "97201" })));

    reconciler.set_field("zipCode", json!("97035")).unwrap();
    let outcome = reconciler.save(&transport).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Failed("backend unavailable".to_string()));
    assert_eq!(reconciler.error(), Some("backend unavailable"));
    assert!(reconciler.has_changes());
    assert_eq!(
        reconciler.working().and_then(|w| w.get("zipCode")),
        Some(&json!("97035"))
    );
    assert_eq!(*failures.lock().unwrap(), vec!["backend unavailable".to_string()]);
}

/// Tests that a field failing its schema is rejected before the transport is called.
///
/// Expected: Err(ReconcileError::Validation) and no request
#[tokio::test]
async fn invalid_field_is_rejected_locally() {
    let transport = RecordingTransport::default();
    let mut reconciler = Reconciler::for_collection(Collection::Users);
    reconciler.load_backend(entity(staff_profile()));

    reconciler.set_field("email", json!("not-an-email")).unwrap();
    let result = reconciler.save(&transport).await;

    assert!(matches!(result, Err(ReconcileError::Validation(_))));
    assert!(transport.requests().is_empty());
    assert!(reconciler.error().is_some());
    assert!(!reconciler.is_saving());
}

/// Tests the success callback after a save.
///
/// Expected: callback invoked once with the re-baselined working copy
#[tokio::test]
async fn success_callback_receives_saved_entity() {
    let saved = Arc::new(Mutex::new(None::<Entity>));
    let recorded = saved.clone();
    let transport = RecordingTransport::default();
    let mut reconciler = Reconciler::for_collection(Collection::Notes)
        .on_success(move |entity| *recorded.lock().unwrap() = Some(entity.clone()));
    reconciler.load(entity(json!({ "id": 2, "content": "Intake call" })));

    reconciler
        .set_field("content", json!("Intake call, follow up Friday"))
        .unwrap();
    reconciler.save(&transport).await.unwrap();

    let saved = saved.lock().unwrap().clone().unwrap();
    assert_eq!(saved.get("content"), Some(&json!("Intake call, follow up Friday")));
    assert_eq!(saved.id(), Some(2));
}

/// Tests saving before anything was loaded.
///
/// Expected: Err(ReconcileError::NotLoaded)
#[tokio::test]
async fn save_requires_loaded_entity() {
    let transport = RecordingTransport::default();
    let mut reconciler = Reconciler::new();

    let result = reconciler.save(&transport).await;

    assert_eq!(result, Err(ReconcileError::NotLoaded));
}
