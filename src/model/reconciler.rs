//! Change tracking and partial updates for a single entity being edited.
//!
//! A [`Reconciler`] keeps the last known server state of an entity (the snapshot) next to the
//! copy being edited (the working copy). Saving sends only the fields that differ, translated to
//! backend naming, and re-baselines from the server's reply.
//!
//! Saving is split into [`Reconciler::begin_save`] and [`Reconciler::complete_save`] so a UI can
//! keep calling [`Reconciler::set_field`] while the request is in flight; [`Reconciler::save`]
//! composes the two around an [`EntityTransport`].

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

use crate::model::{
    entity::Entity,
    schema::{Collection, Schema, ValidationError, EXCLUDED_FROM_DELTA},
    translator::Translator,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("No entity has been loaded")]
    NotLoaded,
    #[error("Loaded entity has no numeric id")]
    MissingId,
    #[error("A save is already in progress")]
    SaveInProgress,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Issues a partial update for one entity.
///
/// `payload` is backend-shaped and holds only the changed fields plus the identity field;
/// the returned entity is the server's view of the record in either naming convention.
pub trait EntityTransport {
    fn update(&self, id: i64, payload: Entity) -> impl Future<Output = Result<Entity, String>>;
}

/// A save that has been started and awaits the server's reply.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSave {
    id: i64,
    /// Frontend-shaped values of the fields in flight
    sent: Entity,
    payload: Entity,
}

impl PendingSave {
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Backend-shaped request body
    pub fn payload(&self) -> &Entity {
        &self.payload
    }

    /// Frontend names of the fields included in the request
    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.sent.fields()
    }
}

/// Result of a save attempt that got past the guards.
#[derive(Clone, Debug, PartialEq)]
pub enum SaveOutcome {
    /// Nothing differed from the snapshot; no request was made
    Unchanged,
    Saved(Entity),
    Failed(String),
}

type SuccessCallback = Box<dyn FnMut(&Entity) + Send>;
type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Tracks edits to one entity and stages minimal partial updates.
pub struct Reconciler {
    translator: Translator,
    schema: Option<&'static Schema>,
    identity_field: Option<&'static str>,
    snapshot: Option<Entity>,
    working: Option<Entity>,
    has_changes: bool,
    saving: bool,
    error: Option<String>,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("snapshot", &self.snapshot)
            .field("working", &self.working)
            .field("has_changes", &self.has_changes)
            .field("saving", &self.saving)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    /// Reconciler without schema validation or identity field
    pub fn new() -> Self {
        Self {
            translator: Translator::default(),
            schema: None,
            identity_field: None,
            snapshot: None,
            working: None,
            has_changes: false,
            saving: false,
            error: None,
            on_success: None,
            on_error: None,
        }
    }

    /// Reconciler validating against the collection's schema and sending its identity field
    pub fn for_collection(collection: Collection) -> Self {
        let schema = collection.schema();

        Self {
            schema: Some(schema),
            identity_field: schema.identity_field,
            ..Self::new()
        }
    }

    /// Called with the re-baselined working copy after every successful save
    pub fn on_success(mut self, callback: impl FnMut(&Entity) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Called with the error message after every failed save
    pub fn on_error(mut self, callback: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn snapshot(&self) -> Option<&Entity> {
        self.snapshot.as_ref()
    }

    pub fn working(&self) -> Option<&Entity> {
        self.working.as_ref()
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sets the baseline from a frontend-shaped entity, discarding any edits
    pub fn load(&mut self, entity: Entity) {
        self.snapshot = Some(entity.clone());
        self.working = Some(entity);
        self.has_changes = false;
        self.error = None;
    }

    /// Sets the baseline from a backend-shaped entity
    pub fn load_backend(&mut self, entity: Entity) {
        let entity = self.translator.to_frontend(entity);
        self.load(entity);
    }

    /// Edits one field of the working copy and rescans for differences.
    ///
    /// The rescan covers every field, so editing a field back to its original value clears
    /// `has_changes` again.
    pub fn set_field(
        &mut self,
        name: impl Into<String>,
        value: Value,
    ) -> Result<(), ReconcileError> {
        let (Some(snapshot), Some(working)) = (&self.snapshot, &mut self.working) else {
            return Err(ReconcileError::NotLoaded);
        };

        working.insert(name, value);
        self.has_changes = differs(snapshot, working);

        Ok(())
    }

    /// Drops a field from the working copy and rescans for differences.
    ///
    /// A field the snapshot never had stops counting as changed once removed.
    pub fn remove_field(&mut self, name: &str) -> Result<(), ReconcileError> {
        let (Some(snapshot), Some(working)) = (&self.snapshot, &mut self.working) else {
            return Err(ReconcileError::NotLoaded);
        };

        working.remove(name);
        self.has_changes = differs(snapshot, working);

        Ok(())
    }

    /// Changed fields of the working copy, frontend-shaped, excluding identity and
    /// bookkeeping fields
    pub fn compute_delta(&self) -> Entity {
        match (&self.snapshot, &self.working) {
            (Some(snapshot), Some(working)) => changed_fields(snapshot, working)
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect(),
            _ => Entity::new(),
        }
    }

    /// Discards edits, restoring the working copy from the snapshot
    pub fn reset(&mut self) {
        self.working = self.snapshot.clone();
        self.has_changes = false;
    }

    /// Starts a save: guards, validates, and stages the translated delta.
    ///
    /// Returns `Ok(None)` when nothing changed. A validation failure is recorded as the
    /// reconciler's error, reported through the error callback and returned; local state is
    /// otherwise left untouched.
    pub fn begin_save(&mut self) -> Result<Option<PendingSave>, ReconcileError> {
        let (Some(snapshot), Some(working)) = (&self.snapshot, &self.working) else {
            return Err(ReconcileError::NotLoaded);
        };

        if self.saving {
            return Err(ReconcileError::SaveInProgress);
        }

        if !self.has_changes {
            return Ok(None);
        }

        let id = snapshot.id().ok_or(ReconcileError::MissingId)?;
        let sent = self.compute_delta();

        let mut request = sent.clone();
        if let Some(identity) = self.identity_field {
            if let Some(value) = working.get(identity) {
                request.insert(identity, value.clone());
            }
        }

        if let Err(err) = self.validate(&request) {
            self.fail(err.to_string());
            return Err(err.into());
        }

        self.saving = true;
        self.error = None;

        Ok(Some(PendingSave {
            id,
            sent,
            payload: self.translator.to_backend(request),
        }))
    }

    /// Finishes a save started with [`Reconciler::begin_save`].
    ///
    /// On success only the fields that were in flight are re-baselined: the snapshot takes the
    /// server's value, and the working copy takes it unless the field was edited again after
    /// the request was sent. On failure the working copy is left as is.
    pub fn complete_save(
        &mut self,
        pending: PendingSave,
        result: Result<Entity, String>,
    ) -> SaveOutcome {
        self.saving = false;

        let response = match result {
            Ok(response) => self.translator.to_frontend(response),
            Err(message) => {
                self.fail(message.clone());
                return SaveOutcome::Failed(message);
            }
        };

        let (Some(snapshot), Some(working)) = (&mut self.snapshot, &mut self.working) else {
            // Reloaded while in flight; the new baseline already supersedes this save
            return SaveOutcome::Saved(response);
        };

        for (field, sent_value) in pending.sent {
            let server_value = response
                .get(&field)
                .cloned()
                .unwrap_or_else(|| sent_value.clone());

            if working.get(&field) == Some(&sent_value) {
                working.insert(field.clone(), server_value.clone());
            }
            snapshot.insert(field, server_value);
        }

        self.has_changes = differs(snapshot, working);
        self.error = None;

        let saved = working.clone();
        if let Some(callback) = self.on_success.as_mut() {
            callback(&saved);
        }

        SaveOutcome::Saved(saved)
    }

    /// Saves pending changes through `transport`.
    ///
    /// No request is made when nothing changed. Overlapping saves on the same reconciler are
    /// rejected with [`ReconcileError::SaveInProgress`].
    pub async fn save<T: EntityTransport>(
        &mut self,
        transport: &T,
    ) -> Result<SaveOutcome, ReconcileError> {
        let Some(pending) = self.begin_save()? else {
            return Ok(SaveOutcome::Unchanged);
        };

        let result = transport.update(pending.id(), pending.payload().clone()).await;

        Ok(self.complete_save(pending, result))
    }

    fn validate(&self, request: &Entity) -> Result<(), ValidationError> {
        if let Some(identity) = self.identity_field {
            if request.get(identity).map_or(true, Value::is_null) {
                return Err(ValidationError::MissingField(identity.to_string()));
            }
        }

        match self.schema {
            Some(schema) => schema.validate_fields(request),
            None => Ok(()),
        }
    }

    fn fail(&mut self, message: String) {
        if let Some(callback) = self.on_error.as_mut() {
            callback(&message);
        }
        self.error = Some(message);
    }
}

fn changed_fields<'a>(
    snapshot: &'a Entity,
    working: &'a Entity,
) -> impl Iterator<Item = (&'a String, &'a Value)> {
    working.iter().filter(move |(field, value)| {
        !EXCLUDED_FROM_DELTA.contains(&field.as_str()) && snapshot.get(field) != Some(*value)
    })
}

fn differs(snapshot: &Entity, working: &Entity) -> bool {
    changed_fields(snapshot, working).next().is_some()
}
