use dioxus_logger::tracing;
use serde_json::json;
use tower_sessions::Session;

use crate::{
    model::{
        entity::Entity,
        query::FilterClause,
        reconciler::{Reconciler, SaveOutcome},
        schema::Collection,
        translator::Translator,
        user::{SyncUserDto, SyncUserResponse},
    },
    server::{
        data::{backend::BackendClient, collection::CollectionRepository},
        error::{proxy::ProxyError, Error},
        model::session::user::SessionSyncedUser,
        service::auth::Principal,
    },
};

/// Field linking a backend user record to its identity provider user
pub const EXTERNAL_ID_FIELD: &str = "externalId";

pub struct UserService<'a> {
    backend: &'a BackendClient,
    translator: Translator,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(backend: &'a BackendClient) -> Self {
        Self {
            backend,
            translator: Translator::default(),
        }
    }

    /// Ensures a backend user record exists for the signed-in principal.
    ///
    /// The record is looked up by `externalId` (or through the id cached in the session by a
    /// previous sync) and created when missing. When the provider reports a different email
    /// than the stored one, only the email is sent back to the backend.
    ///
    /// The token's `email` claim is authoritative: a body email that differs from it is
    /// rejected, and the body email is only used when the token carries none.
    ///
    /// # Returns
    /// - `Ok(SyncUserResponse)` - Record in frontend naming, with `created` set when new
    /// - `Err(Error)` - Email mismatch, validation, backend or session failure
    pub async fn sync_user(
        &self,
        principal: &Principal,
        session: &Session,
        dto: SyncUserDto,
    ) -> Result<SyncUserResponse, Error> {
        let email = verified_email(principal, &dto)?;
        let repository = CollectionRepository::new(self.backend, Collection::Users);

        let existing = match self.cached_user(&repository, principal, session).await? {
            Some(user) => Some(user),
            None => {
                repository
                    .find_one(FilterClause::eq(EXTERNAL_ID_FIELD, &principal.user_id))
                    .await?
            }
        };

        let (user, created) = match existing {
            Some(user) => (self.reconcile_email(&repository, user, &email).await?, false),
            None => (self.create_user(&repository, principal, email, dto).await?, true),
        };

        let user_id = user.id().ok_or_else(|| ProxyError::UnexpectedResponse {
            path: Collection::Users.backend_path().to_string(),
            reason: "user record has no numeric id".to_string(),
        })?;
        SessionSyncedUser::insert(session, &principal.user_id, user_id).await?;

        tracing::debug!(
            external_id = %principal.user_id,
            user_id = user_id,
            created = created,
            "Synchronized user"
        );

        Ok(SyncUserResponse { user, created })
    }

    /// Backend user record linked to the signed-in principal, in frontend naming
    pub async fn get_current_user(&self, principal: &Principal) -> Result<Entity, Error> {
        let repository = CollectionRepository::new(self.backend, Collection::Users);

        match repository
            .find_one(FilterClause::eq(EXTERNAL_ID_FIELD, &principal.user_id))
            .await?
        {
            Some(user) => Ok(self.translator.to_frontend(user)),
            None => Err(ProxyError::NotFound(format!(
                "{}?{}={}",
                Collection::Users.backend_path(),
                EXTERNAL_ID_FIELD,
                principal.user_id
            ))
            .into()),
        }
    }

    /// Record cached by an earlier sync in this session, if it still belongs to the principal
    /// and still exists.
    async fn cached_user(
        &self,
        repository: &CollectionRepository<'_>,
        principal: &Principal,
        session: &Session,
    ) -> Result<Option<Entity>, Error> {
        let Some(cached) = SessionSyncedUser::get(session).await? else {
            return Ok(None);
        };

        if cached.external_id != principal.user_id {
            SessionSyncedUser::remove(session).await?;
            return Ok(None);
        }

        match repository.get_by_id(cached.user_id).await {
            Ok(user) => Ok(Some(user)),
            Err(Error::ProxyError(ProxyError::NotFound(_))) => {
                tracing::warn!(
                    user_id = cached.user_id,
                    "Cached user no longer exists in backend; cleared it from session"
                );
                SessionSyncedUser::remove(session).await?;

                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn reconcile_email(
        &self,
        repository: &CollectionRepository<'_>,
        user: Entity,
        email: &str,
    ) -> Result<Entity, Error> {
        let mut reconciler = Reconciler::for_collection(Collection::Users);
        reconciler.load_backend(user);
        reconciler.set_field("email", json!(email))?;

        match reconciler.save(repository).await? {
            SaveOutcome::Saved(user) => Ok(user),
            SaveOutcome::Unchanged => reconciler
                .working()
                .cloned()
                .ok_or_else(|| Error::InternalError("reconciler lost its working copy".to_string())),
            SaveOutcome::Failed(message) => Err(Error::InternalError(format!(
                "Failed to update user email: {}",
                message
            ))),
        }
    }

    async fn create_user(
        &self,
        repository: &CollectionRepository<'_>,
        principal: &Principal,
        email: String,
        dto: SyncUserDto,
    ) -> Result<Entity, Error> {
        let mut user = Entity::new()
            .with(EXTERNAL_ID_FIELD, principal.user_id.as_str())
            .with("email", email);
        if let Some(first_name) = dto.first_name {
            user.insert("firstName", json!(first_name));
        }
        if let Some(last_name) = dto.last_name {
            user.insert("lastName", json!(last_name));
        }

        Collection::Users.schema().validate_create(&user)?;

        let created = repository.create(&self.translator.to_backend(user)).await?;

        Ok(self.translator.to_frontend(created))
    }
}

/// Email to store for the principal: the token's claim when present, else the body's
fn verified_email(principal: &Principal, dto: &SyncUserDto) -> Result<String, Error> {
    match &principal.email {
        Some(claimed) if claimed.eq_ignore_ascii_case(&dto.email) => Ok(claimed.clone()),
        Some(_) => Err(ProxyError::InvalidInput(
            "Email does not match the signed-in identity".to_string(),
        )
        .into()),
        None => Ok(dto.email.clone()),
    }
}
