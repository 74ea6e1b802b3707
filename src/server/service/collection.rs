use dioxus_logger::tracing;

use crate::{
    model::{
        api::ListResponse, entity::Entity, query::ListQuery, schema::Collection,
        translator::Translator,
    },
    server::{data::backend::BackendClient, data::collection::CollectionRepository, error::Error},
};

/// How an update is forwarded to the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateMode {
    /// `PUT`, the body replaces the record
    Replace,
    /// `PATCH`, the body holds only the changed fields
    Partial,
}

/// Validates and translates records crossing between the frontend and the backend.
///
/// Incoming bodies may use either naming convention; they are normalized to frontend naming,
/// checked against the collection schema, then translated to backend naming. Every record
/// returned to the caller is in frontend naming.
pub struct CollectionService<'a> {
    backend: &'a BackendClient,
    translator: Translator,
}

impl<'a> CollectionService<'a> {
    /// Creates a new instance of [`CollectionService`]
    pub fn new(backend: &'a BackendClient) -> Self {
        Self {
            backend,
            translator: Translator::default(),
        }
    }

    pub async fn list(
        &self,
        collection: Collection,
        query: ListQuery,
    ) -> Result<ListResponse, Error> {
        let repository = CollectionRepository::new(self.backend, collection);

        let mut page = repository
            .list(&query.to_backend(&self.translator))
            .await?;
        page.data = page
            .data
            .into_iter()
            .map(|record| self.translator.to_frontend(record))
            .collect();

        Ok(page)
    }

    pub async fn get(&self, collection: Collection, id: i64) -> Result<Entity, Error> {
        let repository = CollectionRepository::new(self.backend, collection);

        let record = repository.get_by_id(id).await?;

        Ok(self.translator.to_frontend(record))
    }

    pub async fn create(&self, collection: Collection, body: Entity) -> Result<Entity, Error> {
        let repository = CollectionRepository::new(self.backend, collection);

        let body = self.translator.to_frontend(body);
        collection.schema().validate_create(&body)?;

        let created = repository
            .create(&self.translator.to_backend(body))
            .await?;

        tracing::debug!(
            collection = %collection,
            id = ?created.id(),
            "Created record"
        );

        Ok(self.translator.to_frontend(created))
    }

    pub async fn update(
        &self,
        collection: Collection,
        id: i64,
        body: Entity,
        mode: UpdateMode,
    ) -> Result<Entity, Error> {
        let repository = CollectionRepository::new(self.backend, collection);

        let body = self.translator.to_frontend(body);
        collection.schema().validate_update(&body)?;
        let body = self.translator.to_backend(body);

        let updated = match mode {
            UpdateMode::Replace => repository.replace(id, &body).await?,
            UpdateMode::Partial => repository.patch(id, &body).await?,
        };

        tracing::debug!(
            collection = %collection,
            id = id,
            fields = body.len(),
            "Updated record"
        );

        Ok(self.translator.to_frontend(updated))
    }

    pub async fn delete(&self, collection: Collection, id: i64) -> Result<(), Error> {
        let repository = CollectionRepository::new(self.backend, collection);

        repository.delete(id).await?;

        tracing::debug!(collection = %collection, id = id, "Deleted record");

        Ok(())
    }
}
