use std::future::Future;

use serde_json::Value;

use crate::{
    model::{
        api::ListResponse,
        entity::Entity,
        query::{FilterClause, ListQuery},
        reconciler::EntityTransport,
        schema::Collection,
    },
    server::{
        data::backend::BackendClient,
        error::{proxy::ProxyError, Error},
    },
};

/// Typed CRUD access to one backend collection, in backend field naming.
pub struct CollectionRepository<'a> {
    backend: &'a BackendClient,
    collection: Collection,
}

impl<'a> CollectionRepository<'a> {
    /// Creates a new instance of [`CollectionRepository`]
    pub fn new(backend: &'a BackendClient, collection: Collection) -> Self {
        Self {
            backend,
            collection,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Lists records matching `query`.
    ///
    /// The backend answers with either a bare array or a paging envelope; both are normalized
    /// into a [`ListResponse`].
    pub async fn list(&self, query: &ListQuery) -> Result<ListResponse, Error> {
        let path = self.collection.backend_path();
        let value = self.backend.get(path, &query.to_pairs()).await?;

        parse_list(path, value)
    }

    /// First record matching `filter`, if any
    pub async fn find_one(&self, filter: FilterClause) -> Result<Option<Entity>, Error> {
        let query = ListQuery::new().with_filter(filter).with_limit(1);
        let page = self.list(&query).await?;

        Ok(page.data.into_iter().next())
    }

    /// Fetches a record by id, failing with [`ProxyError::NotFound`] when it doesn't exist
    pub async fn get_by_id(&self, id: i64) -> Result<Entity, Error> {
        let path = self.record_path(id);
        let value = self.backend.get(&path, &[]).await?;

        into_entity(&path, value)
    }

    /// Creates a record, returning the backend's stored copy
    pub async fn create(&self, body: &Entity) -> Result<Entity, Error> {
        let path = self.collection.backend_path();
        let value = self.backend.post(path, body).await?;

        into_entity(path, value)
    }

    /// Replaces a record (`PUT`)
    pub async fn replace(&self, id: i64, body: &Entity) -> Result<Entity, Error> {
        let path = self.record_path(id);
        let value = self.backend.put(&path, body).await?;

        into_entity(&path, value)
    }

    /// Partially updates a record (`PATCH`)
    pub async fn patch(&self, id: i64, body: &Entity) -> Result<Entity, Error> {
        let path = self.record_path(id);
        let value = self.backend.patch(&path, body).await?;

        into_entity(&path, value)
    }

    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.backend.delete(&self.record_path(id)).await
    }

    fn record_path(&self, id: i64) -> String {
        format!("{}/{}", self.collection.backend_path(), id)
    }
}

/// Lets a server-side [`Reconciler`](crate::model::reconciler::Reconciler) save through the
/// backend directly.
impl EntityTransport for CollectionRepository<'_> {
    fn update(&self, id: i64, payload: Entity) -> impl Future<Output = Result<Entity, String>> {
        async move { self.patch(id, &payload).await.map_err(|e| e.to_string()) }
    }
}

fn into_entity(path: &str, value: Value) -> Result<Entity, Error> {
    Entity::try_from(value).map_err(|other| {
        ProxyError::UnexpectedResponse {
            path: path.to_string(),
            reason: format!("expected a JSON object, got `{}`", other),
        }
        .into()
    })
}

fn parse_list(path: &str, value: Value) -> Result<ListResponse, Error> {
    let unexpected = |reason: &str| -> Error {
        ProxyError::UnexpectedResponse {
            path: path.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };

    let records = |items: Vec<Value>| -> Result<Vec<Entity>, Error> {
        items
            .into_iter()
            .map(|item| into_entity(path, item))
            .collect()
    };

    match value {
        Value::Array(items) => Ok(ListResponse::single_page(records(items)?)),
        Value::Object(mut envelope) => {
            let Some(Value::Array(items)) = envelope.remove("data") else {
                return Err(unexpected("paging envelope has no `data` array"));
            };
            let data = records(items)?;
            let number = |field: &str, default: u64| {
                envelope
                    .get(field)
                    .and_then(Value::as_u64)
                    .unwrap_or(default)
            };
            let len = data.len() as u64;

            Ok(ListResponse {
                count: number("count", len),
                total: number("total", len),
                page: number("page", 1),
                page_count: number("pageCount", 1),
                data,
            })
        }
        _ => Err(unexpected("expected a record array or paging envelope")),
    }
}
