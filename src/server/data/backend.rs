use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::{
    model::entity::Entity,
    server::{
        error::{proxy::ProxyError, Error},
        service::retry::RetryContext,
    },
};

/// User agent sent with every backend request
pub static USER_AGENT: &str = concat!("lotus/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the backend collection API.
///
/// Paths are relative to the configured base URL (e.g. `Clients/7`). Responses with status 404
/// become [`ProxyError::NotFound`], any other non-2xx status becomes
/// [`ProxyError::RemoteStatus`]. `GET` and `PUT` requests are retried on transient failures;
/// `POST`, `PATCH` and `DELETE` are sent once.
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryContext,
}

impl BackendClient {
    /// Creates a client with a per-request `timeout` and up to `max_attempts` attempts for
    /// retried requests.
    pub fn new(base_url: &str, timeout: Duration, max_attempts: u32) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryContext::new().with_max_attempts(max_attempts),
        })
    }

    /// Replaces the retry policy, e.g. to shorten backoff in tests
    pub fn with_retry(mut self, retry: RetryContext) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, Error> {
        self.send(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: &Entity) -> Result<Value, Error> {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Entity) -> Result<Value, Error> {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &Entity) -> Result<Value, Error> {
        self.send(Method::PATCH, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.send(Method::DELETE, path, &[], None).await?;

        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Entity>,
    ) -> Result<Value, Error> {
        if method == Method::GET || method == Method::PUT {
            let description = format!("{} {}", method, path);

            self.retry
                .execute_with_retry(&description, || {
                    self.send_once(method.clone(), path, query, body)
                })
                .await
        } else {
            self.send_once(method, path, query, body).await
        }
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Entity>,
    ) -> Result<Value, Error> {
        let url = format!("{}/{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ProxyError::NotFound(path.to_string()).into());
        }
        if !status.is_success() {
            return Err(ProxyError::RemoteStatus {
                method: method.to_string(),
                path: path.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}
