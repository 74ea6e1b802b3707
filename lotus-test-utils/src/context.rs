//! Test context structure and utilities.
//!
//! Provides the `TestContext` returned by `TestBuilder`: a mock backend server, an in-memory
//! session, and the mocks registered during the build.

use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use tower_sessions::{MemoryStore, Session};

use crate::{error::TestError, fixtures::factory};

/// Test context structure returned by `TestBuilder`
///
/// # Usage
///
/// ```ignore
/// let test = TestBuilder::new()
///     .with_get_endpoint("/Clients/1", factory::backend_client(1), 1)
///     .build()
///     .await?;
///
/// let backend_url = test.backend_url();
/// let authorization = test.bearer("user_1");
///
/// // Assert all mocks were called
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Session backed by an in-memory store
    pub session: Session,

    /// Mock HTTP server standing in for the backend collection API
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
    backend_url: String,
}

impl TestContext {
    /// Create a new test context with a fresh mock server and empty session.
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let backend_url = server.url();

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        Ok(TestContext {
            session,
            server,
            mocks: Vec::new(),
            backend_url,
        })
    }

    /// Base URL of the mock backend
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// `Authorization` header value carrying a valid identity token for `user_id`
    pub fn bearer(&self, user_id: &str) -> String {
        format!("Bearer {}", factory::identity_token(user_id, None))
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
