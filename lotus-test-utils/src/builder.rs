//! Declarative test builder.
//!
//! Mock endpoints are queued on the builder and created in order during `build()`, so a test
//! can register several mocks for the same path (e.g. an error followed by a success) and have
//! mockito serve them sequentially.

use mockito::Mock;
use serde_json::Value;

use crate::{error::TestError, fixtures::mockito as endpoints, TestContext};

type MockBuilder = Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>;

/// Builder for declarative test initialization.
pub struct TestBuilder {
    mock_builders: Vec<MockBuilder>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Create a new TestBuilder with no mock endpoints configured.
    pub fn new() -> Self {
        Self {
            mock_builders: Vec::new(),
        }
    }

    /// Add a custom mock endpoint.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use lotus_test_utils::TestBuilder;
    ///
    /// # async fn example() -> Result<(), lotus_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_mock_endpoint(|server| {
    ///         server
    ///             .mock("GET", "/Clients/1")
    ///             .with_status(503)
    ///             .expect(1)
    ///             .create()
    ///     })
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Add a `GET` list endpoint at `path` returning `body` (a record array or paging
    /// envelope) for any query.
    pub fn with_list_endpoint(
        self,
        path: impl Into<String>,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        let path = path.into();
        self.with_mock_endpoint(move |server| {
            endpoints::create_list_endpoint(server, &path, body, expected_requests)
        })
    }

    /// Add a `GET` endpoint at `path` returning a single record.
    pub fn with_get_endpoint(
        self,
        path: impl Into<String>,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        let path = path.into();
        self.with_mock_endpoint(move |server| {
            endpoints::create_get_endpoint(server, &path, body, expected_requests)
        })
    }

    /// Add an endpoint answering `method path` with `status` and no body.
    ///
    /// Use `expected_requests = 0` to assert a request is never made.
    pub fn with_status_endpoint(
        self,
        method: impl Into<String>,
        path: impl Into<String>,
        status: usize,
        expected_requests: usize,
    ) -> Self {
        let method = method.into();
        let path = path.into();
        self.with_mock_endpoint(move |server| {
            endpoints::create_status_endpoint(server, &method, &path, status, expected_requests)
        })
    }

    /// Build the test context, creating every queued mock endpoint in order.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        let mut mocks = Vec::new();
        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}
