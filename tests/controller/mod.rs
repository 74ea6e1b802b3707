//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with extractor values, verifying authentication ordering,
//! status mapping and the field naming of proxied records.

mod collection;

use lotus_test_utils::prelude::*;

use crate::util::{json_body, response_json, TestContextExt};
