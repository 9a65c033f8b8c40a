//! HTTP client for the workshop REST backend.

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod store;

pub use client::{CollectionClient, ResourceClient};
pub use errors::{ApiError, ApiResult};
pub use store::{EntityStore, TokenIssuer};
